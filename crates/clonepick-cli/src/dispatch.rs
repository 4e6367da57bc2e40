use anyhow::{Result, bail};
use clonepick_app::{App, PickRequest, PushCheck, PushCheckRequest, RepositorySource};
use clonepick_core::doctor::{CheckState, DoctorReport};
use clonepick_core::oversized::{GIT_LFS_HELP_URL, format_size};
use clonepick_tui::PickExit;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::cli::{CheckPushArgs, Command, PickArgs};

pub fn run_with_deps(command: Command, app: &App<'_>) -> Result<()> {
    match command {
        Command::Pick(args) => run_pick_command(app, args),
        Command::CheckPush(args) => run_check_push_command(app, args),
        Command::Doctor => run_doctor_command(app),
    }
}

fn run_pick_command(app: &App<'_>, args: PickArgs) -> Result<()> {
    let source = match args.repos_file {
        Some(path) => RepositorySource::File(path),
        None => RepositorySource::Gh,
    };
    let prepare = app.pick_prepare(PickRequest {
        account_login: args.account,
        path: args.path,
        source,
    })?;

    match clonepick_tui::run_pick(prepare)? {
        PickExit::Picked(result) => {
            println!("{}", result.to_line());
            Ok(())
        }
        PickExit::Canceled => bail!("no repository picked"),
    }
}

fn run_check_push_command(app: &App<'_>, args: CheckPushArgs) -> Result<()> {
    let check = app.check_push(PushCheckRequest {
        paths: args.paths,
        limit_mb: args.limit_mb,
    })?;
    if !check.is_blocked() {
        return Ok(());
    }

    if args.no_tui {
        print_oversized_files(&check);
    } else {
        clonepick_tui::run_oversized_warning(check.paths(), check.limit_mb)?;
    }

    Err(check.canceled().into())
}

fn print_oversized_files(check: &PushCheck) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Size"]);
    for file in &check.oversized {
        table.add_row(vec![
            Cell::new(file.path.as_str()),
            Cell::new(format_size(file.size_bytes)),
        ]);
    }

    println!(
        "The following files are over the {}MB file limit and can not be pushed to GitHub:",
        check.limit_mb
    );
    println!("{table}");
    println!("Avoid committing these files or use Git LFS: {GIT_LFS_HELP_URL}");
}

fn run_doctor_command(app: &App<'_>) -> Result<()> {
    let report = app.doctor()?;
    print_doctor_report(&report);
    Ok(())
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        let status = match check.state {
            CheckState::Pass => "PASS",
            CheckState::Fail => "FAIL",
        };

        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(status),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}
