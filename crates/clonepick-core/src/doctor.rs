use std::env;
use std::fmt;
use std::path::Path;

use crate::command_runner::CommandRunner;
use crate::config::{ClonepickConfig, load_config};
use crate::github;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

const CONFIG_DEPENDENT_CHECKS: [&str; 3] = [
    "config parses and validates",
    "gh authenticated for accounts",
    "directory picker executable",
];

pub fn run_doctor_with_runner(runner: &dyn CommandRunner, config_path: &Path) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(match env::consts::OS {
        "macos" => pass_check("os is supported", "detected macOS"),
        "linux" => pass_check("os is supported", "detected Linux"),
        detected => fail_check(
            "os is supported",
            format!("detected {detected}, expected macOS or Linux"),
        ),
    });

    checks.push(if is_executable_in_path("git") {
        pass_check("git is installed", "git executable found in PATH")
    } else {
        fail_check("git is installed", "git executable not found in PATH")
    });

    let gh_check = check_gh_callable(runner);
    let gh_ready = gh_check.state == CheckState::Pass;
    checks.push(gh_check);

    if !config_path.exists() {
        checks.push(fail_check(
            "config file exists",
            format!("expected at {}", config_path.display()),
        ));
        push_skipped_checks(
            &mut checks,
            &CONFIG_DEPENDENT_CHECKS,
            "config file is missing",
        );
        return DoctorReport { checks };
    }

    checks.push(pass_check(
        "config file exists",
        format!("found at {}", config_path.display()),
    ));

    match load_config(config_path) {
        Ok(config) => {
            checks.push(pass_check("config parses and validates", "config is valid"));
            if gh_ready {
                checks.push(check_account_auth(&config, runner));
            } else {
                checks.push(skipped_check(
                    "gh authenticated for accounts",
                    "gh is not callable",
                ));
            }
            checks.push(check_picker_command(&config));
        }
        Err(error) => {
            checks.push(fail_check("config parses and validates", error.to_string()));
            push_skipped_checks(
                &mut checks,
                &CONFIG_DEPENDENT_CHECKS[1..],
                "config is invalid",
            );
        }
    }

    DoctorReport { checks }
}

fn check_gh_callable(runner: &dyn CommandRunner) -> DoctorCheck {
    match github::gh_version(runner) {
        Ok(version) => pass_check("gh is installed", version),
        Err(error) => fail_check("gh is installed", error.to_string()),
    }
}

fn check_account_auth(config: &ClonepickConfig, runner: &dyn CommandRunner) -> DoctorCheck {
    let mut hosts = config
        .accounts()
        .into_iter()
        .map(|account| account.host)
        .collect::<Vec<_>>();
    hosts.sort();
    hosts.dedup();

    let failures = hosts
        .iter()
        .filter_map(|host| {
            github::auth_status(host, runner)
                .err()
                .map(|_| host.as_str())
        })
        .collect::<Vec<_>>();

    if failures.is_empty() {
        pass_check(
            "gh authenticated for accounts",
            format!("authenticated on {}", hosts.join(", ")),
        )
    } else {
        fail_check(
            "gh authenticated for accounts",
            format!(
                "not authenticated on {}; run `gh auth login --hostname <host>`",
                failures.join(", ")
            ),
        )
    }
}

fn check_picker_command(config: &ClonepickConfig) -> DoctorCheck {
    let Some(program) = config
        .picker_command()
        .and_then(|command| command.first())
        .map(String::as_str)
    else {
        return pass_check(
            "directory picker executable",
            "no picker configured; the built-in path prompt is used",
        );
    };

    if is_executable_in_path(program) {
        pass_check(
            "directory picker executable",
            format!("found '{program}' in PATH"),
        )
    } else {
        fail_check(
            "directory picker executable",
            format!("picker program '{program}' not found in PATH"),
        )
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn skipped_check(name: &str, reason: &str) -> DoctorCheck {
    fail_check(name, format!("skipped because {reason}"))
}

fn push_skipped_checks(checks: &mut Vec<DoctorCheck>, names: &[&str], reason: &str) {
    checks.extend(
        names
            .iter()
            .copied()
            .map(|name| skipped_check(name, reason)),
    );
}

fn is_executable_in_path(program: &str) -> bool {
    let program_path = Path::new(program);

    if program_path.is_absolute() || program.contains('/') {
        return is_executable_file(program_path);
    }

    let path_value = match env::var_os("PATH") {
        Some(value) => value,
        None => return false,
    };

    env::split_paths(&path_value)
        .map(|directory| directory.join(program))
        .any(|candidate| is_executable_file(&candidate))
}

fn is_executable_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match path.metadata() {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        true
    }
}
