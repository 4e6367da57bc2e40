pub mod cli;
pub mod dispatch;

use anyhow::Result;
use clap::Parser;
use clonepick_app::App;
use clonepick_core::command_runner::SystemCommandRunner;
use clonepick_core::config::resolve_config_path;
use clonepick_core::diagnostics::{self, DiagnosticsSession};

use crate::cli::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => resolve_config_path()?,
    };

    let session = DiagnosticsSession::initialize(cli.diagnostics, &config_path)?;
    if let Some(path) = session.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let command_runner = SystemCommandRunner::new();
    let app = App::new(&command_runner, config_path);
    let result = dispatch::run_with_deps(cli.command, &app);
    if let Err(error) = &result {
        diagnostics::record(format!("command failed: {error:#}"));
    }
    result
}
