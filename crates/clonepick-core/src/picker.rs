use std::path::PathBuf;

use crate::command_adapter;
use crate::command_runner::CommandRunner;

/// Runs an external directory picker and returns its selection.
///
/// A non-zero exit (the picker was cancelled) or empty output yields `None`.
pub fn choose_directory_with_command(
    command: &[String],
    runner: &dyn CommandRunner,
) -> Option<PathBuf> {
    let (program, args) = command.split_first()?;
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = command_adapter::run_program(runner, program, &arg_refs).ok()?;
    let output = command_adapter::ensure_success(&arg_refs, output).ok()?;
    command_adapter::first_non_empty_line(&output).map(PathBuf::from)
}
