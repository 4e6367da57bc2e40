use thiserror::Error;

use crate::account::Account;
use crate::command_adapter::{self, CommandFailure};
use crate::command_runner::{CommandOutput, CommandRunner};
use crate::repository::ApiRepository;

pub const GH_PROGRAM: &str = "gh";

const REPOSITORIES_ENDPOINT: &str =
    "user/repos?per_page=100&affiliation=owner,collaborator,organization_member";

#[derive(Debug, Error)]
pub enum GhError {
    #[error("gh command failed: gh {command} (exit {status}) {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("failed to execute gh command: {0}")]
    Execute(String),
    #[error("failed to parse repository record on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl From<CommandFailure> for GhError {
    fn from(value: CommandFailure) -> Self {
        Self::CommandFailed {
            command: value.command,
            status: value.status,
            stderr: value.stderr,
        }
    }
}

pub fn fetch_repositories_args(account: &Account) -> Vec<String> {
    vec![
        "api".to_string(),
        "--hostname".to_string(),
        account.host.clone(),
        "--paginate".to_string(),
        REPOSITORIES_ENDPOINT.to_string(),
        "--jq".to_string(),
        ".[]".to_string(),
    ]
}

pub fn fetch_repositories(
    account: &Account,
    runner: &dyn CommandRunner,
) -> Result<Vec<ApiRepository>, GhError> {
    let args = fetch_repositories_args(account);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = run_gh_checked(runner, &arg_refs)?;
    parse_repository_lines(&output.stdout)
}

pub fn auth_status(host: &str, runner: &dyn CommandRunner) -> Result<(), GhError> {
    run_gh_checked(runner, &["auth", "status", "--hostname", host]).map(|_| ())
}

pub fn gh_version(runner: &dyn CommandRunner) -> Result<String, GhError> {
    let output = run_gh_checked(runner, &["--version"])?;
    Ok(command_adapter::first_non_empty_line(&output)
        .unwrap_or("gh")
        .to_string())
}

/// Parses `--jq '.[]'` output: one JSON object per line.
pub fn parse_repository_lines(stdout: &str) -> Result<Vec<ApiRepository>, GhError> {
    stdout
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<ApiRepository>(line).map_err(|error| GhError::Parse {
                line: index + 1,
                message: error.to_string(),
            })
        })
        .collect()
}

pub fn parse_repository_array(raw: &str) -> Result<Vec<ApiRepository>, GhError> {
    serde_json::from_str(raw).map_err(|error| GhError::Parse {
        line: error.line(),
        message: error.to_string(),
    })
}

fn run_gh_checked(runner: &dyn CommandRunner, args: &[&str]) -> Result<CommandOutput, GhError> {
    let output =
        command_adapter::run_program(runner, GH_PROGRAM, args).map_err(GhError::Execute)?;
    Ok(command_adapter::ensure_success(args, output)?)
}
