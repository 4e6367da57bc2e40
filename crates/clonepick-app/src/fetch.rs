use std::fs;
use std::path::PathBuf;

use clonepick_core::account::Account;
use clonepick_core::command_runner::CommandRunner;
use clonepick_core::diagnostics;
use clonepick_core::github::{self, GhError};
use clonepick_core::repository::ApiRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    Gh,
    File(PathBuf),
}

/// Fetches the repositories visible to `account`.
///
/// Every failure collapses to `None`: callers present it as a lost
/// connection and offer a retry.
pub fn load_repositories(
    source: &RepositorySource,
    account: &Account,
    runner: &dyn CommandRunner,
) -> Option<Vec<ApiRepository>> {
    let result = match source {
        RepositorySource::Gh => github::fetch_repositories(account, runner),
        RepositorySource::File(path) => fs::read_to_string(path)
            .map_err(|error| GhError::Execute(format!("{}: {error}", path.display())))
            .and_then(|raw| github::parse_repository_array(&raw)),
    };

    match result {
        Ok(repositories) => {
            diagnostics::record(format!(
                "fetched {} repositories for account {} ({})",
                repositories.len(),
                account.id,
                account
            ));
            Some(repositories)
        }
        Err(error) => {
            diagnostics::record(format!(
                "repository fetch failed for account {} ({account}): {error}",
                account.id
            ));
            None
        }
    }
}
