use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clonepick_core::account::Account;
use clonepick_core::config::{ClonepickConfig, home_dir};
use clonepick_core::paths::{default_clone_path, expand_home};

use crate::App;
use crate::fetch::RepositorySource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub account_login: Option<String>,
    pub path: Option<String>,
    pub source: RepositorySource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickPrepare {
    pub accounts: Vec<Account>,
    pub initial_account: usize,
    pub base_dir: PathBuf,
    pub initial_path: String,
    pub picker_command: Option<Vec<String>>,
    pub source: RepositorySource,
}

impl PickPrepare {
    pub fn default_path_for(&self, url: &str) -> Option<PathBuf> {
        default_clone_path(&self.base_dir, url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    pub url: String,
    pub path: PathBuf,
}

impl PickResult {
    pub fn to_line(&self) -> String {
        format!("{}\t{}", self.url, self.path.display())
    }
}

impl<'a> App<'a> {
    pub fn pick_prepare(&self, request: PickRequest) -> Result<PickPrepare> {
        let config = self.ensure_config_ready()?;
        let home = home_dir().context("failed to resolve home directory for clone paths")?;
        prepare_with_home(&config, request, &home)
    }
}

fn prepare_with_home(
    config: &ClonepickConfig,
    request: PickRequest,
    home: &Path,
) -> Result<PickPrepare> {
    let accounts = config.accounts();
    let initial_account = match request.account_login.as_deref() {
        Some(login) => config
            .find_account(login)
            .and_then(|found| accounts.iter().position(|account| account.id == found.id))
            .ok_or_else(|| {
                anyhow!(
                    "account '{login}' is not configured; known accounts: {}",
                    accounts
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?,
        None => 0,
    };

    let initial_path = request
        .path
        .as_deref()
        .map(|raw| expand_home(raw.trim(), home).display().to_string())
        .unwrap_or_default();

    Ok(PickPrepare {
        accounts,
        initial_account,
        base_dir: config.clone_base_dir(home),
        initial_path,
        picker_command: config.picker_command().map(<[String]>::to_vec),
        source: request.source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clonepick_core::config::{AccountSpec, CloneConfig, ClonepickConfig, PushConfig};

    use super::{PickRequest, PickResult, prepare_with_home};
    use crate::fetch::RepositorySource;

    fn config() -> ClonepickConfig {
        ClonepickConfig {
            version: 1,
            accounts: vec![
                AccountSpec {
                    id: 1,
                    login: "octocat".to_string(),
                    host: None,
                },
                AccountSpec {
                    id: 2,
                    login: "hubot".to_string(),
                    host: Some("ghe.example.com".to_string()),
                },
            ],
            clone: CloneConfig {
                default_dir: Some("~/src".to_string()),
            },
            push: PushConfig::default(),
            picker: None,
        }
    }

    fn request(account: Option<&str>, path: Option<&str>) -> PickRequest {
        PickRequest {
            account_login: account.map(str::to_string),
            path: path.map(str::to_string),
            source: RepositorySource::Gh,
        }
    }

    #[test]
    fn defaults_to_first_account_and_empty_path() {
        let prepare =
            prepare_with_home(&config(), request(None, None), Path::new("/home/me")).expect("ok");
        assert_eq!(prepare.initial_account, 0);
        assert_eq!(prepare.initial_path, "");
        assert_eq!(prepare.base_dir, PathBuf::from("/home/me/src"));
        assert_eq!(
            prepare.default_path_for("https://github.com/octocat/hello-world.git"),
            Some(PathBuf::from("/home/me/src/hello-world"))
        );
    }

    #[test]
    fn selects_requested_account_and_expands_path() {
        let prepare = prepare_with_home(
            &config(),
            request(Some("HUBOT"), Some("~/work/tool")),
            Path::new("/home/me"),
        )
        .expect("ok");
        assert_eq!(prepare.initial_account, 1);
        assert_eq!(prepare.accounts[1].host, "ghe.example.com");
        assert_eq!(prepare.initial_path, "/home/me/work/tool");
    }

    #[test]
    fn unknown_account_lists_known_ones() {
        let error = prepare_with_home(&config(), request(Some("monalisa"), None), Path::new("/h"))
            .expect_err("unknown account");
        let message = error.to_string();
        assert!(message.contains("'monalisa' is not configured"));
        assert!(message.contains("octocat, hubot@ghe.example.com"));
    }

    #[test]
    fn result_line_is_tab_separated() {
        let result = PickResult {
            url: "https://github.com/octocat/hello-world.git".to_string(),
            path: PathBuf::from("/home/me/src/hello-world"),
        };
        assert_eq!(
            result.to_line(),
            "https://github.com/octocat/hello-world.git\t/home/me/src/hello-world"
        );
    }
}
