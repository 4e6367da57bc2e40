use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::{Account, DEFAULT_HOST};
use crate::oversized::DEFAULT_LIMIT_MB;
use crate::paths::expand_home;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClonepickConfig {
    pub version: u32,
    pub accounts: Vec<AccountSpec>,
    #[serde(default)]
    pub clone: CloneConfig,
    #[serde(default)]
    pub push: PushConfig,
    pub picker: Option<PickerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountSpec {
    pub id: u64,
    pub login: String,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CloneConfig {
    pub default_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PushConfig {
    pub limit_mb: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    pub command: Vec<String>,
}

impl ClonepickConfig {
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|spec| {
                Account::new(spec.id, spec.login.trim())
                    .with_host(spec.host.as_deref().unwrap_or(DEFAULT_HOST).trim())
            })
            .collect()
    }

    pub fn find_account(&self, login: &str) -> Option<Account> {
        self.accounts()
            .into_iter()
            .find(|account| account.login.eq_ignore_ascii_case(login))
    }

    pub fn push_limit_mb(&self) -> u64 {
        self.push.limit_mb.unwrap_or(DEFAULT_LIMIT_MB)
    }

    pub fn clone_base_dir(&self, home: &Path) -> PathBuf {
        match self.clone.default_dir.as_deref() {
            Some(raw) if !raw.trim().is_empty() => expand_home(raw.trim(), home),
            _ => home.to_path_buf(),
        }
    }

    pub fn picker_command(&self) -> Option<&[String]> {
        self.picker.as_ref().map(|picker| picker.command.as_slice())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn home_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs.home_dir().to_path_buf())
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?
        .join(".config")
        .join("clonepick")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<ClonepickConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: ClonepickConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &ClonepickConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(validation("version must be 1"));
    }

    if config.accounts.is_empty() {
        return Err(validation("at least one account must be configured"));
    }

    let mut seen_ids = BTreeSet::new();
    for (index, account) in config.accounts.iter().enumerate() {
        if account.login.trim().is_empty() {
            return Err(validation(format!(
                "accounts[{index}] login must be non-empty"
            )));
        }

        if let Some(host) = account.host.as_deref()
            && host.trim().is_empty()
        {
            return Err(validation(format!(
                "accounts[{index}] host must be non-empty when set"
            )));
        }

        if !seen_ids.insert(account.id) {
            return Err(validation(format!(
                "accounts[{index}] reuses id {} already taken by another account",
                account.id
            )));
        }
    }

    if config.push.limit_mb == Some(0) {
        return Err(validation("push.limit_mb must be greater than zero"));
    }

    if let Some(picker) = &config.picker
        && picker
            .command
            .first()
            .is_none_or(|program| program.trim().is_empty())
    {
        return Err(validation(
            "picker.command requires a non-empty program as its first element",
        ));
    }

    Ok(())
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_config_from_toml(raw: &str) -> Result<ClonepickConfig, ConfigError> {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        fs::write(file.path(), raw).expect("write temp config");
        load_config(file.path())
    }

    #[test]
    fn accepts_minimal_config_and_applies_defaults() {
        let raw = r#"
version = 1

[[accounts]]
id = 7
login = "octocat"
"#;

        let config = load_config_from_toml(raw).expect("valid config");
        let accounts = config.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].host, "github.com");
        assert_eq!(config.push_limit_mb(), 100);
        assert!(config.picker_command().is_none());
        assert_eq!(
            config.clone_base_dir(Path::new("/home/me")),
            PathBuf::from("/home/me")
        );
    }

    #[test]
    fn accepts_full_config() {
        let raw = r#"
version = 1

[[accounts]]
id = 1
login = "octocat"

[[accounts]]
id = 2
login = "hubot"
host = "ghe.example.com"

[clone]
default_dir = "~/src"

[push]
limit_mb = 50

[picker]
command = ["zenity", "--file-selection", "--directory"]
"#;

        let config = load_config_from_toml(raw).expect("valid config");
        assert_eq!(config.accounts().len(), 2);
        assert_eq!(
            config.find_account("HUBOT").expect("account").host,
            "ghe.example.com"
        );
        assert_eq!(config.push_limit_mb(), 50);
        assert_eq!(
            config.clone_base_dir(Path::new("/home/me")),
            PathBuf::from("/home/me/src")
        );
        assert_eq!(config.picker_command().expect("picker")[0], "zenity");
    }

    #[test]
    fn rejects_config_without_accounts() {
        let raw = r#"
version = 1
accounts = []
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("at least one account"));
    }

    #[test]
    fn rejects_duplicate_account_ids() {
        let raw = r#"
version = 1

[[accounts]]
id = 1
login = "octocat"

[[accounts]]
id = 1
login = "hubot"
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("reuses id 1"));
    }

    #[test]
    fn rejects_blank_login() {
        let raw = r#"
version = 1

[[accounts]]
id = 1
login = "  "
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("login must be non-empty"));
    }

    #[test]
    fn rejects_zero_push_limit() {
        let raw = r#"
version = 1

[[accounts]]
id = 1
login = "octocat"

[push]
limit_mb = 0
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("greater than zero"));
    }

    #[test]
    fn rejects_empty_picker_command() {
        let raw = r#"
version = 1

[[accounts]]
id = 1
login = "octocat"

[picker]
command = []
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("picker.command"));
    }

    #[test]
    fn rejects_unknown_version() {
        let raw = r#"
version = 2

[[accounts]]
id = 1
login = "octocat"
"#;

        let error = load_config_from_toml(raw).expect_err("config should fail");
        assert!(error.to_string().contains("version must be 1"));
    }
}
