mod fetch;
mod pick;
mod push_check;

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use clonepick_core::command_runner::CommandRunner;
use clonepick_core::config::{ClonepickConfig, load_config};
use clonepick_core::doctor::{DoctorReport, run_doctor_with_runner};

pub use fetch::{RepositorySource, load_repositories};
pub use pick::{PickPrepare, PickRequest, PickResult};
pub use push_check::{PushCheck, PushCheckError, PushCheckRequest};

pub struct App<'a> {
    pub runner: &'a dyn CommandRunner,
    config_path: PathBuf,
}

impl<'a> App<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config_path: PathBuf) -> Self {
        Self {
            runner,
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        Ok(run_doctor_with_runner(self.runner, &self.config_path))
    }

    pub fn ensure_config_ready(&self) -> Result<ClonepickConfig> {
        if !self.config_path.exists() {
            bail!(
                "missing config at {}\nCreate ~/.config/clonepick/config.toml with at least one [[accounts]] entry and retry.",
                self.config_path.display()
            );
        }

        self.load_existing_config()
    }

    pub(crate) fn optional_config(&self) -> Result<Option<ClonepickConfig>> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        self.load_existing_config().map(Some)
    }

    fn load_existing_config(&self) -> Result<ClonepickConfig> {
        load_config(&self.config_path).map_err(|error| {
            anyhow!(
                "invalid config at {}: {error}\nFix the config and retry.",
                self.config_path.display()
            )
        })
    }
}
