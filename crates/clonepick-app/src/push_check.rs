use std::path::PathBuf;

use anyhow::{Context, Result};
use clonepick_core::oversized::{DEFAULT_LIMIT_MB, OversizedFile, find_oversized_files, limit_bytes};
use thiserror::Error;

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCheckRequest {
    pub paths: Vec<PathBuf>,
    pub limit_mb: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCheck {
    pub limit_mb: u64,
    pub oversized: Vec<OversizedFile>,
}

impl PushCheck {
    pub fn is_blocked(&self) -> bool {
        !self.oversized.is_empty()
    }

    pub fn paths(&self) -> Vec<String> {
        self.oversized
            .iter()
            .map(|file| file.path.clone())
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum PushCheckError {
    #[error("push canceled: {count} file(s) exceed the {limit_mb} MB limit")]
    Canceled { count: usize, limit_mb: u64 },
    #[error("push limit must be greater than zero")]
    ZeroLimit,
}

impl PushCheck {
    pub fn canceled(&self) -> PushCheckError {
        PushCheckError::Canceled {
            count: self.oversized.len(),
            limit_mb: self.limit_mb,
        }
    }
}

impl<'a> App<'a> {
    /// Scans `request.paths` for files over the push limit. The limit comes
    /// from the request, then the config file, then the built-in default.
    pub fn check_push(&self, request: PushCheckRequest) -> Result<PushCheck> {
        let configured = self.optional_config()?.map(|config| config.push_limit_mb());
        let limit_mb = request.limit_mb.or(configured).unwrap_or(DEFAULT_LIMIT_MB);
        if limit_mb == 0 {
            return Err(PushCheckError::ZeroLimit.into());
        }

        let oversized = find_oversized_files(&request.paths, limit_bytes(limit_mb))
            .context("failed to scan files for the push size limit")?;

        Ok(PushCheck {
            limit_mb,
            oversized,
        })
    }
}
