//! Composer process execution
//!
//! Install/update flag sets are configuration, not code: override them with
//! `CLU_COMPOSER_INSTALL_ARGS` and `CLU_COMPOSER_UPDATE_ARGS`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::env;
use std::path::Path;
use tokio::process::Command;

const DEFAULT_INSTALL_ARGS: &str = "--no-dev --no-interaction";
const DEFAULT_UPDATE_ARGS: &str = "--no-progress --no-dev --no-interaction";

/// Dependency-manager operations the update reconciler depends on.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Install currently locked dependencies in `dir`.
    async fn install(&self, dir: &Path) -> Result<()>;

    /// Update dependencies in `dir`, capturing all output lines.
    ///
    /// The update's exit status is deliberately not an error: its output is
    /// wanted for the pull request description regardless of outcome.
    async fn update(&self, dir: &Path) -> Result<Vec<String>>;
}

/// composer CLI implementation of [`PackageManager`]
pub struct ComposerCli;

fn split_args(configured: Option<String>, default: &str) -> Vec<String> {
    configured
        .unwrap_or_else(|| default.to_string())
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[async_trait]
impl PackageManager for ComposerCli {
    async fn install(&self, dir: &Path) -> Result<()> {
        let args = split_args(env::var("CLU_COMPOSER_INSTALL_ARGS").ok(), DEFAULT_INSTALL_ARGS);
        tracing::debug!(?args, "running composer install");

        let output = Command::new("composer")
            .arg("install")
            .arg(format!("--working-dir={}", dir.display()))
            .args(&args)
            .output()
            .await
            .map_err(|e| Error::Composer(format!("failed to execute composer (is it on PATH?): {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Composer(format!(
                "composer install failed: {}",
                stderr.trim_end()
            )));
        }
        Ok(())
    }

    async fn update(&self, dir: &Path) -> Result<Vec<String>> {
        let args = split_args(env::var("CLU_COMPOSER_UPDATE_ARGS").ok(), DEFAULT_UPDATE_ARGS);
        tracing::debug!(?args, "running composer update");

        let output = Command::new("composer")
            .arg("update")
            .arg(format!("--working-dir={}", dir.display()))
            .args(&args)
            .output()
            .await
            .map_err(|e| Error::Composer(format!("failed to execute composer (is it on PATH?): {e}")))?;

        // Composer writes its report to stderr and package output to stdout;
        // both belong in the captured log.
        let mut lines: Vec<String> = Vec::new();
        lines.extend(String::from_utf8_lossy(&output.stdout).lines().map(String::from));
        lines.extend(String::from_utf8_lossy(&output.stderr).lines().map(String::from));
        Ok(lines)
    }
}
