//! Security advisory gate
//!
//! Wraps the external advisory checker. The check never fails: a missing
//! or unrunnable tool degrades to [`AdvisoryStatus::Unknown`], which is
//! distinct from a definite "not vulnerable" answer.

use async_trait::async_trait;
use std::env;
use std::path::Path;
use tokio::process::Command;

const DEFAULT_CHECKER: &str = "security-checker.phar";

/// Tri-state vulnerability signal for a lock file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryStatus {
    /// The checker could not be executed; vulnerability status is unknown
    Unknown,
    /// The checker ran and found no known vulnerabilities
    Clean,
    /// The checker ran and reported vulnerable dependencies
    Vulnerable,
}

/// Result of one advisory check
#[derive(Debug, Clone)]
pub struct Advisory {
    /// Human-readable checker report, suitable for a pull request body
    pub message: String,
    /// Vulnerability signal
    pub status: AdvisoryStatus,
}

impl Advisory {
    /// An advisory for the case where no checker could run.
    pub const fn unknown() -> Self {
        Self {
            message: String::new(),
            status: AdvisoryStatus::Unknown,
        }
    }
}

/// Advisory check the update reconciler depends on.
#[async_trait]
pub trait AdvisoryChecker: Send + Sync {
    /// Check a lock file for known vulnerabilities. Infallible by design.
    async fn check(&self, lock_file: &Path) -> Advisory;
}

/// External advisory checker tool.
///
/// The binary is `security-checker.phar` unless overridden with
/// `CLU_SECURITY_CHECKER`; it is invoked as `<bin> security:check <lock>`.
pub struct SecurityChecker {
    binary: String,
}

impl SecurityChecker {
    /// Build a checker from the environment.
    pub fn from_env() -> Self {
        Self {
            binary: env::var("CLU_SECURITY_CHECKER").unwrap_or_else(|_| DEFAULT_CHECKER.to_string()),
        }
    }

    /// Build a checker around a specific binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl AdvisoryChecker for SecurityChecker {
    async fn check(&self, lock_file: &Path) -> Advisory {
        let output = match Command::new(&self.binary)
            .arg("security:check")
            .arg(lock_file)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(binary = %self.binary, error = %e, "advisory checker unavailable");
                return Advisory::unknown();
            }
        };

        let report = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let status = if output.status.success() {
            AdvisoryStatus::Clean
        } else {
            AdvisoryStatus::Vulnerable
        };

        Advisory {
            message: format!("\n\n{report}"),
            status,
        }
    }
}
