//! Credential resolution for GitHub, GitLab, and Bitbucket
//!
//! Tokens come from platform CLIs (`gh`, `glab`) or environment variables,
//! are validated before any provider call, and are never persisted.

mod bitbucket;
mod github;
mod gitlab;

pub use bitbucket::{resolve_bitbucket_auth, test_bitbucket_auth, BitbucketAuth};
pub use github::{resolve_github_auth, test_github_auth, GitHubAuth};
pub use gitlab::{resolve_gitlab_auth, test_gitlab_auth, GitLabAuth};

use std::env;
use tokio::process::Command;

/// Where a credential was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Platform CLI tool (`gh`, `glab`)
    Cli,
    /// Environment variable
    EnvVar,
}

/// Ask a platform CLI for a token, e.g. `gh auth token`.
///
/// Any failure (tool missing, not logged in, empty output) yields `None`
/// so resolution can fall through to environment variables.
async fn cli_token(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// First non-empty token among the named environment variables.
fn env_token(vars: &[&str]) -> Option<String> {
    vars.iter()
        .find_map(|var| env::var(var).ok().filter(|token| !token.is_empty()))
}
