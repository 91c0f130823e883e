//! Error types for clu

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by clu operations
#[derive(Debug, Error)]
pub enum Error {
    /// No hosting provider could be inferred from a remote URL
    #[error("no supported Git provider for remote URL: {0}")]
    NoProviderForUrl(String),

    /// A remote URL could not be parsed into owner and project
    #[error("parse error: {0}")]
    Parse(String),

    /// Site identifier with no configured repository URL
    #[error("unknown site: {0}")]
    UnknownSite(String),

    /// Configuration problem (sites file, config directory)
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or invalid credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Bitbucket API error
    #[error("Bitbucket API error: {0}")]
    BitbucketApi(String),

    /// git command failure
    #[error("git: {0}")]
    Git(String),

    /// composer command failure
    #[error("composer: {0}")]
    Composer(String),

    /// An automated branch has an open PR we can no longer locate
    #[error("unable to find existing pull request for branch {branch}")]
    PullRequestNotFound {
        /// Source branch of the pull request that could not be found
        branch: String,
    },

    /// The provider rejected a close request during supersession
    #[error("failed to close existing pull request #{0}")]
    ClosePullRequest(u64),

    /// The provider rejected a create request
    #[error("failed to create pull request for branch {0}")]
    CreatePullRequest(String),

    /// Source and target branches are the same
    #[error("source and target branches must be different: {0}")]
    BranchConflict(String),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// GitHub client error
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
