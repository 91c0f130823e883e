//! Core types for clu

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported hosting provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
    /// Bitbucket Cloud
    Bitbucket,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
            Self::Bitbucket => write!(f, "Bitbucket"),
        }
    }
}

/// Reference to a repository on a hosting provider, derived from a remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Provider that owns the repository
    pub provider: Provider,
    /// Custom host (`None` for the provider's public SaaS host)
    pub host: Option<String>,
    /// Repository owner; may contain nested groups on GitLab
    pub owner: String,
    /// Repository name
    pub project: String,
}

impl RepoRef {
    /// `owner/project` path used in provider API routes
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.owner, self.project)
    }

    /// Hostname of the repository, falling back to the provider default
    pub fn host_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.host.as_deref().unwrap_or(default)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.project)
    }
}

/// Pull request state filter for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrState {
    /// Open pull requests only
    Open,
    /// Closed (declined/merged) pull requests only
    Closed,
    /// All pull requests regardless of state
    All,
}

impl FromStr for PrState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(Error::Parse(format!(
                "state must be one of: open, closed, all (got {other})"
            ))),
        }
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Options accepted when creating a pull request.
///
/// Not every provider honors every field: reviewers are Bitbucket-only,
/// draft is GitHub-only, and close-on-merge is ignored by GitHub.
#[derive(Debug, Clone, Default)]
pub struct PrOptions {
    /// Destination branch; when absent GitHub and GitLab use the
    /// repository default branch, Bitbucket applies its server-side main
    /// branch
    pub target: Option<String>,
    /// Extended description body
    pub description: Option<String>,
    /// Reviewer UUIDs (Bitbucket)
    pub reviewers: Vec<String>,
    /// Delete/close the source branch when the pull request merges
    /// (GitLab, Bitbucket)
    pub close_source_branch: bool,
    /// Open as a draft (GitHub)
    pub draft: bool,
}

/// A pull request created by this tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPr {
    /// Provider-native pull request number
    pub id: u64,
    /// Pull request title
    pub title: String,
    /// Web URL of the pull request
    pub url: String,
}
