//! Hosting provider services for GitHub, GitLab, and Bitbucket
//!
//! One contract for clone / create-PR / close-PR / list operations, with a
//! concrete adapter per provider selected from the repository remote URL.

mod bitbucket;
mod detection;
mod factory;
mod github;
mod gitlab;

pub use bitbucket::BitbucketProvider;
pub use detection::{detect_provider, parse_repo_ref};
pub use factory::create_provider;
pub use github::GitHubProvider;
pub use gitlab::GitLabProvider;

use crate::error::Result;
use crate::types::{CreatedPr, PrOptions, PrState, RepoRef};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

/// Capability set every hosting provider adapter implements.
///
/// Adapters are constructed for one repository and hold an immutable
/// [`RepoRef`]; they never retain state between calls.
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Clone the repository using an authenticated remote URL.
    ///
    /// The credential material never appears in logs or error text; only
    /// the `owner/project` form is shown.
    async fn clone_repository(&self, destination: &Path) -> Result<()>;

    /// Open a pull request from `source_branch`.
    ///
    /// An ordinary API rejection is logged and reported as `Ok(None)`, not
    /// as an error, so callers decide whether it is terminal.
    async fn create_pull_request(
        &self,
        source_branch: &str,
        title: &str,
        options: &PrOptions,
    ) -> Result<Option<CreatedPr>>;

    /// Close a pull request by number.
    ///
    /// Both outcomes are logged; `Ok(false)` means the provider rejected
    /// the request.
    async fn close_pull_request(&self, id: u64) -> Result<bool>;

    /// Map pull request numbers to their source branches for the given
    /// state filter.
    async fn list_pull_request_branches(&self, state: PrState) -> Result<BTreeMap<u64, String>>;

    /// The repository this adapter was constructed for.
    fn repo(&self) -> &RepoRef;
}
