//! Provider adapter construction
//!
//! Resolves and validates credentials for the matched provider, then
//! builds the adapter.

use crate::auth::{resolve_bitbucket_auth, resolve_github_auth, resolve_gitlab_auth};
use crate::error::Result;
use crate::provider::{BitbucketProvider, GitHubProvider, GitLabProvider, GitProvider};
use crate::types::{Provider, RepoRef};

/// Create a provider adapter for a repository reference.
///
/// Missing credentials surface here as a fatal [`crate::error::Error::Auth`]
/// before any provider API call is attempted.
pub async fn create_provider(repo: &RepoRef) -> Result<Box<dyn GitProvider>> {
    match repo.provider {
        Provider::GitHub => {
            let auth = resolve_github_auth().await?;
            Ok(Box::new(GitHubProvider::new(&auth.token, repo.clone())?))
        }
        Provider::GitLab => {
            let auth = resolve_gitlab_auth(repo.host.as_deref()).await?;
            Ok(Box::new(GitLabProvider::new(auth.token, repo.clone())))
        }
        Provider::Bitbucket => {
            let auth = resolve_bitbucket_auth()?;
            Ok(Box::new(BitbucketProvider::new(auth, repo.clone())))
        }
    }
}
