//! GitHub credential resolution

use crate::auth::{cli_token, env_token, AuthSource};
use crate::error::{Error, Result};

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuth {
    /// Personal access token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Resolve GitHub credentials.
///
/// Priority: `gh auth token`, then `GITHUB_TOKEN`, then `GH_TOKEN`.
pub async fn resolve_github_auth() -> Result<GitHubAuth> {
    if let Some(token) = cli_token("gh", &["auth", "token"]).await {
        return Ok(GitHubAuth {
            token,
            source: AuthSource::Cli,
        });
    }

    if let Some(token) = env_token(&["GITHUB_TOKEN", "GH_TOKEN"]) {
        return Ok(GitHubAuth {
            token,
            source: AuthSource::EnvVar,
        });
    }

    Err(Error::Auth(
        "no GitHub credentials found; run `gh auth login` or set GITHUB_TOKEN".to_string(),
    ))
}

/// Verify the token against the GitHub API, returning the login name.
pub async fn test_github_auth(auth: &GitHubAuth) -> Result<String> {
    let client = octocrab::Octocrab::builder()
        .personal_token(auth.token.clone())
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = client
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("invalid GitHub token: {e}")))?;

    Ok(user.login)
}
