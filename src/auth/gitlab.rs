//! GitLab credential resolution

use crate::auth::{cli_token, env_token, AuthSource};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;

/// Resolved GitLab credentials
#[derive(Debug, Clone)]
pub struct GitLabAuth {
    /// Personal or CI access token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
    /// GitLab instance the token belongs to
    pub host: String,
}

/// Resolve GitLab credentials for `host` (default `gitlab.com`, or
/// `GITLAB_HOST` for self-hosted instances).
///
/// Priority: `glab auth token`, then `GITLAB_TOKEN`, then `GL_TOKEN`.
pub async fn resolve_gitlab_auth(host: Option<&str>) -> Result<GitLabAuth> {
    let host = host
        .map(String::from)
        .or_else(|| env::var("GITLAB_HOST").ok())
        .unwrap_or_else(|| "gitlab.com".to_string());

    if let Some(token) = cli_token("glab", &["auth", "token", "--hostname", &host]).await {
        return Ok(GitLabAuth {
            token,
            source: AuthSource::Cli,
            host,
        });
    }

    if let Some(token) = env_token(&["GITLAB_TOKEN", "GL_TOKEN"]) {
        return Ok(GitLabAuth {
            token,
            source: AuthSource::EnvVar,
            host,
        });
    }

    Err(Error::Auth(
        "no GitLab credentials found; run `glab auth login` or set GITLAB_TOKEN".to_string(),
    ))
}

#[derive(Deserialize)]
struct GitLabUser {
    username: String,
}

/// Verify the token against the GitLab API, returning the username.
pub async fn test_gitlab_auth(auth: &GitLabAuth) -> Result<String> {
    let url = format!("https://{}/api/v4/user", auth.host);

    let user: GitLabUser = Client::new()
        .get(&url)
        .header("PRIVATE-TOKEN", &auth.token)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("invalid GitLab token: {e}")))?
        .json()
        .await?;

    Ok(user.username)
}
