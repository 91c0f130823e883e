//! Bitbucket credential resolution
//!
//! Bitbucket Cloud has no official CLI; credentials are an app password
//! taken from the environment.

use crate::auth::{env_token, AuthSource};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;

/// Resolved Bitbucket credentials
#[derive(Debug, Clone)]
pub struct BitbucketAuth {
    /// Bitbucket username
    pub username: String,
    /// App password paired with the username
    pub app_password: String,
    /// Where the credentials were obtained from
    pub source: AuthSource,
}

impl BitbucketAuth {
    /// Combined `user:app-password` form for embedding in a remote URL.
    pub fn token(&self) -> String {
        format!("{}:{}", self.username, self.app_password)
    }
}

/// Resolve Bitbucket credentials.
///
/// Priority: `BITBUCKET_AUTH` (`user:app-password`), then
/// `BITBUCKET_USERNAME` + `BITBUCKET_APP_PASSWORD`.
pub fn resolve_bitbucket_auth() -> Result<BitbucketAuth> {
    if let Some(combined) = env_token(&["BITBUCKET_AUTH"]) {
        let (username, app_password) = combined.split_once(':').ok_or_else(|| {
            Error::Auth("BITBUCKET_AUTH must be in user:app-password form".to_string())
        })?;
        return Ok(BitbucketAuth {
            username: username.to_string(),
            app_password: app_password.to_string(),
            source: AuthSource::EnvVar,
        });
    }

    match (
        env_token(&["BITBUCKET_USERNAME"]),
        env_token(&["BITBUCKET_APP_PASSWORD"]),
    ) {
        (Some(username), Some(app_password)) => Ok(BitbucketAuth {
            username,
            app_password,
            source: AuthSource::EnvVar,
        }),
        _ => Err(Error::Auth(
            "no Bitbucket credentials found; set BITBUCKET_AUTH or \
             BITBUCKET_USERNAME and BITBUCKET_APP_PASSWORD"
                .to_string(),
        )),
    }
}

#[derive(Deserialize)]
struct BitbucketUser {
    username: String,
}

/// Verify the credentials against the Bitbucket API, returning the username.
pub async fn test_bitbucket_auth(auth: &BitbucketAuth) -> Result<String> {
    let user: BitbucketUser = Client::new()
        .get("https://api.bitbucket.org/2.0/user")
        .basic_auth(&auth.username, Some(&auth.app_password))
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("invalid Bitbucket credentials: {e}")))?
        .json()
        .await?;

    Ok(user.username)
}
