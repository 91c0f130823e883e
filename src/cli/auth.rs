//! Auth command - test and manage credentials

use clu::auth::{
    resolve_bitbucket_auth, resolve_github_auth, resolve_gitlab_auth, test_bitbucket_auth,
    test_github_auth, test_gitlab_auth,
};
use clu::error::Result;
use clu::types::Provider;

/// Test credentials for a provider against its API.
pub async fn run_auth_test(provider: Provider) -> Result<()> {
    match provider {
        Provider::GitHub => {
            println!("Testing GitHub authentication...");
            let auth = resolve_github_auth().await?;
            let username = test_github_auth(&auth).await?;
            println!("Authenticated as: {username}");
            println!("Token source: {:?}", auth.source);
        }
        Provider::GitLab => {
            println!("Testing GitLab authentication...");
            let auth = resolve_gitlab_auth(None).await?;
            let username = test_gitlab_auth(&auth).await?;
            println!("Authenticated as: {username}");
            println!("Token source: {:?}", auth.source);
            println!("Host: {}", auth.host);
        }
        Provider::Bitbucket => {
            println!("Testing Bitbucket authentication...");
            let auth = resolve_bitbucket_auth()?;
            let username = test_bitbucket_auth(&auth).await?;
            println!("Authenticated as: {username}");
        }
    }
    Ok(())
}

/// Print credential setup instructions for a provider.
pub fn run_auth_setup(provider: Provider) {
    match provider {
        Provider::GitHub => {
            println!("GitHub Authentication Setup");
            println!("===========================");
            println!();
            println!("Option 1: GitHub CLI (recommended)");
            println!("  Install: https://cli.github.com/");
            println!("  Run: gh auth login");
            println!();
            println!("Option 2: Environment variable");
            println!("  Set GITHUB_TOKEN or GH_TOKEN");
        }
        Provider::GitLab => {
            println!("GitLab Authentication Setup");
            println!("===========================");
            println!();
            println!("Option 1: GitLab CLI (glab)");
            println!("  Install: https://gitlab.com/gitlab-org/cli");
            println!("  Run: glab auth login");
            println!();
            println!("Option 2: Environment variable");
            println!("  Set GITLAB_TOKEN or GL_TOKEN");
            println!();
            println!("For self-hosted GitLab:");
            println!("  Set GITLAB_HOST to your instance hostname");
        }
        Provider::Bitbucket => {
            println!("Bitbucket Authentication Setup");
            println!("==============================");
            println!();
            println!("Create an app password at:");
            println!("  https://bitbucket.org/account/settings/app-passwords/");
            println!();
            println!("Then set either:");
            println!("  BITBUCKET_AUTH=user:app-password");
            println!("or:");
            println!("  BITBUCKET_USERNAME and BITBUCKET_APP_PASSWORD");
        }
    }
}
