//! Update command - run one lock-file reconciliation

use crate::cli::style::{check, Stylize};
use clu::advisory::SecurityChecker;
use clu::composer::ComposerCli;
use clu::error::Result;
use clu::git::GitCli;
use clu::provider::{create_provider, parse_repo_ref};
use clu::site::resolve_repository_url;
use clu::update::{run_update as reconcile, UpdateOutcome};

/// Run the update command for a site name or explicit Git URL.
pub async fn run_update(target: &str, security_only: bool) -> Result<()> {
    let url = resolve_repository_url(target)?;
    let repo = parse_repo_ref(&url)?;
    let provider = create_provider(&repo).await?;

    // Private scratch directory for this run; dropped (and removed) when
    // the command finishes, success or failure.
    let work_dir = tempfile::Builder::new().prefix("clu-").tempdir()?;

    let outcome = reconcile(
        provider.as_ref(),
        &GitCli,
        &ComposerCli,
        &SecurityChecker::from_env(),
        work_dir.path(),
        security_only,
    )
    .await?;

    match outcome {
        UpdateOutcome::NoSecurityUpdates => {
            println!("There are no security updates available for {}.", repo.accent());
        }
        UpdateOutcome::NoChange {
            existing_branch: Some(branch),
        } => {
            println!(
                "Existing update branch {} is already current; leaving its pull request open.",
                branch.accent()
            );
        }
        UpdateOutcome::NoChange {
            existing_branch: None,
        } => {
            println!("No changes detected to composer.lock; nothing to do.");
        }
        UpdateOutcome::Created { id, url, branch } => {
            println!(
                "{} Created pull request #{} from {}",
                check(),
                id,
                branch.accent()
            );
            println!("  {}", url.muted());
        }
    }

    Ok(())
}
