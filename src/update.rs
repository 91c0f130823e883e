//! Update reconciliation workflow
//!
//! Drives one composer.lock update run: clone, advisory gate, supersession
//! of any prior automated pull request, install/update, change detection,
//! commit, push, and pull request creation. Each step blocks until done;
//! there is no internal parallelism and no retry — the next scheduled run
//! is the retry mechanism.

use crate::advisory::{AdvisoryChecker, AdvisoryStatus};
use crate::composer::PackageManager;
use crate::error::{Error, Result};
use crate::git::Vcs;
use crate::provider::GitProvider;
use crate::types::{PrOptions, PrState};
use chrono::Local;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Prefix shared by all automated update branches
pub const BRANCH_PREFIX: &str = "clu-";

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Security-only mode was requested and the advisory check came back
    /// clean
    NoSecurityUpdates,
    /// The lock file did not change; nothing to commit. When a prior
    /// automated branch was found and re-verified, it is named here and
    /// its pull request is left open.
    NoChange {
        /// Automated branch that was already up to date, if one was found
        existing_branch: Option<String>,
    },
    /// A new branch and pull request were created
    Created {
        /// Pull request number
        id: u64,
        /// Pull request web URL
        url: String,
        /// Branch the update was committed to
        branch: String,
    },
}

/// Transient state for one reconciliation attempt. Created when the run
/// starts, discarded when it completes.
struct UpdateRun {
    work_dir: PathBuf,
    security_message: String,
    advisory_status: AdvisoryStatus,
    update_log: Vec<String>,
}

/// Run one full reconciliation against a cloned working directory.
///
/// `work_dir` must be a fresh, empty scratch directory; the caller owns its
/// lifecycle and disposes of it after the run, whatever the outcome.
pub async fn run_update(
    provider: &dyn GitProvider,
    vcs: &dyn Vcs,
    composer: &dyn PackageManager,
    advisory: &dyn AdvisoryChecker,
    work_dir: &Path,
    security_only: bool,
) -> Result<UpdateOutcome> {
    provider.clone_repository(work_dir).await?;

    // Check for security advisories against the versions currently in use.
    let report = advisory.check(&work_dir.join("composer.lock")).await;
    if !report.message.trim().is_empty() {
        tracing::info!("{}", report.message.trim());
    }

    // Exit early if the caller asked for security updates only and no
    // dependency is vulnerable. An unknown status must not short-circuit.
    if security_only && report.status == AdvisoryStatus::Clean {
        tracing::info!("there are no security updates available");
        return Ok(UpdateOutcome::NoSecurityUpdates);
    }

    let mut run = UpdateRun {
        work_dir: work_dir.to_path_buf(),
        security_message: report.message,
        advisory_status: report.status,
        update_log: Vec::new(),
    };

    if let Some(existing_branch) = find_automated_branch(provider).await? {
        if !supersede_existing_branch(provider, vcs, composer, &run, &existing_branch).await? {
            // The open pull request already carries the latest updates.
            return Ok(UpdateOutcome::NoChange {
                existing_branch: Some(existing_branch),
            });
        }
    }

    // Sanity check that the unmodified lock file installs cleanly.
    composer.install(&run.work_dir).await?;

    // Capture the update output for the pull request description,
    // regardless of how the update itself fares.
    run.update_log = composer.update(&run.work_dir).await?;

    if !lock_file_changed(vcs, &run.work_dir).await? {
        return Ok(UpdateOutcome::NoChange {
            existing_branch: None,
        });
    }

    publish_update(provider, vcs, &run).await
}

/// Find an open automated update branch via the shared naming convention.
async fn find_automated_branch(provider: &dyn GitProvider) -> Result<Option<String>> {
    let branches = provider.list_pull_request_branches(PrState::Open).await?;
    for branch in branches.into_values() {
        if branch_pattern().is_match(&branch) {
            tracing::info!(%branch, "found existing automated update branch");
            return Ok(Some(branch));
        }
    }
    Ok(None)
}

/// Re-run the update on an existing automated branch and, if it is stale,
/// close its pull request and delete the branch on both ends.
///
/// Returns `false` when the branch is already current and nothing was
/// superseded.
async fn supersede_existing_branch(
    provider: &dyn GitProvider,
    vcs: &dyn Vcs,
    composer: &dyn PackageManager,
    run: &UpdateRun,
    existing_branch: &str,
) -> Result<bool> {
    let initial_branch = vcs.current_branch(&run.work_dir).await?;
    vcs.fetch(&run.work_dir).await?;
    vcs.checkout(&run.work_dir, existing_branch, false).await?;

    composer.install(&run.work_dir).await?;
    composer.update(&run.work_dir).await?;
    if !lock_file_changed(vcs, &run.work_dir).await? {
        return Ok(false);
    }

    close_superseded_pr(provider, vcs, &run.work_dir, existing_branch).await?;

    // Restore the original branch locally and drop the stale one.
    vcs.checkout(&run.work_dir, &initial_branch, true).await?;
    vcs.delete_local_branch(&run.work_dir, existing_branch, true).await?;
    Ok(true)
}

/// Close the open pull request for `branch` and delete its remote branch.
///
/// Not finding the pull request, or a rejected close, is fatal: continuing
/// would leave an orphaned branch next to a fresh pull request.
async fn close_superseded_pr(
    provider: &dyn GitProvider,
    vcs: &dyn Vcs,
    work_dir: &Path,
    branch: &str,
) -> Result<()> {
    let open = provider.list_pull_request_branches(PrState::Open).await?;
    let id = open
        .into_iter()
        .find(|(_, source)| source == branch)
        .map(|(id, _)| id)
        .ok_or_else(|| Error::PullRequestNotFound {
            branch: branch.to_string(),
        })?;

    if !provider.close_pull_request(id).await? {
        return Err(Error::ClosePullRequest(id));
    }

    vcs.push_delete(work_dir, "origin", branch).await?;
    tracing::info!(id, branch, "closed existing pull request and deleted branch");
    Ok(())
}

/// Commit the lock-file change to a dated branch, push it, and open the
/// pull request.
async fn publish_update(
    provider: &dyn GitProvider,
    vcs: &dyn Vcs,
    run: &UpdateRun,
) -> Result<UpdateOutcome> {
    let date = Local::now().format("%Y-%m-%d-%H-%M").to_string();
    let branch = format!("{BRANCH_PREFIX}{date}");
    vcs.create_branch(&run.work_dir, &branch).await?;

    let title = format!("Update Composer dependencies ({date})");
    let description = format!(
        "```\n{}{}\n```",
        run.update_log.join("\n"),
        run.security_message
    );
    vcs.commit_all(&run.work_dir, &format!("{title}\n{description}"))
        .await?;
    vcs.push(&run.work_dir, "origin", &branch).await?;

    let options = PrOptions {
        description: Some(description),
        ..PrOptions::default()
    };
    let Some(pr) = provider.create_pull_request(&branch, &title, &options).await? else {
        return Err(Error::CreatePullRequest(branch));
    };

    if run.advisory_status == AdvisoryStatus::Vulnerable {
        tracing::warn!(%branch, "update addresses known security advisories");
    }

    Ok(UpdateOutcome::Created {
        id: pr.id,
        url: pr.url,
        branch,
    })
}

/// Check whether composer.lock drifted, via version-control status.
async fn lock_file_changed(vcs: &dyn Vcs, work_dir: &Path) -> Result<bool> {
    let status = vcs.status_short(work_dir, "composer.lock").await?;
    if status.trim().is_empty() {
        tracing::info!("no changes detected to composer.lock");
        Ok(false)
    } else {
        tracing::info!("detected changes to composer.lock");
        Ok(true)
    }
}

fn branch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^clu-[0-9-]+").expect("hardcoded pattern is valid"))
}
