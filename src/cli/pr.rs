//! Pull request commands - list, create, close

use crate::cli::style::{check, cross, Stylize};
use clu::error::{Error, Result};
use clu::provider::{create_provider, parse_repo_ref};
use clu::site::resolve_repository_url;
use clu::types::{PrOptions, PrState};
use dialoguer::Confirm;

const DEFAULT_TITLE: &str = "Pull request from clu.";

/// List pull requests for a site or repository URL.
pub async fn run_pr_list(target: &str, state: PrState) -> Result<()> {
    let url = resolve_repository_url(target)?;
    let repo = parse_repo_ref(&url)?;
    let provider = create_provider(&repo).await?;

    let branches = provider.list_pull_request_branches(state).await?;
    if branches.is_empty() {
        println!("No {state} pull requests on {repo}.");
        return Ok(());
    }

    println!("{:>6}  {}", "ID", "SOURCE");
    for (id, branch) in branches {
        println!("{id:>6}  {branch}");
    }
    Ok(())
}

/// Create a pull request from `source`.
pub async fn run_pr_create(
    target: &str,
    source: &str,
    target_branch: Option<String>,
    title: Option<String>,
    options: PrOptions,
) -> Result<()> {
    // The destination defaults to master here; the provider-side default
    // branch lookup only applies when no target is involved at all.
    let target_branch = target_branch.unwrap_or_else(|| "master".to_string());
    if source == target_branch {
        return Err(Error::BranchConflict(source.to_string()));
    }

    let url = resolve_repository_url(target)?;
    let repo = parse_repo_ref(&url)?;
    let provider = create_provider(&repo).await?;

    let options = PrOptions {
        target: Some(target_branch),
        ..options
    };
    let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());

    match provider.create_pull_request(source, &title, &options).await? {
        Some(pr) => {
            println!("{} Created pull request #{}: {}", check(), pr.id, pr.title);
            println!("  {}", pr.url.muted());
            Ok(())
        }
        None => Err(Error::CreatePullRequest(source.to_string())),
    }
}

/// Close a pull request by number, gated behind a confirmation prompt.
pub async fn run_pr_close(target: &str, id: u64, assume_yes: bool) -> Result<()> {
    let url = resolve_repository_url(target)?;
    let repo = parse_repo_ref(&url)?;

    if !assume_yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Close pull request #{id} on {repo}?"))
            .default(false)
            .interact()
            .map_err(|e| match e {
                dialoguer::Error::IO(io) => Error::Io(io),
            })?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let provider = create_provider(&repo).await?;
    if provider.close_pull_request(id).await? {
        println!("{} Closed pull request #{id} on {repo}", check());
        Ok(())
    } else {
        eprintln!("{} Could not close pull request #{id} on {repo}", cross());
        Err(Error::ClosePullRequest(id))
    }
}
