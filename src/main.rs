//! clu - automated composer.lock update pull requests
//!
//! CLI binary for dependency lock-file maintenance across GitHub, GitLab,
//! and Bitbucket.

use anyhow::Result;
use clap::{Parser, Subcommand};
use clu::types::{PrState, Provider};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "clu")]
#[command(about = "Automated composer.lock update pull requests - GitHub, GitLab & Bitbucket")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for composer dependency updates and create a PR if applicable
    Update {
        /// Site name (resolved via the sites file) or Git repository URL
        target: String,

        /// Check only for security updates
        #[arg(long)]
        security_only: bool,
    },

    /// Pull request operations
    Pr {
        #[command(subcommand)]
        command: PrCommands,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        provider: AuthProvider,
    },
}

#[derive(Subcommand)]
enum PrCommands {
    /// List pull requests
    List {
        /// Site name or Git repository URL
        target: String,

        /// Return PRs of only the given state (open, closed, all)
        #[arg(long, default_value = "all")]
        state: PrState,
    },

    /// Create a new pull request
    Create {
        /// Site name or Git repository URL
        target: String,

        /// Source branch from which to create the PR
        #[arg(long)]
        source: String,

        /// Target branch into which the PR will be merged (defaults to master)
        #[arg(long = "target-branch")]
        target_branch: Option<String>,

        /// Short title for the pull request
        #[arg(long)]
        title: Option<String>,

        /// Extended description of the pull request
        #[arg(long)]
        description: Option<String>,

        /// Reviewer UUID to assign; repeatable (Bitbucket only)
        #[arg(long = "reviewer")]
        reviewers: Vec<String>,

        /// Close the source branch upon merging (GitLab and Bitbucket)
        #[arg(long)]
        close_source: bool,

        /// Open the pull request as a draft (GitHub only)
        #[arg(long)]
        draft: bool,
    },

    /// Close a pull request
    Close {
        /// Site name or Git repository URL
        target: String,

        /// Pull request number to close
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AuthProvider {
    /// GitHub authentication
    Github {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// GitLab authentication
    Gitlab {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Bitbucket authentication
    Bitbucket {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

async fn run_auth(provider: Provider, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Test => cli::run_auth_test(provider).await?,
        AuthAction::Setup => cli::run_auth_setup(provider),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLU_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            target,
            security_only,
        } => {
            cli::run_update(&target, security_only).await?;
        }
        Commands::Pr { command } => match command {
            PrCommands::List { target, state } => {
                cli::run_pr_list(&target, state).await?;
            }
            PrCommands::Create {
                target,
                source,
                target_branch,
                title,
                description,
                reviewers,
                close_source,
                draft,
            } => {
                let options = clu::types::PrOptions {
                    target: None,
                    description,
                    reviewers,
                    close_source_branch: close_source,
                    draft,
                };
                cli::run_pr_create(&target, &source, target_branch, title, options).await?;
            }
            PrCommands::Close { target, id, yes } => {
                cli::run_pr_close(&target, id, yes).await?;
            }
        },
        Commands::Auth { provider } => match provider {
            AuthProvider::Github { action } => run_auth(Provider::GitHub, action).await?,
            AuthProvider::Gitlab { action } => run_auth(Provider::GitLab, action).await?,
            AuthProvider::Bitbucket { action } => run_auth(Provider::Bitbucket, action).await?,
        },
    }

    Ok(())
}
