//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use sourcelevel::output::OutputMode;

/// sourcelevel - SLSA Source level evaluation
#[derive(Parser, Debug)]
#[command(
    name = "sourcelevel",
    version,
    about = "SLSA Source level evaluation for protected branches",
    long_about = "Decide which SLSA Source level a branch has reached.\n\n\
                  Branch controls are checked against the policy declared for the\n\
                  repository, either in the policy repository or in a local file."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a commit's control status against the branch policy
    Check {
        #[command(flatten)]
        repo: RepoArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Control status JSON (`commit_push_time` and `controls`)
        #[arg(long)]
        controls: PathBuf,
    },

    /// Evaluate the controls recorded in a source provenance statement
    VerifyProv {
        #[command(flatten)]
        repo: RepoArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        /// In-toto statement JSON carrying source provenance
        #[arg(long)]
        statement: PathBuf,
    },

    /// Inspect or draft branch policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum PolicyAction {
    /// Show the policy applying to a branch
    Show {
        #[command(flatten)]
        repo: RepoArgs,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Draft a policy the branch already satisfies
    Draft {
        #[command(flatten)]
        repo: RepoArgs,

        /// Control status JSON (`commit_push_time` and `controls`)
        #[arg(long)]
        controls: PathBuf,

        /// Policy repository checkout to write the draft into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which branch to evaluate
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Repository locator: owner/repo, github.com/owner/repo[@branch]
    pub locator: Option<String>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch name
    #[arg(long)]
    pub branch: Option<String>,
}

/// Where policies come from
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Read the policy from this file instead of the policy repository
    #[arg(long, value_name = "PATH")]
    pub use_local_policy: Option<PathBuf>,
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Check {
            repo,
            policy,
            controls,
        }) => commands::check(&repo, &policy, &controls, output_mode).await,
        Some(Command::VerifyProv {
            repo,
            policy,
            statement,
        }) => commands::verify_prov(&repo, &policy, &statement, output_mode).await,
        Some(Command::Policy {
            action: PolicyAction::Show { repo, policy },
        }) => commands::policy_show(&repo, &policy, output_mode).await,
        Some(Command::Policy {
            action:
                PolicyAction::Draft {
                    repo,
                    controls,
                    output,
                },
        }) => commands::policy_draft(&repo, &controls, output.as_deref(), output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": sourcelevel::VERSION
                    })
                );
            } else {
                println!("sourcelevel v{}", sourcelevel::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": sourcelevel::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("sourcelevel v{}", sourcelevel::VERSION);
                println!("\nRun 'sourcelevel --help' for usage");
            }
            Ok(())
        },
    }
}
