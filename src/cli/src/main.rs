//! CLI for the Jira issue migrator.
//!
//! This tool copies unresolved Jira tickets into GitHub issues, translating
//! their markup and recording what was migrated so re-runs are safe.

use clap::Parser;
use jira_issue_migrator::{
    load_settings, Credentials, RunSummary, Runner, RunnerConfig, RunnerError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Jira Issue Migrator - Copy Jira tickets into GitHub issues.
///
/// Credentials are read from JIRA_BASE_URL, JIRA_USERNAME, JIRA_PASSWORD,
/// JIRA_PROJECT, JIRA_LABEL, GITHUB_TOKEN and GITHUB_REPO.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file (assignee tables, labels, retry policy).
    #[arg(long, env = "MIGRATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding per-repository migration state.
    #[arg(long, default_value = "repo-state")]
    state_dir: PathBuf,

    /// Preview issues without creating them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Both octocrab and reqwest pull in rustls; pick one provider for the process.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let credentials = Credentials::from_env()?;
    let settings = load_settings(args.config.as_deref())?;
    let config = RunnerConfig::new(credentials, settings, args.state_dir, args.dry_run);

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Tickets fetched: {}", summary.tickets_fetched);
    println!("  Subtasks filtered: {}", summary.subtasks_filtered);

    if summary.dry_run {
        println!("  Already migrated: {}", summary.issues_skipped);
    } else {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Issues skipped: {}", summary.issues_skipped);
        println!("  Issues failed: {}", summary.issues_failed);
        println!("  Cross-links failed: {}", summary.cross_links_failed);
    }
}
