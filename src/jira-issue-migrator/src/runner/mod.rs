//! Orchestrates a Jira to GitHub migration run.
//!
//! Fetch every ticket, map the non-subtasks, then create the issues one by
//! one, oldest first, skipping keys the ledger already holds.

mod config;
mod error;
mod pipeline;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use pipeline::{Pipeline, CROSS_LINK_ATTEMPTS, CROSS_LINK_FAILED_NOTE};

use crate::issues::GitHubTracker;
use crate::jira::{fetch_all_tickets, JiraClient, TicketQuery};
use crate::ledger::FileLedger;
use crate::mapping::TicketMapper;
use crate::rate_limit::RetryPolicy;
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use tracing::{info, warn};

/// Orchestrates a full migration run.
pub struct Runner {
    config: RunnerConfig,
    jira: JiraClient,
    tracker: GitHubTracker,
    mapper: TicketMapper,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let credentials = config.credentials();
        let settings = config.settings();

        let jira = JiraClient::new(
            credentials.jira_base_url.clone(),
            credentials.jira_username.clone(),
            credentials.jira_password.clone(),
            settings.max_results,
        );
        let tracker =
            GitHubTracker::with_token(&credentials.github_token, credentials.github_repo.clone())?;
        let mapper = TicketMapper::new(credentials.jira_base_url.clone(), settings);
        let renderer = TemplateRenderer::new(&settings.templates)?;

        Ok(Self {
            config,
            jira,
            tracker,
            mapper,
            renderer,
        })
    }

    /// Executes the full orchestration flow.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let credentials = self.config.credentials();
        let settings = self.config.settings();
        let mut summary = RunSummary::new(self.config.dry_run());

        let query = TicketQuery::new(&credentials.jira_project, &credentials.jira_label);
        let today = chrono::Local::now().date_naive();
        let tickets = fetch_all_tickets(&self.jira, &query, today, settings.window_days).await?;
        summary.tickets_fetched = tickets.len();

        info!("Exporting Jira tickets to GitHub issues");
        let issues = self.mapper.map_tickets(&tickets);
        summary.subtasks_filtered = tickets.len() - issues.len();
        info!(count = issues.len(), "Found issues to be created");

        if issues.is_empty() {
            warn!("No tickets to migrate");
            return Ok(summary);
        }

        let mut ledger = FileLedger::open(self.config.state_dir(), &credentials.github_repo)?;
        let mut pipeline = Pipeline::new(
            &self.jira,
            &self.tracker,
            &mut ledger,
            &self.renderer,
            RetryPolicy::from_settings(settings),
        );

        if self.config.dry_run() {
            println!("\n[DRY RUN] Target repository: {}", credentials.github_repo);
            pipeline.preview(&issues, &mut summary);
            return Ok(summary);
        }

        pipeline.migrate_all(&issues, &mut summary).await?;

        Ok(summary)
    }
}

