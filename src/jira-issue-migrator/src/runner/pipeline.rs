//! Sequential create-and-record loop.

use super::RunnerError;
use crate::issues::{CreatedIssue, IssueTracker};
use crate::jira::TicketSource;
use crate::ledger::MigrationLedger;
use crate::mapping::NormalizedIssue;
use crate::rate_limit::{retry_with_backoff, RetryPolicy};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use tracing::{error, info, info_span, warn, Instrument};

/// Attempts at commenting the Jira ticket with its new issue.
pub const CROSS_LINK_ATTEMPTS: u32 = 2;

/// Mapping log line written when the Jira ticket couldn't be commented.
pub const CROSS_LINK_FAILED_NOTE: &str = "Previous line failed to be recorded in jira";

/// Migrates normalized issues one at a time, in order.
pub struct Pipeline<'a, S: ?Sized, T: ?Sized, L: ?Sized> {
    source: &'a S,
    tracker: &'a T,
    ledger: &'a mut L,
    renderer: &'a TemplateRenderer,
    policy: RetryPolicy,
}

impl<'a, S, T, L> Pipeline<'a, S, T, L>
where
    S: TicketSource + ?Sized,
    T: IssueTracker + ?Sized,
    L: MigrationLedger + ?Sized,
{
    /// Creates a pipeline writing to `tracker` and recording in `ledger`.
    pub fn new(
        source: &'a S,
        tracker: &'a T,
        ledger: &'a mut L,
        renderer: &'a TemplateRenderer,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            tracker,
            ledger,
            renderer,
            policy,
        }
    }

    /// Migrates every issue, recording each result in `summary`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Ledger`] if migration state can't be saved;
    /// the run stops there.
    pub async fn migrate_all(
        &mut self,
        issues: &[NormalizedIssue],
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        for (index, issue) in issues.iter().enumerate() {
            info!(
                position = index + 1,
                total = issues.len(),
                source_key = %issue.source_key,
                "Processing ticket"
            );
            let result = self.migrate_issue(issue).await?;
            summary.record_result(&result);
        }
        Ok(())
    }

    /// Prints what [`Pipeline::migrate_all`] would do with `issues` and
    /// counts the already migrated ones into `summary`. Nothing is written.
    ///
    /// Returns the number of issues a live run would create.
    pub fn preview(&self, issues: &[NormalizedIssue], summary: &mut RunSummary) -> usize {
        let (migrated, pending): (Vec<&NormalizedIssue>, Vec<&NormalizedIssue>) = issues
            .iter()
            .partition(|issue| self.ledger.contains(&issue.source_key));
        summary.issues_skipped += migrated.len();

        println!("  Found {} issues:\n", issues.len());
        for (i, issue) in issues.iter().enumerate() {
            let position = format!("[{}/{}]", i + 1, issues.len());
            if self.ledger.contains(&issue.source_key) {
                println!("  {position} {} (already migrated, skipping)", issue.source_key);
                continue;
            }

            println!("  {position} Would create issue: \"{}\"", issue.title);
            let labels: Vec<&str> = issue.labels.iter().map(String::as_str).collect();
            println!("    Labels: {}", labels.join(", "));
            if issue.assignable {
                println!("    Assignee: {}", issue.assignee);
            } else if issue.needs_manual_assignment() {
                println!(
                    "    Assignee: {} (not assignable, will be asked to self-assign)",
                    issue.assignee
                );
            }
        }

        if let Some(first) = pending.first() {
            println!("\n  Sample issue body ({}):", first.source_key);
            for line in first.description.lines().take(10) {
                println!("    {line}");
            }
            if first.description.lines().count() > 10 {
                println!("    ...");
            }
        }
        println!();

        info!(
            would_create = pending.len(),
            already_migrated = migrated.len(),
            "Dry run complete"
        );
        pending.len()
    }

    /// Migrates a single issue unless the ledger already has it.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Ledger`] if migration state can't be saved.
    pub async fn migrate_issue(
        &mut self,
        issue: &NormalizedIssue,
    ) -> Result<ProcessingResult, RunnerError> {
        let span = info_span!("migrate", source_key = %issue.source_key);

        async {
            if self.ledger.contains(&issue.source_key) {
                info!("Already migrated, skipping");
                return Ok(ProcessingResult::Skipped {
                    source_key: issue.source_key.clone(),
                    reason: "already migrated".to_string(),
                });
            }

            let tracker = self.tracker;
            let created = match retry_with_backoff(&self.policy, "create issue", || {
                tracker.create_issue(issue)
            })
            .await
            {
                Ok(created) => created,
                Err(e) => {
                    error!(error = %e, "Failed to create issue");
                    return Ok(ProcessingResult::Failed {
                        source_key: issue.source_key.clone(),
                        error: e.to_string(),
                    });
                }
            };

            info!(
                issue_number = created.number,
                "Issue #{} maps to {}", created.number, issue.source_key
            );
            self.ledger.append(&issue.source_key)?;
            self.ledger.record_mapping(created.number, &issue.source_key)?;

            if issue.needs_manual_assignment() {
                self.notify_unassignable(&created, issue).await;
            }

            let cross_linked = self.cross_link(&created, &issue.source_key).await;
            if !cross_linked {
                self.ledger.annotate(CROSS_LINK_FAILED_NOTE)?;
            }

            Ok(ProcessingResult::Migrated {
                source_key: issue.source_key.clone(),
                issue: created,
                cross_linked,
            })
        }
        .instrument(span)
        .await
    }

    async fn notify_unassignable(&self, created: &CreatedIssue, issue: &NormalizedIssue) {
        warn!(
            issue_number = created.number,
            assignee = %issue.assignee,
            "Unable to assign user, asking them to self-assign"
        );

        let body = match self
            .renderer
            .render_unassignable(&issue.assignee, &issue.source_key)
        {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to render unassignable notice");
                return;
            }
        };

        let tracker = self.tracker;
        let number = created.number;
        if let Err(e) = retry_with_backoff(&self.policy, "comment on issue", || {
            tracker.create_comment(number, &body)
        })
        .await
        {
            warn!(error = %e, "Failed to post unassignable notice");
        }
    }

    async fn cross_link(&self, created: &CreatedIssue, source_key: &str) -> bool {
        let body = match self
            .renderer
            .render_cross_link(&created.url, created.number, source_key)
        {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to render cross-link comment");
                return false;
            }
        };

        for attempt in 1..=CROSS_LINK_ATTEMPTS {
            match self.source.add_comment(source_key, &body).await {
                Ok(()) => return true,
                Err(e) => warn!(attempt, error = %e, "Failed to comment on Jira ticket"),
            }
        }

        warn!(
            issue_number = created.number,
            "Failed to record migration of {} to issue #{}", source_key, created.number
        );
        false
    }
}
