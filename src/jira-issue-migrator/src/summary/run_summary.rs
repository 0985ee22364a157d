//! Run summary types.

use super::result::ProcessingResult;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of tickets fetched from Jira.
    pub tickets_fetched: usize,

    /// Number of subtasks left out.
    pub subtasks_filtered: usize,

    /// Number of issues successfully created.
    pub issues_created: usize,

    /// Number of tickets skipped (already migrated).
    pub issues_skipped: usize,

    /// Number of issues that failed to create.
    pub issues_failed: usize,

    /// Number of Jira tickets that couldn't be commented with their issue.
    pub cross_links_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Migrated { cross_linked, .. } => {
                self.issues_created += 1;
                if !cross_linked {
                    self.cross_links_failed += 1;
                }
            }
            ProcessingResult::Skipped { .. } => self.issues_skipped += 1,
            ProcessingResult::Failed { .. } => self.issues_failed += 1,
        }
    }

    /// Returns true if any issue failed to be created.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.issues_failed > 0
    }

    /// Returns true if every issue and cross-link succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.issues_failed == 0 && self.cross_links_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::CreatedIssue;

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&ProcessingResult::Migrated {
            source_key: "APP-1".to_string(),
            issue: CreatedIssue {
                number: 1,
                url: "https://example.com".to_string(),
            },
            cross_linked: true,
        });
        summary.record_result(&ProcessingResult::Skipped {
            source_key: "APP-2".to_string(),
            reason: "already migrated".to_string(),
        });

        assert_eq!(summary.issues_created, 1);
        assert_eq!(summary.issues_skipped, 1);
        assert!(summary.all_success());
    }

    #[test]
    fn failed_cross_link_is_not_a_failure() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&ProcessingResult::Migrated {
            source_key: "APP-1".to_string(),
            issue: CreatedIssue {
                number: 1,
                url: String::new(),
            },
            cross_linked: false,
        });

        assert_eq!(summary.cross_links_failed, 1);
        assert!(!summary.has_failures());
        assert!(!summary.all_success());
    }
}
