//! GitHub-backed [`IssueTracker`].

use super::{CreatedIssue, IssueError, IssueTracker};
use crate::config::RepositoryId;
use crate::mapping::NormalizedIssue;
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, info, info_span, Instrument};

/// Creates issues and comments in one GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    repository: RepositoryId,
}

impl GitHubTracker {
    /// Creates a tracker for `repository` using an authenticated client.
    #[must_use]
    pub fn new(octocrab: Octocrab, repository: RepositoryId) -> Self {
        Self {
            octocrab,
            repository,
        }
    }

    /// Creates a tracker authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the client can't be built.
    pub fn with_token(token: &str, repository: RepositoryId) -> Result<Self, octocrab::Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self::new(octocrab, repository))
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn create_issue(&self, issue: &NormalizedIssue) -> Result<CreatedIssue, IssueError> {
        let span = info_span!(
            "create_issue",
            repo = %self.repository,
            source_key = %issue.source_key
        );

        async {
            ensure_core_rate_limit(&self.octocrab).await?;

            let created = self
                .octocrab
                .issues(&self.repository.owner, &self.repository.name)
                .create(&issue.title)
                .body(&issue.description)
                .labels(issue.labels.iter().cloned().collect::<Vec<_>>())
                .assignees(issue.assignees())
                .send()
                .await?;

            info!(issue_number = created.number, "Issue created");
            Ok(CreatedIssue {
                number: created.number,
                url: created.html_url.to_string(),
            })
        }
        .instrument(span)
        .await
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<(), IssueError> {
        debug!(repo = %self.repository, issue_number, "Commenting on issue");
        ensure_core_rate_limit(&self.octocrab).await?;

        self.octocrab
            .issues(&self.repository.owner, &self.repository.name)
            .create_comment(issue_number, body)
            .await?;
        Ok(())
    }
}
