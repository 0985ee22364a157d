use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use jira_issue_migrator::runner::CROSS_LINK_FAILED_NOTE;
use jira_issue_migrator::{
    CommentTemplates, CreatedIssue, IssueError, IssueTracker, JiraError, LedgerError,
    MemoryLedger, MigrationLedger, MigrationSettings, NormalizedIssue, Pipeline, ProcessingResult,
    RawTicket, RetryPolicy, RunSummary, RunnerError, TemplateRenderer, TicketMapper, TicketSource,
};
use url::Url;

/// Records created issues and comments; fails creation for chosen keys.
#[derive(Default)]
struct FakeTracker {
    failing_keys: HashSet<String>,
    created: Mutex<Vec<String>>,
    comments: Mutex<Vec<(u64, String)>>,
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn create_issue(&self, issue: &NormalizedIssue) -> Result<CreatedIssue, IssueError> {
        if self.failing_keys.contains(&issue.source_key) {
            return Err(IssueError::UnexpectedStatus {
                status: 422,
                message: "validation failed".to_string(),
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push(issue.source_key.clone());
        let number = created.len() as u64;
        Ok(CreatedIssue {
            number,
            url: format!("https://github.com/acme/app/issues/{number}"),
        })
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<(), IssueError> {
        self.comments
            .lock()
            .unwrap()
            .push((issue_number, body.to_string()));
        Ok(())
    }
}

/// Collects Jira comments; optionally rejects all of them.
#[derive(Default)]
struct FakeSource {
    reject_comments: bool,
    comment_attempts: Mutex<usize>,
    comments: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TicketSource for FakeSource {
    async fn search(&self, _jql: &str) -> Result<Vec<RawTicket>, JiraError> {
        Ok(Vec::new())
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<(), JiraError> {
        *self.comment_attempts.lock().unwrap() += 1;
        if self.reject_comments {
            return Err(JiraError::Status {
                status: 403,
                message: "not allowed".to_string(),
            });
        }

        self.comments
            .lock()
            .unwrap()
            .push((key.to_string(), body.to_string()));
        Ok(())
    }
}

/// Keeps keys in memory but can't write the mapping log.
#[derive(Default)]
struct BrokenMappingLedger {
    inner: MemoryLedger,
}

impl MigrationLedger for BrokenMappingLedger {
    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn append(&mut self, key: &str) -> Result<(), LedgerError> {
        self.inner.append(key)
    }

    fn record_mapping(&mut self, _issue_number: u64, _key: &str) -> Result<(), LedgerError> {
        Err(LedgerError::IoError {
            path: "mapping.txt".to_string(),
            source: std::io::Error::other("disk full"),
        })
    }

    fn annotate(&mut self, note: &str) -> Result<(), LedgerError> {
        self.inner.annotate(note)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

fn settings() -> MigrationSettings {
    let mut settings = MigrationSettings::default();
    settings
        .assignees
        .insert("Ada Lovelace".to_string(), "ada".to_string());
    settings
        .assignees
        .insert("Charles Babbage".to_string(), "cbabbage".to_string());
    settings.assignable.insert("ada".to_string());
    settings
}

fn ticket(key: &str, issue_type: &str, assignee: Option<&str>) -> RawTicket {
    serde_json::from_value(serde_json::json!({
        "id": "1",
        "key": key,
        "fields": {
            "summary": format!("Summary of {key}"),
            "description": "h2. Details\n+important+",
            "issuetype": { "name": issue_type },
            "reporter": { "displayName": "Grace" },
            "assignee": assignee.map(|name| serde_json::json!({ "displayName": name }))
        }
    }))
    .unwrap()
}

fn issues(tickets: &[RawTicket]) -> Vec<NormalizedIssue> {
    let base = Url::parse("https://example.atlassian.net/").unwrap();
    TicketMapper::new(base, &settings()).map_tickets(tickets)
}

fn renderer() -> TemplateRenderer {
    TemplateRenderer::new(&CommentTemplates::default()).unwrap()
}

async fn migrate(
    source: &FakeSource,
    tracker: &FakeTracker,
    ledger: &mut MemoryLedger,
    issues: &[NormalizedIssue],
) -> RunSummary {
    let renderer = renderer();
    let mut summary = RunSummary::new(false);
    let mut pipeline = Pipeline::new(source, tracker, ledger, &renderer, RetryPolicy::immediate(3));
    pipeline.migrate_all(issues, &mut summary).await.unwrap();
    summary
}

#[tokio::test]
async fn migrates_in_order_and_cross_links() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[ticket("APP-1", "Bug", None), ticket("APP-2", "Task", None)]);

    let summary = migrate(&source, &tracker, &mut ledger, &issues).await;

    assert_eq!(summary.issues_created, 2);
    assert!(summary.all_success());
    assert_eq!(*tracker.created.lock().unwrap(), vec!["APP-1", "APP-2"]);
    assert_eq!(ledger.keys(), ["APP-1", "APP-2"]);
    assert_eq!(ledger.mapping(), ["1: APP-1", "2: APP-2"]);

    let comments = source.comments.lock().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].0, "APP-1");
    assert_eq!(
        comments[0].1,
        "This issue has been migrated to https://github.com/acme/app/issues/1"
    );
}

#[tokio::test]
async fn rerun_with_full_ledger_writes_nothing() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[ticket("APP-1", "Task", None), ticket("APP-2", "Task", None)]);

    migrate(&source, &tracker, &mut ledger, &issues).await;

    let second_source = FakeSource::default();
    let second_tracker = FakeTracker::default();
    let summary = migrate(&second_source, &second_tracker, &mut ledger, &issues).await;

    assert_eq!(summary.issues_created, 0);
    assert_eq!(summary.issues_skipped, 2);
    assert!(second_tracker.created.lock().unwrap().is_empty());
    assert!(second_tracker.comments.lock().unwrap().is_empty());
    assert_eq!(*second_source.comment_attempts.lock().unwrap(), 0);
    assert_eq!(ledger.len(), 2);
}

#[tokio::test]
async fn subtasks_never_reach_the_tracker() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[
        ticket("APP-1", "Sub-task", None),
        ticket("APP-2", "Story", None),
    ]);

    migrate(&source, &tracker, &mut ledger, &issues).await;

    assert_eq!(*tracker.created.lock().unwrap(), vec!["APP-2"]);
    assert!(!ledger.contains("APP-1"));
}

#[tokio::test]
async fn failed_cross_link_is_annotated() {
    let source = FakeSource {
        reject_comments: true,
        ..FakeSource::default()
    };
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[ticket("APP-1", "Task", None)]);

    let summary = migrate(&source, &tracker, &mut ledger, &issues).await;

    assert_eq!(summary.issues_created, 1);
    assert_eq!(summary.cross_links_failed, 1);
    assert_eq!(*source.comment_attempts.lock().unwrap(), 2);
    assert_eq!(ledger.mapping(), ["1: APP-1", CROSS_LINK_FAILED_NOTE]);
    assert!(ledger.contains("APP-1"));
}

#[tokio::test]
async fn unassignable_assignee_gets_notice() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[
        ticket("APP-1", "Task", Some("Charles Babbage")),
        ticket("APP-2", "Task", Some("Ada Lovelace")),
        ticket("APP-3", "Task", Some("Unknown Person")),
    ]);

    migrate(&source, &tracker, &mut ledger, &issues).await;

    let comments = tracker.comments.lock().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].0, 1);
    assert!(comments[0].1.contains("(at)cbabbage"));
}

#[tokio::test]
async fn failed_creation_is_not_recorded() {
    let source = FakeSource::default();
    let tracker = FakeTracker {
        failing_keys: HashSet::from(["APP-1".to_string()]),
        ..FakeTracker::default()
    };
    let mut ledger = MemoryLedger::default();
    let issues = issues(&[ticket("APP-1", "Task", None), ticket("APP-2", "Task", None)]);

    let summary = migrate(&source, &tracker, &mut ledger, &issues).await;

    assert_eq!(summary.issues_failed, 1);
    assert_eq!(summary.issues_created, 1);
    assert!(summary.has_failures());
    assert!(!ledger.contains("APP-1"));
    assert!(ledger.contains("APP-2"));

    let source_comments = source.comments.lock().unwrap();
    assert_eq!(source_comments.len(), 1);
    assert_eq!(source_comments[0].0, "APP-2");
}

#[tokio::test]
async fn migrate_issue_reports_skip() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::with_keys(["APP-1"]);
    let renderer = renderer();
    let issues = issues(&[ticket("APP-1", "Task", None)]);

    let mut pipeline = Pipeline::new(
        &source,
        &tracker,
        &mut ledger,
        &renderer,
        RetryPolicy::immediate(1),
    );
    let result = pipeline.migrate_issue(&issues[0]).await.unwrap();

    assert!(matches!(
        result,
        ProcessingResult::Skipped { ref source_key, .. } if source_key == "APP-1"
    ));
}

#[tokio::test]
async fn mapping_log_failure_still_records_key() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = BrokenMappingLedger::default();
    let renderer = renderer();
    let issues = issues(&[ticket("APP-1", "Task", None)]);

    let mut pipeline = Pipeline::new(
        &source,
        &tracker,
        &mut ledger,
        &renderer,
        RetryPolicy::immediate(1),
    );
    let result = pipeline.migrate_issue(&issues[0]).await;

    assert!(matches!(result, Err(RunnerError::Ledger(_))));
    assert_eq!(*tracker.created.lock().unwrap(), vec!["APP-1"]);
    assert!(ledger.contains("APP-1"));
}

#[tokio::test]
async fn dry_run_preview_writes_nothing() {
    let source = FakeSource::default();
    let tracker = FakeTracker::default();
    let mut ledger = MemoryLedger::with_keys(["APP-1", "APP-3"]);
    let renderer = renderer();
    let issues = issues(&[
        ticket("APP-1", "Task", None),
        ticket("APP-2", "Bug", Some("Charles Babbage")),
        ticket("APP-3", "Task", None),
        ticket("APP-4", "Sub-task", None),
    ]);

    let mut summary = RunSummary::new(true);
    let pipeline = Pipeline::new(
        &source,
        &tracker,
        &mut ledger,
        &renderer,
        RetryPolicy::immediate(1),
    );
    let would_create = pipeline.preview(&issues, &mut summary);

    assert_eq!(would_create, 1);
    assert_eq!(summary.issues_skipped, 2);
    assert_eq!(summary.issues_created, 0);
    assert!(tracker.created.lock().unwrap().is_empty());
    assert!(tracker.comments.lock().unwrap().is_empty());
    assert_eq!(*source.comment_attempts.lock().unwrap(), 0);
    assert_eq!(ledger.keys(), ["APP-1", "APP-3"]);
    assert!(ledger.mapping().is_empty());
}
