#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod issues;
pub mod jira;
pub mod ledger;
pub mod mapping;
pub mod markup;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;

pub use config::{
    load_settings, CommentTemplates, ConfigError, Credentials, MigrationSettings, RepositoryId,
};
pub use issues::{CreatedIssue, GitHubTracker, IssueError, IssueTracker};
pub use jira::{
    fetch_all_tickets, DateWindow, JiraClient, JiraError, RawTicket, TicketQuery, TicketSource,
};
pub use ledger::{FileLedger, LedgerError, MemoryLedger, MigrationLedger};
pub use mapping::{AssigneeDirectory, NormalizedIssue, TicketMapper};
pub use markup::{format_description, translate, truncate};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, retry_with_backoff, wait_if_needed,
    RateLimitInfo, RetryPolicy,
};
pub use runner::{Pipeline, Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{
    generate_issue_title, generate_migration_footer, TemplateError, TemplateRenderer,
};
