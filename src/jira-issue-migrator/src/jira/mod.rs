//! Jira ticket retrieval and cross-linking.
//!
//! Tickets are fetched in created-date windows walking backwards from today
//! until a window comes back empty, followed by one wide window covering the
//! rest of the project's history.

mod client;
mod error;
mod query;
mod ticket;
mod window;

pub use client::JiraClient;
pub use error::JiraError;
pub use query::TicketQuery;
pub use ticket::{IssueType, JiraUser, RawTicket, TicketFields, SUBTASK_ISSUE_TYPE};
pub use window::{DateWindow, HISTORY_DAYS};

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{info, info_span, warn, Instrument};
use url::Url;

/// Supplier of raw tickets and receiver of cross-link comments.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Runs a JQL search.
    async fn search(&self, jql: &str) -> Result<Vec<RawTicket>, JiraError>;

    /// Posts a comment on the ticket with the given key.
    async fn add_comment(&self, key: &str, body: &str) -> Result<(), JiraError>;

    /// Most tickets a single search returns, if the source caps results.
    fn max_results(&self) -> Option<u32> {
        None
    }
}

/// Fetches every ticket matching `query`, oldest first.
///
/// # Arguments
///
/// * `source` - Ticket source to search
/// * `query` - Project and label filter
/// * `today` - Date the walk starts from
/// * `window_days` - Size of each created-date window
///
/// # Errors
///
/// Returns [`JiraError`] if any search fails.
pub async fn fetch_all_tickets<S: TicketSource + ?Sized>(
    source: &S,
    query: &TicketQuery,
    today: NaiveDate,
    window_days: u32,
) -> Result<Vec<RawTicket>, JiraError> {
    let span = info_span!("fetch_tickets", project = %query.project, label = %query.label);

    async {
        let mut tickets = Vec::new();
        let mut seen = HashSet::new();
        let mut window = DateWindow::latest(today, window_days);

        loop {
            info!(%window, "Getting Jira tickets");
            let batch = source.search(&query.jql(&window)).await?;
            if batch.is_empty() {
                break;
            }
            warn_if_capped(source, &window, batch.len());

            collect_new(&mut tickets, &mut seen, batch);
            window = window.previous(window_days);
        }

        let history = window.history();
        info!(window = %history, "Getting remaining Jira tickets");
        let batch = source.search(&query.jql(&history)).await?;
        warn_if_capped(source, &history, batch.len());
        collect_new(&mut tickets, &mut seen, batch);

        tickets.reverse();
        info!(count = tickets.len(), "Fetched Jira tickets");
        Ok(tickets)
    }
    .instrument(span)
    .await
}

fn warn_if_capped<S: TicketSource + ?Sized>(source: &S, window: &DateWindow, count: usize) {
    if hits_cap(count, source.max_results()) {
        warn!(%window, count, "Window hit the result cap, some tickets may be missing");
    }
}

fn hits_cap(count: usize, cap: Option<u32>) -> bool {
    cap.is_some_and(|cap| count >= cap as usize)
}

fn collect_new(tickets: &mut Vec<RawTicket>, seen: &mut HashSet<String>, batch: Vec<RawTicket>) {
    for ticket in batch {
        if seen.insert(ticket.key.clone()) {
            tickets.push(ticket);
        }
    }
}

/// Returns the browse URL of a ticket. `base` must end with a slash.
#[must_use]
pub fn browse_url(base: &Url, key: &str) -> String {
    format!("{base}browse/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers searches from a queue of canned batches.
    struct ScriptedSource {
        batches: Mutex<Vec<Vec<RawTicket>>>,
        queries: Mutex<Vec<String>>,
        cap: Option<u32>,
    }

    impl ScriptedSource {
        fn new(mut batches: Vec<Vec<RawTicket>>) -> Self {
            batches.reverse();
            Self {
                batches: Mutex::new(batches),
                queries: Mutex::new(Vec::new()),
                cap: None,
            }
        }

        fn with_cap(mut self, cap: u32) -> Self {
            self.cap = Some(cap);
            self
        }
    }

    #[async_trait]
    impl TicketSource for ScriptedSource {
        async fn search(&self, jql: &str) -> Result<Vec<RawTicket>, JiraError> {
            self.queries.lock().unwrap().push(jql.to_string());
            Ok(self.batches.lock().unwrap().pop().unwrap_or_default())
        }

        async fn add_comment(&self, _key: &str, _body: &str) -> Result<(), JiraError> {
            Ok(())
        }

        fn max_results(&self) -> Option<u32> {
            self.cap
        }
    }

    fn ticket(key: &str) -> RawTicket {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "key": key,
            "fields": { "summary": key, "issuetype": { "name": "Task" } }
        }))
        .unwrap()
    }

    fn keys(tickets: &[RawTicket]) -> Vec<&str> {
        tickets.iter().map(|t| t.key.as_str()).collect()
    }

    #[tokio::test]
    async fn walks_back_until_empty_window() {
        let source = ScriptedSource::new(vec![
            vec![ticket("A-4"), ticket("A-3")],
            vec![ticket("A-2")],
            vec![],
            vec![ticket("A-1")],
        ]);
        let query = TicketQuery::new("A", "Services");
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let tickets = fetch_all_tickets(&source, &query, today, 90).await.unwrap();

        assert_eq!(keys(&tickets), vec!["A-1", "A-2", "A-3", "A-4"]);
        let queries = source.queries.lock().unwrap();
        assert_eq!(queries.len(), 4);
        assert!(queries[0].contains("created <= 2024-04-01"));
        assert!(queries[3].contains("created >= 1973"));
    }

    #[tokio::test]
    async fn duplicate_keys_are_collected_once() {
        let source = ScriptedSource::new(vec![
            vec![ticket("A-2")],
            vec![ticket("A-2"), ticket("A-1")],
            vec![],
            vec![],
        ]);
        let query = TicketQuery::new("A", "Services");
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let tickets = fetch_all_tickets(&source, &query, today, 90).await.unwrap();

        assert_eq!(keys(&tickets), vec!["A-1", "A-2"]);
    }

    #[tokio::test]
    async fn full_windows_are_still_collected() {
        let source = ScriptedSource::new(vec![
            vec![ticket("A-3"), ticket("A-2")],
            vec![],
            vec![ticket("A-1")],
        ])
        .with_cap(2);
        let query = TicketQuery::new("A", "Services");
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let tickets = fetch_all_tickets(&source, &query, today, 90).await.unwrap();

        assert_eq!(keys(&tickets), vec!["A-1", "A-2", "A-3"]);
    }

    #[test]
    fn cap_is_hit_at_or_above_limit() {
        assert!(hits_cap(2, Some(2)));
        assert!(hits_cap(3, Some(2)));
        assert!(!hits_cap(1, Some(2)));
        assert!(!hits_cap(5000, None));
    }

    #[test]
    fn can_build_browse_url() {
        let base = Url::parse("https://example.atlassian.net/").unwrap();
        assert_eq!(
            browse_url(&base, "APP-7"),
            "https://example.atlassian.net/browse/APP-7"
        );
    }
}
