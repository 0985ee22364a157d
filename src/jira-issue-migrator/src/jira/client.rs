//! Jira REST client.

use super::error::JiraError;
use super::ticket::{RawTicket, SearchResponse};
use super::TicketSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Ticket fields requested from the search endpoint.
const SEARCH_FIELDS: &str = "summary,description,issuetype,reporter,assignee";

/// Authenticated client for the Jira REST API (v2).
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
    max_results: u32,
}

impl JiraClient {
    /// Creates a client for the Jira site at `base_url` using basic auth.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: impl Into<String>,
        max_results: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            username: username.into(),
            password: password.into(),
            max_results,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, JiraError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(JiraError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TicketSource for JiraClient {
    async fn search(&self, jql: &str) -> Result<Vec<RawTicket>, JiraError> {
        let url = self.base_url.join("rest/api/2/search")?;
        let max_results = self.max_results.to_string();
        debug!(%jql, "Searching Jira");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .query(&[
                ("jql", jql),
                ("maxResults", max_results.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?;

        let body: SearchResponse = Self::check_status(response).await?.json().await?;
        Ok(body.issues)
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<(), JiraError> {
        let url = self.base_url.join(&format!("rest/api/2/issue/{key}/comment"))?;

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(&json!({ "body": body }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    fn max_results(&self) -> Option<u32> {
        Some(self.max_results)
    }
}
