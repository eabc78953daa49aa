//! SerpAPI search client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::models::SearchResult;
use crate::errors::BotError;
use crate::worker::research::Search;

const SEARCH_URL: &str = "https://serpapi.com/search";

/// Candidates requested per search. More than the digest needs, so a few
/// unusable results don't starve the pipeline.
pub const SEARCH_CANDIDATES: u32 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
}

pub struct SearchClient {
    http: Client,
    api_key: String,
}

impl SearchClient {
    #[must_use]
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl Search for SearchClient {
    async fn search(&self, topic: &str) -> Result<Vec<SearchResult>, BotError> {
        let num = SEARCH_CANDIDATES.to_string();
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("engine", "google"),
                ("q", topic),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::SearchError(format!(
                "search request returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| BotError::ParseError(format!("search response: {}", e)))?;
        Ok(body.organic_results)
    }
}
