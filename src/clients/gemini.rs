//! Gemini summarization client.
//!
//! One call-and-parse cycle per snippet. Failures never surface as errors:
//! they become a [`Summary::Fallback`] so a bad summarization cannot abort
//! the digest for the other items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::core::models::{FallbackReason, Summary};
use crate::worker::research::Summarize;

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Bound on a single summarization call. The client degrades to the
/// fallback string rather than blocking past this.
pub const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(60);

pub struct GeminiClient {
    http: Client,
    /// `None` disables the integration: calls short-circuit to the fallback
    /// string without hitting the service.
    api_key: Option<String>,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(SUMMARIZE_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        if api_key.is_none() {
            warn!("GEMINI_API_KEY not set; summaries will use the fallback string");
        }
        Self { http, api_key }
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "Summarize the following text in key bullet points:\n\n{}\n\nBullet Points:",
            text
        )
    }
}

#[async_trait]
impl Summarize for GeminiClient {
    async fn summarize(&self, text: &str) -> Summary {
        let Some(api_key) = self.api_key.as_deref() else {
            return Summary::Fallback(FallbackReason::MissingKey);
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(text) }] }]
        });

        let response = match self
            .http
            .post(GEMINI_ENDPOINT)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!("Summarization request failed: {}", e);
                return Summary::Fallback(FallbackReason::Transport);
            }
        };

        if !response.status().is_success() {
            error!("Summarization service returned {}", response.status());
            return Summary::Fallback(FallbackReason::Transport);
        }

        let parsed: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to parse summarization response: {}", e);
                return Summary::Fallback(FallbackReason::Transport);
            }
        };

        match first_candidate_text(&parsed) {
            Some(text) => Summary::Generated(text),
            None => {
                error!("Summarization response contained no candidates");
                Summary::Fallback(FallbackReason::NoCandidates)
            }
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a generateContent
/// response body.
fn first_candidate_text(body: &Value) -> Option<String> {
    body.get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .and_then(|p| p.first())
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
}
