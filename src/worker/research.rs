//! The research pipeline: search, filter to usable results, summarize each,
//! assemble a digest.
//!
//! Sequencing contract: exactly [`DIGEST_ITEM_COUNT`] items in original
//! search order, fail-closed when fewer usable results exist, and per-item
//! summarization that can never fail the pipeline.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{error, info};

use crate::core::models::{
    DIGEST_ITEM_COUNT, Digest, ResearchOutcome, SearchResult, Summary, SummarizedItem,
};
use crate::errors::BotError;

#[async_trait]
pub trait Search: Send + Sync {
    async fn search(&self, topic: &str) -> Result<Vec<SearchResult>, BotError>;
}

#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, text: &str) -> Summary;
}

/// Run one research request end to end.
pub async fn perform_research(
    search: &dyn Search,
    summarizer: &dyn Summarize,
    topic: &str,
) -> ResearchOutcome {
    let results = match search.search(topic).await {
        Ok(results) => results,
        Err(e) => {
            error!(topic = topic, "Search request failed: {}", e);
            return ResearchOutcome::TransientError;
        }
    };

    if results.is_empty() {
        return ResearchOutcome::NoResults;
    }

    let usable: Vec<SearchResult> = results
        .into_iter()
        .filter(SearchResult::is_usable)
        .take(DIGEST_ITEM_COUNT)
        .collect();
    if usable.len() < DIGEST_ITEM_COUNT {
        info!(
            topic = topic,
            usable = usable.len(),
            "Not enough usable results for a digest"
        );
        return ResearchOutcome::InsufficientResults;
    }

    // join_all yields in input order, so the digest preserves search order
    // no matter which summarization finishes first.
    let summaries = join_all(usable.iter().map(|r| summarizer.summarize(&r.snippet))).await;

    let items: Vec<SummarizedItem> = usable
        .into_iter()
        .zip(summaries)
        .map(|(result, summary)| SummarizedItem {
            title: result.title,
            link: result.link,
            summary: summary.text().to_string(),
        })
        .collect();

    match Digest::from_items(topic, items) {
        Some(digest) => ResearchOutcome::Digest(digest),
        None => ResearchOutcome::InsufficientResults,
    }
}
