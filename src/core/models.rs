use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of usable results a digest is built from. Fewer than this and the
/// pipeline reports `InsufficientResults` rather than a partial digest.
pub const DIGEST_ITEM_COUNT: usize = 3;

/// One organic result as returned by the search service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    /// A result is usable only when title, link, and snippet are all present.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty() && !self.snippet.is_empty()
    }
}

/// A search result whose snippet has been run through the summarizer.
#[derive(Debug, Clone)]
pub struct SummarizedItem {
    pub title: String,
    pub link: String,
    pub summary: String,
}

/// Why the summarizer fell back instead of returning generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key configured; the request was never attempted.
    MissingKey,
    /// Transport failure, non-2xx response, or unparseable body.
    Transport,
    /// The service answered but produced no candidates.
    NoCandidates,
}

/// Summarizer result. Failures are a variant, not an error: a failed
/// summarization must never abort the digest for the other items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Generated(String),
    Fallback(FallbackReason),
}

impl Summary {
    /// The user-visible text for this summary.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Summary::Generated(text) => text,
            Summary::Fallback(FallbackReason::NoCandidates) => "No response generated.",
            Summary::Fallback(_) => "Summary not available.",
        }
    }
}

/// A topic plus exactly [`DIGEST_ITEM_COUNT`] summarized items, in the order
/// the search service returned them.
#[derive(Debug, Clone)]
pub struct Digest {
    pub topic: String,
    items: Vec<SummarizedItem>,
}

impl Digest {
    /// Build a digest from exactly [`DIGEST_ITEM_COUNT`] items. Returns
    /// `None` for any other count; callers decide how to report that.
    #[must_use]
    pub fn from_items(topic: &str, items: Vec<SummarizedItem>) -> Option<Self> {
        if items.len() != DIGEST_ITEM_COUNT {
            return None;
        }
        Some(Self {
            topic: topic.to_string(),
            items,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[SummarizedItem] {
        &self.items
    }
}

/// Outcome of one research request.
#[derive(Debug)]
pub enum ResearchOutcome {
    Digest(Digest),
    /// The search service returned zero organic results.
    NoResults,
    /// Fewer than [`DIGEST_ITEM_COUNT`] usable results after filtering.
    InsufficientResults,
    /// A transport-level failure during search; logged at the source.
    TransientError,
}

/// Paginated document bytes, ready to attach or upload.
#[derive(Debug, Clone)]
pub struct RenderedDocument(pub Vec<u8>);

impl RenderedDocument {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Per-user record held while the bot waits for an email address. Lives only
/// in process memory; at most one per user, a new one overwrites an
/// unconsumed old one.
#[derive(Debug)]
pub struct PendingDelivery {
    pub document: RenderedDocument,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

impl PendingDelivery {
    #[must_use]
    pub fn new(document: RenderedDocument, topic: &str) -> Self {
        Self {
            document,
            topic: topic.to_string(),
            created_at: Utc::now(),
        }
    }
}
