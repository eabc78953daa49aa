//! Scout - a Telegram bot that turns a topic into a multi-source research
//! digest.
//!
//! `/research <topic>` searches the web, summarizes the top three usable
//! results, and replies with a formatted digest. `/researchpdf <topic>` does
//! the same and attaches the digest as a paginated PDF. After either, the
//! bot offers to email the PDF and waits for the user's next message to
//! carry an address or a decline.
//!
//! The crate is organized around:
//! - `clients` - thin API clients for Telegram, SerpAPI, Gemini, and SMTP
//! - `worker::research` - the search/filter/summarize/format pipeline
//! - `worker::deliver` - the per-user delivery conversation state machine
//! - `digest` / `pdf` - markup and paginated-document rendering

pub mod bot;
pub mod clients;
pub mod core;
pub mod digest;
pub mod errors;
pub mod pdf;
pub mod worker;

/// Configure structured logging. Honors `RUST_LOG`, defaulting to `info`.
/// Call once at startup.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}
