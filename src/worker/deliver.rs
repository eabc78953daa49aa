//! Delivery conversation state machine.
//!
//! Each user is either idle or awaiting an email address for a rendered
//! digest. The next free-text message from a user with a pending delivery is
//! interpreted as a decline, an email address, or neither (retained state,
//! re-prompt). State is keyed strictly by user identity so concurrent users
//! never cross-talk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::core::models::{PendingDelivery, RenderedDocument};
use crate::errors::BotError;

/// Mail-delivery capability: deliver document bytes to an address.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_document(
        &self,
        to: &str,
        topic: &str,
        document: &RenderedDocument,
    ) -> Result<(), BotError>;
}

/// Fixed decline set, matched exactly after trimming and lowercasing.
/// Anything else ("nope", "no way") is treated as invalid input and
/// re-prompted, not guessed at.
const DECLINE_PHRASES: &[&str] = &["no", "no thanks", "nah", "not now", "later", "not interested"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex compiles")
});

#[must_use]
pub fn is_decline(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    DECLINE_PHRASES.contains(&normalized.as_str())
}

/// First email-address-shaped substring in the message, if any.
#[must_use]
pub fn extract_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// Conversation component owning the per-user pending-delivery store.
pub struct DeliveryConversation {
    mailer: Option<Arc<dyn Mailer>>,
    pending: Mutex<HashMap<i64, PendingDelivery>>,
}

impl DeliveryConversation {
    #[must_use]
    pub fn new(mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            mailer,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Email delivery can only be offered when a mail transport is
    /// configured.
    #[must_use]
    pub fn can_deliver(&self) -> bool {
        self.mailer.is_some()
    }

    /// Store a pending delivery for a user, replacing any unconsumed one.
    pub async fn offer(&self, user_id: i64, delivery: PendingDelivery) {
        let mut pending = self.pending.lock().await;
        if pending.insert(user_id, delivery).is_some() {
            info!(user_id = user_id, "Replaced an unconsumed pending delivery");
        }
    }

    pub async fn has_pending(&self, user_id: i64) -> bool {
        self.pending.lock().await.contains_key(&user_id)
    }

    /// Interpret a free-text message from a user and return the reply text.
    pub async fn handle_reply(&self, user_id: i64, text: &str) -> String {
        let consumed = {
            let mut pending = self.pending.lock().await;
            if !pending.contains_key(&user_id) {
                return "No delivery is pending. Use /research <topic> or /researchpdf <topic> \
                        to start a new request."
                    .to_string();
            }

            if is_decline(text) {
                pending.remove(&user_id);
                return "Okay, skipping email delivery.".to_string();
            }

            if extract_email(text).is_none() {
                // Retry path: state and pending delivery are preserved.
                return "I didn't catch an email address. Reply with a valid address, \
                        or \"no\" to skip."
                    .to_string();
            }

            pending.remove(&user_id)
        };

        // Lock released; the delivery is consumed regardless of what the
        // send below does.
        let Some(delivery) = consumed else {
            return "No delivery is pending.".to_string();
        };
        let Some(address) = extract_email(text) else {
            return "No delivery is pending.".to_string();
        };
        let Some(mailer) = self.mailer.as_deref() else {
            return "Email delivery is not configured.".to_string();
        };

        match mailer
            .send_document(address, &delivery.topic, &delivery.document)
            .await
        {
            Ok(()) => {
                info!(user_id = user_id, to = address, "Pending delivery emailed");
                format!("Emailed your research summary to {}.", address)
            }
            Err(e) => {
                error!(user_id = user_id, "Email delivery failed: {}", e);
                "Sorry, I couldn't send the email. Please try again later.".to_string()
            }
        }
    }
}
