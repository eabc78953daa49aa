use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use scout::core::models::{PendingDelivery, RenderedDocument};
use scout::errors::BotError;
use scout::worker::deliver::{DeliveryConversation, Mailer};

/// Mailer stub that records every send and can be told to fail.
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingMailer {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail,
        })
    }

    async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_document(
        &self,
        to: &str,
        topic: &str,
        _document: &RenderedDocument,
    ) -> Result<(), BotError> {
        self.sent
            .lock()
            .await
            .push((to.to_string(), topic.to_string()));
        if self.fail {
            Err(BotError::MailError("smtp unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn pending(topic: &str) -> PendingDelivery {
    PendingDelivery::new(RenderedDocument(vec![0x25, 0x50, 0x44, 0x46]), topic)
}

#[tokio::test]
async fn idle_user_is_told_nothing_is_pending() {
    let conversation = DeliveryConversation::new(Some(RecordingMailer::new(false)));
    let reply = conversation.handle_reply(42, "hello there").await;
    assert!(reply.contains("No delivery is pending"));
}

#[tokio::test]
async fn decline_discards_the_pending_delivery() {
    let mailer = RecordingMailer::new(false);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("rust")).await;

    let reply = conversation.handle_reply(42, "No").await;
    assert!(reply.contains("skipping"));
    assert!(!conversation.has_pending(42).await);
    assert!(mailer.sent().await.is_empty());

    // Follow-up message lands in the idle state again.
    let reply = conversation.handle_reply(42, "no").await;
    assert!(reply.contains("No delivery is pending"));
}

#[tokio::test]
async fn email_in_free_text_triggers_delivery_and_resets() {
    let mailer = RecordingMailer::new(false);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("rust")).await;

    let reply = conversation.handle_reply(42, "reach me at a@b.com please").await;
    assert!(reply.contains("a@b.com"));
    assert_eq!(
        mailer.sent().await,
        vec![("a@b.com".to_string(), "rust".to_string())]
    );
    assert!(!conversation.has_pending(42).await);
}

#[tokio::test]
async fn state_resets_even_when_delivery_fails() {
    let mailer = RecordingMailer::new(true);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("rust")).await;

    let reply = conversation.handle_reply(42, "a@b.com").await;
    assert!(reply.contains("couldn't send"));
    assert_eq!(mailer.sent().await.len(), 1);
    assert!(!conversation.has_pending(42).await);
}

#[tokio::test]
async fn unrecognized_reply_keeps_the_state_and_reprompts() {
    let mailer = RecordingMailer::new(false);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("rust")).await;

    let reply = conversation.handle_reply(42, "nope").await;
    assert!(reply.contains("didn't catch"));
    assert!(conversation.has_pending(42).await);
    assert!(mailer.sent().await.is_empty());

    // A valid address afterwards still goes through.
    let reply = conversation.handle_reply(42, "ok fine, a@b.com").await;
    assert!(reply.contains("a@b.com"));
    assert!(!conversation.has_pending(42).await);
}

#[tokio::test]
async fn users_never_cross_talk() {
    let mailer = RecordingMailer::new(false);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("rust")).await;

    let reply = conversation.handle_reply(99, "no").await;
    assert!(reply.contains("No delivery is pending"));
    assert!(conversation.has_pending(42).await);
}

#[tokio::test]
async fn a_new_offer_overwrites_an_unconsumed_one() {
    let mailer = RecordingMailer::new(false);
    let conversation = DeliveryConversation::new(Some(mailer.clone()));
    conversation.offer(42, pending("first topic")).await;
    conversation.offer(42, pending("second topic")).await;

    conversation.handle_reply(42, "a@b.com").await;
    assert_eq!(
        mailer.sent().await,
        vec![("a@b.com".to_string(), "second topic".to_string())]
    );
}
