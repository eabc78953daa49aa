//! Inbound update routing: command parsing, the research handlers, and the
//! long-poll loop.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use crate::clients::mail::ATTACHMENT_FILENAME;
use crate::clients::{GeminiClient, MailClient, SearchClient, TelegramClient};
use crate::core::config::AppConfig;
use crate::core::models::{PendingDelivery, RenderedDocument, ResearchOutcome};
use crate::digest::{render_markup, render_plain};
use crate::errors::BotError;
use crate::pdf::render_pdf;
use crate::worker::deliver::{DeliveryConversation, Mailer};
use crate::worker::research::perform_research;

const START_TEXT: &str = "Hello! Use /research <topic> to get a research summary.\n\
                          Use /researchpdf <topic> to get a PDF summary.";
const OFFER_TEXT: &str = "Want this summary in your inbox? Reply with your email address, \
                          or \"no\" to skip.";

/// One parsed inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Research(String),
    ResearchPdf(String),
    UsageResearch,
    UsageResearchPdf,
    /// Anything that is not a recognized command; routed to the delivery
    /// conversation.
    FreeText(String),
}

/// Parse a message into a command. Handles the `/command@BotName` form
/// Telegram uses in group chats.
#[must_use]
pub fn parse_message(text: &str) -> Command {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Command::FreeText(trimmed.to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let token = parts.next().unwrap_or_default();
    let command = token.split('@').next().unwrap_or_default();
    let args = parts.next().unwrap_or_default().trim();

    match command {
        "/start" => Command::Start,
        "/research" if !args.is_empty() => Command::Research(args.to_string()),
        "/research" => Command::UsageResearch,
        "/researchpdf" if !args.is_empty() => Command::ResearchPdf(args.to_string()),
        "/researchpdf" => Command::UsageResearchPdf,
        _ => Command::FreeText(trimmed.to_string()),
    }
}

pub struct Bot {
    telegram: TelegramClient,
    search: SearchClient,
    summarizer: GeminiClient,
    conversation: DeliveryConversation,
}

impl Bot {
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let http = Client::new();
        let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
            Some(smtp) => Some(Arc::new(MailClient::new(smtp)?)),
            None => {
                info!("SMTP not configured; email delivery disabled");
                None
            }
        };

        Ok(Self {
            telegram: TelegramClient::new(http.clone(), &config.telegram_token),
            search: SearchClient::new(http, config.serpapi_api_key.clone()),
            summarizer: GeminiClient::new(config.gemini_api_key.clone()),
            conversation: DeliveryConversation::new(mailer),
        })
    }

    /// Long-poll for updates forever, handling each one on its own task so a
    /// slow research request cannot stall the poll loop.
    pub async fn run(self: Arc<Self>) -> Result<(), BotError> {
        info!("Starting update loop");
        let mut offset = 0i64;
        loop {
            match self.telegram.get_updates(offset).await {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        let Some(message) = update.message else {
                            continue;
                        };
                        let bot = Arc::clone(&self);
                        tokio::spawn(async move {
                            bot.handle_message(message.chat.id, message.text.as_deref()).await;
                        });
                    }
                }
                Err(e) => {
                    error!("Polling for updates failed: {}", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }

    async fn handle_message(&self, chat_id: i64, text: Option<&str>) {
        let Some(text) = text else {
            // Stickers, photos, and the like carry no text to route.
            return;
        };

        match parse_message(text) {
            Command::Start => self.reply(chat_id, START_TEXT).await,
            Command::UsageResearch => self.reply(chat_id, "Usage: /research <topic>").await,
            Command::UsageResearchPdf => self.reply(chat_id, "Usage: /researchpdf <topic>").await,
            Command::Research(topic) => self.handle_research(chat_id, &topic, false).await,
            Command::ResearchPdf(topic) => self.handle_research(chat_id, &topic, true).await,
            Command::FreeText(message) => {
                let response = self.conversation.handle_reply(chat_id, &message).await;
                self.reply(chat_id, &response).await;
            }
        }
    }

    async fn handle_research(&self, chat_id: i64, topic: &str, want_pdf_in_chat: bool) {
        self.reply(chat_id, &format!("Searching for: {}", topic)).await;

        let outcome = perform_research(&self.search, &self.summarizer, topic).await;
        let digest = match outcome {
            ResearchOutcome::Digest(digest) => digest,
            ResearchOutcome::NoResults => {
                self.reply(chat_id, "No results found.").await;
                return;
            }
            ResearchOutcome::InsufficientResults => {
                self.reply(
                    chat_id,
                    "I couldn't find enough usable results. Try a broader query.",
                )
                .await;
                return;
            }
            ResearchOutcome::TransientError => {
                self.reply(
                    chat_id,
                    "Sorry, something went wrong while searching. Please try again later.",
                )
                .await;
                return;
            }
        };

        let markup = render_markup(&digest);
        if let Err(e) = self.telegram.send_html(chat_id, &markup).await {
            error!(chat_id = chat_id, "Failed to send digest: {}", e);
        }

        // The rendered document backs both the in-chat PDF and the email
        // offer; skip the work when neither applies.
        if !want_pdf_in_chat && !self.conversation.can_deliver() {
            return;
        }

        let document = match render_document(render_plain(&markup), topic.to_string()).await {
            Ok(document) => document,
            Err(e) => {
                error!(chat_id = chat_id, "PDF rendering failed: {}", e);
                if want_pdf_in_chat {
                    self.reply(chat_id, "Sorry, I couldn't generate the PDF. Please try again later.")
                        .await;
                }
                return;
            }
        };

        if want_pdf_in_chat {
            if let Err(e) = self
                .telegram
                .send_document(chat_id, &document, ATTACHMENT_FILENAME)
                .await
            {
                error!(chat_id = chat_id, "Failed to send PDF: {}", e);
            }
        }

        if self.conversation.can_deliver() {
            self.conversation
                .offer(chat_id, PendingDelivery::new(document, topic))
                .await;
            self.reply(chat_id, OFFER_TEXT).await;
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.telegram.send_message(chat_id, text).await {
            error!(chat_id = chat_id, "Failed to send reply: {}", e);
        }
    }
}

/// PDF generation is CPU-bound; keep it off the async path.
async fn render_document(plain_text: String, topic: String) -> Result<RenderedDocument, BotError> {
    tokio::task::spawn_blocking(move || render_pdf(&plain_text, &topic))
        .await
        .map_err(|e| BotError::PdfError(format!("render task: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_research_commands() {
        assert_eq!(
            parse_message("/research rust async"),
            Command::Research("rust async".to_string())
        );
        assert_eq!(
            parse_message("/researchpdf rust async"),
            Command::ResearchPdf("rust async".to_string())
        );
        assert_eq!(parse_message("/start"), Command::Start);
    }

    #[test]
    fn bare_commands_ask_for_usage() {
        assert_eq!(parse_message("/research"), Command::UsageResearch);
        assert_eq!(parse_message("/researchpdf  "), Command::UsageResearchPdf);
    }

    #[test]
    fn strips_bot_mention_suffix() {
        assert_eq!(
            parse_message("/research@ScoutBot rust"),
            Command::Research("rust".to_string())
        );
    }

    #[test]
    fn plain_text_routes_to_the_conversation() {
        assert_eq!(
            parse_message("reach me at a@b.com"),
            Command::FreeText("reach me at a@b.com".to_string())
        );
        assert_eq!(
            parse_message("/unknown thing"),
            Command::FreeText("/unknown thing".to_string())
        );
    }
}
