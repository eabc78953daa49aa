//! Minimal Telegram Bot API client: long polling plus the three outbound
//! calls the bot needs. Raw HTTP against the Bot API keeps the surface
//! exactly as small as the bot's usage.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::models::RenderedDocument;
use crate::errors::BotError;

/// Long-poll wait, in seconds, passed to `getUpdates`.
const POLL_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramClient {
    http: Client,
    base_url: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(http: Client, token: &str) -> Self {
        Self {
            http,
            base_url: format!("https://api.telegram.org/bot{}", token),
        }
    }

    /// Fetch updates after `offset`, waiting up to the poll timeout.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, BotError> {
        let response = self
            .http
            .post(format!("{}/getUpdates", self.base_url))
            .json(&json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"],
            }))
            .send()
            .await?;

        let body: UpdatesResponse = response
            .json()
            .await
            .map_err(|e| BotError::ParseError(format!("getUpdates response: {}", e)))?;
        if !body.ok {
            return Err(BotError::TelegramError(
                body.description.unwrap_or_else(|| "getUpdates failed".to_string()),
            ));
        }
        Ok(body.result)
    }

    /// Send a plain-text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.send(json!({ "chat_id": chat_id, "text": text })).await
    }

    /// Send an HTML-formatted message (digest replies).
    pub async fn send_html(&self, chat_id: i64, html: &str) -> Result<(), BotError> {
        self.send(json!({ "chat_id": chat_id, "text": html, "parse_mode": "HTML" }))
            .await
    }

    async fn send(&self, payload: Value) -> Result<(), BotError> {
        let response = self
            .http
            .post(format!("{}/sendMessage", self.base_url))
            .json(&payload)
            .send()
            .await?;
        check_api_response(response).await
    }

    /// Upload the rendered document as a file attachment.
    pub async fn send_document(
        &self,
        chat_id: i64,
        document: &RenderedDocument,
        filename: &str,
    ) -> Result<(), BotError> {
        let part = Part::bytes(document.as_bytes().to_vec())
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| BotError::TelegramError(format!("attachment mime: {}", e)))?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("disable_notification", "true")
            .part("document", part);

        let response = self
            .http
            .post(format!("{}/sendDocument", self.base_url))
            .multipart(form)
            .send()
            .await?;
        check_api_response(response).await
    }
}

async fn check_api_response(response: reqwest::Response) -> Result<(), BotError> {
    let body: Value = response
        .json()
        .await
        .map_err(|e| BotError::ParseError(format!("Telegram response: {}", e)))?;
    if body.get("ok").and_then(Value::as_bool) == Some(true) {
        Ok(())
    } else {
        let description = body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("no description");
        Err(BotError::TelegramError(description.to_string()))
    }
}
