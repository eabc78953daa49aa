use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse service response: {0}")]
    ParseError(String),

    #[error("Failed to access Telegram API: {0}")]
    TelegramError(String),

    #[error("Failed to access search service: {0}")]
    SearchError(String),

    #[error("Failed to send email: {0}")]
    MailError(String),

    #[error("Failed to render PDF: {0}")]
    PdfError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<lettre::error::Error> for BotError {
    fn from(error: lettre::error::Error) -> Self {
        BotError::MailError(error.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for BotError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        BotError::MailError(error.to_string())
    }
}

impl From<lettre::address::AddressError> for BotError {
    fn from(error: lettre::address::AddressError) -> Self {
        BotError::MailError(error.to_string())
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::TelegramError(error.to_string())
    }
}
