//! Clients for the external services the bot talks to.

pub mod gemini;
pub mod mail;
pub mod search;
pub mod telegram;

pub use gemini::GeminiClient;
pub use mail::MailClient;
pub use search::SearchClient;
pub use telegram::TelegramClient;
