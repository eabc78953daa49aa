//! Email delivery of rendered digests over authenticated SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::core::config::SmtpConfig;
use crate::core::models::RenderedDocument;
use crate::errors::BotError;
use crate::worker::deliver::Mailer;

pub const ATTACHMENT_FILENAME: &str = "research_summary.pdf";

pub struct MailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl MailClient {
    pub fn new(config: &SmtpConfig) -> Result<Self, BotError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(creds)
            .build();
        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for MailClient {
    async fn send_document(
        &self,
        to: &str,
        topic: &str,
        document: &RenderedDocument,
    ) -> Result<(), BotError> {
        let from: Mailbox = self.from_address.parse()?;
        let to_mailbox: Mailbox = to.parse()?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| BotError::MailError(e.to_string()))?;
        let attachment = Attachment::new(ATTACHMENT_FILENAME.to_string())
            .body(document.as_bytes().to_vec(), pdf_type);

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(format!("Research Summary for {}", topic))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(format!(
                        "Attached is your research summary for \"{}\".",
                        topic
                    )))
                    .singlepart(attachment),
            )?;

        self.transport.send(email).await?;
        info!(to = to, topic = topic, "Research summary emailed");
        Ok(())
    }
}
