use std::env;

/// SMTP account used to email rendered digests. Optional as a group: if any
/// variable is missing the email integration is disabled.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub serpapi_api_key: String,
    /// Absent key disables summarization; calls short-circuit to the
    /// fallback string instead of hitting the service with no key.
    pub gemini_api_key: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            telegram_token: env::var("TELEGRAM_TOKEN")
                .map_err(|e| format!("TELEGRAM_TOKEN: {}", e))?,
            serpapi_api_key: env::var("SERPAPI_API_KEY")
                .map_err(|e| format!("SERPAPI_API_KEY: {}", e))?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            smtp: SmtpConfig::from_env()?,
        })
    }
}

impl SmtpConfig {
    /// `Ok(None)` when the group is absent entirely; `Err` when it is
    /// present but the port does not parse.
    fn from_env() -> Result<Option<Self>, String> {
        let (Ok(host), Ok(username), Ok(password), Ok(from_address)) = (
            env::var("SMTP_HOST"),
            env::var("SMTP_USERNAME"),
            env::var("SMTP_PASSWORD"),
            env::var("SMTP_FROM"),
        ) else {
            return Ok(None);
        };

        let port = match env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().map_err(|e| format!("SMTP_PORT: {}", e))?,
            Err(_) => 587,
        };

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        }))
    }
}
