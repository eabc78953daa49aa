use std::sync::Arc;

use anyhow::{Context, Result};

use scout::bot::Bot;
use scout::core::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    scout::setup_logging();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("missing configuration")?;

    let bot = Arc::new(Bot::new(&config)?);
    bot.run().await?;
    Ok(())
}
