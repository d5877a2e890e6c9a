use std::env;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::time::Duration;

use crate::config::TELEGRAM;

use super::Notifier;

/// Sends messages through the Telegram Bot HTTP API to one fixed chat.
pub struct TelegramNotifier {
    http: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Build a notifier from the `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`
    /// environment variables (a `.env` file is honored by main).
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var(TELEGRAM.bot_token_env)
            .with_context(|| format!("{} is not set", TELEGRAM.bot_token_env))?;
        let chat_id = env::var(TELEGRAM.chat_id_env)
            .with_context(|| format!("{} is not set", TELEGRAM.chat_id_env))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(TELEGRAM.timeout_ms))
            .build()
            .context("failed to build Telegram HTTP client")?;

        Ok(Self {
            http,
            bot_token,
            chat_id,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            TELEGRAM.api_base_url, self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, text: &str) -> Result<()> {
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": TELEGRAM.parse_mode,
        });

        let response = self
            .http
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .context("Telegram sendMessage request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Telegram API returned {}: {}", status, body);
        }

        Ok(())
    }
}
