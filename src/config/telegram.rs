//! Telegram delivery configuration constants.

/// The Master Telegram Configuration
pub struct TelegramConfig {
    pub api_base_url: &'static str,
    // Environment variable names for the credentials (a .env file is honored)
    pub bot_token_env: &'static str,
    pub chat_id_env: &'static str,
    pub parse_mode: &'static str,
    pub timeout_ms: u64,
}

pub const TELEGRAM: TelegramConfig = TelegramConfig {
    api_base_url: "https://api.telegram.org",
    bot_token_env: "TELEGRAM_BOT_TOKEN",
    chat_id_env: "TELEGRAM_CHAT_ID",
    parse_mode: "Markdown",
    timeout_ms: 10_000,
};
