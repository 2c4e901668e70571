//! Configuration, read once from the environment at startup.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// Chat that receives submissions and feedback.
    pub admin_chat_id: String,
    /// Supabase project URL.
    pub supabase_url: String,
    /// Supabase service-role key.
    pub supabase_service_key: String,
    /// Secret echoed by Telegram on every webhook request. Unset or blank
    /// disables verification.
    pub webhook_secret: Option<String>,
    /// Public storefront shown to buyers.
    pub storefront_url: Option<String>,
    /// Port for the HTTP server.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token =
            env::var("BOT_TOKEN").context("BOT_TOKEN environment variable is required")?;
        let admin_chat_id = env::var("ADMIN_CHAT_ID")
            .context("ADMIN_CHAT_ID environment variable is required")?;
        let supabase_url =
            env::var("SUPABASE_URL").context("SUPABASE_URL environment variable is required")?;
        let supabase_service_key = env::var("SUPABASE_SERVICE_KEY")
            .context("SUPABASE_SERVICE_KEY environment variable is required")?;
        let webhook_secret = parse_optional(env::var("WEBHOOK_SECRET").ok());
        let storefront_url = parse_optional(env::var("STOREFRONT_URL").ok());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            bot_token,
            admin_chat_id,
            supabase_url,
            supabase_service_key,
            webhook_secret,
            storefront_url,
            port,
        })
    }
}

/// Treat unset, empty and whitespace-only variables the same.
fn parse_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
