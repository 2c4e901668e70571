pub mod command;
pub mod config;
pub mod state_machine;
pub mod telegram;
pub mod webhook;

use std::sync::Arc;

use state_machine::IntakeStore;
use telegram::{ChatId, Transport};

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub intake_store: Arc<IntakeStore>,
    pub transport: Arc<dyn Transport>,
    pub admin_chat: ChatId,
    pub webhook_secret: Option<String>,
    pub storefront_url: Option<String>,
}
