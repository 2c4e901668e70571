//! Webhook endpoint for Telegram updates.
//!
//! Telegram POSTs one update per request. The handler flattens the update
//! into an [`InboundEvent`], runs it through the dispatcher, and always
//! acks with `{"ok": true}` unless storage failed. When a webhook secret
//! is configured, Telegram echoes it in the
//! `X-Telegram-Bot-Api-Secret-Token` header and requests without a
//! matching header are rejected before the body is looked at.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::command::{self, ParseResult};
use crate::state_machine::event::{EventKind, InboundEvent};
use crate::state_machine::interpreter::InterpreterContext;
use crate::state_machine::state::{PhotoId, SenderId};
use crate::telegram::ChatId;
use crate::AppState;

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// One update from Telegram. Fields we do not use are simply not modelled;
/// serde ignores them.
#[derive(Debug, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    pub text: Option<String>,
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
}

/// Constant-time equality over the shared secret.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

async fn verify_webhook_secret(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = &state.webhook_secret {
        let provided = request
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                error!("Webhook request without a secret token header");
                StatusCode::UNAUTHORIZED
            })?;
        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            error!("Webhook request with a wrong secret token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    Ok(next.run(request).await)
}

/// Reduce a message to the event the state machine consumes.
///
/// Returns `None` for updates the bot deliberately ignores: messages with
/// no sender, and messages carrying neither text nor a photo (stickers
/// and the like).
fn message_to_event(message: &TelegramMessage) -> Option<InboundEvent> {
    let from = message.from.as_ref()?;
    let sender = SenderId(from.id.to_string());
    let handle = from.username.clone();

    if let Some(photos) = &message.photo {
        // Telegram lists the same photo in several resolutions, smallest
        // first; relay the largest.
        let largest = photos.last()?;
        return Some(InboundEvent {
            sender,
            handle,
            kind: EventKind::Photo(PhotoId(largest.file_id.clone())),
        });
    }

    let text = message.text.as_ref()?;
    let kind = match command::parse_message(text) {
        ParseResult::Command(command) => EventKind::Command(command),
        ParseResult::Unrecognized { attempted } => EventKind::UnknownCommand { attempted },
        ParseResult::NotCommand => EventKind::Text(text.clone()),
    };
    Some(InboundEvent {
        sender,
        handle,
        kind,
    })
}

pub async fn telegram_webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<TelegramUpdate>,
) -> Result<Json<WebhookResponse>, StatusCode> {
    let Some(message) = update.message else {
        debug!("Update {} carries no message, ignoring", update.update_id);
        return Ok(Json(WebhookResponse { ok: true }));
    };

    let Some(event) = message_to_event(&message) else {
        debug!(
            "Update {} carries no usable content, ignoring",
            update.update_id
        );
        return Ok(Json(WebhookResponse { ok: true }));
    };

    let ctx = InterpreterContext {
        transport: state.transport.clone(),
        seller_chat: ChatId(message.chat.id.to_string()),
        admin_chat: state.admin_chat.clone(),
        storefront_url: state.storefront_url.clone(),
    };

    match state.intake_store.process_event(event, &ctx).await {
        Ok(step) => {
            info!("Update {} processed, sender now at {}", update.update_id, step);
            Ok(Json(WebhookResponse { ok: true }))
        }
        Err(err) => {
            error!("Failed to process update {}: {}", update.update_id, err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Router for the webhook endpoint, with secret verification applied only
/// to it. The same state is shared with the rest of the app.
pub fn webhook_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/bot", post(telegram_webhook_handler))
        .route_layer(middleware::from_fn_with_state(state, verify_webhook_secret))
}
