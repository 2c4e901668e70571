//! Telegram Bot API client.
//!
//! Only two methods are needed: `sendMessage` for prompts and relays, and
//! `sendPhoto` for forwarding product photos by file id. The bot never
//! downloads media; Telegram resolves file ids on its side. Everything
//! above this module talks to the [`Transport`] trait so tests can swap
//! in a recording double.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::state_machine::state::PhotoId;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Destination chat. Telegram uses signed integers on the wire but this
/// crate treats them as opaque strings end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatId(pub String);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChatId {
    fn from(id: String) -> Self {
        ChatId(id)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        ChatId(id.to_string())
    }
}

/// One outgoing text message, with an optional one-time reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub keyboard: Option<Vec<Vec<String>>>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        OutboundMessage {
            text: text.into(),
            keyboard: Some(rows),
        }
    }
}

/// Errors from message delivery.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("send rejected (status {status}): {description}")]
    Api { status: u16, description: String },
}

/// Outgoing message delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a text message to one chat.
    async fn send_message(
        &self,
        chat: &ChatId,
        message: &OutboundMessage,
    ) -> Result<(), TransportError>;

    /// Forward an already-uploaded photo to one chat.
    async fn send_photo(
        &self,
        chat: &ChatId,
        photo: &PhotoId,
        caption: &str,
    ) -> Result<(), TransportError>;
}

pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Serialize)]
struct ReplyMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
    one_time_keyboard: bool,
    resize_keyboard: bool,
}

#[derive(Serialize)]
struct KeyboardButton {
    text: String,
}

#[derive(Serialize)]
struct SendPhotoRequest<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
}

/// Envelope every Bot API response is wrapped in.
#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, TELEGRAM_API_BASE)
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        TelegramClient {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    // The token is part of the URL, so the URL itself must never be logged.
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<T: Serialize>(&self, method: &str, payload: &T) -> Result<(), TransportError> {
        info!("Calling Telegram {}", method);
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body: ApiResponse = match response.json().await {
            Ok(body) => body,
            Err(err) if !status.is_success() => {
                error!("Telegram {} failed with status {}", method, status);
                return Err(TransportError::Api {
                    status: status.as_u16(),
                    description: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if body.ok {
            Ok(())
        } else {
            let description = body
                .description
                .unwrap_or_else(|| "no description".to_string());
            error!("Telegram {} rejected ({}): {}", method, status, description);
            Err(TransportError::Api {
                status: status.as_u16(),
                description,
            })
        }
    }
}

fn reply_markup_for(keyboard: &Option<Vec<Vec<String>>>) -> Option<ReplyMarkup> {
    keyboard.as_ref().map(|rows| ReplyMarkup {
        keyboard: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|label| KeyboardButton {
                        text: label.clone(),
                    })
                    .collect()
            })
            .collect(),
        one_time_keyboard: true,
        resize_keyboard: true,
    })
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_message(
        &self,
        chat: &ChatId,
        message: &OutboundMessage,
    ) -> Result<(), TransportError> {
        let payload = SendMessageRequest {
            chat_id: &chat.0,
            text: &message.text,
            parse_mode: "Markdown",
            reply_markup: reply_markup_for(&message.keyboard),
        };
        self.call("sendMessage", &payload).await
    }

    async fn send_photo(
        &self,
        chat: &ChatId,
        photo: &PhotoId,
        caption: &str,
    ) -> Result<(), TransportError> {
        let payload = SendPhotoRequest {
            chat_id: &chat.0,
            photo: &photo.0,
            caption,
        };
        self.call("sendPhoto", &payload).await
    }
}
