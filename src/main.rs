use std::sync::Arc;

use anyhow::Result;
use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

use merkato_bot::config::Config;
use merkato_bot::state_machine::repository::SupabaseRepository;
use merkato_bot::state_machine::IntakeStore;
use merkato_bot::telegram::{ChatId, TelegramClient};
use merkato_bot::webhook::webhook_router;
use merkato_bot::AppState;

async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "merkato-bot",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting seller intake bot");

    let config =
        Config::from_env().expect("Failed to load configuration from environment variables");

    let transport = Arc::new(TelegramClient::new(config.bot_token.clone()));
    let repository = Arc::new(SupabaseRepository::new(
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
    ));

    let app_state = Arc::new(AppState {
        intake_store: Arc::new(IntakeStore::with_repository(repository)),
        transport,
        admin_chat: ChatId(config.admin_chat_id.clone()),
        webhook_secret: config.webhook_secret.clone(),
        storefront_url: config.storefront_url.clone(),
    });

    if app_state.webhook_secret.is_none() {
        info!("WEBHOOK_SECRET not set, webhook requests will not be verified");
    }

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(webhook_router(app_state.clone()))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server listening on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
