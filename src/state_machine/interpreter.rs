//! Effect interpreter.
//!
//! Executes the effects produced by transitions: renders prompts into
//! actual message text and routes everything to the right chat. Effects
//! run sequentially; a delivery failure is logged and the remaining
//! effects still run, because the record write has already happened and
//! the conversation must not wedge on one lost message.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::state_machine::effect::{Effect, LogLevel, Prompt};
use crate::state_machine::state::SellerRecord;
use crate::telegram::{ChatId, OutboundMessage, Transport, TransportError};

/// Materials offered on the reply keyboard. Free-typed answers are
/// accepted just the same; the keyboard is a convenience.
const MATERIAL_CHOICES: [&str; 5] = ["Paper", "Plastic", "Nylon", "Jute", "Other"];

/// Everything the interpreter needs to deliver one event's effects.
pub struct InterpreterContext {
    pub transport: Arc<dyn Transport>,
    /// Chat the triggering message arrived from; replies go here.
    pub seller_chat: ChatId,
    /// Chat that receives summaries, photos and feedback.
    pub admin_chat: ChatId,
    /// Public storefront, shown to buyers when configured.
    pub storefront_url: Option<String>,
}

/// Run all effects in order, logging failures and carrying on.
pub async fn execute_effects(ctx: &InterpreterContext, effects: Vec<Effect>) {
    for effect in effects {
        if let Err(err) = execute_effect(ctx, effect).await {
            error!("Effect execution failed: {}", err);
        }
    }
}

async fn execute_effect(ctx: &InterpreterContext, effect: Effect) -> Result<(), TransportError> {
    match effect {
        Effect::Reply { prompt } => {
            let message = render_prompt(&prompt, ctx.storefront_url.as_deref());
            ctx.transport.send_message(&ctx.seller_chat, &message).await
        }
        Effect::RelaySummary { handle, record } => {
            let text = format_summary(handle.as_deref(), &record);
            ctx.transport
                .send_message(&ctx.admin_chat, &OutboundMessage::text(text))
                .await
        }
        Effect::RelayFeedback { handle, text } => {
            let text = format_feedback(handle.as_deref(), &text);
            ctx.transport
                .send_message(&ctx.admin_chat, &OutboundMessage::text(text))
                .await
        }
        Effect::RelayPhoto {
            file_id,
            shop_name,
            handle,
        } => {
            let caption = format_photo_caption(&shop_name, handle.as_deref());
            ctx.transport
                .send_photo(&ctx.admin_chat, &file_id, &caption)
                .await
        }
        Effect::Log { level, message } => {
            match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
                LogLevel::Error => error!("{}", message),
            }
            Ok(())
        }
    }
}

/// Turn a prompt into the message the seller sees.
pub fn render_prompt(prompt: &Prompt, storefront_url: Option<&str>) -> OutboundMessage {
    match prompt {
        Prompt::Welcome => {
            OutboundMessage::text("Welcome! Use /buy to shop or /sell to list items.")
        }
        Prompt::BrowseHint => match storefront_url {
            Some(url) => OutboundMessage::text(format!("🛍 Browse the catalog here: {}", url)),
            None => {
                OutboundMessage::text("🛍 The web store is opening soon. Check back shortly!")
            }
        },
        Prompt::ResetDone => {
            OutboundMessage::text("Your saved details were cleared. Send /sell to start fresh.")
        }
        Prompt::UnknownCommand { attempted } => OutboundMessage::text(format!(
            "Unknown command: `/{}`\n\n\
             /sell - list a product\n\
             /buy - browse the catalog\n\
             /feedback - tell us something\n\
             /reset - clear your saved details\n\
             /skip - skip the description question\n\
             /done - finish the photo upload",
            attempted
        )),
        Prompt::AskPhone => OutboundMessage::text("Step 1: What is your **Phone Number**?"),
        Prompt::AskShopName => OutboundMessage::text("Step 2: What is your **Shop Name**?"),
        Prompt::AskLocation => OutboundMessage::text("Step 3: Where is your shop **Located**?"),
        Prompt::AskTitle => OutboundMessage::text(
            "Step 4: What **Product** are you listing? (e.g., 2kg Kraft Bag)",
        ),
        Prompt::AskDescription => {
            OutboundMessage::text("Step 5: Add a short **Description**, or send /skip.")
        }
        Prompt::AskMaterial => OutboundMessage::with_keyboard(
            "Step 6: What **Material** is it made of? Pick one below or type your own.",
            material_keyboard(),
        ),
        Prompt::AskMinOrder => {
            OutboundMessage::text("Step 7: What is the **Minimum Order** quantity?")
        }
        Prompt::AskPrice => {
            OutboundMessage::text("Step 8: What is the **Price** per unit, in ETB?")
        }
        Prompt::AskPhotos => OutboundMessage::text(
            "Step 9: Send **Photos** of the product. Send /done when you have sent them all.",
        ),
        Prompt::PhotoReceived => {
            OutboundMessage::text("✅ Photo received. Send more, or /done to finish.")
        }
        Prompt::PhotoReprompt => {
            OutboundMessage::text("Please send a **Photo** of the product, or /done to finish.")
        }
        Prompt::SubmissionDone => {
            OutboundMessage::text("✅ Done! Your product was sent to the admin for review.")
        }
        Prompt::FeedbackAsk => {
            OutboundMessage::text("What should we improve? Send your feedback as one message.")
        }
        Prompt::FeedbackThanks => {
            OutboundMessage::text("🙏 Thank you! Your feedback was passed along.")
        }
        Prompt::NothingToFinish => OutboundMessage::text(
            "There is nothing to finish right now. Photos come at the end of /sell.",
        ),
        Prompt::NothingToSkip => OutboundMessage::text(
            "Only the description can be skipped. Please answer the question above.",
        ),
    }
}

fn material_keyboard() -> Vec<Vec<String>> {
    MATERIAL_CHOICES
        .chunks(2)
        .map(|row| row.iter().map(|label| label.to_string()).collect())
        .collect()
}

fn display_handle(handle: Option<&str>) -> String {
    format!("@{}", handle.unwrap_or("unknown"))
}

/// The message the admin receives when a questionnaire completes.
pub fn format_summary(handle: Option<&str>, record: &SellerRecord) -> String {
    let description = if record.description.is_empty() {
        "(none)"
    } else {
        &record.description
    };
    format!(
        "🔔 **NEW SUBMISSION**\n\
         👤 Seller: {}\n\
         📞 Phone: {}\n\
         🏪 Shop: {}\n\
         📍 Location: {}\n\
         🏷 Product: {}\n\
         📝 Description: {}\n\
         🧵 Material: {}\n\
         📦 Min order: {}\n\
         💰 Price: {} ETB",
        display_handle(handle),
        record.phone_number,
        record.shop_name,
        record.location,
        record.title,
        description,
        record.material,
        record.min_order,
        record.price,
    )
}

/// Caption attached to each forwarded product photo.
pub fn format_photo_caption(shop_name: &str, handle: Option<&str>) -> String {
    let shop = if shop_name.is_empty() {
        "(unknown shop)"
    } else {
        shop_name
    };
    match handle {
        Some(handle) => format!("📦 {} (@{})", shop, handle),
        None => format!("📦 {}", shop),
    }
}

/// The message the admin receives for one piece of feedback.
pub fn format_feedback(handle: Option<&str>, text: &str) -> String {
    format!("💬 **FEEDBACK** from {}:\n{}", display_handle(handle), text)
}
