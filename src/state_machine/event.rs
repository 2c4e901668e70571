//! Events that drive the intake state machine.
//!
//! The webhook adapter flattens every incoming update into one
//! [`InboundEvent`] before handing it to the dispatcher. Updates that
//! carry neither usable text nor a photo never become events.

use crate::command::BotCommand;
use crate::state_machine::state::{PhotoId, SenderId};

/// One message from a seller, reduced to what the state machine needs.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Who sent it.
    pub sender: SenderId,
    /// Public username of the sender, when their client exposes one.
    /// Only used when relaying to the admin, never for identity.
    pub handle: Option<String>,
    /// What they sent.
    pub kind: EventKind,
}

/// The payload of an inbound message.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// A recognised slash command.
    Command(BotCommand),
    /// A slash command we do not know.
    UnknownCommand { attempted: String },
    /// Ordinary text, answering whatever question is active.
    Text(String),
    /// A photo upload, identified by the transport's file id.
    Photo(PhotoId),
}

impl InboundEvent {
    /// Compact description for logging.
    ///
    /// Answer text can contain phone numbers and addresses, so only its
    /// length is logged, never the content.
    pub fn log_summary(&self) -> String {
        let kind = match &self.kind {
            EventKind::Command(command) => format!("command /{}", command),
            EventKind::UnknownCommand { attempted } => {
                format!("unknown command ({} chars)", attempted.chars().count())
            }
            EventKind::Text(text) => format!("text ({} chars)", text.chars().count()),
            EventKind::Photo(_) => "photo".to_string(),
        };
        format!("{} from sender {}", kind, self.sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: EventKind) -> InboundEvent {
        InboundEvent {
            sender: SenderId::from("42"),
            handle: Some("greenpack_seller".to_string()),
            kind,
        }
    }

    #[test]
    fn test_log_summary_names_commands() {
        let summary = event(EventKind::Command(BotCommand::Sell)).log_summary();
        assert_eq!(summary, "command /sell from sender 42");
    }

    #[test]
    fn test_log_summary_never_contains_answer_text() {
        let summary = event(EventKind::Text("0911000000".to_string())).log_summary();
        assert!(!summary.contains("0911000000"));
        assert!(summary.contains("10 chars"));
    }

    #[test]
    fn test_log_summary_never_contains_unknown_command_text() {
        let summary = event(EventKind::UnknownCommand {
            attempted: "sellnow".to_string(),
        })
        .log_summary();
        assert!(!summary.contains("sellnow"));
    }

    #[test]
    fn test_log_summary_mentions_photos_without_file_ids() {
        let summary = event(EventKind::Photo(PhotoId::from("AgACAgQAAxkBAAp"))).log_summary();
        assert_eq!(summary, "photo from sender 42");
    }
}
