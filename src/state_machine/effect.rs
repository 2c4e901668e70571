//! Side effects requested by transitions.
//!
//! Transitions never talk to the network. They return [`Effect`] values
//! describing what should happen, and the interpreter carries them out
//! after the record write has succeeded. Keeping effects as plain data is
//! what makes the transition table testable without a transport.

use crate::state_machine::state::{PhotoId, SellerRecord};

/// An action for the interpreter to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a canned prompt back to the seller.
    Reply { prompt: Prompt },
    /// Forward a completed product summary to the admin chat.
    RelaySummary {
        handle: Option<String>,
        record: SellerRecord,
    },
    /// Forward one feedback message to the admin chat.
    RelayFeedback {
        handle: Option<String>,
        text: String,
    },
    /// Forward an uploaded product photo to the admin chat.
    RelayPhoto {
        file_id: PhotoId,
        shop_name: String,
        handle: Option<String>,
    },
    /// Emit a log line. Used for inputs that are deliberately ignored,
    /// so the silence is still visible to operators.
    Log { level: LogLevel, message: String },
}

/// Canned replies to the seller.
///
/// The wording lives in the interpreter; transitions only pick which
/// prompt is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    // ===== Commands outside the flow =====
    Welcome,
    BrowseHint,
    ResetDone,
    UnknownCommand { attempted: String },

    // ===== Intake questions, in flow order =====
    AskPhone,
    AskShopName,
    AskLocation,
    AskTitle,
    AskDescription,
    AskMaterial,
    AskMinOrder,
    AskPrice,
    AskPhotos,

    // ===== Photo step =====
    PhotoReceived,
    PhotoReprompt,
    SubmissionDone,

    // ===== Feedback =====
    FeedbackAsk,
    FeedbackThanks,

    // ===== Commands used at the wrong moment =====
    NothingToFinish,
    NothingToSkip,
}

/// Severity for [`Effect::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}
