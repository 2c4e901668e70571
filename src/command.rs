//! Parsing of slash commands out of incoming message text.
//!
//! A command is the first whitespace-delimited token of a message that
//! starts with `/`. Telegram clients may append the bot's username to a
//! command in group chats (`/sell@MerkatoBot`); the suffix is stripped
//! before matching. Matching is case-insensitive. Anything that does not
//! start with `/` is ordinary answer text for the state machine.

use std::fmt;

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Greeting and pointer to the other commands.
    Start,
    /// Pointer to the storefront for buyers.
    Buy,
    /// Begin (or restart) a product submission.
    Sell,
    /// Skip the optional description question.
    Skip,
    /// Finish the photo upload step.
    Done,
    /// Forget everything stored about the sender.
    Reset,
    /// Switch the conversation to feedback capture.
    Feedback,
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BotCommand::Start => "start",
            BotCommand::Buy => "buy",
            BotCommand::Sell => "sell",
            BotCommand::Skip => "skip",
            BotCommand::Done => "done",
            BotCommand::Reset => "reset",
            BotCommand::Feedback => "feedback",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of inspecting one message for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// The message does not start with `/`; treat it as answer text.
    NotCommand,
    /// A recognised command.
    Command(BotCommand),
    /// Starts with `/` but is not a command we know.
    Unrecognized { attempted: String },
}

/// Inspect one message for a leading slash command.
pub fn parse_message(text: &str) -> ParseResult {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return ParseResult::NotCommand;
    }

    // First token only; arguments after the command are ignored.
    let token = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .trim_start_matches('/');

    // Strip a trailing `@botname` mention if present.
    let word = match token.split_once('@') {
        Some((command, _mention)) => command,
        None => token,
    };

    let command = if word.eq_ignore_ascii_case("start") {
        Some(BotCommand::Start)
    } else if word.eq_ignore_ascii_case("buy") {
        Some(BotCommand::Buy)
    } else if word.eq_ignore_ascii_case("sell") {
        Some(BotCommand::Sell)
    } else if word.eq_ignore_ascii_case("skip") {
        Some(BotCommand::Skip)
    } else if word.eq_ignore_ascii_case("done") {
        Some(BotCommand::Done)
    } else if word.eq_ignore_ascii_case("reset") {
        Some(BotCommand::Reset)
    } else if word.eq_ignore_ascii_case("feedback") {
        Some(BotCommand::Feedback)
    } else {
        None
    };

    match command {
        Some(command) => ParseResult::Command(command),
        None => ParseResult::Unrecognized {
            attempted: word.to_string(),
        },
    }
}
