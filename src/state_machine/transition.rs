//! The pure transition function.
//!
//! `transition` maps (current record, inbound event) to a record action
//! plus a list of effects. It performs no IO and holds no locks, so every
//! row of the conversation table can be tested directly. The dispatcher in
//! [`super::store`] persists the record action first and only then runs
//! the effects.

use crate::command::BotCommand;
use crate::state_machine::effect::{Effect, LogLevel, Prompt};
use crate::state_machine::event::{EventKind, InboundEvent};
use crate::state_machine::state::{IntakeStep, PhotoId, SellerRecord};

// Per-field caps, in characters. Answers are stored and relayed, never
// interpreted, so length is the only thing worth enforcing.
const PHONE_MAX_LEN: usize = 20;
const SHOP_NAME_MAX_LEN: usize = 50;
const LOCATION_MAX_LEN: usize = 50;
const TITLE_MAX_LEN: usize = 60;
const DESCRIPTION_MAX_LEN: usize = 300;
const MATERIAL_MAX_LEN: usize = 30;
const MIN_ORDER_MAX_LEN: usize = 20;
const PRICE_MAX_LEN: usize = 20;
const FEEDBACK_MAX_LEN: usize = 1000;

/// What should happen to the stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordAction {
    /// Write this record under its sender id.
    Save(SellerRecord),
    /// Remove the sender's record entirely.
    Delete,
    /// Leave storage untouched.
    Keep,
}

/// Result of one transition: a record action and the effects to run
/// after it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub action: RecordAction,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(action: RecordAction, effects: Vec<Effect>) -> Self {
        TransitionResult { action, effects }
    }

    /// Keep the record, send one prompt.
    fn reply(prompt: Prompt) -> Self {
        Self::new(RecordAction::Keep, vec![Effect::Reply { prompt }])
    }

    /// Keep the record and stay silent; a debug log records why.
    fn ignored(reason: &str) -> Self {
        Self::new(
            RecordAction::Keep,
            vec![Effect::Log {
                level: LogLevel::Debug,
                message: reason.to_string(),
            }],
        )
    }

    /// Save the record and ask the next question.
    fn advance(record: SellerRecord, prompt: Prompt) -> Self {
        Self::new(
            RecordAction::Save(record),
            vec![Effect::Reply { prompt }],
        )
    }
}

/// Trim an answer and cap its length.
///
/// Truncation is by character, not byte, so multibyte answers cannot be
/// split mid-character. A truncated answer ends in `...` and the result
/// never exceeds `max_chars` in total; caps too small to fit the marker
/// truncate without it.
pub fn sanitize_field(input: &str, max_chars: usize) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    if max_chars < 3 {
        return trimmed.chars().take(max_chars).collect();
    }
    let kept: String = trimmed.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

/// Advance one seller's conversation by one event.
///
/// Callers materialise an absent record as `SellerRecord::new(sender)`
/// before calling, which is why an unknown sender behaves exactly like an
/// idle one.
pub fn transition(record: SellerRecord, event: InboundEvent) -> TransitionResult {
    match event.kind {
        EventKind::Command(command) => handle_command(record, command),
        EventKind::UnknownCommand { attempted } => {
            TransitionResult::reply(Prompt::UnknownCommand { attempted })
        }
        EventKind::Text(text) => handle_text(record, text, event.handle),
        EventKind::Photo(file_id) => handle_photo(record, file_id, event.handle),
    }
}

// Commands are honoured from any step.
fn handle_command(record: SellerRecord, command: BotCommand) -> TransitionResult {
    match command {
        BotCommand::Start => TransitionResult::reply(Prompt::Welcome),
        BotCommand::Buy => TransitionResult::reply(Prompt::BrowseHint),
        BotCommand::Sell => begin_submission(record),
        BotCommand::Reset => TransitionResult::new(
            RecordAction::Delete,
            vec![Effect::Reply {
                prompt: Prompt::ResetDone,
            }],
        ),
        BotCommand::Feedback => {
            let mut next = record;
            next.step = IntakeStep::Feedback;
            TransitionResult::advance(next, Prompt::FeedbackAsk)
        }
        BotCommand::Skip => handle_skip(record),
        BotCommand::Done => handle_done(record),
    }
}

/// Start a submission. Returning sellers keep their profile and jump
/// straight to the product questions; everyone else starts from scratch,
/// including sellers who abandoned the profile questions halfway.
fn begin_submission(record: SellerRecord) -> TransitionResult {
    if record.is_returning_seller() {
        let mut next = record;
        next.clear_product_fields();
        next.step = IntakeStep::Title;
        TransitionResult::advance(next, Prompt::AskTitle)
    } else {
        let mut next = SellerRecord::new(record.sender_id);
        next.step = IntakeStep::Phone;
        TransitionResult::advance(next, Prompt::AskPhone)
    }
}

fn handle_skip(record: SellerRecord) -> TransitionResult {
    match record.step {
        // Only the description is optional.
        IntakeStep::Description => {
            let mut next = record;
            next.description = String::new();
            next.step = IntakeStep::Material;
            TransitionResult::advance(next, Prompt::AskMaterial)
        }
        IntakeStep::Idle => TransitionResult::ignored("skip with no active conversation"),
        _ => TransitionResult::reply(Prompt::NothingToSkip),
    }
}

fn handle_done(record: SellerRecord) -> TransitionResult {
    match record.step {
        IntakeStep::Photo => {
            let mut next = record;
            next.clear_product_fields();
            next.step = IntakeStep::Idle;
            TransitionResult::advance(next, Prompt::SubmissionDone)
        }
        IntakeStep::Idle => TransitionResult::ignored("done with no active conversation"),
        _ => TransitionResult::reply(Prompt::NothingToFinish),
    }
}

fn handle_text(record: SellerRecord, text: String, handle: Option<String>) -> TransitionResult {
    match record.step {
        IntakeStep::Idle => TransitionResult::ignored("text with no active conversation"),
        IntakeStep::Phone => {
            let mut next = record;
            next.phone_number = sanitize_field(&text, PHONE_MAX_LEN);
            next.step = IntakeStep::ShopName;
            TransitionResult::advance(next, Prompt::AskShopName)
        }
        IntakeStep::ShopName => {
            let mut next = record;
            next.shop_name = sanitize_field(&text, SHOP_NAME_MAX_LEN);
            next.step = IntakeStep::Location;
            TransitionResult::advance(next, Prompt::AskLocation)
        }
        IntakeStep::Location => {
            let mut next = record;
            next.location = sanitize_field(&text, LOCATION_MAX_LEN);
            next.step = IntakeStep::Title;
            TransitionResult::advance(next, Prompt::AskTitle)
        }
        IntakeStep::Title => {
            let mut next = record;
            next.title = sanitize_field(&text, TITLE_MAX_LEN);
            next.step = IntakeStep::Description;
            TransitionResult::advance(next, Prompt::AskDescription)
        }
        IntakeStep::Description => {
            let mut next = record;
            next.description = sanitize_field(&text, DESCRIPTION_MAX_LEN);
            next.step = IntakeStep::Material;
            TransitionResult::advance(next, Prompt::AskMaterial)
        }
        IntakeStep::Material => {
            let mut next = record;
            next.material = sanitize_field(&text, MATERIAL_MAX_LEN);
            next.step = IntakeStep::MinOrder;
            TransitionResult::advance(next, Prompt::AskMinOrder)
        }
        IntakeStep::MinOrder => {
            let mut next = record;
            next.min_order = sanitize_field(&text, MIN_ORDER_MAX_LEN);
            next.step = IntakeStep::Price;
            TransitionResult::advance(next, Prompt::AskPrice)
        }
        // The price answer completes the questionnaire: relay the full
        // summary to the admin before telling the seller what comes next.
        IntakeStep::Price => {
            let mut next = record;
            next.price = sanitize_field(&text, PRICE_MAX_LEN);
            next.step = IntakeStep::Photo;
            let effects = vec![
                Effect::RelaySummary {
                    handle,
                    record: next.clone(),
                },
                Effect::Reply {
                    prompt: Prompt::AskPhotos,
                },
            ];
            TransitionResult::new(RecordAction::Save(next), effects)
        }
        IntakeStep::Photo => TransitionResult::reply(Prompt::PhotoReprompt),
        IntakeStep::Feedback => {
            let mut next = record;
            next.step = IntakeStep::Idle;
            let effects = vec![
                Effect::RelayFeedback {
                    handle,
                    text: sanitize_field(&text, FEEDBACK_MAX_LEN),
                },
                Effect::Reply {
                    prompt: Prompt::FeedbackThanks,
                },
            ];
            TransitionResult::new(RecordAction::Save(next), effects)
        }
    }
}

fn handle_photo(record: SellerRecord, file_id: PhotoId, handle: Option<String>) -> TransitionResult {
    match record.step {
        // Photos do not advance the step; the seller may send several and
        // closes the submission with /done.
        IntakeStep::Photo => {
            let effects = vec![
                Effect::RelayPhoto {
                    file_id,
                    shop_name: record.shop_name.clone(),
                    handle,
                },
                Effect::Reply {
                    prompt: Prompt::PhotoReceived,
                },
            ];
            TransitionResult::new(RecordAction::Keep, effects)
        }
        IntakeStep::Idle => TransitionResult::ignored("photo with no active submission"),
        // A photo cannot answer a text question; re-ask the current one.
        step => match question_for(step) {
            Some(prompt) => TransitionResult::reply(prompt),
            None => TransitionResult::ignored("photo with no active submission"),
        },
    }
}

/// The prompt that re-asks the question belonging to `step`.
fn question_for(step: IntakeStep) -> Option<Prompt> {
    match step {
        IntakeStep::Idle => None,
        IntakeStep::Phone => Some(Prompt::AskPhone),
        IntakeStep::ShopName => Some(Prompt::AskShopName),
        IntakeStep::Location => Some(Prompt::AskLocation),
        IntakeStep::Title => Some(Prompt::AskTitle),
        IntakeStep::Description => Some(Prompt::AskDescription),
        IntakeStep::Material => Some(Prompt::AskMaterial),
        IntakeStep::MinOrder => Some(Prompt::AskMinOrder),
        IntakeStep::Price => Some(Prompt::AskPrice),
        IntakeStep::Photo => Some(Prompt::PhotoReprompt),
        IntakeStep::Feedback => Some(Prompt::FeedbackAsk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::state::SenderId;
    use proptest::prelude::*;

    fn record_at(step: IntakeStep) -> SellerRecord {
        let mut record = SellerRecord::new(SenderId::from("42"));
        record.step = step;
        record
    }

    fn returning_record(step: IntakeStep) -> SellerRecord {
        let mut record = record_at(step);
        record.phone_number = "0911000000".to_string();
        record.shop_name = "GreenPack".to_string();
        record.location = "Merkato".to_string();
        record
    }

    fn text_event(text: &str) -> InboundEvent {
        InboundEvent {
            sender: SenderId::from("42"),
            handle: Some("greenpack_seller".to_string()),
            kind: EventKind::Text(text.to_string()),
        }
    }

    fn command_event(command: BotCommand) -> InboundEvent {
        InboundEvent {
            sender: SenderId::from("42"),
            handle: Some("greenpack_seller".to_string()),
            kind: EventKind::Command(command),
        }
    }

    fn photo_event(file_id: &str) -> InboundEvent {
        InboundEvent {
            sender: SenderId::from("42"),
            handle: Some("greenpack_seller".to_string()),
            kind: EventKind::Photo(PhotoId::from(file_id)),
        }
    }

    fn reply_prompts(result: &TransitionResult) -> Vec<&Prompt> {
        result
            .effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Reply { prompt } => Some(prompt),
                _ => None,
            })
            .collect()
    }

    fn saved(result: TransitionResult) -> SellerRecord {
        match result.action {
            RecordAction::Save(record) => record,
            other => panic!("expected Save, got {:?}", other),
        }
    }

    // ===== Commands =====

    #[test]
    fn test_start_replies_without_touching_the_record() {
        let result = transition(returning_record(IntakeStep::Idle), command_event(BotCommand::Start));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::Welcome]);
    }

    #[test]
    fn test_buy_replies_with_the_browse_hint() {
        let result = transition(record_at(IntakeStep::Idle), command_event(BotCommand::Buy));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::BrowseHint]);
    }

    #[test]
    fn test_sell_starts_a_fresh_seller_at_the_phone_question() {
        let result = transition(record_at(IntakeStep::Idle), command_event(BotCommand::Sell));
        assert_eq!(reply_prompts(&result), vec![&Prompt::AskPhone]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Phone);
        assert!(next.phone_number.is_empty());
    }

    #[test]
    fn test_sell_midway_through_the_profile_starts_over() {
        // Phone captured but no shop name yet: not a returning seller.
        let mut record = record_at(IntakeStep::ShopName);
        record.phone_number = "0911000000".to_string();

        let result = transition(record, command_event(BotCommand::Sell));
        assert_eq!(reply_prompts(&result), vec![&Prompt::AskPhone]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Phone);
        assert!(next.phone_number.is_empty());
    }

    #[test]
    fn test_sell_skips_profile_questions_for_returning_sellers() {
        let mut record = returning_record(IntakeStep::Idle);
        record.title = "Old product".to_string();
        record.price = "5".to_string();

        let result = transition(record, command_event(BotCommand::Sell));
        assert_eq!(reply_prompts(&result), vec![&Prompt::AskTitle]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Title);
        assert_eq!(next.shop_name, "GreenPack");
        assert_eq!(next.phone_number, "0911000000");
        assert!(next.title.is_empty());
        assert!(next.price.is_empty());
    }

    #[test]
    fn test_reset_deletes_the_record() {
        let result = transition(returning_record(IntakeStep::Price), command_event(BotCommand::Reset));
        assert_eq!(result.action, RecordAction::Delete);
        assert_eq!(reply_prompts(&result), vec![&Prompt::ResetDone]);
    }

    #[test]
    fn test_feedback_interrupts_any_step() {
        let result = transition(returning_record(IntakeStep::Material), command_event(BotCommand::Feedback));
        assert_eq!(reply_prompts(&result), vec![&Prompt::FeedbackAsk]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Feedback);
        // Captured answers survive the detour.
        assert_eq!(next.shop_name, "GreenPack");
    }

    #[test]
    fn test_done_at_the_photo_step_completes_the_submission() {
        let mut record = returning_record(IntakeStep::Photo);
        record.title = "2kg Kraft Bag".to_string();
        record.price = "12.50".to_string();

        let result = transition(record, command_event(BotCommand::Done));
        assert_eq!(reply_prompts(&result), vec![&Prompt::SubmissionDone]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Idle);
        assert!(next.title.is_empty());
        assert!(next.price.is_empty());
        assert_eq!(next.shop_name, "GreenPack");
        assert_eq!(next.phone_number, "0911000000");
    }

    #[test]
    fn test_done_before_the_photo_step_is_rejected_gently() {
        let result = transition(returning_record(IntakeStep::Title), command_event(BotCommand::Done));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::NothingToFinish]);
    }

    #[test]
    fn test_done_when_idle_is_silent() {
        let result = transition(record_at(IntakeStep::Idle), command_event(BotCommand::Done));
        assert_eq!(result.action, RecordAction::Keep);
        assert!(reply_prompts(&result).is_empty());
    }

    #[test]
    fn test_skip_clears_the_description_and_moves_on() {
        let mut record = returning_record(IntakeStep::Description);
        record.description = "half-typed".to_string();

        let result = transition(record, command_event(BotCommand::Skip));
        assert_eq!(reply_prompts(&result), vec![&Prompt::AskMaterial]);
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Material);
        assert!(next.description.is_empty());
    }

    #[test]
    fn test_skip_outside_the_description_step_is_rejected_gently() {
        let result = transition(returning_record(IntakeStep::Price), command_event(BotCommand::Skip));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::NothingToSkip]);
    }

    #[test]
    fn test_skip_when_idle_is_silent() {
        let result = transition(record_at(IntakeStep::Idle), command_event(BotCommand::Skip));
        assert!(reply_prompts(&result).is_empty());
    }

    #[test]
    fn test_unknown_commands_get_a_reply_even_when_idle() {
        let event = InboundEvent {
            sender: SenderId::from("42"),
            handle: None,
            kind: EventKind::UnknownCommand {
                attempted: "help".to_string(),
            },
        };
        let result = transition(record_at(IntakeStep::Idle), event);
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(
            reply_prompts(&result),
            vec![&Prompt::UnknownCommand {
                attempted: "help".to_string()
            }]
        );
    }

    // ===== Answer text =====

    #[test]
    fn test_text_when_idle_is_discarded_silently() {
        let result = transition(record_at(IntakeStep::Idle), text_event("hello?"));
        assert_eq!(result.action, RecordAction::Keep);
        assert!(reply_prompts(&result).is_empty());
    }

    #[test]
    fn test_the_questionnaire_advances_step_by_step() {
        let answers = [
            ("0911000000", IntakeStep::ShopName, Prompt::AskShopName),
            ("GreenPack", IntakeStep::Location, Prompt::AskLocation),
            ("Merkato", IntakeStep::Title, Prompt::AskTitle),
            ("2kg Kraft Bag", IntakeStep::Description, Prompt::AskDescription),
            ("Brown kraft paper", IntakeStep::Material, Prompt::AskMaterial),
            ("Paper", IntakeStep::MinOrder, Prompt::AskMinOrder),
            ("100", IntakeStep::Price, Prompt::AskPrice),
        ];

        let mut record = record_at(IntakeStep::Phone);
        for (answer, expected_step, expected_prompt) in answers {
            let result = transition(record, text_event(answer));
            assert_eq!(reply_prompts(&result), vec![&expected_prompt]);
            record = saved(result);
            assert_eq!(record.step, expected_step);
        }

        assert_eq!(record.phone_number, "0911000000");
        assert_eq!(record.shop_name, "GreenPack");
        assert_eq!(record.location, "Merkato");
        assert_eq!(record.title, "2kg Kraft Bag");
        assert_eq!(record.description, "Brown kraft paper");
        assert_eq!(record.material, "Paper");
        assert_eq!(record.min_order, "100");
    }

    #[test]
    fn test_answers_are_trimmed_before_storage() {
        let result = transition(record_at(IntakeStep::Phone), text_event("  0911000000  "));
        assert_eq!(saved(result).phone_number, "0911000000");
    }

    #[test]
    fn test_overlong_answers_are_truncated_with_an_ellipsis() {
        let long_name = "G".repeat(80);
        let result = transition(record_at(IntakeStep::ShopName), text_event(&long_name));
        let stored = saved(result).shop_name;
        assert_eq!(stored.chars().count(), 50);
        assert!(stored.ends_with("..."));
    }

    #[test]
    fn test_the_price_answer_relays_the_summary_to_the_admin() {
        let mut record = returning_record(IntakeStep::Price);
        record.title = "2kg Kraft Bag".to_string();
        record.min_order = "100".to_string();

        let result = transition(record, text_event("12.50"));

        // Relay first, then the next prompt for the seller.
        assert_eq!(result.effects.len(), 2);
        match &result.effects[0] {
            Effect::RelaySummary { handle, record } => {
                assert_eq!(handle.as_deref(), Some("greenpack_seller"));
                assert_eq!(record.price, "12.50");
                assert_eq!(record.title, "2kg Kraft Bag");
            }
            other => panic!("expected RelaySummary, got {:?}", other),
        }
        assert!(matches!(
            &result.effects[1],
            Effect::Reply {
                prompt: Prompt::AskPhotos
            }
        ));
        assert_eq!(saved(result).step, IntakeStep::Photo);
    }

    #[test]
    fn test_text_during_the_photo_step_asks_for_a_photo_again() {
        let result = transition(returning_record(IntakeStep::Photo), text_event("is this ok?"));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::PhotoReprompt]);
    }

    #[test]
    fn test_feedback_text_is_relayed_and_ends_the_feedback_step() {
        let result = transition(returning_record(IntakeStep::Feedback), text_event("more materials please"));

        match &result.effects[0] {
            Effect::RelayFeedback { handle, text } => {
                assert_eq!(handle.as_deref(), Some("greenpack_seller"));
                assert_eq!(text, "more materials please");
            }
            other => panic!("expected RelayFeedback, got {:?}", other),
        }
        assert!(matches!(
            &result.effects[1],
            Effect::Reply {
                prompt: Prompt::FeedbackThanks
            }
        ));
        let next = saved(result);
        assert_eq!(next.step, IntakeStep::Idle);
        assert_eq!(next.shop_name, "GreenPack");
    }

    #[test]
    fn test_feedback_text_is_capped_at_the_feedback_limit() {
        let rant = "x".repeat(2000);
        let result = transition(record_at(IntakeStep::Feedback), text_event(&rant));
        match &result.effects[0] {
            Effect::RelayFeedback { text, .. } => {
                assert_eq!(text.chars().count(), 1000);
                assert!(text.ends_with("..."));
            }
            other => panic!("expected RelayFeedback, got {:?}", other),
        }
    }

    // ===== Photos =====

    #[test]
    fn test_a_photo_at_the_photo_step_is_relayed_without_a_step_change() {
        let mut record = returning_record(IntakeStep::Photo);
        record.title = "2kg Kraft Bag".to_string();

        let result = transition(record, photo_event("file-123"));
        assert_eq!(result.action, RecordAction::Keep);
        match &result.effects[0] {
            Effect::RelayPhoto {
                file_id,
                shop_name,
                handle,
            } => {
                assert_eq!(file_id, &PhotoId::from("file-123"));
                assert_eq!(shop_name, "GreenPack");
                assert_eq!(handle.as_deref(), Some("greenpack_seller"));
            }
            other => panic!("expected RelayPhoto, got {:?}", other),
        }
        assert!(matches!(
            &result.effects[1],
            Effect::Reply {
                prompt: Prompt::PhotoReceived
            }
        ));
    }

    #[test]
    fn test_a_photo_when_idle_is_discarded_silently() {
        let result = transition(record_at(IntakeStep::Idle), photo_event("file-123"));
        assert_eq!(result.action, RecordAction::Keep);
        assert!(reply_prompts(&result).is_empty());
    }

    #[test]
    fn test_a_photo_during_a_text_question_reasks_the_question() {
        let result = transition(returning_record(IntakeStep::Material), photo_event("file-123"));
        assert_eq!(result.action, RecordAction::Keep);
        assert_eq!(reply_prompts(&result), vec![&Prompt::AskMaterial]);
    }

    #[test]
    fn test_a_photo_during_feedback_reasks_for_text() {
        let result = transition(record_at(IntakeStep::Feedback), photo_event("file-123"));
        assert_eq!(reply_prompts(&result), vec![&Prompt::FeedbackAsk]);
    }

    // ===== Sanitizer =====

    #[test]
    fn test_sanitize_keeps_short_answers_untouched() {
        assert_eq!(sanitize_field("GreenPack", 50), "GreenPack");
    }

    #[test]
    fn test_sanitize_at_the_exact_limit_is_not_truncated() {
        let input = "a".repeat(50);
        assert_eq!(sanitize_field(&input, 50), input);
    }

    #[test]
    fn test_sanitize_truncates_multibyte_text_on_character_boundaries() {
        // Ethiopic script, three bytes per character.
        let input = "መ".repeat(60);
        let out = sanitize_field(&input, 50);
        assert_eq!(out.chars().count(), 50);
        assert!(out.ends_with("..."));
        assert!(out.starts_with("መ"));
    }

    #[test]
    fn test_sanitize_trims_whitespace_only_input_to_empty() {
        assert_eq!(sanitize_field("   \t  ", 50), "");
    }

    #[test]
    fn test_sanitize_with_a_cap_too_small_for_the_marker_cuts_hard() {
        assert_eq!(sanitize_field("abcdef", 2), "ab");
        assert_eq!(sanitize_field("abcdef", 0), "");
        assert_eq!(sanitize_field("abcdef", 3), "...");
    }

    proptest! {
        #[test]
        fn prop_sanitized_answers_never_exceed_the_cap(input in ".*", max in 0usize..200) {
            let out = sanitize_field(&input, max);
            prop_assert!(out.chars().count() <= max);
        }

        #[test]
        fn prop_sanitized_answers_carry_no_surrounding_whitespace(input in ".*") {
            let out = sanitize_field(&input, 100);
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
