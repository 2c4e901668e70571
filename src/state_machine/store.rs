//! Event dispatcher.
//!
//! One entry point, [`IntakeStore::process_event`], owns the ordering
//! guarantee of the whole bot: the record is loaded, transitioned and
//! persisted before any effect runs. A storage failure therefore aborts
//! before anything is sent, so the seller never gets a prompt for a step
//! that was not saved. A delivery failure after the write is logged and
//! tolerated.

use std::sync::Arc;

use tracing::info;

use crate::state_machine::event::InboundEvent;
use crate::state_machine::interpreter::{execute_effects, InterpreterContext};
use crate::state_machine::repository::{IntakeRepository, RepositoryError};
use crate::state_machine::state::{IntakeStep, SellerRecord};
use crate::state_machine::transition::{transition, RecordAction, TransitionResult};

pub struct IntakeStore {
    repository: Arc<dyn IntakeRepository>,
}

impl IntakeStore {
    pub fn with_repository(repository: Arc<dyn IntakeRepository>) -> Self {
        IntakeStore { repository }
    }

    /// Advance one seller's conversation by one event.
    ///
    /// Returns the step the seller ends up on, mainly for logging.
    pub async fn process_event(
        &self,
        event: InboundEvent,
        ctx: &InterpreterContext,
    ) -> Result<IntakeStep, RepositoryError> {
        info!("Processing {}", event.log_summary());

        let sender = event.sender.clone();
        let record = self
            .repository
            .get(&sender)
            .await?
            .unwrap_or_else(|| SellerRecord::new(sender.clone()));
        let step_before = record.step;

        let TransitionResult { action, effects } = transition(record, event);

        let final_step = match &action {
            RecordAction::Save(next) => {
                self.repository.upsert(next).await?;
                next.step
            }
            RecordAction::Delete => {
                self.repository.delete(&sender).await?;
                IntakeStep::Idle
            }
            RecordAction::Keep => step_before,
        };

        if !effects.is_empty() {
            execute_effects(ctx, effects).await;
        }

        Ok(final_step)
    }
}
