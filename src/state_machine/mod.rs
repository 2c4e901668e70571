//! Seller intake conversation, modelled as a state machine.
//!
//! - **State**: one [`SellerRecord`] per sender, keyed by sender id.
//! - **Events**: inbound messages, flattened by the webhook adapter.
//! - **Effects**: replies and admin relays, described as data.
//! - **Transition**: a pure function from (record, event) to
//!   (record action, effects); all conversation rules live there.
//!
//! The [`IntakeStore`] dispatcher wires those pieces to a repository and
//! a transport.

pub mod effect;
pub mod event;
pub mod interpreter;
pub mod repository;
pub mod state;
pub mod store;
pub mod transition;

pub use effect::{Effect, LogLevel, Prompt};
pub use event::{EventKind, InboundEvent};
pub use interpreter::{execute_effects, InterpreterContext};
pub use state::{IntakeStep, PhotoId, SellerRecord, SenderId};
pub use store::IntakeStore;
pub use transition::{transition, RecordAction, TransitionResult};
