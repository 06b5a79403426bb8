//! Core data model for pricebot.
//!
//! These types describe what the pricing pipeline reads and decides:
//! labels, the issue snapshot, its event history, and the final verdict.

mod decision;
mod event;
mod issue;
mod label;
mod trigger;

pub use decision::{Decision, SkipReason};
pub use event::{Actor, ActorKind, IssueEvent};
pub use issue::IssueSnapshot;
pub use label::{Label, LabelCategory, PRICE_PREFIX};
pub use trigger::Trigger;
