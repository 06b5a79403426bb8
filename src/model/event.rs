//! Issue timeline events, as returned by the issue events API.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Label;

/// One entry in an issue's event history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    /// Event kind, e.g. `labeled`, `unlabeled`, `closed`.
    pub event: String,

    /// The label involved, for `labeled`/`unlabeled` events.
    #[serde(default)]
    pub label: Option<Label>,

    /// Who triggered the event. `null` for deleted accounts.
    #[serde(default)]
    pub actor: Option<Actor>,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl IssueEvent {
    /// A `labeled` event whose label name mentions a price.
    pub fn is_price_labeling(&self) -> bool {
        self.event == "labeled"
            && self
                .label
                .as_ref()
                .is_some_and(|label| label.name.contains("Price"))
    }

    /// The actor's account type, if the event has an actor.
    pub fn actor_kind(&self) -> Option<ActorKind> {
        self.actor.as_ref().map(|a| a.kind)
    }
}

/// The account behind an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,

    #[serde(rename = "type")]
    pub kind: ActorKind,
}

/// GitHub account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    User,
    Bot,
    Organization,
    #[serde(other)]
    Other,
}
