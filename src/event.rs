//! Webhook payloads: the GitHub `issues` event that triggers a pricing run.

use serde::Deserialize;

use crate::model::{IssueSnapshot, Trigger};

/// The parts of an `issues` webhook payload pricebot reads.
///
/// Other event types (and issue events from GitHub Actions) share this
/// shape closely enough; a payload without an `issue` is simply ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    /// `opened`, `labeled`, `edited`, ...
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub issue: Option<IssueSnapshot>,

    #[serde(default)]
    pub sender: Option<Sender>,
}

#[derive(Debug, Deserialize)]
pub struct Sender {
    pub login: String,
}

impl WebhookEvent {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn sender_login(&self) -> Option<&str> {
        self.sender.as_ref().map(|s| s.login.as_str())
    }

    pub fn trigger(&self) -> Trigger<'_> {
        self.sender_login().map_or(Trigger::Anonymous, Trigger::Sender)
    }
}
