//! Issue snapshot: the issue as it was when the event fired.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Label;

/// The issue state the pipeline decides on.
///
/// Read fresh from the tracker (or the webhook payload) per invocation.
/// Nothing about it is persisted between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSnapshot {
    pub number: u64,

    /// Issue body. GitHub sends `null` for an empty body.
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub labels: Vec<Label>,
}

impl IssueSnapshot {
    /// Names of every label on the issue, computed once for set lookups.
    pub fn label_names(&self) -> HashSet<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Price labels currently attached.
    pub fn price_labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(|l| l.is_price())
    }

    pub fn has_price_label(&self) -> bool {
        self.price_labels().next().is_some()
    }
}
