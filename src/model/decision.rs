//! Decision: the verdict the pricing pipeline hands to the label mutator.

use serde::{Deserialize, Serialize};

/// What should happen to an issue's price label.
///
/// Produced without side effects; applying it is a separate step
/// so a dry run can print exactly what would be done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Decision {
    /// Leave the issue untouched.
    Skip { reason: SkipReason },

    /// Parent issue carrying a price: post the notice and clear price labels.
    UnpriceParent,

    /// No price applies: clear every price label.
    ClearPrice,

    /// Clear existing price labels, then attach `label`.
    #[serde(rename_all = "camelCase")]
    AttachPrice {
        label: String,

        /// The bot-set price label being corrected, if any.
        replacing: Option<String>,
    },
}

impl Decision {
    pub fn skip(reason: SkipReason) -> Self {
        Self::Skip { reason }
    }
}

/// Why an issue was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Label access control is on and the sender lacks access.
    AccessDenied,

    /// The target price label is already on the issue.
    AlreadyPriced,

    /// The current price label was last set by a person.
    SetByUser,

    /// Event history could not be fetched.
    HistoryUnavailable,

    /// Parent issue without any price label.
    ParentAlreadyClear,
}
