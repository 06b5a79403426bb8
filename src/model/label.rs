//! Labels and the categories pricebot knows about.

use serde::{Deserialize, Serialize};

/// Name prefix shared by every price label (e.g. `Price: 80 USD`).
pub const PRICE_PREFIX: &str = "Price:";

/// A label as it appears on an issue or in an event.
///
/// Only the name matters for pricing; GitHub's other fields
/// (color, description, id) are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether this is a price label.
    pub fn is_price(&self) -> bool {
        self.name.starts_with(PRICE_PREFIX)
    }
}

/// What kind of label pricebot is creating on the repository.
///
/// Drives the color and description of labels created by `gh label create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelCategory {
    Price,
    Time,
    Priority,
}

impl LabelCategory {
    /// Hex color (no leading `#`) used when creating a label of this category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Price => "1f883d",
            Self::Time => "d4c5f9",
            Self::Priority => "fbca04",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Time => "time",
            Self::Priority => "priority",
        }
    }
}
