//! Price table: maps a (time, priority) label pair to a target price label.

use serde::{Deserialize, Serialize};

use super::WeightedLabel;
use crate::model::PRICE_PREFIX;

/// Override value meaning "no price applies".
pub const NO_PRICE: &str = "none";

/// An explicit table entry. An omitted side matches "label absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOverride {
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    /// Target price label name, or `none`.
    pub price: String,
}

impl PriceOverride {
    fn matches(&self, time: Option<&str>, priority: Option<&str>) -> bool {
        self.time.as_deref() == time && self.priority.as_deref() == priority
    }

    fn target(&self) -> Option<String> {
        (self.price != NO_PRICE).then(|| self.price.clone())
    }
}

/// Resolves target price labels.
///
/// Overrides are consulted first; otherwise the price is
/// `base_multiplier * time_weight * priority_weight` and both labels are required.
#[derive(Debug, Clone)]
pub struct PriceTable {
    base_multiplier: f64,
    time_labels: Vec<WeightedLabel>,
    priority_labels: Vec<WeightedLabel>,
    overrides: Vec<PriceOverride>,
}

impl PriceTable {
    pub fn new(
        base_multiplier: f64,
        time_labels: Vec<WeightedLabel>,
        priority_labels: Vec<WeightedLabel>,
        overrides: Vec<PriceOverride>,
    ) -> Self {
        Self {
            base_multiplier,
            time_labels,
            priority_labels,
            overrides,
        }
    }

    /// The price label for this pair, or `None` when no price applies.
    pub fn target(&self, time: Option<&str>, priority: Option<&str>) -> Option<String> {
        if let Some(entry) = self.overrides.iter().find(|o| o.matches(time, priority)) {
            return entry.target();
        }

        let time_weight = weight_of(&self.time_labels, time?)?;
        let priority_weight = weight_of(&self.priority_labels, priority?)?;
        Some(price_label(
            self.base_multiplier * time_weight * priority_weight,
        ))
    }

    /// Every price label the table can produce from configured labels, deduplicated.
    pub fn all_targets(&self) -> Vec<String> {
        let computed = self.time_labels.iter().flat_map(|t| {
            self.priority_labels
                .iter()
                .filter_map(move |p| self.target(Some(&*t.name), Some(&*p.name)))
        });
        let explicit = self.overrides.iter().filter_map(PriceOverride::target);

        let mut targets: Vec<String> = Vec::new();
        for label in computed.chain(explicit) {
            if !targets.contains(&label) {
                targets.push(label);
            }
        }
        targets
    }
}

fn weight_of(labels: &[WeightedLabel], name: &str) -> Option<f64> {
    labels.iter().find(|l| l.name == name).map(|l| l.weight)
}

/// Format an amount as a price label, e.g. `Price: 80 USD` or `Price: 12.5 USD`.
pub fn price_label(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{PRICE_PREFIX} {rounded} USD")
}
