//! Label weights and lowest-weight selection.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A configured time or priority label with its ordinal weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedLabel {
    pub name: String,
    pub weight: f64,
}

impl WeightedLabel {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Pick the lowest-weight label from `reference` that is present on the issue.
///
/// Comparison is strict less-than, so among equal weights the entry
/// listed first in `reference` wins.
pub fn min_weight_label<'a>(
    present: &HashSet<&str>,
    reference: &'a [WeightedLabel],
) -> Option<&'a str> {
    reference
        .iter()
        .filter(|label| present.contains(label.name.as_str()))
        .reduce(|best, label| if label.weight < best.weight { label } else { best })
        .map(|label| label.name.as_str())
}

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// Derive a weight from a label name like `Time: <2 Hours` or `Priority: 3 (High)`.
///
/// Uses the first integer in the name (0 if none), scaled by the unit word.
/// Names with no recognised unit weigh 0.
pub fn label_weight(name: &str) -> f64 {
    let n = FIRST_NUMBER
        .find(name)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    let lower = name.to_lowercase();

    if lower.contains("priority") {
        n
    } else if lower.contains("minute") {
        n * 0.002
    } else if lower.contains("hour") {
        n * 0.125
    } else if lower.contains("day") {
        1.0 + (n - 1.0) * 0.25
    } else if lower.contains("week") {
        n + 1.0
    } else if lower.contains("month") {
        5.0 + (n - 1.0) * 8.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Vec<WeightedLabel> {
        vec![
            WeightedLabel::new("Time: <1 Week", 2.0),
            WeightedLabel::new("Time: <1 Day", 1.0),
            WeightedLabel::new("Time: <1 Month", 5.0),
        ]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn picks_lowest_weight_present() {
        let present = HashSet::from(["Time: <1 Week", "Time: <1 Day", "Price: 5 USD"]);
        assert_eq!(min_weight_label(&present, &reference()), Some("Time: <1 Day"));
    }

    #[test]
    fn none_when_nothing_present() {
        let present = HashSet::from(["bug"]);
        assert_eq!(min_weight_label(&present, &reference()), None);
        assert_eq!(min_weight_label(&HashSet::new(), &reference()), None);
    }

    #[test]
    fn singleton_is_returned() {
        let present = HashSet::from(["Time: <1 Month"]);
        assert_eq!(min_weight_label(&present, &reference()), Some("Time: <1 Month"));
    }

    #[test]
    fn ties_go_to_first_in_reference_order() {
        let reference = vec![
            WeightedLabel::new("Priority: Urgent", 1.0),
            WeightedLabel::new("Priority: High", 1.0),
        ];
        let present = HashSet::from(["Priority: High", "Priority: Urgent"]);
        assert_eq!(min_weight_label(&present, &reference), Some("Priority: Urgent"));

        let reversed: Vec<_> = reference.into_iter().rev().collect();
        assert_eq!(min_weight_label(&present, &reversed), Some("Priority: High"));
    }

    #[test]
    fn derives_time_weights() {
        assert!(approx(label_weight("Time: <15 Minutes"), 0.03));
        assert!(approx(label_weight("Time: <2 Hours"), 0.25));
        assert!(approx(label_weight("Time: <1 Day"), 1.0));
        assert!(approx(label_weight("Time: <3 Days"), 1.5));
        assert!(approx(label_weight("Time: <1 Week"), 2.0));
        assert!(approx(label_weight("Time: <2 Months"), 13.0));
    }

    #[test]
    fn derives_priority_weights() {
        assert!(approx(label_weight("Priority: 3 (High)"), 3.0));
        assert!(approx(label_weight("Priority: Urgent"), 0.0));
    }

    #[test]
    fn unknown_unit_weighs_zero() {
        assert!(approx(label_weight("Size: 5 points"), 0.0));
    }
}
