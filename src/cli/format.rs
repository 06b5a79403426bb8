//! Output formatting for CLI display.

use crate::model::{Decision, SkipReason};

/// Format a decision for human-readable display.
pub(super) fn describe_decision(number: u64, decision: &Decision, dry_run: bool) -> String {
    let outcome = match decision {
        Decision::Skip { reason } => format!("unchanged ({})", describe_skip(*reason)),
        Decision::UnpriceParent => "parent issue, price labels removed".to_string(),
        Decision::ClearPrice => "no price applies, price labels cleared".to_string(),
        Decision::AttachPrice {
            label,
            replacing: Some(old),
        } => format!("{old} → {label}"),
        Decision::AttachPrice {
            label,
            replacing: None,
        } => format!("priced {label}"),
    };

    if dry_run {
        format!("issue #{number}: {outcome} [dry run]")
    } else {
        format!("issue #{number}: {outcome}")
    }
}

fn describe_skip(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::AccessDenied => "sender lacks label access",
        SkipReason::AlreadyPriced => "already priced",
        SkipReason::SetByUser => "price set by a user",
        SkipReason::HistoryUnavailable => "event history unavailable",
        SkipReason::ParentAlreadyClear => "parent issue without price",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_replacement() {
        let decision = Decision::AttachPrice {
            label: "Price: 80 USD".into(),
            replacing: Some("Price: 50 USD".into()),
        };
        assert_eq!(
            describe_decision(4, &decision, false),
            "issue #4: Price: 50 USD → Price: 80 USD"
        );
    }

    #[test]
    fn describes_skip_in_dry_run() {
        let decision = Decision::skip(SkipReason::SetByUser);
        assert_eq!(
            describe_decision(4, &decision, true),
            "issue #4: unchanged (price set by a user) [dry run]"
        );
    }
}
