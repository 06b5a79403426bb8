//! Price resolution: decide which single price label an issue should carry.
//!
//! The pipeline runs once per issue event:
//!
//! 1. Parent issues (task lists of sub-issues) never carry a price.
//! 2. With label access control on, senders without access change nothing.
//! 3. The lowest-weight time and priority labels on the issue pick a target
//!    price from the [`PriceTable`].
//! 4. An existing, different price label is only replaced if a person
//!    did not set it (see `arbitrate`).
//!
//! [`decide`] only reads; [`apply`] performs the mutations for a [`Decision`].

mod arbitrate;
mod parent;
mod table;
mod weight;

use tracing::{debug, info};

use crate::config::PricingConfig;
use crate::model::{Decision, IssueSnapshot, LabelCategory, SkipReason, Trigger};
use crate::tracker::{Result, Tracker};

use arbitrate::set_by_user;
pub use parent::is_parent_issue;
pub use table::{PriceOverride, PriceTable};
pub use weight::{WeightedLabel, label_weight, min_weight_label};

/// Decide what should happen to the issue's price label.
///
/// With label access control on, webhook senders must have label access and
/// events without a sender are refused. Operator runs are not gated.
pub fn decide<T: Tracker + ?Sized>(
    issue: &IssueSnapshot,
    trigger: Trigger<'_>,
    config: &PricingConfig,
    tracker: &T,
) -> Result<Decision> {
    debug!(issue = issue.number, "checking for parent issue");
    if issue.body.as_deref().is_some_and(is_parent_issue) {
        info!(issue = issue.number, "parent issue, price labels disabled");
        return Ok(if issue.has_price_label() {
            Decision::UnpriceParent
        } else {
            Decision::skip(SkipReason::ParentAlreadyClear)
        });
    }

    if config.access_control_by_label && !has_access(trigger, tracker)? {
        info!(issue = issue.number, ?trigger, "sender lacks label access");
        return Ok(Decision::skip(SkipReason::AccessDenied));
    }

    let names = issue.label_names();
    let time = min_weight_label(&names, &config.time_labels);
    let priority = min_weight_label(&names, &config.priority_labels);
    debug!(issue = issue.number, ?time, ?priority, "resolved label weights");

    let Some(target) = config.table.target(time, priority) else {
        info!(issue = issue.number, "no price applies");
        return Ok(Decision::ClearPrice);
    };

    if names.contains(target.as_str()) && issue.price_labels().all(|l| l.name == target) {
        debug!(issue = issue.number, label = %target, "already priced");
        return Ok(Decision::skip(SkipReason::AlreadyPriced));
    }

    // The target may be among several price labels; arbitrate over the others.
    let Some(current) = issue.price_labels().find(|l| l.name != target) else {
        return Ok(Decision::AttachPrice {
            label: target,
            replacing: None,
        });
    };

    let events = match tracker.issue_events(issue.number)? {
        Some(events) if !events.is_empty() => events,
        _ => {
            info!(issue = issue.number, "event history unavailable, leaving price as is");
            return Ok(Decision::skip(SkipReason::HistoryUnavailable));
        }
    };

    if set_by_user(&events) {
        info!(
            issue = issue.number,
            label = %current.name,
            "price label was set by a user, skipping"
        );
        return Ok(Decision::skip(SkipReason::SetByUser));
    }

    Ok(Decision::AttachPrice {
        label: target,
        replacing: Some(current.name.clone()),
    })
}

/// Carry out a decision against the tracker.
///
/// Price labels are always cleared before a new one is attached.
pub fn apply<T: Tracker + ?Sized>(
    decision: &Decision,
    issue: &IssueSnapshot,
    config: &PricingConfig,
    tracker: &T,
) -> Result<()> {
    match decision {
        Decision::Skip { .. } => Ok(()),
        Decision::UnpriceParent => {
            tracker.comment(issue.number, &config.parent_issue_comment)?;
            clear_price_labels(issue, tracker)
        }
        Decision::ClearPrice => clear_price_labels(issue, tracker),
        Decision::AttachPrice { label, .. } => {
            info!(issue = issue.number, %label, "adding price label");
            clear_price_labels(issue, tracker)?;
            if config.assistive_pricing && !tracker.label_exists(label)? {
                info!(%label, "price label missing on repository, creating");
                tracker.create_label(label, LabelCategory::Price)?;
            }
            tracker.add_label(issue.number, label)
        }
    }
}

/// Decide, then apply. Returns the decision that was applied.
pub fn run<T: Tracker + ?Sized>(
    issue: &IssueSnapshot,
    trigger: Trigger<'_>,
    config: &PricingConfig,
    tracker: &T,
) -> Result<Decision> {
    let decision = decide(issue, trigger, config, tracker)?;
    apply(&decision, issue, config, tracker)?;
    Ok(decision)
}

fn has_access<T: Tracker + ?Sized>(trigger: Trigger<'_>, tracker: &T) -> Result<bool> {
    match trigger {
        Trigger::Operator => Ok(true),
        Trigger::Sender(login) => tracker.has_label_access(login),
        Trigger::Anonymous => Ok(false),
    }
}

fn clear_price_labels<T: Tracker + ?Sized>(issue: &IssueSnapshot, tracker: &T) -> Result<()> {
    let names: Vec<&str> = issue.price_labels().map(|l| l.name.as_str()).collect();
    if names.is_empty() {
        return Ok(());
    }
    debug!(issue = issue.number, labels = ?names, "clearing price labels");
    tracker.remove_labels(issue.number, &names)
}
