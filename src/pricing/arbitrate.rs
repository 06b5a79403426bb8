//! Arbitration: who set the current price label last?
//!
//! The bot corrects price labels it set itself, but never overrides one a
//! person chose. Only the most recent price `labeled` event counts.

use crate::model::{ActorKind, IssueEvent};

/// The most recent `labeled` event for a price label.
///
/// `events` must be ordered newest first.
pub fn latest_price_labeling(events: &[IssueEvent]) -> Option<&IssueEvent> {
    events.iter().find(|e| e.is_price_labeling())
}

/// Whether a person set the current price label.
///
/// No price `labeled` event at all (e.g. labels imported in bulk) counts as
/// not set by a person, so the bot is free to correct it.
pub fn set_by_user(events: &[IssueEvent]) -> bool {
    match latest_price_labeling(events) {
        Some(event) => event.actor_kind() == Some(ActorKind::User),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Actor, Label};

    fn labeled(label: &str, kind: ActorKind) -> IssueEvent {
        event("labeled", label, kind)
    }

    fn event(name: &str, label: &str, kind: ActorKind) -> IssueEvent {
        IssueEvent {
            event: name.into(),
            label: Some(Label::new(label)),
            actor: Some(Actor {
                login: "someone".into(),
                kind,
            }),
            created_at: None,
        }
    }

    #[test]
    fn newest_price_event_decides() {
        let events = vec![
            labeled("Price: 80 USD", ActorKind::Bot),
            labeled("Price: 50 USD", ActorKind::User),
        ];
        assert!(!set_by_user(&events));

        let events = vec![
            labeled("Price: 50 USD", ActorKind::User),
            labeled("Price: 80 USD", ActorKind::Bot),
        ];
        assert!(set_by_user(&events));
    }

    #[test]
    fn ignores_other_labels_and_kinds() {
        let events = vec![
            labeled("Time: <1 Day", ActorKind::User),
            event("unlabeled", "Price: 80 USD", ActorKind::User),
            labeled("Price: 50 USD", ActorKind::Bot),
        ];
        let latest = latest_price_labeling(&events).unwrap();
        assert_eq!(latest.label.as_ref().unwrap().name, "Price: 50 USD");
        assert!(!set_by_user(&events));
    }

    #[test]
    fn no_price_events_is_safe_to_correct() {
        let events = vec![labeled("bug", ActorKind::User)];
        assert!(latest_price_labeling(&events).is_none());
        assert!(!set_by_user(&events));
        assert!(!set_by_user(&[]));
    }

    #[test]
    fn missing_actor_is_not_a_user() {
        let mut e = labeled("Price: 50 USD", ActorKind::User);
        e.actor = None;
        assert!(!set_by_user(&[e]));
    }
}
