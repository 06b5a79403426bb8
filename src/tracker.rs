//! The issue tracker the pricing pipeline reads from and writes to.
//!
//! [`Tracker`] is the seam between the pricing decision and the outside world.
//! [`GhTracker`] drives GitHub through the `gh` CLI.

mod github;

use std::io;

use crate::model::{IssueEvent, LabelCategory};

pub use github::GhTracker;

/// Errors from tracker calls.
///
/// These are not handled by the pipeline; they abort the run and surface
/// to whoever invoked it.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("failed to run gh: {0}")]
    Spawn(#[source] io::Error),

    #[error("gh {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("unexpected gh output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, TrackerError>;

/// Operations pricebot needs from an issue tracker.
pub trait Tracker {
    /// Full event history for an issue, newest first.
    ///
    /// `None` when no history could be retrieved.
    fn issue_events(&self, number: u64) -> Result<Option<Vec<IssueEvent>>>;

    /// Whether a label with this exact name exists on the repository.
    fn label_exists(&self, name: &str) -> Result<bool>;

    fn create_label(&self, name: &str, category: LabelCategory) -> Result<()>;

    fn add_label(&self, number: u64, name: &str) -> Result<()>;

    fn remove_labels(&self, number: u64, names: &[&str]) -> Result<()>;

    fn comment(&self, number: u64, body: &str) -> Result<()>;

    /// Whether `login` may change labels on the repository.
    fn has_label_access(&self, login: &str) -> Result<bool>;
}

/// In-memory tracker that records every call, for tests.
#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use super::{Result, Tracker};
    use crate::model::{IssueEvent, LabelCategory};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Events(u64),
        LabelExists(String),
        CreateLabel(String, LabelCategory),
        AddLabel(u64, String),
        RemoveLabels(u64, Vec<String>),
        Comment(u64, String),
        Access(String),
    }

    impl Call {
        fn is_mutation(&self) -> bool {
            matches!(
                self,
                Self::CreateLabel(..) | Self::AddLabel(..) | Self::RemoveLabels(..) | Self::Comment(..)
            )
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeTracker {
        pub events: Option<Vec<IssueEvent>>,
        pub repo_labels: RefCell<HashSet<String>>,
        pub denied: HashSet<String>,
        pub calls: RefCell<Vec<Call>>,
    }

    impl FakeTracker {
        pub fn with_events(events: Vec<IssueEvent>) -> Self {
            Self {
                events: Some(events),
                ..Self::default()
            }
        }

        /// Calls that changed tracker state, in order.
        pub fn mutations(&self) -> Vec<Call> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.is_mutation())
                .cloned()
                .collect()
        }

        pub fn called(&self, call: &Call) -> bool {
            self.calls.borrow().contains(call)
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl Tracker for FakeTracker {
        fn issue_events(&self, number: u64) -> Result<Option<Vec<IssueEvent>>> {
            self.record(Call::Events(number));
            Ok(self.events.clone())
        }

        fn label_exists(&self, name: &str) -> Result<bool> {
            self.record(Call::LabelExists(name.to_string()));
            Ok(self.repo_labels.borrow().contains(name))
        }

        fn create_label(&self, name: &str, category: LabelCategory) -> Result<()> {
            self.record(Call::CreateLabel(name.to_string(), category));
            self.repo_labels.borrow_mut().insert(name.to_string());
            Ok(())
        }

        fn add_label(&self, number: u64, name: &str) -> Result<()> {
            self.record(Call::AddLabel(number, name.to_string()));
            Ok(())
        }

        fn remove_labels(&self, number: u64, names: &[&str]) -> Result<()> {
            let names = names.iter().map(ToString::to_string).collect();
            self.record(Call::RemoveLabels(number, names));
            Ok(())
        }

        fn comment(&self, number: u64, body: &str) -> Result<()> {
            self.record(Call::Comment(number, body.to_string()));
            Ok(())
        }

        fn has_label_access(&self, login: &str) -> Result<bool> {
            self.record(Call::Access(login.to_string()));
            Ok(!self.denied.contains(login))
        }
    }
}
