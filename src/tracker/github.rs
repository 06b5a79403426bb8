//! GitHub tracker: issues, labels, and events via the `gh` CLI.
//!
//! Authenticates with the bot identity's `GH_CONFIG_DIR` when one is set,
//! and targets `GH_REPO` when a repository is given; otherwise `gh` falls
//! back to its own defaults (ambient auth, the current directory's repo).

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use super::{Result, Tracker, TrackerError};
use crate::model::{IssueEvent, IssueSnapshot, Label, LabelCategory};

/// Repository permissions that include changing labels.
const LABEL_PERMISSIONS: &[&str] = &["admin", "maintain", "write"];

/// A [`Tracker`] backed by the `gh` CLI.
#[derive(Debug, Clone, Default)]
pub struct GhTracker {
    gh_config: Option<PathBuf>,
    repo: Option<String>,
}

impl GhTracker {
    pub fn new(gh_config: Option<PathBuf>, repo: Option<String>) -> Self {
        Self { gh_config, repo }
    }

    /// Fetch an issue's number, body, and labels.
    pub fn issue(&self, number: u64) -> Result<IssueSnapshot> {
        let num = number.to_string();
        let json = self.gh(&["issue", "view", &num, "--json", "number,body,labels"])?;
        let view: GhIssueView = serde_json::from_str(&json)?;

        Ok(IssueSnapshot {
            number: view.number,
            body: if view.body.is_empty() {
                None
            } else {
                Some(view.body)
            },
            labels: view.labels,
        })
    }

    /// Names of every label defined on the repository.
    pub fn repo_labels(&self) -> Result<HashSet<String>> {
        let json = self.gh(&["label", "list", "--json", "name", "--limit", "1000"])?;
        let labels: Vec<Label> = serde_json::from_str(&json)?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    /// Run `gh` with the given args and return stdout on success.
    fn gh(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new("gh");
        command.args(args);
        if let Some(dir) = &self.gh_config {
            command.env("GH_CONFIG_DIR", dir);
        }
        if let Some(repo) = &self.repo {
            command.env("GH_REPO", repo);
        }

        debug!(args = %args.join(" "), "running gh");
        let output = command.output().map_err(TrackerError::Spawn)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(TrackerError::Command {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// JSON shape returned by `gh issue view --json number,body,labels`.
#[derive(Deserialize)]
struct GhIssueView {
    number: u64,
    body: String,
    labels: Vec<Label>,
}

/// JSON shape of the collaborator permission endpoint.
#[derive(Deserialize)]
struct GhPermission {
    permission: String,
}

impl Tracker for GhTracker {
    fn issue_events(&self, number: u64) -> Result<Option<Vec<IssueEvent>>> {
        let endpoint = format!("repos/{{owner}}/{{repo}}/issues/{number}/events");
        let json = self.gh(&["api", &endpoint, "--paginate", "--slurp"])?;
        if json.trim().is_empty() {
            return Ok(None);
        }

        // `--slurp` wraps each page in an outer array.
        let pages: Vec<Vec<IssueEvent>> = serde_json::from_str(&json)?;
        let events = newest_first(pages.into_iter().flatten().collect());
        Ok((!events.is_empty()).then_some(events))
    }

    fn label_exists(&self, name: &str) -> Result<bool> {
        Ok(self.repo_labels()?.contains(name))
    }

    fn create_label(&self, name: &str, category: LabelCategory) -> Result<()> {
        let created = self.gh(&[
            "label",
            "create",
            name,
            "--color",
            category.color(),
            "--description",
            category.as_str(),
        ]);
        allow_existing(created)
    }

    fn add_label(&self, number: u64, name: &str) -> Result<()> {
        let num = number.to_string();
        self.gh(&["issue", "edit", &num, "--add-label", name])?;
        Ok(())
    }

    fn remove_labels(&self, number: u64, names: &[&str]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let num = number.to_string();
        self.gh(&remove_label_args(&num, names))?;
        Ok(())
    }

    fn comment(&self, number: u64, body: &str) -> Result<()> {
        let num = number.to_string();
        self.gh(&["issue", "comment", &num, "--body", body])?;
        Ok(())
    }

    fn has_label_access(&self, login: &str) -> Result<bool> {
        let endpoint = format!("repos/{{owner}}/{{repo}}/collaborators/{login}/permission");
        match self.gh(&["api", &endpoint]) {
            Ok(json) => {
                let level: GhPermission = serde_json::from_str(&json)?;
                Ok(LABEL_PERMISSIONS.contains(&level.permission.as_str()))
            }
            // Not a collaborator.
            Err(TrackerError::Command { stderr, .. }) if stderr.contains("HTTP 404") => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Order events newest first. Events without a timestamp sort last.
///
/// `events` arrive oldest first; reversing before the stable sort keeps
/// same-second events newest first too.
fn newest_first(mut events: Vec<IssueEvent>) -> Vec<IssueEvent> {
    events.reverse();
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    events
}

/// `gh issue edit` args removing each label with its own flag.
///
/// `--remove-label` splits on commas, so names are never joined.
fn remove_label_args<'a>(number: &'a str, names: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["issue", "edit", number];
    for name in names {
        args.extend(["--remove-label", name]);
    }
    args
}

/// Treat "label already exists" as success: `label list` is capped and may
/// miss labels on repositories with very many of them.
fn allow_existing(created: Result<String>) -> Result<()> {
    match created {
        Ok(_) => Ok(()),
        Err(TrackerError::Command { stderr, .. }) if stderr.contains("already exists") => {
            debug!("label already exists");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
