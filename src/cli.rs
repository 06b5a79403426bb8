//! CLI interface for pricebot.
//!
//! Meant to be run from a webhook handler or a GitHub Actions step:
//!
//! - `pricebot event` prices the issue in a webhook payload.
//! - `pricebot issue <number>` prices an issue fetched from GitHub.
//! - `pricebot labels sync` creates the configured labels on the repository.
//!
//! Each subcommand is non-interactive: the decision goes to stdout,
//! logs go to stderr.

mod format;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{Config, PricingConfig};
use crate::event::WebhookEvent;
use crate::identity::{gh_config_dir, resolve_identity};
use crate::model::{IssueSnapshot, LabelCategory, Trigger};
use crate::pricing;
use crate::tracker::{GhTracker, Tracker};

use format::describe_decision;

/// Pricebot: keep issue price labels in step with time and priority labels.
#[derive(Debug, Parser)]
#[command(name = "pricebot", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Config file (defaults to `~/.pricebot/config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub identity to act as; selects `~/.pricebot/gh-config/<identity>`.
    #[arg(long = "as", global = true)]
    identity: Option<String>,

    /// Target repository as `owner/name` (defaults to the current directory's).
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Log decisions at info level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r#"Examples:
  In a GitHub Actions step triggered by `issues`:
    pricebot event                      (reads $GITHUB_EVENT_PATH)

  From a webhook handler:
    pricebot --repo acme/widgets event --payload payload.json --json

  By hand:
    pricebot --repo acme/widgets issue 42 --dry-run
    pricebot --repo acme/widgets labels sync"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price the issue carried by a webhook payload.
    ///
    /// Payloads without an issue are ignored.
    Event {
        /// Payload JSON file. Defaults to `$GITHUB_EVENT_PATH`.
        #[arg(long)]
        payload: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch an issue from GitHub and price it.
    Issue {
        /// Issue number.
        number: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the repository's pricing labels.
    Labels {
        #[command(subcommand)]
        command: LabelsCommand,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the decision without changing any labels.
    #[arg(long)]
    dry_run: bool,

    /// Print the decision as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
pub enum LabelsCommand {
    /// Create configured time and priority labels missing on the repository.
    ///
    /// With assistive pricing on, also creates every price label the table can produce.
    Sync,
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: &Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let identity = resolve_identity(cli.identity.as_deref(), config.identity.as_deref());
    let gh_config = identity.as_deref().map(gh_config_dir).transpose()?;
    let tracker = GhTracker::new(gh_config, cli.repo.clone());
    let pricing = config.pricing();

    match &cli.command {
        Command::Event { payload, output } => {
            cmd_event(&pricing, &tracker, payload.as_deref(), output)
        }
        Command::Issue { number, output } => {
            let issue = tracker
                .issue(*number)
                .map_err(|e| format!("failed to fetch issue #{number}: {e}"))?;
            resolve(&issue, Trigger::Operator, &pricing, &tracker, output)
        }
        Command::Labels { command } => match command {
            LabelsCommand::Sync => cmd_sync_labels(&pricing, &tracker),
        },
    }
}

fn cmd_event(
    pricing: &PricingConfig,
    tracker: &GhTracker,
    payload: Option<&Path>,
    output: &OutputArgs,
) -> Result<(), String> {
    let path = match payload {
        Some(p) => p.to_path_buf(),
        None => env::var_os("GITHUB_EVENT_PATH")
            .map(PathBuf::from)
            .ok_or("no payload: pass --payload or set GITHUB_EVENT_PATH")?,
    };

    let json = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let event = WebhookEvent::from_json(&json)
        .map_err(|e| format!("invalid payload at {}: {e}", path.display()))?;

    let Some(issue) = &event.issue else {
        info!(action = ?event.action, "payload has no issue, nothing to do");
        return Ok(());
    };

    resolve(issue, event.trigger(), pricing, tracker, output)
}

fn resolve(
    issue: &IssueSnapshot,
    trigger: Trigger<'_>,
    pricing: &PricingConfig,
    tracker: &GhTracker,
    output: &OutputArgs,
) -> Result<(), String> {
    let decision = if output.dry_run {
        pricing::decide(issue, trigger, pricing, tracker)
    } else {
        pricing::run(issue, trigger, pricing, tracker)
    }
    .map_err(|e| format!("failed to price issue #{}: {e}", issue.number))?;

    if output.json {
        let json = serde_json::to_string_pretty(&decision)
            .map_err(|e| format!("failed to serialize decision: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", describe_decision(issue.number, &decision, output.dry_run));
    }

    Ok(())
}

fn cmd_sync_labels(pricing: &PricingConfig, tracker: &GhTracker) -> Result<(), String> {
    let existing = tracker
        .repo_labels()
        .map_err(|e| format!("failed to list labels: {e}"))?;

    let prices = if pricing.assistive_pricing {
        pricing.table.all_targets()
    } else {
        Vec::new()
    };

    let wanted = pricing
        .time_labels
        .iter()
        .map(|l| (l.name.as_str(), LabelCategory::Time))
        .chain(
            pricing
                .priority_labels
                .iter()
                .map(|l| (l.name.as_str(), LabelCategory::Priority)),
        )
        .chain(prices.iter().map(|p| (p.as_str(), LabelCategory::Price)));

    let mut created = 0;
    for (name, category) in wanted {
        if existing.contains(name) {
            continue;
        }
        tracker
            .create_label(name, category)
            .map_err(|e| format!("failed to create label '{name}': {e}"))?;
        eprintln!("Created {} label: {name}", category.as_str());
        created += 1;
    }

    if created == 0 {
        eprintln!("All labels present");
    }
    Ok(())
}
