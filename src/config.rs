//! Pricebot configuration.
//!
//! Loaded from `--config <path>` or `~/.pricebot/config.toml`.
//! [`Config::pricing`] turns it into the [`PricingConfig`] value the pipeline reads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pricing::{PriceOverride, PriceTable, WeightedLabel, label_weight};

/// Comment posted when a price label is removed from a parent issue.
pub const DEFAULT_PARENT_ISSUE_COMMENT: &str =
    "Pricing is disabled on parent issues. Price the sub-issues instead.";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("could not determine home directory")]
    NoHome,
}

/// Pricebot configuration, as written in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// `gh` identity the bot acts as. See `identity::resolve_identity`.
    #[serde(default)]
    pub identity: Option<String>,

    #[serde(default = "default_base_multiplier")]
    pub base_multiplier: f64,

    /// Allow creating price labels that don't exist on the repository yet.
    #[serde(default)]
    pub assistive_pricing: bool,

    #[serde(default = "default_parent_issue_comment")]
    pub parent_issue_comment: String,

    #[serde(default)]
    pub access_control: AccessControl,

    #[serde(default)]
    pub time_labels: Vec<LabelEntry>,

    #[serde(default)]
    pub priority_labels: Vec<LabelEntry>,

    #[serde(default)]
    pub overrides: Vec<PriceOverride>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccessControl {
    /// Only let senders with label access trigger label changes.
    #[serde(default)]
    pub by_label: bool,
}

/// A configured time or priority label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    pub name: String,

    /// Ordinal weight. Derived from the name when omitted.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl LabelEntry {
    fn weighted(&self) -> WeightedLabel {
        WeightedLabel {
            name: self.name.clone(),
            weight: self.weight.unwrap_or_else(|| label_weight(&self.name)),
        }
    }
}

fn default_base_multiplier() -> f64 {
    1000.0
}

fn default_parent_issue_comment() -> String {
    DEFAULT_PARENT_ISSUE_COMMENT.to_string()
}

impl Config {
    /// Load config from `path`, or from `~/.pricebot/config.toml` when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoHome)?,
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config = Self::parse(&contents).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::Parse { path, source },
            ParseFailure::Invalid(msg) => ConfigError::Invalid(msg),
        })?;

        Ok(config)
    }

    /// The default config path: `~/.pricebot/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pricebot").join("config.toml"))
    }

    fn parse(contents: &str) -> Result<Self, ParseFailure> {
        let config: Self = toml::from_str(contents).map_err(ParseFailure::Toml)?;
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.base_multiplier.is_finite() || self.base_multiplier < 0.0 {
            return Err(format!(
                "base-multiplier must be a non-negative number, got {}",
                self.base_multiplier
            ));
        }

        let entries = self
            .time_labels
            .iter()
            .map(|e| ("time-labels", e))
            .chain(self.priority_labels.iter().map(|e| ("priority-labels", e)));

        for (section, entry) in entries {
            if entry.name.trim().is_empty() {
                return Err(format!("{section} has an entry with an empty name"));
            }
            if let Some(w) = entry.weight
                && (!w.is_finite() || w < 0.0)
            {
                return Err(format!(
                    "{section}: weight for '{}' must be a non-negative number",
                    entry.name
                ));
            }
        }

        Ok(())
    }

    /// Build the value object the pricing pipeline reads.
    pub fn pricing(&self) -> PricingConfig {
        let time_labels: Vec<WeightedLabel> =
            self.time_labels.iter().map(LabelEntry::weighted).collect();
        let priority_labels: Vec<WeightedLabel> = self
            .priority_labels
            .iter()
            .map(LabelEntry::weighted)
            .collect();

        PricingConfig {
            table: PriceTable::new(
                self.base_multiplier,
                time_labels.clone(),
                priority_labels.clone(),
                self.overrides.clone(),
            ),
            time_labels,
            priority_labels,
            assistive_pricing: self.assistive_pricing,
            access_control_by_label: self.access_control.by_label,
            parent_issue_comment: self.parent_issue_comment.clone(),
        }
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(String),
}

/// Everything the pricing pipeline reads from configuration.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Time labels in configured order.
    pub time_labels: Vec<WeightedLabel>,

    /// Priority labels in configured order.
    pub priority_labels: Vec<WeightedLabel>,

    pub table: PriceTable,

    pub assistive_pricing: bool,

    pub access_control_by_label: bool,

    pub parent_issue_comment: String,
}
