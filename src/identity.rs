//! Identity resolution for the bot's GitHub credentials.
//!
//! Pricebot may act as a dedicated account rather than whoever is logged into `gh`.
//! The identity is resolved through a chain:
//!
//! 1. `--as <identity>`: explicit per-invocation override
//! 2. `PRICEBOT_IDENTITY` env var: process level (e.g. set in CI)
//! 3. `identity` in the config file
//!
//! When nothing resolves, `gh`'s ambient authentication is used.

use std::env;
use std::path::PathBuf;

/// Resolve the acting identity from the tiered resolution chain.
pub fn resolve_identity(explicit: Option<&str>, configured: Option<&str>) -> Option<String> {
    pick(
        explicit,
        env::var("PRICEBOT_IDENTITY").ok().as_deref(),
        configured,
    )
}

fn pick(explicit: Option<&str>, from_env: Option<&str>, configured: Option<&str>) -> Option<String> {
    [explicit, from_env, configured]
        .into_iter()
        .flatten()
        .find(|id| !id.is_empty())
        .map(String::from)
}

/// Resolve the `GH_CONFIG_DIR` for a given identity.
///
/// Each identity has its own config directory under `~/.pricebot/gh-config/<identity>/`.
/// The directory must exist and contain valid `gh` auth.
pub fn gh_config_dir(identity: &str) -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("could not determine home directory")?;
    let config_dir = home.join(".pricebot").join("gh-config").join(identity);
    if !config_dir.exists() {
        return Err(format!(
            "no GitHub config for identity '{identity}': \
             expected directory at {}\n\
             Set up with: GH_CONFIG_DIR={} gh auth login",
            config_dir.display(),
            config_dir.display(),
        ));
    }
    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins() {
        assert_eq!(
            pick(Some("bot"), Some("env-bot"), Some("cfg-bot")).as_deref(),
            Some("bot")
        );
    }

    #[test]
    fn falls_through_in_order() {
        assert_eq!(pick(None, Some("env-bot"), Some("cfg-bot")).as_deref(), Some("env-bot"));
        assert_eq!(pick(None, None, Some("cfg-bot")).as_deref(), Some("cfg-bot"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn empty_values_are_skipped() {
        assert_eq!(pick(None, Some(""), Some("cfg-bot")).as_deref(), Some("cfg-bot"));
    }

    #[test]
    fn missing_gh_config_dir_is_an_error() {
        let err = gh_config_dir("no-such-identity-for-tests").unwrap_err();
        assert!(err.contains("no-such-identity-for-tests"));
        assert!(err.contains("gh auth login"));
    }
}
