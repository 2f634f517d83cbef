use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use custody_ledger::LedgerConfig;

use crate::cli::PolicyArg;

/// Settings for the `custody` binary, read from a TOML file.
///
/// ```toml
/// log_level = "info"
/// color = false
///
/// [ledger]
/// update_policy = "rewrite_in_place"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub ledger: LedgerConfig,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
    /// Force coloured output on or off; unset leaves terminal detection on.
    pub color: Option<bool>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            log_level: "warn".into(),
            color: None,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load from `path` if given, then apply the command-line policy override.
    pub fn resolve(path: Option<&Path>, policy: Option<PolicyArg>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(policy) = policy {
            config.ledger.update_policy = policy.into();
        }
        Ok(config)
    }

    /// Configured log level, falling back to `warn` when unparseable.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}
