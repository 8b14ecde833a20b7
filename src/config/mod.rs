//! Aggregator configuration.
//!
//! Settings come from an optional JSON file, then the environment, then the command line:
//! ```json
//! {
//!   "baseUrl": "https://kghiretest.s3.amazonaws.com/",
//!   "requestTimeoutSecs": 30,
//!   "probeTimeoutMillis": 2000,
//!   "debounceMillis": 250,
//!   "sources": ["bko", "kibk", "rbk", "kd"]
//! }
//! ```


use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::models::Source;

pub const DEFAULT_BASE_URL: &str = "https://kghiretest.s3.amazonaws.com/";
pub const BASE_URL_ENV: &str = "BANK_AGGREGATOR_BASE_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROBE_TIMEOUT_MILLIS: u64 = 2_000;
const DEFAULT_DEBOUNCE_MILLIS: u64 = 250;

/// Raw settings file, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    source_dir: Option<PathBuf>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    probe_timeout_millis: Option<u64>,
    #[serde(default)]
    debounce_millis: Option<u64>,
    #[serde(default)]
    sources: Option<Vec<Source>>
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// When set, feeds are read from this directory instead of over HTTP.
    pub source_dir: Option<PathBuf>,
    pub sources: Vec<Source>,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
    pub debounce: Duration
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            source_dir: None,
            sources: Source::ALL.to_vec(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MILLIS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MILLIS)
        }
    }
}

impl Config {
    /// Loads the settings file (if any) and applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let settings: SettingsFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: SettingsFile) -> Result<Self> {
        let defaults = Self::default();

        let mut config = Self {
            base_url: settings.base_url.unwrap_or(defaults.base_url),
            source_dir: settings.source_dir,
            sources: defaults.sources,
            request_timeout: settings.request_timeout_secs.map(Duration::from_secs).unwrap_or(defaults.request_timeout),
            probe_timeout: settings.probe_timeout_millis.map(Duration::from_millis).unwrap_or(defaults.probe_timeout),
            debounce: settings.debounce_millis.map(Duration::from_millis).unwrap_or(defaults.debounce)
        };

        match settings.sources {
            Some(sources) => config.select_sources(&sources)?,
            None => config.validate()?
        }

        Ok(config)
    }

    //NOTE: The lookup is injected so tests do not have to mutate the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url;
        }
    }

    /// Restricts the configured sources, keeping the order given and dropping repeats.
    pub fn select_sources(&mut self, sources: &[Source]) -> Result<()> {
        let mut selected = Vec::with_capacity(sources.len());

        for source in sources {
            if !selected.contains(source) {
                selected.push(*source);
            }
        }

        self.sources = selected;
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            bail!("requestTimeoutSecs must be greater than zero");
        }

        if self.probe_timeout.is_zero() {
            bail!("probeTimeoutMillis must be greater than zero");
        }

        if self.sources.is_empty() {
            bail!("At least one source must be enabled");
        }

        Ok(())
    }
}
