mod connectivity;
mod directory_source;
mod http_source;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::Config;
use crate::models::{FetchError, Source, Transaction};

pub use connectivity::{DirectoryProbe, TcpProbe};
pub use directory_source::DirectorySource;
pub use http_source::HttpSource;

/// One bank feed the coordinator can fetch from.
#[async_trait]
pub trait TransactionSource: Send + Sync + 'static {
    fn source(&self) -> Source;

    /// Fetches the feed and returns its transactions newest first.
    async fn fetch(&self) -> Result<Vec<Transaction>, FetchError>;
}

/// Answers whether fetching is worth attempting at all.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync + 'static {
    async fn is_network_available(&self) -> bool;
}

pub type Sources = Vec<Arc<dyn TransactionSource>>;

/// Builds the configured sources together with the probe that guards them.
pub fn from_config(config: &Config) -> Result<(Sources, Arc<dyn ConnectivityProbe>)> {
    if let Some(directory) = &config.source_dir {
        let sources = config.sources.iter()
            .map(|source| Arc::new(DirectorySource::new(*source, directory.clone())) as Arc<dyn TransactionSource>)
            .collect();

        return Ok((sources, Arc::new(DirectoryProbe::new(directory.clone()))));
    }

    let base_url = base_url(&config.base_url)?;
    let client = http_client(config.request_timeout)?;

    let sources = config.sources.iter()
        .map(|source| HttpSource::new(*source, client.clone(), &base_url).map(|source| Arc::new(source) as Arc<dyn TransactionSource>))
        .collect::<Result<Sources>>()?;

    let probe = TcpProbe::from_url(&base_url, config.probe_timeout)?;

    Ok((sources, Arc::new(probe)))
}

/// Parses the feed base URL, making sure relative joins append rather than replace.
pub fn base_url(value: &str) -> Result<Url> {
    let value = value.trim();
    let normalized = if value.ends_with('/') { value.to_string() } else { format!("{value}/") };

    Url::parse(&normalized).with_context(|| format!("Invalid base URL '{value}'"))
}

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
