use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::adapters;
use crate::models::{FetchError, Source, Transaction};
use crate::sources::TransactionSource;

/// Fetches a bank feed over HTTP from `{base_url}/{FEED}.json`.
pub struct HttpSource {
    source: Source,
    client: Client,
    url: Url
}

impl HttpSource {
    pub fn new(source: Source, client: Client, base_url: &Url) -> Result<Self> {
        let url = base_url.join(source.file_name())
            .with_context(|| format!("Invalid feed URL for [{source}] under {base_url}"))?;

        Ok(Self { source, client, url })
    }
}

#[async_trait]
impl TransactionSource for HttpSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch(&self) -> Result<Vec<Transaction>, FetchError> {
        debug!("Fetching [{}] transactions from {}", self.source, self.url);

        let response = self.client.get(self.url.clone())
            .send()
            .await
            .map_err(|error| FetchError::transport(self.source, error))?;

        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::status(self.source, status.as_u16()));
        }

        let body = response.bytes()
            .await
            .map_err(|error| FetchError::transport(self.source, error))?;

        adapters::decode(self.source, &body)
    }
}
