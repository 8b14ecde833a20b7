use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters;
use crate::models::{FetchError, Source, Transaction};
use crate::sources::TransactionSource;

/// Reads a bank feed from `{directory}/{FEED}.json`, for offline runs and fixtures.
pub struct DirectorySource {
    source: Source,
    directory: PathBuf
}

impl DirectorySource {
    pub fn new(source: Source, directory: PathBuf) -> Self {
        Self { source, directory }
    }
}

#[async_trait]
impl TransactionSource for DirectorySource {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch(&self) -> Result<Vec<Transaction>, FetchError> {
        let path = self.directory.join(self.source.file_name());
        debug!("Reading [{}] transactions from {}", self.source, path.display());

        let body = tokio::fs::read(&path)
            .await
            .map_err(|error| FetchError::io(self.source, format!("{}: {error}", path.display())))?;

        adapters::decode(self.source, &body)
    }
}
