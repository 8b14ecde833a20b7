use tracing::warn;

use crate::models::{FetchError, Transaction};

/// Outcome of fetching one bank feed during a merge cycle.
#[derive(Debug, Clone)]
pub enum SourceResult {
    Success(Vec<Transaction>),
    Failure(FetchError)
}

impl SourceResult {
    /// What this source adds to the merged list. A failed source adds nothing.
    pub fn into_contribution(self) -> Vec<Transaction> {
        match self {
            SourceResult::Success(transactions) => transactions,
            SourceResult::Failure(error) => {
                warn!("Source [{}] contributes no transactions: {error}", error.bank());
                Vec::new()
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SourceResult::Failure(_))
    }
}

impl From<Result<Vec<Transaction>, FetchError>> for SourceResult {
    fn from(result: Result<Vec<Transaction>, FetchError>) -> Self {
        match result {
            Ok(transactions) => SourceResult::Success(transactions),
            Err(error) => SourceResult::Failure(error)
        }
    }
}
