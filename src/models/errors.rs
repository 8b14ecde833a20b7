use thiserror::Error;

use crate::models::Source;

/// Failure of a single bank feed. Never fatal for a merge cycle.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Fetching [{bank}] transactions failed with HTTP status {status}")]
    Status {
        bank: Source,
        status: u16
    },
    #[error("Fetching [{bank}] transactions failed: {message}")]
    Transport {
        bank: Source,
        message: String
    },
    #[error("Could not decode [{bank}] transactions: {message}")]
    Decode {
        bank: Source,
        message: String
    },
    #[error("Could not read [{bank}] transactions: {message}")]
    Io {
        bank: Source,
        message: String
    }
}

impl FetchError {
    pub fn status(bank: Source, status: u16) -> Self {
        Self::Status { bank, status }
    }

    pub fn transport(bank: Source, error: impl ToString) -> Self {
        Self::Transport { bank, message: error.to_string() }
    }

    pub fn decode(bank: Source, error: impl ToString) -> Self {
        Self::Decode { bank, message: error.to_string() }
    }

    pub fn io(bank: Source, error: impl ToString) -> Self {
        Self::Io { bank, message: error.to_string() }
    }

    pub fn bank(&self) -> Source {
        match self {
            Self::Status { bank, .. }
            | Self::Transport { bank, .. }
            | Self::Decode { bank, .. }
            | Self::Io { bank, .. } => *bank
        }
    }
}

/// Failure of a whole merge cycle, published as the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("No network connectivity")]
    NoConnectivity,
    #[error("Aggregating transactions failed: {0}")]
    Aggregation(String)
}

impl CoordinatorError {
    pub fn is_no_connectivity(&self) -> bool {
        matches!(self, Self::NoConnectivity)
    }
}
