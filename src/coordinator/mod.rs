mod fetch_coordinator;

use std::sync::Arc;

use crate::models::{CoordinatorError, Transaction};

pub use fetch_coordinator::FetchCoordinator;

/// The published state of the latest merge cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Success(Arc<[Transaction]>),
    Error(CoordinatorError)
}

impl FetchState {
    /// Total number of merged transactions, once a cycle has succeeded.
    pub fn count(&self) -> Option<usize> {
        match self {
            FetchState::Success(transactions) => Some(transactions.len()),
            FetchState::Loading | FetchState::Error(_) => None
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// What happened to the result of a merge cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Published,
    /// A newer cycle started before this one finished; its result was dropped.
    Superseded
}
