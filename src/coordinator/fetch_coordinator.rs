use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::coordinator::{CycleOutcome, FetchState};
use crate::merge::combine_and_sort;
use crate::models::{CoordinatorError, SourceResult, Transaction};
use crate::sources::{ConnectivityProbe, Sources};

/// Fetches every source concurrently, merges the results and publishes them.
///
/// The coordinator is the single writer of two watch channels: the merged
/// transactions and the [`FetchState`]. Each cycle is numbered; only the
/// newest cycle may publish, so a refresh supersedes any cycle still in flight.
pub struct FetchCoordinator {
    sources: Sources,
    probe: Arc<dyn ConnectivityProbe>,
    generation: AtomicU64,
    state: watch::Sender<FetchState>,
    transactions: watch::Sender<Arc<[Transaction]>>
}

impl FetchCoordinator {
    pub fn new(sources: Sources, probe: Arc<dyn ConnectivityProbe>) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        let (transactions, _) = watch::channel(Arc::<[Transaction]>::from(Vec::new()));

        Self {
            sources,
            probe,
            generation: AtomicU64::new(0),
            state,
            transactions
        }
    }

    pub fn subscribe_state(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn subscribe_transactions(&self) -> watch::Receiver<Arc<[Transaction]>> {
        self.transactions.subscribe()
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn transactions(&self) -> Arc<[Transaction]> {
        Arc::clone(&self.transactions.borrow())
    }

    /// Runs a merge cycle on a background task.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<CycleOutcome> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.refresh().await })
    }

    /// Runs one merge cycle: probe, fan out to every source, join, merge, publish.
    pub async fn refresh(&self) -> CycleOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let timer = Instant::now();

        debug!("Merge cycle [{generation}] started for {} sources", self.sources.len());
        self.publish(generation, FetchState::Loading, None);

        if !self.probe.is_network_available().await {
            error!("Merge cycle [{generation}] aborted: no network connectivity");
            return self.publish(generation, FetchState::Error(CoordinatorError::NoConnectivity), None);
        }

        match self.fetch_all().await {
            Ok(contributions) => {
                let merged: Arc<[Transaction]> = Arc::from(combine_and_sort(contributions));
                let duration = timer.elapsed();

                info!("Merge cycle [{generation}] produced {} transactions in {duration:?}", merged.len());
                self.publish(generation, FetchState::Success(Arc::clone(&merged)), Some(merged))
            }
            Err(cause) => {
                error!("Merge cycle [{generation}] failed: {cause}");
                self.publish(generation, FetchState::Error(cause), None)
            }
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Vec<Transaction>>, CoordinatorError> {
        let handles = self.sources.iter().map(|source| {
            let source = Arc::clone(source);

            tokio::spawn(async move {
                let result = SourceResult::from(source.fetch().await);
                debug!("Source [{}] finished, failed: {}", source.source(), result.is_failure());
                result
            })
        });

        join_all(handles).await
            .into_iter()
            .map(|joined| {
                joined
                    .map(SourceResult::into_contribution)
                    .map_err(|error| CoordinatorError::Aggregation(error.to_string()))
            })
            .collect()
    }

    //NOTE: The generation check runs inside the state channel's write lock, so a superseded
    //      cycle cannot overwrite anything a newer cycle has already published.
    fn publish(&self, generation: u64, state: FetchState, transactions: Option<Arc<[Transaction]>>) -> CycleOutcome {
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            if let Some(transactions) = transactions {
                self.transactions.send_replace(transactions);
            }

            *current = state;
            true
        });

        if published {
            CycleOutcome::Published
        } else {
            debug!("Merge cycle [{generation}] was superseded, result dropped");
            CycleOutcome::Superseded
        }
    }
}
