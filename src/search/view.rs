use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::Transaction;
use crate::search::{filter_transactions, is_search_active};

/// The merged list as the user sees it, recomputed whenever the list or the committed search text changes.
pub struct FilteredView {
    visible: watch::Receiver<Arc<[Transaction]>>,
    task: JoinHandle<()>
}

impl FilteredView {
    pub fn spawn(mut transactions: watch::Receiver<Arc<[Transaction]>>, mut search: watch::Receiver<String>) -> Self {
        let initial = apply(&transactions.borrow_and_update(), &search.borrow_and_update());
        let (visible_tx, visible) = watch::channel(initial);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = transactions.changed() => if changed.is_err() { break },
                    changed = search.changed() => if changed.is_err() { break }
                }

                let filtered = apply(&transactions.borrow_and_update(), &search.borrow_and_update());
                visible_tx.send_replace(filtered);
            }
        });

        Self { visible, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[Transaction]>> {
        self.visible.clone()
    }

    pub fn visible(&self) -> Arc<[Transaction]> {
        Arc::clone(&self.visible.borrow())
    }
}

impl Drop for FilteredView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn apply(transactions: &Arc<[Transaction]>, text: &str) -> Arc<[Transaction]> {
    if is_search_active(text) {
        Arc::from(filter_transactions(transactions, text))
    } else {
        Arc::clone(transactions)
    }
}
