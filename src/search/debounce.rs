use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::trace;

/// Raw search input paired with its debounced, committed value.
///
/// Text is committed once the input has been quiet for the whole window, and only
/// when it differs from the last committed text. Dropping the input commits
/// whatever was still pending.
pub struct SearchInput {
    raw: watch::Sender<String>,
    committed: watch::Receiver<String>
}

impl SearchInput {
    pub fn spawn(window: Duration) -> Self {
        let (raw, raw_rx) = watch::channel(String::new());
        let (committed_tx, committed) = watch::channel(String::new());

        tokio::spawn(debounce(raw_rx, committed_tx, window));

        Self { raw, committed }
    }

    pub fn set_input_text(&self, text: impl Into<String>) {
        self.raw.send_replace(text.into());
    }

    pub fn input_text(&self) -> String {
        self.raw.borrow().clone()
    }

    pub fn committed(&self) -> watch::Receiver<String> {
        self.committed.clone()
    }

    pub fn committed_text(&self) -> String {
        self.committed.borrow().clone()
    }
}

async fn debounce(mut raw: watch::Receiver<String>, committed: watch::Sender<String>, window: Duration) {
    while raw.changed().await.is_ok() {
        let closed = settle(&mut raw, window).await;
        let text = raw.borrow_and_update().clone();

        committed.send_if_modified(|current| {
            if *current == text {
                return false;
            }

            trace!("Committing search text {text:?}");
            *current = text;
            true
        });

        if closed {
            break;
        }
    }
}

/// Waits until the input stays unchanged for `window`. Returns true if the input closed first.
async fn settle(raw: &mut watch::Receiver<String>, window: Duration) -> bool {
    loop {
        tokio::select! {
            changed = raw.changed() => {
                if changed.is_err() {
                    return true;
                }
            }
            _ = sleep(window) => return false
        }
    }
}
