
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use tokio::sync::watch;

use crate::coordinator::FetchState;
use crate::models::{CoordinatorError, Transaction};

#[derive(Serialize)]
struct Row<'a> {
    date: NaiveDate,
    description: &'a str,
    value: String,
    source: &'static str,
    tags: String
}

impl<'a> From<&'a Transaction> for Row<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            date: transaction.date(),
            description: transaction.description(),
            value: format!("{:.2}", transaction.value()),
            source: transaction.source().code(),
            tags: transaction.tags().join(";")
        }
    }
}

/// Writes the transactions as CSV with a `date,description,value,source,tags` header.
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    //NOTE: The header is written by hand so an empty list still produces one.
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(["date", "description", "value", "source", "tags"])?;

    for transaction in transactions {
        csv.serialize(Row::from(transaction))?;
    }

    csv.flush()?;

    Ok(())
}

/// One-line summary of a fetch state for the terminal.
pub fn describe_state(state: &FetchState) -> String {
    match state {
        FetchState::Loading => "Loading transactions...".to_string(),
        FetchState::Success(transactions) => format!("{} transactions", transactions.len()),
        FetchState::Error(CoordinatorError::NoConnectivity) => "Offline: check your network connection and refresh".to_string(),
        FetchState::Error(error) => format!("Error: {error}")
    }
}

/// Redraws the rows whenever the visible list changes and the status line whenever the state changes.
///
/// The list and the state travel on separate channels, so each is only ever printed from its own.
/// Returns once either channel closes.
pub async fn render<R, S>(
    mut visible: watch::Receiver<Arc<[Transaction]>>,
    mut state: watch::Receiver<FetchState>,
    mut rows: R,
    mut status: S
) -> Result<()>
where
    R: Write,
    S: Write,
{
    loop {
        tokio::select! {
            changed = visible.changed() => {
                if changed.is_err() {
                    return Ok(());
                }

                let current = Arc::clone(&visible.borrow_and_update());
                write_transactions(&mut rows, &current)?;
            }
            changed = state.changed() => {
                if changed.is_err() {
                    return Ok(());
                }

                let current = state.borrow_and_update().clone();
                writeln!(status, "{}", describe_state(&current))?;
                status.flush()?;
            }
        }
    }
}
