use crate::models::Transaction;

/// Committed text shorter than this (in characters) leaves the list unfiltered.
pub const MIN_SEARCH_LENGTH: usize = 3;

pub fn is_search_active(text: &str) -> bool {
    text.chars().count() >= MIN_SEARCH_LENGTH
}

/// Keeps the transactions whose description contains `text`, ignoring case.
///
/// Order is preserved. Text below [`MIN_SEARCH_LENGTH`] returns every transaction.
pub fn filter_transactions(transactions: &[Transaction], text: &str) -> Vec<Transaction> {
    if !is_search_active(text) {
        return transactions.to_vec();
    }

    let needle = text.to_lowercase();

    transactions.iter()
        .filter(|transaction| transaction.description().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
