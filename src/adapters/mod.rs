//! Wire schemas of the bank feeds and their mapping into [`Transaction`].
//!
//! Every bank publishes `{ "data": [...] }` with its own record shape and sign
//! convention. Each schema is decoded into its own type and mapped by a pure
//! function; nothing downstream sees the bank specific shapes.

mod bko;
mod de;
mod kd;
mod kibk;
mod rbk;
#[cfg(test)]
mod tests;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::models::{FetchError, Source, Transaction};

pub use bko::BkoResponse;
pub use kd::KdResponse;
pub use kibk::KibkResponse;
pub use rbk::RbkResponse;

/// A decoded bank document that can be normalized into transactions.
pub trait BankResponse: DeserializeOwned {
    const SOURCE: Source;

    fn into_transactions(self) -> Vec<Transaction>;
}

/// Decodes a raw feed document for `source` into transactions, newest first.
pub fn decode(source: Source, body: &[u8]) -> Result<Vec<Transaction>, FetchError> {
    let transactions = match source {
        Source::Bko => parse::<BkoResponse>(body),
        Source::Kibk => parse::<KibkResponse>(body),
        Source::Rbk => parse::<RbkResponse>(body),
        Source::Kd => parse::<KdResponse>(body)
    }.map_err(|error| FetchError::decode(source, error))?;

    Ok(sort_newest_first(transactions))
}

fn parse<R: BankResponse>(body: &[u8]) -> serde_json::Result<Vec<Transaction>> {
    serde_json::from_slice::<R>(body).map(R::into_transactions)
}

/// Stable sort, so same-day records keep the order the bank listed them in.
pub fn sort_newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|left, right| right.date().cmp(&left.date()));
    transactions
}

/// Banks that flag direction separately report magnitudes with arbitrary sign.
fn directed_amount(amount: Decimal, is_debit: bool) -> Decimal {
    if is_debit {
        -amount.abs()
    } else {
        amount.abs()
    }
}
