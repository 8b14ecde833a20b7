use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Source;

/// A transaction normalized from any of the bank feeds.
///
/// The sign of `value` is already normalized by the adapter that produced it:
/// negative is a debit, positive is a credit, whatever the bank reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    value: Decimal,
    description: String,
    tags: Vec<String>,
    source: Source
}

impl Transaction {
    pub fn new(date: NaiveDate, value: Decimal, description: impl Into<String>, tags: Vec<String>, source: Source) -> Self {
        Self {
            date,
            value,
            description: description.into(),
            tags,
            source
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_debit(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }
}
