use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapters::{de, BankResponse};
use crate::models::{Source, Transaction};

#[derive(Debug, Deserialize)]
pub struct KibkResponse {
    pub data: Vec<KibkTransaction>
}

#[derive(Debug, Deserialize)]
pub struct KibkTransaction {
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "de::decimal")]
    pub amount: Decimal,
    pub details: String,
    pub category: Vec<String>
}

impl BankResponse for KibkResponse {
    const SOURCE: Source = Source::Kibk;

    fn into_transactions(self) -> Vec<Transaction> {
        self.data.into_iter()
            .map(|transaction| Transaction::new(
                transaction.date,
                transaction.amount,
                transaction.details,
                transaction.category,
                Self::SOURCE
            ))
            .collect()
    }
}
