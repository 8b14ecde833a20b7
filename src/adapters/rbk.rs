use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapters::{de, directed_amount, BankResponse};
use crate::models::{Source, Transaction};

#[derive(Debug, Deserialize)]
pub struct RbkResponse {
    pub data: Vec<RbkTransaction>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RbkTransaction {
    pub description: String,
    #[serde(deserialize_with = "de::decimal")]
    pub transaction_amount: Decimal,
    //NOTE: Only checked; every supported currency is carried through unconverted.
    #[serde(rename = "currency")]
    pub _currency: RbkCurrency,
    pub is_withdrawal: bool,
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RbkCurrency {
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "USD")]
    Usd
}

impl BankResponse for RbkResponse {
    const SOURCE: Source = Source::Rbk;

    fn into_transactions(self) -> Vec<Transaction> {
        self.data.into_iter()
            .map(|transaction| Transaction::new(
                transaction.date,
                directed_amount(transaction.transaction_amount, transaction.is_withdrawal),
                transaction.description,
                Vec::new(),
                Self::SOURCE
            ))
            .collect()
    }
}
