use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapters::{de, BankResponse};
use crate::models::{Source, Transaction};

#[derive(Debug, Deserialize)]
pub struct BkoResponse {
    pub data: Vec<BkoTransaction>
}

//NOTE: Amounts are already signed, so `isDeposit` and the account block are not decoded.
#[derive(Debug, Deserialize)]
pub struct BkoTransaction {
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "de::decimal")]
    pub amount: Decimal,
    pub contact: BkoContact
}

#[derive(Debug, Deserialize)]
pub struct BkoContact {
    pub name: String
}

impl BankResponse for BkoResponse {
    const SOURCE: Source = Source::Bko;

    fn into_transactions(self) -> Vec<Transaction> {
        self.data.into_iter()
            .map(|transaction| Transaction::new(
                transaction.date,
                transaction.amount,
                transaction.contact.name,
                Vec::new(),
                Self::SOURCE
            ))
            .collect()
    }
}
