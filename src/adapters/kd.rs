use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapters::{de, directed_amount, BankResponse};
use crate::models::{Source, Transaction};

#[derive(Debug, Deserialize)]
pub struct KdResponse {
    pub data: Vec<KdTransaction>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdTransaction {
    #[serde(deserialize_with = "de::date")]
    pub transaction_time: NaiveDate,
    pub amount: KdAmount,
    pub from: KdParty,
    pub to: KdParty,
    #[serde(rename = "type")]
    pub transaction_type: KdTransactionType,
    #[serde(default)]
    pub tags: Option<Vec<String>>
}

#[derive(Debug, Deserialize)]
pub struct KdAmount {
    #[serde(deserialize_with = "de::decimal")]
    pub amount: Decimal
}

#[derive(Debug, Deserialize)]
pub struct KdParty {
    pub name: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdTransactionType {
    Withdrawal,
    Deposit
}

impl BankResponse for KdResponse {
    const SOURCE: Source = Source::Kd;

    /// Withdrawals are described by who received the money, deposits by who sent it.
    fn into_transactions(self) -> Vec<Transaction> {
        self.data.into_iter()
            .map(|transaction| {
                let is_withdrawal = transaction.transaction_type == KdTransactionType::Withdrawal;
                let counterparty = if is_withdrawal { transaction.to } else { transaction.from };

                Transaction::new(
                    transaction.transaction_time,
                    directed_amount(transaction.amount.amount, is_withdrawal),
                    counterparty.name,
                    transaction.tags.unwrap_or_default(),
                    Self::SOURCE
                )
            })
            .collect()
    }
}
