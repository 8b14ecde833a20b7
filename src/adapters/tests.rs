use super::de::{parse_date, parse_decimal};
use super::{decode, sort_newest_first};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crate::models::{FetchError, Source, Transaction};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}

fn decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

#[test]
fn test_dates_accept_iso_date_and_date_time() -> Result<()> {
    let expected = date(2024, 1, 5)?;

    assert_eq!(parse_date("2024-01-05").map_err(anyhow::Error::msg)?, expected);
    assert_eq!(parse_date("2024-01-05T23:10:00Z").map_err(anyhow::Error::msg)?, expected);
    assert_eq!(parse_date("2024-01-05T23:10:00-05:00").map_err(anyhow::Error::msg)?, expected);
    assert_eq!(parse_date("2024-01-05T08:30:15.250").map_err(anyhow::Error::msg)?, expected);
    assert_eq!(parse_date("2024-01-05T08:30").map_err(anyhow::Error::msg)?, expected);

    assert!(parse_date("05/01/2024").is_err());
    assert!(parse_date("").is_err());

    Ok(())
}

#[test]
fn test_amounts_parse_exactly_from_text_and_numbers() -> Result<()> {
    assert_eq!(parse_decimal("12.34").map_err(anyhow::Error::msg)?, decimal("12.34")?);
    assert_eq!(parse_decimal(" -0.10 ").map_err(anyhow::Error::msg)?, decimal("-0.10")?);
    assert_eq!(parse_decimal("1.5e2").map_err(anyhow::Error::msg)?, decimal("150")?);

    assert!(parse_decimal("").is_err());
    assert!(parse_decimal("ten").is_err());

    Ok(())
}

#[test]
fn test_bko_keeps_reported_sign_and_uses_contact_name() -> Result<()> {
    let body = json!({
        "data": [
            {
                "date": "2024-02-01",
                "amount": "-42.10",
                "contact": { "contactId": "c-1", "name": "Grocery Mart" },
                "account": { "accountId": "a-1", "name": "Everyday", "type": "chequing" },
                "isDeposit": false,
                "note": null
            },
            {
                "date": "2024-02-03T09:00:00Z",
                "amount": 1500,
                "contact": { "contactId": "c-2", "name": "Employer Inc" },
                "account": { "accountId": "a-1", "name": "Everyday", "type": "savings" },
                "isDeposit": true
            }
        ]
    });

    let transactions = decode(Source::Bko, &serde_json::to_vec(&body)?)?;

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].description(), "Employer Inc");
    assert_eq!(transactions[0].value(), decimal("1500")?);
    assert_eq!(transactions[0].date(), date(2024, 2, 3)?);
    assert_eq!(transactions[1].description(), "Grocery Mart");
    assert_eq!(transactions[1].value(), decimal("-42.10")?);
    assert!(transactions.iter().all(|transaction| transaction.source() == Source::Bko));
    assert!(transactions.iter().all(|transaction| transaction.tags().is_empty()));

    Ok(())
}

#[test]
fn test_kibk_carries_categories_as_tags() -> Result<()> {
    let body = json!({
        "data": [
            {
                "date": "2024-02-10",
                "amount": "-8.75",
                "transactionId": "t-1",
                "details": "Corner Cafe",
                "category": ["food", "coffee"],
                "accountNumber": "0001"
            }
        ]
    });

    let transactions = decode(Source::Kibk, &serde_json::to_vec(&body)?)?;

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description(), "Corner Cafe");
    assert_eq!(transactions[0].value(), decimal("-8.75")?);
    assert_eq!(transactions[0].tags(), ["food".to_string(), "coffee".to_string()]);

    Ok(())
}

#[test]
fn test_rbk_withdrawals_become_debits() -> Result<()> {
    let body = json!({
        "data": [
            {
                "transactionId": "r-1",
                "description": "Hydro Bill",
                "transactionAmount": "120.00",
                "currency": "CAD",
                "isWithdrawal": true,
                "date": "2024-01-20",
                "accountId": "acc"
            },
            {
                "transactionId": "r-2",
                "description": "Tax Refund",
                "transactionAmount": "-310.55",
                "currency": "USD",
                "isWithdrawal": false,
                "date": "2024-01-18",
                "accountId": "acc"
            }
        ]
    });

    let transactions = decode(Source::Rbk, &serde_json::to_vec(&body)?)?;

    assert_eq!(transactions[0].description(), "Hydro Bill");
    assert_eq!(transactions[0].value(), decimal("-120.00")?);
    assert_eq!(transactions[1].description(), "Tax Refund");
    assert_eq!(transactions[1].value(), decimal("310.55")?);

    Ok(())
}

#[test]
fn test_kd_describes_by_counterparty_and_signs_by_type() -> Result<()> {
    let body = json!({
        "data": [
            {
                "id": "k-1",
                "transactionTime": "2024-03-02T14:00:00Z",
                "amount": { "amount": "60.00", "currency": "CAD" },
                "from": { "id": "me", "name": "My Account" },
                "to": { "id": "shop", "name": "Book Shop" },
                "type": "withdrawal",
                "tags": ["books"]
            },
            {
                "id": "k-2",
                "transactionTime": "2024-03-01",
                "amount": { "amount": 25, "currency": "CAD" },
                "from": { "id": "friend", "name": "Alex" },
                "to": { "id": "me", "name": "My Account" },
                "type": "deposit"
            }
        ]
    });

    let transactions = decode(Source::Kd, &serde_json::to_vec(&body)?)?;

    assert_eq!(transactions[0].description(), "Book Shop");
    assert_eq!(transactions[0].value(), decimal("-60.00")?);
    assert_eq!(transactions[0].tags(), ["books".to_string()]);
    assert_eq!(transactions[1].description(), "Alex");
    assert_eq!(transactions[1].value(), decimal("25")?);
    assert!(transactions[1].tags().is_empty());

    Ok(())
}

#[test]
fn test_malformed_documents_fail_with_decode_error() {
    let missing_data = decode(Source::Kibk, br#"{"items": []}"#);
    let unknown_currency = decode(Source::Rbk, br#"{"data": [{
        "transactionId": "r-1", "description": "x", "transactionAmount": "1",
        "currency": "EUR", "isWithdrawal": true, "date": "2024-01-01", "accountId": "a"
    }]}"#);
    let not_json = decode(Source::Bko, b"<html>503</html>");

    assert!(matches!(missing_data, Err(FetchError::Decode { bank: Source::Kibk, .. })));
    assert!(matches!(unknown_currency, Err(FetchError::Decode { bank: Source::Rbk, .. })));
    assert!(matches!(not_json, Err(FetchError::Decode { bank: Source::Bko, .. })));
}

#[test]
fn test_only_mapped_fields_are_required() -> Result<()> {
    let bko = decode(Source::Bko, br#"{"data": [
        {"date": "2024-02-02", "amount": "-8.00", "contact": {"name": "Cinema"}}
    ]}"#)?;
    let rbk = decode(Source::Rbk, br#"{"data": [
        {"description": "Ferry", "transactionAmount": "15", "currency": "USD", "isWithdrawal": true, "date": "2024-02-03"}
    ]}"#)?;
    let rbk_without_currency = decode(Source::Rbk, br#"{"data": [
        {"description": "Ferry", "transactionAmount": "15", "isWithdrawal": true, "date": "2024-02-03"}
    ]}"#);

    assert_eq!(bko[0].description(), "Cinema");
    assert_eq!(rbk[0].value(), decimal("-15")?);
    assert!(matches!(rbk_without_currency, Err(FetchError::Decode { bank: Source::Rbk, .. })));

    Ok(())
}

#[test]
fn test_empty_feed_decodes_to_empty_list() -> Result<()> {
    assert!(decode(Source::Kd, br#"{"data": []}"#)?.is_empty());

    Ok(())
}

#[test]
fn test_sorting_is_newest_first_and_stable() -> Result<()> {
    let transactions = vec![
        Transaction::new(date(2024, 1, 1)?, decimal("1")?, "first old", vec![], Source::Kibk),
        Transaction::new(date(2024, 1, 9)?, decimal("2")?, "first new", vec![], Source::Kibk),
        Transaction::new(date(2024, 1, 1)?, decimal("3")?, "second old", vec![], Source::Kibk),
        Transaction::new(date(2024, 1, 9)?, decimal("4")?, "second new", vec![], Source::Kibk),
    ];

    let sorted = sort_newest_first(transactions);
    let descriptions: Vec<_> = sorted.iter().map(Transaction::description).collect();

    assert_eq!(descriptions, ["first new", "second new", "first old", "second old"]);

    Ok(())
}
