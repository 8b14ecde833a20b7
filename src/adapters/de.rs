use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Accepts an ISO date or an ISO date-time and keeps the calendar date as written.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date(&value).map_err(de::Error::custom)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.date_naive());
    }

    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| date_time.date())
        .ok_or_else(|| format!("Value is not an ISO date or date-time: '{value}'"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number)
}

/// Amounts arrive either as JSON strings or JSON numbers; both are parsed exactly.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match RawAmount::deserialize(deserializer)? {
        RawAmount::Text(text) => text,
        RawAmount::Number(number) => number.to_string()
    };

    parse_decimal(&text).map_err(de::Error::custom)
}

pub fn parse_decimal(value: &str) -> Result<Decimal, String> {
    let value = value.trim();

    if value.is_empty() {
        return Err("Amount is an empty string".to_string());
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|error| format!("Amount '{value}' is not a decimal: {error}"))
}
