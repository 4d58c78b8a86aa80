//! The JSON payloads returned by the transactions API.

use serde::{Deserialize, Deserializer, de::Error as _};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{
        BorrowedFormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

const DATE_ONLY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Outcome,
}

/// The category a transaction was filed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// The display name of the category.
    pub title: String,
}

/// A single income or outcome event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// Unique within one listing.
    pub id: String,
    /// A short description of the transaction.
    pub title: String,
    /// The non-negative amount of money. The sign is given by `kind`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub value: f64,
    /// Whether the amount was received or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The category of the transaction.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: OffsetDateTime,
}

/// The aggregate totals that accompany a listing.
///
/// Computed by the API, fields may be missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Balance {
    /// The sum of all income.
    pub income: Option<f64>,
    /// The sum of all outcome.
    pub outcome: Option<f64>,
    /// Income minus outcome.
    pub total: Option<f64>,
}

/// The body of `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionsResponse {
    /// The aggregate totals.
    #[serde(default)]
    pub balance: Balance,
    /// Every transaction, in the order the API listed them.
    pub transactions: Vec<Transaction>,
}

/// Parse an ISO 8601 timestamp as sent by the API.
///
/// Accepts RFC 3339 date-times, date-times without an offset and bare dates.
/// Timestamps without an offset are assumed to be UTC, dates are read as
/// midnight UTC.
pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(timestamp);
    }

    if let Ok(timestamp) = PrimitiveDateTime::parse(text, &Iso8601::DEFAULT) {
        return Ok(timestamp.assume_utc());
    }

    Date::parse(text, DATE_ONLY_FORMAT).map(|date| date.midnight().assume_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_timestamp(&text)
        .map_err(|error| D::Error::custom(format!("invalid timestamp \"{text}\": {error}")))
}

/// Some back-ends serialise decimal columns as strings, so both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Amount::deserialize(deserializer)? {
        Amount::Number(number) => Ok(number),
        Amount::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid amount \"{text}\""))),
    }
}
