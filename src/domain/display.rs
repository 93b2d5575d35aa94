//! Display derivation: formatted ids and dates, expiration status, table rows.

use crate::domain::{TradeId, TradeRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Page sizes offered by the trade table.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

/// Default page size of the trade table.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// `T-{id}`.
pub fn format_trade_id(id: TradeId) -> String {
    format!("T-{}", id)
}

/// Parse an ISO-8601 timestamp (offset-less ones read as UTC) or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Day/month/year (en-GB) rendering of a typed timestamp, in UTC.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Format a raw date string for display.
///
/// Absent or empty input formats to `""`; unparsable input is returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
    match value {
        None | Some("") => String::new(),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => format_timestamp(ts),
            None => raw.to_string(),
        },
    }
}

/// Derived expiration flag of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expiration {
    Active,
    Expired,
}

impl Expiration {
    /// Expired iff `maturity < reference`; equality is still active.
    pub fn at(maturity: DateTime<Utc>, reference: DateTime<Utc>) -> Self {
        if maturity < reference {
            Expiration::Expired
        } else {
            Expiration::Active
        }
    }

    /// `"Y"` or `"N"`, as shown in the Expired column.
    pub fn flag(&self) -> &'static str {
        match self {
            Expiration::Expired => "Y",
            Expiration::Active => "N",
        }
    }

    /// Status chip text.
    pub fn label(&self) -> &'static str {
        match self {
            Expiration::Expired => "Expired",
            Expiration::Active => "Active",
        }
    }
}

/// Expiration flag of a raw maturity string. Absent or unparsable yields `"N"`.
pub fn expiration_status(maturity_date: Option<&str>, reference: DateTime<Utc>) -> &'static str {
    maturity_date
        .and_then(parse_timestamp)
        .map(|maturity| Expiration::at(maturity, reference))
        .unwrap_or(Expiration::Active)
        .flag()
}

/// One row of the trade table, fully formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRow {
    /// Row identity, `{tradeId}-{version}`.
    pub id: String,
    pub trade_id: String,
    pub version: u64,
    pub counter_party_id: String,
    pub book_id: String,
    pub maturity_date: String,
    pub created_date: String,
    pub expired: String,
    pub status: String,
}

impl TradeRow {
    /// Derive a row from a record against `reference`.
    pub fn from_trade(trade: &TradeRecord, reference: DateTime<Utc>) -> Self {
        let expiration = Expiration::at(trade.maturity_date, reference);
        TradeRow {
            id: trade.key().to_string(),
            trade_id: format_trade_id(trade.trade_id),
            version: trade.version.as_u64(),
            counter_party_id: trade.counter_party_id.to_string(),
            book_id: trade.book_id.to_string(),
            maturity_date: format_timestamp(trade.maturity_date),
            created_date: format_timestamp(trade.created_date),
            expired: expiration.flag().to_string(),
            status: expiration.label().to_string(),
        }
    }
}

/// Client-side page slice. `page` is zero-based; out-of-range pages are empty.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}
