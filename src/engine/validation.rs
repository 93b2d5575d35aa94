//! Per-field validation of a submitted trade form.
//!
//! Pure and synchronous. The only time dependency is the maturity check,
//! which takes "today" as an explicit argument.

use crate::domain::display::parse_timestamp;
use crate::domain::{
    BookId, CounterPartyId, InvalidEnumError, TradeId, TradeKey, TradeRecord, Version,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Raw values as entered in the trade form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    /// `None` when the field is blank. Numeric inputs may carry fractions.
    pub trade_id: Option<f64>,
    pub version: Option<f64>,
    pub counter_party_id: String,
    pub book_id: String,
    pub maturity_date: String,
}

impl TradeInput {
    /// Defaults of the create form: blank trade id, version 1, first options, today.
    pub fn defaults(today: NaiveDate) -> Self {
        TradeInput {
            trade_id: None,
            version: Some(1.0),
            counter_party_id: CounterPartyId::Cp1.to_string(),
            book_id: BookId::B1.to_string(),
            maturity_date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Prefill the edit form from a stored record.
    pub fn from_record(record: &TradeRecord) -> Self {
        TradeInput {
            trade_id: Some(record.trade_id.as_u64() as f64),
            version: Some(record.version.as_u64() as f64),
            counter_party_id: record.counter_party_id.to_string(),
            book_id: record.book_id.to_string(),
            maturity_date: record.maturity_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Form fields that can carry a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    TradeId,
    Version,
    CounterPartyId,
    BookId,
    MaturityDate,
}

impl Field {
    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::TradeId => "tradeId",
            Field::Version => "version",
            Field::CounterPartyId => "counterPartyId",
            Field::BookId => "bookId",
            Field::MaturityDate => "maturityDate",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::TradeId => "Trade Id",
            Field::Version => "Version",
            Field::CounterPartyId => "Counter Party",
            Field::BookId => "Book Id",
            Field::MaturityDate => "Maturity Date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field-level violation. Display is the helper text shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldViolation {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("{} must be an integer", .0.label())]
    NotInteger(Field),
    #[error("{} must be positive", .0.label())]
    NotPositive(Field),
    #[error("Invalid {}: {}", .0.kind, .0.value)]
    InvalidEnum(InvalidEnumError),
    #[error("Maturity Date must be a valid date")]
    InvalidDate,
    #[error("Maturity Date cannot be earlier than today")]
    PastMaturityDate,
}

/// Every violation of a submission, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<Field, FieldViolation>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&FieldViolation> {
        self.0.get(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldViolation)> {
        self.0.iter().map(|(field, violation)| (*field, violation))
    }

    /// Field name to helper text, as rendered by the form.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, violation)| (field.name(), violation.to_string()))
            .collect()
    }

    fn insert(&mut self, field: Field, violation: FieldViolation) {
        self.0.entry(field).or_insert(violation);
    }
}

/// A validated, normalized submission. Has no created date yet: that is
/// decided by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDraft {
    pub trade_id: TradeId,
    pub version: Version,
    pub counter_party_id: CounterPartyId,
    pub book_id: BookId,
    pub maturity_date: DateTime<Utc>,
}

impl TradeDraft {
    pub fn key(&self) -> TradeKey {
        TradeKey::new(self.trade_id, self.version)
    }

    /// Materialize the draft with the given created date.
    pub fn into_record(self, created_date: DateTime<Utc>) -> TradeRecord {
        TradeRecord::new(
            self.trade_id,
            self.version,
            self.counter_party_id,
            self.book_id,
            self.maturity_date,
            created_date,
        )
    }
}

/// True when `value` parses as a date on or after `today`.
pub fn is_valid_maturity_date(value: &str, today: NaiveDate) -> bool {
    parse_timestamp(value).is_some_and(|ts| ts.date_naive() >= today)
}

/// Validate a form submission against `today`.
pub fn validate(input: &TradeInput, today: NaiveDate) -> Result<TradeDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let trade_id = positive(input.trade_id, Field::TradeId, &mut errors)
        .and_then(|n| TradeId::new(n).ok());
    let version =
        positive(input.version, Field::Version, &mut errors).and_then(|n| Version::new(n).ok());

    let counter_party_id = input
        .counter_party_id
        .parse::<CounterPartyId>()
        .map_err(|e| errors.insert(Field::CounterPartyId, FieldViolation::InvalidEnum(e)))
        .ok();
    let book_id = input
        .book_id
        .parse::<BookId>()
        .map_err(|e| errors.insert(Field::BookId, FieldViolation::InvalidEnum(e)))
        .ok();

    let maturity_date = maturity(&input.maturity_date, today, &mut errors);

    match (trade_id, version, counter_party_id, book_id, maturity_date) {
        (Some(trade_id), Some(version), Some(counter_party_id), Some(book_id), Some(maturity_date))
            if errors.is_empty() =>
        {
            Ok(TradeDraft {
                trade_id,
                version,
                counter_party_id,
                book_id,
                maturity_date,
            })
        }
        _ => Err(errors),
    }
}

/// [`validate`] against the UTC calendar date of `now`.
pub fn validate_at(input: &TradeInput, now: DateTime<Utc>) -> Result<TradeDraft, FieldErrors> {
    validate(input, now.date_naive())
}

fn positive(value: Option<f64>, field: Field, errors: &mut FieldErrors) -> Option<u64> {
    match value {
        None => {
            errors.insert(field, FieldViolation::Required(field));
            None
        }
        Some(n) if !n.is_finite() || n.fract() != 0.0 || n > u64::MAX as f64 => {
            errors.insert(field, FieldViolation::NotInteger(field));
            None
        }
        Some(n) if n <= 0.0 => {
            errors.insert(field, FieldViolation::NotPositive(field));
            None
        }
        Some(n) => Some(n as u64),
    }
}

fn maturity(value: &str, today: NaiveDate, errors: &mut FieldErrors) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        errors.insert(
            Field::MaturityDate,
            FieldViolation::Required(Field::MaturityDate),
        );
        return None;
    }
    let Some(ts) = parse_timestamp(value) else {
        errors.insert(Field::MaturityDate, FieldViolation::InvalidDate);
        return None;
    };
    if ts.date_naive() < today {
        errors.insert(Field::MaturityDate, FieldViolation::PastMaturityDate);
        return None;
    }
    Some(ts)
}
