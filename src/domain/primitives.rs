//! Domain primitives: TradeId, Version, TradeKey, CounterPartyId, BookId.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for identifiers that must be strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} must be a positive integer")]
pub struct NonPositiveError(pub &'static str);

/// Trade identifier. Not unique on its own: it names a family of versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TradeId(u64);

impl TradeId {
    /// Create a TradeId, rejecting zero.
    pub fn new(id: u64) -> Result<Self, NonPositiveError> {
        if id == 0 {
            return Err(NonPositiveError("tradeId"));
        }
        Ok(TradeId(id))
    }

    /// Get the underlying integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TradeId {
    type Error = NonPositiveError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        TradeId::new(value)
    }
}

impl From<TradeId> for u64 {
    fn from(id: TradeId) -> Self {
        id.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version of a trade within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Version(u64);

impl Version {
    /// The first version of any trade.
    pub const FIRST: Version = Version(1);

    /// Create a Version, rejecting zero.
    pub fn new(version: u64) -> Result<Self, NonPositiveError> {
        if version == 0 {
            return Err(NonPositiveError("version"));
        }
        Ok(Version(version))
    }

    /// Get the underlying integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The version immediately after this one.
    pub fn next(&self) -> Version {
        Version(self.0.saturating_add(1))
    }
}

impl TryFrom<u64> for Version {
    type Error = NonPositiveError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Version::new(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique key of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeKey {
    pub trade_id: TradeId,
    pub version: Version,
}

impl TradeKey {
    pub fn new(trade_id: TradeId, version: Version) -> Self {
        TradeKey { trade_id, version }
    }
}

impl fmt::Display for TradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.trade_id, self.version)
    }
}

/// A string that is not a member of a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct InvalidEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Counter-party, one of `CP-1` through `CP-5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CounterPartyId {
    #[serde(rename = "CP-1")]
    Cp1,
    #[serde(rename = "CP-2")]
    Cp2,
    #[serde(rename = "CP-3")]
    Cp3,
    #[serde(rename = "CP-4")]
    Cp4,
    #[serde(rename = "CP-5")]
    Cp5,
}

impl CounterPartyId {
    /// Every counter-party, in display order.
    pub const ALL: [CounterPartyId; 5] = [
        CounterPartyId::Cp1,
        CounterPartyId::Cp2,
        CounterPartyId::Cp3,
        CounterPartyId::Cp4,
        CounterPartyId::Cp5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CounterPartyId::Cp1 => "CP-1",
            CounterPartyId::Cp2 => "CP-2",
            CounterPartyId::Cp3 => "CP-3",
            CounterPartyId::Cp4 => "CP-4",
            CounterPartyId::Cp5 => "CP-5",
        }
    }
}

impl FromStr for CounterPartyId {
    type Err = InvalidEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterPartyId::ALL
            .into_iter()
            .find(|cp| cp.as_str() == s)
            .ok_or_else(|| InvalidEnumError {
                kind: "Counter Party",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for CounterPartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Book, one of `B1` through `B5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookId {
    B1,
    B2,
    B3,
    B4,
    B5,
}

impl BookId {
    /// Every book, in display order.
    pub const ALL: [BookId; 5] = [BookId::B1, BookId::B2, BookId::B3, BookId::B4, BookId::B5];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookId::B1 => "B1",
            BookId::B2 => "B2",
            BookId::B3 => "B3",
            BookId::B4 => "B4",
            BookId::B5 => "B5",
        }
    }
}

impl FromStr for BookId {
    type Err = InvalidEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookId::ALL
            .into_iter()
            .find(|book| book.as_str() == s)
            .ok_or_else(|| InvalidEnumError {
                kind: "Book Id",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
