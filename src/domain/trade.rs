//! Trade record: one stored version of a trade.

use crate::domain::{BookId, CounterPartyId, TradeId, TradeKey, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored version of a trade, unique by `(trade_id, version)`.
///
/// `expired` is not stored; it is derived at read time, see
/// [`crate::domain::display::Expiration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Family identifier.
    pub trade_id: TradeId,
    /// Version within the family.
    pub version: Version,
    pub counter_party_id: CounterPartyId,
    pub book_id: BookId,
    /// Maturity; only the calendar date matters for validation.
    pub maturity_date: DateTime<Utc>,
    /// Set when the key is first created and preserved across replacements.
    pub created_date: DateTime<Utc>,
}

impl TradeRecord {
    /// Create a new TradeRecord.
    pub fn new(
        trade_id: TradeId,
        version: Version,
        counter_party_id: CounterPartyId,
        book_id: BookId,
        maturity_date: DateTime<Utc>,
        created_date: DateTime<Utc>,
    ) -> Self {
        TradeRecord {
            trade_id,
            version,
            counter_party_id,
            book_id,
            maturity_date,
            created_date,
        }
    }

    /// The unique key of this record.
    pub fn key(&self) -> TradeKey {
        TradeKey::new(self.trade_id, self.version)
    }

    /// True when the maturity date is strictly before `reference`.
    pub fn is_expired_at(&self, reference: DateTime<Utc>) -> bool {
        self.maturity_date < reference
    }
}
