//! Stable display ordering for trade records.

use crate::domain::{TradeId, TradeRecord, Version};
use std::cmp::{Ordering, Reverse};

/// Display ordering key for trades.
///
/// Ordering: trade_id ascending -> version descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TradeOrderingKey {
    /// Family (primary sort, ascending).
    pub trade_id: TradeId,
    /// Version (secondary sort, descending).
    pub version: Reverse<Version>,
}

impl TradeOrderingKey {
    /// Create an ordering key from a record.
    pub fn from_trade(trade: &TradeRecord) -> Self {
        TradeOrderingKey {
            trade_id: trade.trade_id,
            version: Reverse(trade.version),
        }
    }

    /// Compare two trades by display order.
    pub fn compare(a: &TradeRecord, b: &TradeRecord) -> Ordering {
        Self::from_trade(a).cmp(&Self::from_trade(b))
    }
}

/// Sort trades for display. Stable: ties keep their input order.
pub fn sort_trades(trades: &mut [TradeRecord]) {
    trades.sort_by(TradeOrderingKey::compare);
}
