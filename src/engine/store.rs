//! Immutable snapshot of the trade collection.

use crate::domain::{sort_trades, TradeId, TradeKey, TradeRecord, Version};
use std::collections::HashSet;
use std::sync::Arc;

/// An immutable, cheaply clonable snapshot of trade records.
///
/// Keys `(trade_id, version)` are unique. Mutation returns a new snapshot
/// and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeStore {
    records: Arc<[TradeRecord]>,
}

impl TradeStore {
    /// Build a store from source records. Later duplicates of a key are dropped.
    pub fn new(records: Vec<TradeRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());
        for record in records {
            let key = record.key();
            if seen.insert(key) {
                unique.push(record);
            } else {
                tracing::warn!(key = %key, "Dropping duplicate trade key from source");
            }
        }
        TradeStore {
            records: unique.into(),
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: TradeKey) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// All stored versions of one trade.
    pub fn family(&self, trade_id: TradeId) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter(move |r| r.trade_id == trade_id)
    }

    /// Highest stored version of a trade, if any.
    pub fn max_version(&self, trade_id: TradeId) -> Option<Version> {
        self.family(trade_id).map(|r| r.version).max()
    }

    /// Set-upsert keyed by `(trade_id, version)`: drop the existing record
    /// with that key, then append `record`.
    pub fn upsert(&self, record: TradeRecord) -> TradeStore {
        let key = record.key();
        let mut next: Vec<TradeRecord> = Vec::with_capacity(self.records.len() + 1);
        next.extend(self.records.iter().filter(|r| r.key() != key).cloned());
        next.push(record);
        TradeStore {
            records: next.into(),
        }
    }

    /// Records in display order.
    pub fn sorted(&self) -> Vec<TradeRecord> {
        let mut records = self.records.to_vec();
        sort_trades(&mut records);
        records
    }
}

impl Default for TradeStore {
    fn default() -> Self {
        TradeStore {
            records: Arc::from(Vec::new()),
        }
    }
}

impl From<Vec<TradeRecord>> for TradeStore {
    fn from(records: Vec<TradeRecord>) -> Self {
        TradeStore::new(records)
    }
}
