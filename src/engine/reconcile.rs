//! Reconciliation of a validated draft into the existing trade collection.
//!
//! Given the family of records sharing the draft's trade id:
//! - empty family: accept as a brand-new trade
//! - version below the family max: reject as stale
//! - version already stored: ask for replacement confirmation
//! - otherwise: accept as a new version
//!
//! A confirmed replacement keeps the original `created_date`.

use crate::domain::{TradeId, TradeRecord, Version};
use crate::engine::store::TradeStore;
use crate::engine::validation::TradeDraft;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Rejection for a submission older than the current version of its trade.
///
/// The wording says "greater than or equal to" while the trigger is strict
/// `<`; equality routes to replacement confirmation instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Version must be greater than or equal to {max_version} for Trade Id {trade_id}.")]
pub struct VersionTooLow {
    pub trade_id: TradeId,
    pub max_version: Version,
}

/// A submission whose key is already stored, awaiting confirm or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReplacement {
    /// The record to store on confirmation, carrying the original created date.
    pub candidate: TradeRecord,
    /// The record currently stored under the same key.
    pub existing: TradeRecord,
}

impl PendingReplacement {
    /// The created date that survives the replacement.
    pub fn original_created_date(&self) -> DateTime<Utc> {
        self.existing.created_date
    }
}

/// Outcome of reconciling a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Insert as a new record.
    Accept(TradeRecord),
    /// Stale version; nothing changes.
    Reject(VersionTooLow),
    /// Same key exists; mutate only after explicit confirmation.
    ReplaceConfirmationRequired(PendingReplacement),
}

/// Decide how `draft` merges into `existing`. `now` becomes the created date
/// of accepted records.
pub fn reconcile(existing: &[TradeRecord], draft: &TradeDraft, now: DateTime<Utc>) -> Verdict {
    let family: Vec<&TradeRecord> = existing
        .iter()
        .filter(|r| r.trade_id == draft.trade_id)
        .collect();

    let Some(max_version) = family.iter().map(|r| r.version).max() else {
        return Verdict::Accept(draft.clone().into_record(now));
    };

    if draft.version < max_version {
        return Verdict::Reject(VersionTooLow {
            trade_id: draft.trade_id,
            max_version,
        });
    }

    if let Some(conflict) = family.iter().find(|r| r.version == draft.version) {
        return Verdict::ReplaceConfirmationRequired(PendingReplacement {
            candidate: draft.clone().into_record(conflict.created_date),
            existing: (*conflict).clone(),
        });
    }

    Verdict::Accept(draft.clone().into_record(now))
}

/// Apply a verdict to a store. Only `Accept` changes anything.
pub fn apply(store: &TradeStore, verdict: &Verdict) -> TradeStore {
    match verdict {
        Verdict::Accept(record) => store.upsert(record.clone()),
        Verdict::Reject(_) | Verdict::ReplaceConfirmationRequired(_) => store.clone(),
    }
}

/// Commit a confirmed replacement.
pub fn confirm(store: &TradeStore, pending: &PendingReplacement) -> TradeStore {
    store.upsert(pending.candidate.clone())
}
