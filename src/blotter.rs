//! Blotter session: the single owner of the trade collection and of the
//! create/edit form, general error banner, and replacement confirmation.
//!
//! A presentation layer drives it from UI events and renders its state.
//! Every mutation goes through validation and reconciliation; the store is
//! only swapped for a new snapshot on accept or confirmed replacement.

use crate::datasource::{RecordSource, RecordSourceError};
use crate::domain::display::{paginate, TradeRow};
use crate::domain::{TradeKey, TradeRecord};
use crate::engine::{
    confirm, reconcile, validate_at, FieldErrors, PendingReplacement, TradeInput, TradeStore,
    Verdict, VersionTooLow,
};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

/// Whether the form creates a trade or edits an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TradeKey),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Trade",
            FormMode::Edit(_) => "Edit Trade",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Save",
        }
    }
}

/// State of the open trade form.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeForm {
    pub mode: FormMode,
    /// Last entered values; kept across rejections and cancelled replacements.
    pub input: TradeInput,
    /// Inline helper texts.
    pub field_errors: FieldErrors,
    /// Banner for reconciliation rejections.
    pub general_error: Option<String>,
}

impl TradeForm {
    fn new(mode: FormMode, input: TradeInput) -> Self {
        Self {
            mode,
            input,
            field_errors: FieldErrors::default(),
            general_error: None,
        }
    }
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Field errors; nothing changed and the form stays open.
    Invalid(FieldErrors),
    /// Stored as a new record; the form closed.
    Accepted(TradeRecord),
    /// Stale version; banner set, form stays open and populated.
    Rejected(VersionTooLow),
    /// Key already stored; waiting for [`Blotter::confirm_replace`] or
    /// [`Blotter::cancel_replace`].
    ConfirmationRequired(PendingReplacement),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlotterError {
    #[error("No trade form is open")]
    NoOpenForm,
    #[error("No replacement is awaiting confirmation")]
    NoPendingReplacement,
    #[error("Trade {0} not found")]
    UnknownTrade(TradeKey),
}

/// Single-owner session state. Not shared across threads; no locking.
#[derive(Debug, Clone, Default)]
pub struct Blotter {
    store: TradeStore,
    loading: bool,
    form: Option<TradeForm>,
    pending: Option<PendingReplacement>,
}

impl Blotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot instead of a record source.
    pub fn with_store(store: TradeStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &TradeStore {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> Option<&TradeForm> {
        self.form.as_ref()
    }

    pub fn pending_replacement(&self) -> Option<&PendingReplacement> {
        self.pending.as_ref()
    }

    /// Initial fetch. A failure leaves the collection empty; no retry.
    pub async fn load(&mut self, source: &dyn RecordSource) -> Result<usize, RecordSourceError> {
        self.loading = true;
        let result = source.fetch_trades().await;
        self.loading = false;

        match result {
            Ok(records) => {
                self.store = TradeStore::new(records);
                info!("Loaded {} trades", self.store.len());
                Ok(self.store.len())
            }
            Err(e) => {
                warn!("Failed to load trades: {}", e);
                self.store = TradeStore::default();
                Err(e)
            }
        }
    }

    /// Open the form with create defaults.
    pub fn open_create(&mut self, today: NaiveDate) {
        self.pending = None;
        self.form = Some(TradeForm::new(FormMode::Create, TradeInput::defaults(today)));
    }

    /// Open the form prefilled from a stored record.
    pub fn open_edit(&mut self, key: TradeKey) -> Result<(), BlotterError> {
        let record = self.store.get(key).ok_or(BlotterError::UnknownTrade(key))?;
        let input = TradeInput::from_record(record);
        self.pending = None;
        self.form = Some(TradeForm::new(FormMode::Edit(key), input));
        Ok(())
    }

    /// Discard the form and any pending confirmation.
    pub fn close_form(&mut self) {
        self.form = None;
        self.pending = None;
    }

    /// Validate and reconcile `input` against the current collection.
    pub fn submit(
        &mut self,
        input: TradeInput,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, BlotterError> {
        let form = self.form.as_mut().ok_or(BlotterError::NoOpenForm)?;
        self.pending = None;
        form.input = input;
        form.general_error = None;

        let draft = match validate_at(&form.input, now) {
            Ok(draft) => draft,
            Err(errors) => {
                form.field_errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };
        form.field_errors = FieldErrors::default();

        let outcome = match reconcile(self.store.records(), &draft, now) {
            Verdict::Accept(record) => {
                info!(key = %record.key(), "Trade accepted");
                self.store = self.store.upsert(record.clone());
                self.form = None;
                SubmitOutcome::Accepted(record)
            }
            Verdict::Reject(err) => {
                info!(key = %draft.key(), "Trade rejected: {}", err);
                form.general_error = Some(err.to_string());
                SubmitOutcome::Rejected(err)
            }
            Verdict::ReplaceConfirmationRequired(pending) => {
                info!(key = %draft.key(), "Trade replacement awaiting confirmation");
                self.pending = Some(pending.clone());
                SubmitOutcome::ConfirmationRequired(pending)
            }
        };
        Ok(outcome)
    }

    /// Overwrite the conflicting record, keeping its created date.
    pub fn confirm_replace(&mut self) -> Result<TradeRecord, BlotterError> {
        let pending = self
            .pending
            .take()
            .ok_or(BlotterError::NoPendingReplacement)?;
        self.store = confirm(&self.store, &pending);
        self.form = None;
        info!(key = %pending.candidate.key(), "Trade replaced");
        Ok(pending.candidate)
    }

    /// Drop the pending replacement; the form and its input stay as they were.
    pub fn cancel_replace(&mut self) -> Result<(), BlotterError> {
        self.pending
            .take()
            .map(|_| ())
            .ok_or(BlotterError::NoPendingReplacement)
    }

    /// Every record as a display row, in display order. Versions are never
    /// collapsed: each `(tradeId, version)` is its own row.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<TradeRow> {
        self.store
            .sorted()
            .iter()
            .map(|trade| TradeRow::from_trade(trade, now))
            .collect()
    }

    /// One zero-based page of [`Blotter::rows`].
    pub fn page(&self, now: DateTime<Utc>, page: usize, page_size: usize) -> Vec<TradeRow> {
        paginate(&self.rows(now), page, page_size).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockRecordSource;
    use crate::domain::{BookId, CounterPartyId, TradeId, Version};
    use crate::engine::{Field, FieldViolation};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn make_trade(trade_id: u64, version: u64) -> TradeRecord {
        TradeRecord::new(
            TradeId::new(trade_id).unwrap(),
            Version::new(version).unwrap(),
            CounterPartyId::Cp1,
            BookId::B1,
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            created(),
        )
    }

    fn key(trade_id: u64, version: u64) -> TradeKey {
        TradeKey::new(TradeId::new(trade_id).unwrap(), Version::new(version).unwrap())
    }

    fn input(trade_id: i64, version: i64) -> TradeInput {
        TradeInput {
            trade_id: Some(trade_id as f64),
            version: Some(version as f64),
            counter_party_id: "CP-4".to_string(),
            book_id: "B2".to_string(),
            maturity_date: "2028-02-29".to_string(),
        }
    }

    fn blotter_with(trades: Vec<TradeRecord>) -> Blotter {
        let mut blotter = Blotter::with_store(TradeStore::new(trades));
        blotter.open_create(now().date_naive());
        blotter
    }

    #[tokio::test]
    async fn test_load_replaces_store() {
        let source = MockRecordSource::new().with_trades(vec![make_trade(1, 1), make_trade(1, 2)]);
        let mut blotter = Blotter::new();

        let loaded = blotter.load(&source).await.unwrap();

        assert_eq!(loaded, 2);
        assert!(!blotter.is_loading());
        assert_eq!(blotter.store().len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_collection() {
        let source = MockRecordSource::new()
            .with_trade(make_trade(1, 1))
            .failing(RecordSourceError::NetworkError("down".to_string()));
        let mut blotter = Blotter::with_store(TradeStore::new(vec![make_trade(9, 9)]));

        assert!(blotter.load(&source).await.is_err());

        assert!(!blotter.is_loading());
        assert!(blotter.store().is_empty());
    }

    #[test]
    fn test_submit_without_form() {
        let mut blotter = Blotter::new();
        assert_eq!(
            blotter.submit(input(1, 1), now()),
            Err(BlotterError::NoOpenForm)
        );
    }

    #[test]
    fn test_submit_invalid_keeps_form_open() {
        let mut blotter = blotter_with(vec![]);
        let mut form = input(999, 1);
        form.maturity_date = "2000-01-01".to_string();

        let outcome = blotter.submit(form.clone(), now()).unwrap();

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("Expected Invalid");
        };
        assert_eq!(
            errors.get(Field::MaturityDate),
            Some(&FieldViolation::PastMaturityDate)
        );
        let open = blotter.form().unwrap();
        assert_eq!(open.input, form);
        assert_eq!(open.field_errors, errors);
        assert!(blotter.store().is_empty());
    }

    #[test]
    fn test_submit_new_trade_accepted_and_form_closed() {
        let mut blotter = blotter_with(vec![]);

        let outcome = blotter.submit(input(7, 1), now()).unwrap();

        let SubmitOutcome::Accepted(record) = outcome else {
            panic!("Expected Accepted");
        };
        assert_eq!(record.created_date, now());
        assert!(blotter.form().is_none());
        assert_eq!(blotter.store().get(key(7, 1)), Some(&record));
    }

    #[test]
    fn test_submit_stale_version_sets_banner() {
        let mut blotter = blotter_with(vec![make_trade(5, 2)]);

        let outcome = blotter.submit(input(5, 1), now()).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        let form = blotter.form().unwrap();
        assert_eq!(
            form.general_error.as_deref(),
            Some("Version must be greater than or equal to 2 for Trade Id 5.")
        );
        assert_eq!(form.input, input(5, 1));
        assert_eq!(blotter.store().len(), 1);
    }

    #[test]
    fn test_banner_cleared_on_next_submit() {
        let mut blotter = blotter_with(vec![make_trade(5, 2)]);
        blotter.submit(input(5, 1), now()).unwrap();

        let mut bad = input(5, 3);
        bad.book_id = "nope".to_string();
        blotter.submit(bad, now()).unwrap();

        assert_eq!(blotter.form().unwrap().general_error, None);
    }

    #[test]
    fn test_confirm_replace_preserves_created_date() {
        let mut blotter = blotter_with(vec![make_trade(5, 1)]);

        let outcome = blotter.submit(input(5, 1), now()).unwrap();
        assert!(matches!(outcome, SubmitOutcome::ConfirmationRequired(_)));
        assert_eq!(
            blotter.store().get(key(5, 1)).unwrap().counter_party_id,
            CounterPartyId::Cp1
        );

        let replaced = blotter.confirm_replace().unwrap();

        assert_eq!(replaced.created_date, created());
        let stored = blotter.store().get(key(5, 1)).unwrap();
        assert_eq!(stored.counter_party_id, CounterPartyId::Cp4);
        assert_eq!(stored.created_date, created());
        assert_eq!(blotter.store().len(), 1);
        assert!(blotter.form().is_none());
        assert!(blotter.pending_replacement().is_none());
    }

    #[test]
    fn test_cancel_replace_keeps_form_and_collection() {
        let mut blotter = blotter_with(vec![make_trade(5, 1)]);
        blotter.submit(input(5, 1), now()).unwrap();

        blotter.cancel_replace().unwrap();

        assert!(blotter.pending_replacement().is_none());
        assert_eq!(blotter.form().unwrap().input, input(5, 1));
        assert_eq!(
            blotter.store().get(key(5, 1)).unwrap().book_id,
            BookId::B1
        );
        assert_eq!(
            blotter.confirm_replace(),
            Err(BlotterError::NoPendingReplacement)
        );
    }

    #[test]
    fn test_new_submission_discards_stale_pending_replacement() {
        let mut blotter = blotter_with(vec![make_trade(5, 1)]);
        let outcome = blotter.submit(input(5, 1), now()).unwrap();
        assert!(matches!(outcome, SubmitOutcome::ConfirmationRequired(_)));

        let outcome = blotter.submit(input(6, 1), now()).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
        assert!(blotter.pending_replacement().is_none());
        assert_eq!(
            blotter.confirm_replace(),
            Err(BlotterError::NoPendingReplacement)
        );
        assert_eq!(
            blotter.store().get(key(5, 1)).unwrap().book_id,
            BookId::B1
        );
        assert_eq!(blotter.store().len(), 2);
    }

    #[test]
    fn test_invalid_submission_discards_pending_replacement() {
        let mut blotter = blotter_with(vec![make_trade(5, 1)]);
        blotter.submit(input(5, 1), now()).unwrap();

        let mut bad = input(5, 1);
        bad.counter_party_id = "CP-9".to_string();
        let outcome = blotter.submit(bad, now()).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(blotter.pending_replacement().is_none());
    }

    #[test]
    fn test_close_form_discards_pending() {
        let mut blotter = blotter_with(vec![make_trade(5, 1)]);
        assert_eq!(blotter.form().unwrap().mode.title(), "Create Trade");
        blotter.submit(input(5, 1), now()).unwrap();

        blotter.close_form();

        assert!(blotter.form().is_none());
        assert!(blotter.pending_replacement().is_none());
        assert_eq!(blotter.store().len(), 1);
    }

    #[test]
    fn test_open_edit_prefills_from_record() {
        let mut blotter = Blotter::with_store(TradeStore::new(vec![make_trade(3, 2)]));

        blotter.open_edit(key(3, 2)).unwrap();

        let form = blotter.form().unwrap();
        assert_eq!(form.mode, FormMode::Edit(key(3, 2)));
        assert_eq!(form.mode.title(), "Edit Trade");
        assert_eq!(form.mode.submit_label(), "Save");
        assert_eq!(form.input.trade_id, Some(3.0));
        assert_eq!(form.input.version, Some(2.0));
        assert_eq!(form.input.maturity_date, "2030-01-01");
        assert_eq!(
            blotter.open_edit(key(4, 1)),
            Err(BlotterError::UnknownTrade(key(4, 1)))
        );
    }

    #[test]
    fn test_rows_keep_every_version() {
        let blotter = Blotter::with_store(TradeStore::new(vec![
            make_trade(2, 1),
            make_trade(1, 1),
            make_trade(2, 2),
        ]));

        let rows = blotter.rows(now());

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1-1", "2-2", "2-1"]);
        assert_eq!(rows[0].trade_id, "T-1");
        assert_eq!(rows[0].status, "Active");
        assert_eq!(blotter.page(now(), 1, 2).len(), 1);
    }
}
