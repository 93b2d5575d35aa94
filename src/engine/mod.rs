//! Pure computation engine(s) for trade versioning.

pub mod reconcile;
pub mod store;
pub mod validation;

pub use reconcile::{apply, confirm, reconcile, PendingReplacement, Verdict, VersionTooLow};
pub use store::TradeStore;
pub use validation::{
    validate, validate_at, Field, FieldErrors, FieldViolation, TradeDraft, TradeInput,
};
