pub mod api;
pub mod blotter;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;

pub use blotter::{Blotter, BlotterError, FormMode, SubmitOutcome, TradeForm};
pub use config::Config;
pub use datasource::{HttpRecordSource, MockRecordSource, RecordSource, RecordSourceError};
pub use domain::{BookId, CounterPartyId, Expiration, TradeId, TradeKey, TradeRecord, TradeRow, Version};
pub use engine::{reconcile, validate, TradeInput, TradeStore, Verdict};
pub use error::AppError;
