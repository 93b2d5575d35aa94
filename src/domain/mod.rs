//! Domain types for the trade book.
//!
//! This module provides:
//! - Domain primitives: TradeId, Version, TradeKey and the fixed enumerations
//! - The TradeRecord entity with its camelCase wire format
//! - Stable display ordering
//! - Display derivation (formatting, expiration, table rows)

pub mod display;
pub mod ordering;
pub mod primitives;
pub mod trade;

pub use display::{Expiration, TradeRow};
pub use ordering::{sort_trades, TradeOrderingKey};
pub use primitives::{
    BookId, CounterPartyId, InvalidEnumError, NonPositiveError, TradeId, TradeKey, Version,
};
pub use trade::TradeRecord;
