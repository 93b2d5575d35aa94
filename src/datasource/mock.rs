//! Mock record source and random trade generation.

use super::{RecordSource, RecordSourceError};
use crate::domain::{BookId, CounterPartyId, TradeId, TradeRecord, Version};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;

const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

/// Share of generated trades whose maturity lies in the past.
const PAST_MATURITY_PROBABILITY: f64 = 0.33;

/// Shape of a generated trade set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    /// Total number of rows.
    pub total_trades: usize,
    /// Number of distinct trade ids, numbered `1..=unique_trades`.
    pub unique_trades: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            total_trades: 250,
            unique_trades: 150,
        }
    }
}

/// Generate a random trade set.
///
/// Every id in `1..=unique_trades` gets version 1; the remaining rows add
/// versions to randomly picked ids, consecutively, so families have no gaps.
pub fn generate_mock_trades<R: Rng + ?Sized>(
    config: &MockConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<TradeRecord> {
    let mut trades = Vec::with_capacity(config.total_trades.max(config.unique_trades));
    let mut latest: HashMap<TradeId, Version> = HashMap::with_capacity(config.unique_trades);
    let mut pool = Vec::with_capacity(config.unique_trades);

    for n in 1..=config.unique_trades as u64 {
        let Ok(trade_id) = TradeId::new(n) else {
            continue;
        };
        pool.push(trade_id);
        latest.insert(trade_id, Version::FIRST);
        trades.push(random_trade(trade_id, Version::FIRST, now, rng));
    }

    if pool.is_empty() {
        return trades;
    }

    let extra = config.total_trades.saturating_sub(trades.len());
    for _ in 0..extra {
        let trade_id = pool[rng.gen_range(0..pool.len())];
        let version = latest
            .get(&trade_id)
            .copied()
            .unwrap_or(Version::FIRST)
            .next();
        latest.insert(trade_id, version);
        trades.push(random_trade(trade_id, version, now, rng));
    }

    trades
}

fn random_trade<R: Rng + ?Sized>(
    trade_id: TradeId,
    version: Version,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TradeRecord {
    let counter_party_id = CounterPartyId::ALL[rng.gen_range(0..CounterPartyId::ALL.len())];
    let book_id = BookId::ALL[rng.gen_range(0..BookId::ALL.len())];
    let maturity_date = if rng.gen_bool(PAST_MATURITY_PROBABILITY) {
        now - Duration::seconds(rng.gen_range(1..=ONE_YEAR_SECS))
    } else {
        now + Duration::seconds(rng.gen_range(1..=ONE_YEAR_SECS))
    };
    let created_date = now - Duration::seconds(rng.gen_range(1..=ONE_YEAR_SECS));

    TradeRecord::new(
        trade_id,
        version,
        counter_party_id,
        book_id,
        maturity_date,
        created_date,
    )
}

/// Mock record source that returns predefined records, or a predefined failure.
#[derive(Debug, Clone, Default)]
pub struct MockRecordSource {
    trades: Vec<TradeRecord>,
    failure: Option<RecordSourceError>,
}

impl MockRecordSource {
    /// Create a new mock record source with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock record source holding a freshly generated trade set.
    pub fn generated<R: Rng + ?Sized>(config: &MockConfig, now: DateTime<Utc>, rng: &mut R) -> Self {
        Self::new().with_trades(generate_mock_trades(config, now, rng))
    }

    /// Add a record.
    pub fn with_trade(mut self, trade: TradeRecord) -> Self {
        self.trades.push(trade);
        self
    }

    /// Add multiple records.
    pub fn with_trades(mut self, trades: Vec<TradeRecord>) -> Self {
        self.trades.extend(trades);
        self
    }

    /// Make every fetch fail with `error`.
    pub fn failing(mut self, error: RecordSourceError) -> Self {
        self.failure = Some(error);
        self
    }

    /// The records this source serves.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_trades(&self) -> Result<Vec<TradeRecord>, RecordSourceError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.trades.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_default_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let trades = generate_mock_trades(&MockConfig::default(), now(), &mut rng);

        assert_eq!(trades.len(), 250);
        let ids: HashSet<u64> = trades.iter().map(|t| t.trade_id.as_u64()).collect();
        assert_eq!(ids.len(), 150);
        assert_eq!(*ids.iter().min().unwrap(), 1);
        assert_eq!(*ids.iter().max().unwrap(), 150);
    }

    #[test]
    fn test_generate_unique_keys_and_gap_free_versions() {
        let mut rng = StdRng::seed_from_u64(42);
        let trades = generate_mock_trades(&MockConfig::default(), now(), &mut rng);

        let keys: HashSet<_> = trades.iter().map(|t| t.key()).collect();
        assert_eq!(keys.len(), trades.len());

        let mut families: HashMap<TradeId, Vec<u64>> = HashMap::new();
        for t in &trades {
            families.entry(t.trade_id).or_default().push(t.version.as_u64());
        }
        for versions in families.values_mut() {
            versions.sort_unstable();
            let expected: Vec<u64> = (1..=versions.len() as u64).collect();
            assert_eq!(*versions, expected);
        }
    }

    #[test]
    fn test_generate_dates_within_a_year() {
        let mut rng = StdRng::seed_from_u64(1);
        let trades = generate_mock_trades(&MockConfig::default(), now(), &mut rng);
        let year = Duration::seconds(ONE_YEAR_SECS);

        for t in &trades {
            assert!(t.created_date < now());
            assert!(t.created_date >= now() - year);
            assert!(t.maturity_date != now());
            assert!((t.maturity_date - now()).num_seconds().abs() <= ONE_YEAR_SECS);
        }
        assert!(trades.iter().any(|t| t.maturity_date < now()));
        assert!(trades.iter().any(|t| t.maturity_date > now()));
    }

    #[test]
    fn test_generate_total_below_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = MockConfig {
            total_trades: 2,
            unique_trades: 5,
        };
        assert_eq!(generate_mock_trades(&config, now(), &mut rng).len(), 5);
    }

    #[test]
    fn test_generate_no_unique_ids_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = MockConfig {
            total_trades: 10,
            unique_trades: 0,
        };
        assert!(generate_mock_trades(&config, now(), &mut rng).is_empty());
    }

    #[tokio::test]
    async fn test_mock_source_fetch_trades() {
        let mut rng = StdRng::seed_from_u64(9);
        let source = MockRecordSource::generated(
            &MockConfig {
                total_trades: 4,
                unique_trades: 2,
            },
            now(),
            &mut rng,
        );
        let trades = source.fetch_trades().await.unwrap();
        assert_eq!(trades, source.trades());
    }

    #[tokio::test]
    async fn test_mock_source_failure() {
        let source = MockRecordSource::new()
            .failing(RecordSourceError::NetworkError("down".to_string()));
        let err = source.fetch_trades().await.unwrap_err();
        assert_eq!(err, RecordSourceError::NetworkError("down".to_string()));
    }
}
