use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use common::{Close, Error, Pair, PriceSource, Result};

/// Price source backed by preloaded series.
///
/// Closes are filtered to the requested window on every fetch. A pair with
/// no series behaves like an unknown symbol at the provider.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    series: HashMap<Pair, Vec<Close>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the series for one pair, replacing any previous one.
    pub fn insert(&mut self, pair: Pair, mut closes: Vec<Close>) {
        closes.sort_by_key(|c| c.date);
        self.series.insert(pair, closes);
    }

    /// Build a source where every pair in `pairs` shares the same dates and
    /// each pair's price comes from `price(pair, row_index)`.
    pub fn from_fn(
        pairs: &[Pair],
        dates: &[NaiveDate],
        price: impl Fn(&Pair, usize) -> f64,
    ) -> Self {
        let mut source = Self::new();
        for pair in pairs {
            let closes = dates
                .iter()
                .enumerate()
                .map(|(i, &d)| Close::new(d, price(pair, i)))
                .collect();
            source.insert(pair.clone(), closes);
        }
        info!(pairs = pairs.len(), days = dates.len(), "InMemorySource initialized");
        source
    }
}

#[async_trait]
impl PriceSource for InMemorySource {
    async fn fetch_closes(
        &self,
        pair: &Pair,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Close>> {
        let closes = self.series.get(pair).ok_or_else(|| Error::Provider {
            symbol: pair.symbol(),
            message: "no series loaded for this pair".into(),
        })?;
        Ok(closes
            .iter()
            .filter(|c| c.date >= start && c.date < end)
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use common::Currency;

    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn eurusd() -> Pair {
        Pair::new(Currency::new("EUR").unwrap(), Currency::new("USD").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn fetch_filters_to_half_open_window() {
        let mut source = InMemorySource::new();
        source.insert(
            eurusd(),
            vec![Close::new(d(3), 1.3), Close::new(d(1), 1.1), Close::new(d(2), 1.2)],
        );

        let closes = source.fetch_closes(&eurusd(), d(2), d(3)).await.unwrap();
        assert_eq!(closes, vec![Close::new(d(2), 1.2)]);
    }

    #[tokio::test]
    async fn unknown_pair_is_a_provider_error() {
        let source = InMemorySource::new();
        let err = source.fetch_closes(&eurusd(), d(1), d(5)).await.unwrap_err();
        assert!(matches!(err, Error::Provider { .. }));
    }
}
