use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Close, Pair, Result};

/// Abstraction over the historical price provider.
///
/// `YahooClient` implements this against the live chart API.
/// `InMemorySource` implements this for tests and offline runs.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Daily closes for `pair` from `start` (inclusive) to `end` (exclusive),
    /// oldest first.
    async fn fetch_closes(&self, pair: &Pair, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Close>>;
}
