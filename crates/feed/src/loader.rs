use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use common::{Error, Pair, PriceSource, PriceTable, Result};

use crate::{align, LookbackWindow};

/// Fetch closes for every pair over `window` and align them.
///
/// At most `concurrency` requests are in flight. The first failed fetch
/// aborts the whole load; there is no retry.
pub async fn fetch_price_table<S>(
    source: &S,
    pairs: &[Pair],
    window: LookbackWindow,
    concurrency: usize,
) -> Result<PriceTable>
where
    S: PriceSource + ?Sized,
{
    info!(pairs = pairs.len(), %window, "Fetching price history");

    let series = stream::iter(pairs.iter().cloned())
        .map(|pair| async move {
            let closes = source.fetch_closes(&pair, window.start, window.end).await?;
            Ok::<_, Error>((pair, closes))
        })
        .buffered(concurrency.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    align(series)
}
