use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use common::{Close, Error, Pair, PriceTable, Result};

/// Align per-pair closes into one Price Table.
///
/// Dates are the union across all pairs. Zero closes are the provider's
/// missing-data marker and count as missing, as do non-positive or non-finite
/// values. Any date missing a close for any pair is dropped entirely.
pub fn align(series: Vec<(Pair, Vec<Close>)>) -> Result<PriceTable> {
    let width = series.len();
    let mut cells: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    let mut columns = Vec::with_capacity(width);

    for (j, (pair, closes)) in series.into_iter().enumerate() {
        for c in closes {
            let row = cells.entry(c.date).or_insert_with(|| vec![None; width]);
            row[j] = c.close.filter(|v| v.is_finite() && *v > 0.0);
        }
        columns.push(pair);
    }

    let total_dates = cells.len();
    let mut table = PriceTable::new(columns);
    for (date, row) in cells {
        if let Some(values) = row.into_iter().collect::<Option<Vec<f64>>>() {
            table.push_row(date, &values)?;
        }
    }

    info!(
        pairs = width,
        dates = total_dates,
        kept = table.len(),
        dropped = total_dates - table.len(),
        "Aligned price table"
    );

    if table.is_empty() || width == 0 {
        return Err(Error::EmptyPriceTable);
    }
    Ok(table)
}
