use tracing::info;

use common::{PriceTable, Result, ReturnTable};

/// Largest day-over-day move kept, as an absolute log return: a doubling or
/// halving of the price. Anything beyond it is treated as a data error.
pub const MAX_ABS_LOG_RETURN: f64 = std::f64::consts::LN_2;

/// Day-over-day natural log returns for every pair.
///
/// The first price row has no predecessor and yields no return. A date on
/// which any pair moves beyond [`MAX_ABS_LOG_RETURN`] is dropped for every
/// pair, not just the offending one. Returns are always taken against the
/// previous price row, whether or not that row's return survived the filter.
pub fn compute_log_returns(prices: &PriceTable) -> Result<ReturnTable> {
    let mut returns = ReturnTable::new(prices.columns().to_vec());
    let mut outliers = 0usize;
    let mut row = vec![0.0; prices.width()];

    for i in 1..prices.len() {
        let (prev, curr) = (prices.row(i - 1), prices.row(i));
        for (r, (p0, p1)) in row.iter_mut().zip(prev.iter().zip(curr)) {
            *r = (p1 / p0).ln();
        }

        // NaN fails the comparison and is dropped along with real outliers
        if row.iter().all(|r| r.abs() <= MAX_ABS_LOG_RETURN) {
            returns.push_row(prices.dates()[i], &row)?;
        } else {
            outliers += 1;
        }
    }

    info!(
        rows = returns.len(),
        outliers_dropped = outliers,
        "Computed log returns"
    );
    Ok(returns)
}
