use chrono::NaiveDate;
use tracing::debug;

use common::{Currency, Error, Result, ReturnTable, StrengthTable};

use crate::{compute_cumulative_normalized, compute_strength, PairIndex};

/// Full-history log returns plus the pair index, built once at startup and
/// shared read-only by every request.
#[derive(Debug, Clone)]
pub struct StrengthModel {
    returns: ReturnTable,
    index: PairIndex,
}

/// Normalized cumulative strength over one closed date window.
#[derive(Debug, Clone)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cumulative: StrengthTable,
}

impl StrengthModel {
    /// Fails when `returns` has no rows; there is nothing to chart.
    pub fn new(returns: ReturnTable, currencies: &[Currency]) -> Result<Self> {
        if returns.is_empty() {
            return Err(Error::NoReturns);
        }
        let index = PairIndex::new(currencies, returns.columns());
        Ok(Self { returns, index })
    }

    /// Trading days with a usable return, oldest first. Slider positions
    /// index into this list.
    pub fn dates(&self) -> &[NaiveDate] {
        self.returns.dates()
    }

    pub fn currencies(&self) -> &[Currency] {
        self.index.currencies()
    }

    /// Strength over the whole history.
    pub fn full_strength(&self) -> Result<StrengthTable> {
        compute_strength(&self.returns, &self.index)
    }

    /// Normalized cumulative strength between trading-day indices
    /// `start_idx` and `end_idx`, both inclusive.
    pub fn window(&self, start_idx: usize, end_idx: usize) -> Result<Window> {
        let dates = self.dates();
        if start_idx > end_idx || end_idx >= dates.len() {
            return Err(Error::InvalidRange {
                start: start_idx,
                end: end_idx,
                len: dates.len(),
            });
        }

        let (start, end) = (dates[start_idx], dates[end_idx]);
        let slice = self.returns.slice_dates(start, end);
        let strength = compute_strength(&slice, &self.index)?;
        let cumulative = compute_cumulative_normalized(&strength)?;
        debug!(%start, %end, rows = cumulative.len(), "Recomputed strength window");

        Ok(Window {
            start,
            end,
            cumulative,
        })
    }
}
