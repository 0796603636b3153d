use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use common::{Error, Result};

/// Number of evenly spaced year marks along the slider, before the final one.
const MARK_COUNT: usize = 10;

/// Two-handle range slider over trading-day indices.
///
/// Positions are indices into the list of trading days with a usable return,
/// not calendar dates; gaps in the data simply do not appear on the slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub min: usize,
    pub max: usize,
    /// Initial handle positions: the full range.
    pub value: [usize; 2],
    /// Year labels keyed by index.
    pub marks: BTreeMap<usize, String>,
    /// ISO date for every index, shown in the handle tooltips.
    pub labels: Vec<NaiveDate>,
    /// Handles may not pass each other.
    pub allow_cross: bool,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub placement: &'static str,
    pub always_visible: bool,
}

impl SliderSpec {
    pub fn from_dates(dates: &[NaiveDate]) -> Result<Self> {
        let last = dates.len().checked_sub(1).ok_or(Error::NoReturns)?;
        let step = (dates.len() / MARK_COUNT).max(1);

        let year = |i: usize| dates[i].year().to_string();
        let mut marks: BTreeMap<usize, String> =
            (0..dates.len()).step_by(step).map(|i| (i, year(i))).collect();
        marks.insert(last, year(last));

        Ok(Self {
            min: 0,
            max: last,
            value: [0, last],
            marks,
            labels: dates.to_vec(),
            allow_cross: false,
            tooltip: Tooltip {
                placement: "bottom",
                always_visible: true,
            },
        })
    }
}
