use chrono::NaiveDate;

use crate::{Error, Result};

/// Date-indexed table of `f64` values with one column per key.
///
/// Rows are stored row-major and dates are strictly ascending. Every row has
/// exactly one value per column; missing data is resolved before a row is
/// admitted, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<K> {
    columns: Vec<K>,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl<K> Table<K> {
    pub fn new(columns: Vec<K>) -> Self {
        Self {
            columns,
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a table from `(date, row)` pairs, validating shape and ordering.
    pub fn from_rows(
        columns: Vec<K>,
        rows: impl IntoIterator<Item = (NaiveDate, Vec<f64>)>,
    ) -> Result<Self> {
        let mut table = Self::new(columns);
        for (date, row) in rows {
            table.push_row(date, &row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, date: NaiveDate, row: &[f64]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::Shape {
                date,
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        if let Some(&last) = self.dates.last() {
            if date <= last {
                return Err(Error::Other(format!(
                    "row dates must be strictly ascending: {date} follows {last}"
                )));
            }
        }
        self.dates.push(date);
        self.values.extend_from_slice(row);
        Ok(())
    }

    pub fn columns(&self) -> &[K] {
        &self.columns
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let w = self.width();
        &self.values[index * w..(index + 1) * w]
    }

    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[f64])> + '_ {
        (0..self.len()).map(move |i| (self.dates[i], self.row(i)))
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        let w = self.width();
        (0..self.len()).map(move |r| self.values[r * w + index])
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.width() + column]
    }

    /// Row index of `date`, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }
}

impl<K: Clone> Table<K> {
    /// Rows `start..=end` by index.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end >= self.len() {
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        let w = self.width();
        Ok(Self {
            columns: self.columns.clone(),
            dates: self.dates[start..=end].to_vec(),
            values: self.values[start * w..(end + 1) * w].to_vec(),
        })
    }

    /// Rows whose date falls in the closed interval `[from, to]`.
    /// An interval containing no rows yields an empty table.
    pub fn slice_dates(&self, from: NaiveDate, to: NaiveDate) -> Self {
        let lo = self.dates.partition_point(|d| *d < from);
        let hi = self.dates.partition_point(|d| *d <= to).max(lo);
        let w = self.width();
        Self {
            columns: self.columns.clone(),
            dates: self.dates[lo..hi].to_vec(),
            values: self.values[lo * w..hi * w].to_vec(),
        }
    }
}
