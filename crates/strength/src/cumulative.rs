use common::{Result, StrengthTable};

/// Running sum of each column along the date axis.
pub fn compute_cumulative(strength: &StrengthTable) -> Result<StrengthTable> {
    let mut out = StrengthTable::new(strength.columns().to_vec());
    let mut acc = vec![0.0; strength.width()];
    for (date, row) in strength.rows() {
        for (a, v) in acc.iter_mut().zip(row) {
            *a += v;
        }
        out.push_row(date, &acc)?;
    }
    Ok(out)
}

/// Cumulative strength shifted so every column is exactly zero on the first
/// date, showing change relative to the start of the window rather than an
/// absolute level.
pub fn compute_cumulative_normalized(strength: &StrengthTable) -> Result<StrengthTable> {
    let cumulative = compute_cumulative(strength)?;
    if cumulative.is_empty() {
        return Ok(cumulative);
    }

    let first = cumulative.row(0).to_vec();
    let mut out = StrengthTable::new(cumulative.columns().to_vec());
    let mut shifted = vec![0.0; first.len()];
    for (date, row) in cumulative.rows() {
        for ((s, v), f) in shifted.iter_mut().zip(row).zip(&first) {
            *s = v - f;
        }
        out.push_row(date, &shifted)?;
    }
    Ok(out)
}
