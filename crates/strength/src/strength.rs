use common::{Error, Result, ReturnTable, StrengthTable};

use crate::PairIndex;

/// Per-currency strength for every date in `returns`.
///
/// Strength of a currency on a date is the sum of the returns of the pairs
/// where it is the base, minus the sum of the returns of the pairs where it
/// is the quote. A role with no pairs contributes zero.
///
/// Pure: a slice of the return table gives the same rows as the full table
/// restricted to those dates.
pub fn compute_strength(returns: &ReturnTable, index: &PairIndex) -> Result<StrengthTable> {
    if returns.columns() != index.pairs() {
        return Err(Error::Other(format!(
            "return table columns do not match the pair index ({} vs {} pairs)",
            returns.width(),
            index.pairs().len()
        )));
    }

    let currencies = index.currencies();
    let mut strength = StrengthTable::new(currencies.to_vec());
    let mut row = vec![0.0; currencies.len()];

    for (date, r) in returns.rows() {
        for (i, cell) in row.iter_mut().enumerate() {
            let bought: f64 = index.base_columns(i).iter().map(|&j| r[j]).sum();
            let sold: f64 = index.quote_columns(i).iter().map(|&j| r[j]).sum();
            *cell = bought - sold;
        }
        strength.push_row(date, &row)?;
    }
    Ok(strength)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::{Currency, Pair};

    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 2, day).unwrap()
    }

    fn abc() -> Vec<Currency> {
        ["AAA", "BBB", "CCC"]
            .iter()
            .map(|c| Currency::new(c).unwrap())
            .collect()
    }

    #[test]
    fn three_currency_strength_matches_hand_computation() {
        let currencies = abc();
        let pairs = Pair::universe(&currencies);
        let index = PairIndex::new(&currencies, &pairs);

        // columns: AAABBB AAACCC BBBAAA BBBCCC CCCAAA CCCBBB
        let returns = ReturnTable::from_rows(
            pairs,
            vec![
                (d(1), vec![0.5, 0.25, -0.5, 0.125, -0.25, -0.125]),
                (d(2), vec![-0.0625, 0.0, 0.0625, 0.5, 0.0, -0.5]),
            ],
        )
        .unwrap();

        let s = compute_strength(&returns, &index).unwrap();

        assert_eq!(s.dates(), &[d(1), d(2)]);
        // AAA day 1: (0.5 + 0.25) - (-0.5 + -0.25) = 1.5
        // BBB day 1: (-0.5 + 0.125) - (0.5 + -0.125) = -0.75
        // CCC day 1: (-0.25 + -0.125) - (0.25 + 0.125) = -0.75
        assert_eq!(s.row(0), &[1.5, -0.75, -0.75]);
        // AAA day 2: (-0.0625 + 0.0) - (0.0625 + 0.0) = -0.125
        // BBB day 2: (0.0625 + 0.5) - (-0.0625 + -0.5) = 1.125
        // CCC day 2: (0.0 + -0.5) - (0.0 + 0.5) = -1.0
        assert_eq!(s.row(1), &[-0.125, 1.125, -1.0]);
    }

    #[test]
    fn currency_with_one_role_only_uses_that_role() {
        let currencies = abc();
        let pairs = vec![Pair::new(currencies[0].clone(), currencies[1].clone()).unwrap()];
        let index = PairIndex::new(&currencies, &pairs);
        let returns = ReturnTable::from_rows(pairs, vec![(d(1), vec![0.25])]).unwrap();

        let s = compute_strength(&returns, &index).unwrap();
        assert_eq!(s.row(0), &[0.25, -0.25, 0.0]);
    }

    #[test]
    fn empty_returns_give_empty_strength() {
        let currencies = abc();
        let pairs = Pair::universe(&currencies);
        let index = PairIndex::new(&currencies, &pairs);
        let s = compute_strength(&ReturnTable::new(pairs), &index).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.columns(), currencies.as_slice());
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let currencies = abc();
        let pairs = Pair::universe(&currencies);
        let index = PairIndex::new(&currencies, &pairs);
        let returns = ReturnTable::new(pairs[..2].to_vec());
        assert!(compute_strength(&returns, &index).is_err());
    }
}
