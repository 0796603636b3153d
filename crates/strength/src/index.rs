use common::{Currency, Pair};

/// Precomputed role of each currency in the pair universe.
///
/// For every currency, the column positions of the pairs where it is the base
/// and the pairs where it is the quote. Built once from the fixed universe so
/// strength computation never inspects symbols.
#[derive(Debug, Clone)]
pub struct PairIndex {
    currencies: Vec<Currency>,
    pairs: Vec<Pair>,
    base: Vec<Vec<usize>>,
    quote: Vec<Vec<usize>>,
}

impl PairIndex {
    /// `pairs` must be in the same order as the return table's columns.
    /// A currency that never appears in `pairs` gets empty role lists.
    pub fn new(currencies: &[Currency], pairs: &[Pair]) -> Self {
        Self {
            currencies: currencies.to_vec(),
            pairs: pairs.to_vec(),
            base: currencies
                .iter()
                .map(|c| columns_where(pairs, |p| &p.base == c))
                .collect(),
            quote: currencies
                .iter()
                .map(|c| columns_where(pairs, |p| &p.quote == c))
                .collect(),
        }
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Columns where currency number `i` is the base.
    pub fn base_columns(&self, i: usize) -> &[usize] {
        &self.base[i]
    }

    /// Columns where currency number `i` is the quote.
    pub fn quote_columns(&self, i: usize) -> &[usize] {
        &self.quote[i]
    }
}

fn columns_where(pairs: &[Pair], pred: impl Fn(&Pair) -> bool) -> Vec<usize> {
    pairs
        .iter()
        .enumerate()
        .filter(|(_, p)| pred(p))
        .map(|(j, _)| j)
        .collect()
}
