use std::collections::HashMap;

use rust_decimal::Decimal;

/// Current spot prices keyed by asset code.
///
/// Rebuilt on every run and never persisted.
#[derive(Debug, Clone, Default)]
pub struct PriceSnapshot {
    prices: HashMap<String, Decimal>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, price: Decimal) {
        self.prices.insert(code.into(), price);
    }

    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.prices.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}
