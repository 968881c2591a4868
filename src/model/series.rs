//! Result series — the output of every metric.

use serde::{Deserialize, Serialize};

/// An ordered sequence of numeric values, one per input row, aligned
/// positionally to the table the metric was computed over.
///
/// `NaN` encodes "undefined" (an object whose analysis neighbourhood carries
/// no usable pairwise value); metrics that default to 0 never produce NaN.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSeries(pub Vec<f64>);

impl ResultSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<f64> {
        self.0.get(row).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<f64>> for ResultSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl IntoIterator for ResultSeries {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
