//! The resizable, cyclically-indexed scalar sequence flowing between nodes.

use serde::{Deserialize, Serialize};

use crate::error::SpreadError;

/// An ordered, resizable sequence of `f64` scalars with cyclic indexing.
///
/// Inputs are read-only snapshots for the duration of one evaluation call.
/// Outputs follow a write-then-finalize protocol: values land at flat
/// offsets via [`set`](Spread::set) (growing the spread on demand) and the
/// logical length becomes authoritative only after the final
/// [`set_length`](Spread::set_length) call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spread {
    data: Vec<f64>,
}

impl Spread {
    /// An empty spread.
    pub fn new() -> Self {
        Spread::default()
    }

    /// Copy `values` into a fresh spread.
    pub fn from_slice(values: &[f64]) -> Self {
        Spread {
            data: values.to_vec(),
        }
    }

    /// Current logical length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the underlying scalars in flat order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Cyclic scalar read: element at `index mod len`.
    ///
    /// Zero-length spreads are never silently indexed; callers guard the
    /// [`SpreadError::Empty`] case explicitly.
    pub fn get(&self, index: usize) -> Result<f64, SpreadError> {
        if self.data.is_empty() {
            return Err(SpreadError::Empty);
        }
        Ok(self.data[index % self.data.len()])
    }

    /// Cyclic grouped read: `ARITY` consecutive scalars starting at flat
    /// offset `index * ARITY`, each offset individually wrapped `mod len`.
    ///
    /// With `ARITY == 3` this reads one 3D vector. A spread whose length is
    /// not a multiple of `ARITY` still yields whole groups; the trailing
    /// group wraps around into earlier data rather than zero-filling.
    pub fn get_group<const ARITY: usize>(&self, index: usize) -> Result<[f64; ARITY], SpreadError> {
        if self.data.is_empty() {
            return Err(SpreadError::Empty);
        }
        let mut group = [0.0; ARITY];
        for (k, slot) in group.iter_mut().enumerate() {
            *slot = self.data[(index * ARITY + k) % self.data.len()];
        }
        Ok(group)
    }

    /// Write `value` at flat offset `index`, zero-padding the spread up to
    /// `index + 1` first when it is shorter.
    pub fn set(&mut self, index: usize, value: f64) {
        if index >= self.data.len() {
            self.data.resize(index + 1, 0.0);
        }
        self.data[index] = value;
    }

    /// Truncate or zero-pad the logical length to exactly `len`.
    ///
    /// Called exactly once, last, per output spread per evaluation; the
    /// length is only authoritative afterwards.
    pub fn set_length(&mut self, len: usize) {
        self.data.resize(len, 0.0);
    }
}

impl From<Vec<f64>> for Spread {
    fn from(data: Vec<f64>) -> Self {
        Spread { data }
    }
}

impl FromIterator<f64> for Spread {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Spread {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Spread {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_read_wraps_modulo_length() {
        let spread = Spread::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(spread.get(0).expect("non-empty"), 1.0);
        assert_eq!(spread.get(4).expect("non-empty"), 2.0);
        assert_eq!(spread.get(300).expect("non-empty"), 1.0);
    }

    #[test]
    fn empty_reads_are_guarded() {
        let spread = Spread::new();
        assert_eq!(spread.get(0), Err(SpreadError::Empty));
        assert_eq!(spread.get_group::<3>(5), Err(SpreadError::Empty));
    }

    #[test]
    fn grouped_read_wraps_each_offset() {
        // Flat length 7: the third group covers offsets 6, 7, 8 -> 6, 0, 1.
        let spread = Spread::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        assert_eq!(spread.get_group::<3>(0).expect("non-empty"), [10.0, 20.0, 30.0]);
        assert_eq!(spread.get_group::<3>(2).expect("non-empty"), [70.0, 10.0, 20.0]);
        assert_eq!(spread.get_group::<3>(3).expect("non-empty"), [30.0, 40.0, 50.0]);
    }

    #[test]
    fn set_grows_with_zero_padding() {
        let mut spread = Spread::new();
        spread.set(3, 5.0);
        assert_eq!(spread.as_slice(), &[0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn set_length_truncates_and_pads() {
        let mut spread = Spread::from_slice(&[1.0, 2.0, 3.0]);
        spread.set_length(2);
        assert_eq!(spread.as_slice(), &[1.0, 2.0]);
        spread.set_length(4);
        assert_eq!(spread.as_slice(), &[1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let spread = Spread::from_slice(&[1.5, -2.0]);
        let json = serde_json::to_string(&spread).expect("serialize spread");
        assert_eq!(json, "[1.5,-2.0]");
        let parsed: Spread = serde_json::from_str(&json).expect("parse spread");
        assert_eq!(parsed, spread);
    }
}
