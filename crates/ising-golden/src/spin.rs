//! Binary configuration → bipolar spin vector.

use ndarray::Array1;

use crate::ternary::{Ternary, TernaryVector};
use crate::types::{Configuration, Weight};

/// Bipolar spins, each `-1` or `+1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinVector {
    s: Array1<i8>,
}

impl SpinVector {
    /// Number of spins.
    #[inline]
    pub fn len(&self) -> usize {
        self.s.len()
    }

    /// True if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Spin at `i`, or `None` past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<i8> {
        self.s.get(i).copied()
    }

    /// Spins as a plain slice-backed vector.
    pub fn as_values(&self) -> Vec<i8> {
        self.s.to_vec()
    }

    /// Lift into the weight type so `ndarray` can take dot products with `J`.
    pub fn to_weights<W: Weight>(&self) -> Array1<W> {
        self.s.mapv(W::from)
    }

    /// Every position active, carrying its own sign.
    pub fn to_ternary(&self) -> TernaryVector {
        TernaryVector::from_vec(self.s.iter().map(|&v| Ternary::from_sign(v > 0)).collect())
    }
}

/// Map `bit → 2·bit − 1`.
///
/// Inputs are expected to be `0`/`1`; any nonzero byte is treated as `1`
/// (see [`Configuration::is_set`]).
pub fn to_spin(config: &Configuration) -> SpinVector {
    SpinVector {
        s: config.iter().map(|b| if b { 1 } else { -1 }).collect(),
    }
}
