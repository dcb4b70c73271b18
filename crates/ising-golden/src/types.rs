//! Core data model: coupling matrices and binary configurations.
//!
//! The coupling matrix is a dense [`ndarray::Array2`] so every access is
//! bounds-checked and shape-aware; configurations are plain byte vectors in
//! which any nonzero byte counts as a set bit.

use std::fmt;
use std::ops::{AddAssign, Neg};

use ndarray::{Array2, ArrayView2, LinalgScalar};

use crate::error::{GoldenError, GoldenResult};

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// Numeric type usable as a coupling weight and as an energy.
///
/// Implemented for every type that `ndarray` can multiply and that can be
/// built from a spin sign; in practice `i64` (exact, the default) and `f64`
/// (fractional coupling).
pub trait Weight:
    LinalgScalar
    + PartialEq
    + Neg<Output = Self>
    + AddAssign
    + From<i8>
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
{
    /// Additive identity.
    #[inline]
    fn zero_weight() -> Self {
        Self::from(0i8)
    }
}

impl<T> Weight for T where
    T: LinalgScalar
        + PartialEq
        + Neg<Output = T>
        + AddAssign
        + From<i8>
        + fmt::Debug
        + fmt::Display
        + Send
        + Sync
{
}

// ---------------------------------------------------------------------------
// CouplingMatrix
// ---------------------------------------------------------------------------

/// Square coupling matrix `J` of dimension `n × n`.
///
/// Immutable once built. Neither symmetry nor a zero diagonal is required.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix<W: Weight = i64> {
    j: Array2<W>,
}

impl<W: Weight> CouplingMatrix<W> {
    /// Wrap an existing array, rejecting non-square shapes.
    pub fn from_array(j: Array2<W>) -> GoldenResult<Self> {
        let (rows, cols) = j.dim();
        if rows != cols {
            return Err(GoldenError::shape_mismatch(vec![rows, rows], vec![rows, cols]));
        }
        Ok(Self { j })
    }

    /// Build an `n × n` matrix from row-major data of length `n²`.
    pub fn from_row_major(n: usize, data: Vec<W>) -> GoldenResult<Self> {
        let len = data.len();
        let j = Array2::from_shape_vec((n, n), data)
            .map_err(|_| GoldenError::shape_mismatch(vec![n * n], vec![len]))?;
        Ok(Self { j })
    }

    /// Matrix filled with a single value.
    pub fn filled(n: usize, value: W) -> Self {
        Self {
            j: Array2::from_elem((n, n), value),
        }
    }

    /// Dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.j.nrows()
    }

    /// Element `J[row, col]`, or `None` outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<W> {
        self.j.get((row, col)).copied()
    }

    /// Read-only view of the underlying array.
    pub fn view(&self) -> ArrayView2<'_, W> {
        self.j.view()
    }

    /// True when `J[i, k] == J[k, i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.j == self.j.t()
    }

    /// Fail with [`GoldenError::ShapeMismatch`] unless a vector of length
    /// `len` can multiply this matrix.
    pub fn ensure_len(&self, len: usize) -> GoldenResult<()> {
        let n = self.dim();
        if len != n {
            return Err(GoldenError::shape_mismatch(vec![n, n], vec![len]));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Binary configuration: one bit per spin site.
///
/// Bits are stored as bytes; any nonzero byte is treated as `1`. Callers
/// are expected to pass `0`/`1`, other values are accepted but folded to `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    bits: Vec<u8>,
}

impl Configuration {
    /// Wrap raw bits.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    /// Build from booleans.
    pub fn from_bools(bools: &[bool]) -> Self {
        Self {
            bits: bools.iter().map(|&b| u8::from(b)).collect(),
        }
    }

    /// All bits set (every spin `+1`).
    pub fn all_ones(n: usize) -> Self {
        Self { bits: vec![1; n] }
    }

    /// All bits clear (every spin `-1`).
    pub fn all_zeros(n: usize) -> Self {
        Self { bits: vec![0; n] }
    }

    /// Number of sites.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if there are no sites.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether bit `i` is set. Panics if `i` is out of range.
    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        self.bits[i] != 0
    }

    /// Iterate over the bits as booleans.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().map(|&b| b != 0)
    }

    /// Raw bytes as supplied.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Normalised copy in which every bit is exactly `0` or `1`.
    pub fn normalized(&self) -> Self {
        Self {
            bits: self.iter().map(u8::from).collect(),
        }
    }

    /// New configuration with the bits at `indices` inverted.
    pub fn with_flipped(&self, indices: &[usize]) -> GoldenResult<Self> {
        let n = self.len();
        let mut bits = self.normalized().bits;
        for &i in indices {
            if i >= n {
                return Err(GoldenError::bounds("flip index", i, n.saturating_sub(1)));
            }
            bits[i] ^= 1;
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", u8::from(b))?;
        }
        write!(f, "]")
    }
}
