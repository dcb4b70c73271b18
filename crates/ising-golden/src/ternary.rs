//! Three-state sign encoding `{-1, 0, +1}` used by the accumulator datapath.
//!
//! `Zero` means "inactive at this index"; `Neg`/`Pos` carry the sign of the
//! spin that the index contributes. Keeping this as an enum rather than a
//! raw `i8` makes the inactive state explicit at every use site.

use std::fmt;

use ndarray::Array1;

use crate::types::Weight;

/// Single ternary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum Ternary {
    /// Active, spin `-1`.
    Neg = -1,
    /// Inactive.
    #[default]
    Zero = 0,
    /// Active, spin `+1`.
    Pos = 1,
}

impl Ternary {
    /// Sign of a configuration bit: `Pos` when set, `Neg` otherwise.
    #[inline]
    pub const fn from_sign(bit_set: bool) -> Self {
        if bit_set {
            Ternary::Pos
        } else {
            Ternary::Neg
        }
    }

    /// Gate a sign by an activity bit: `Zero` unless `active`.
    #[inline]
    pub const fn gated(active: bool, bit_set: bool) -> Self {
        if active {
            Self::from_sign(bit_set)
        } else {
            Ternary::Zero
        }
    }

    /// Convert from `i8`, returning `None` outside `{-1, 0, 1}`.
    #[inline]
    pub const fn from_i8(v: i8) -> Option<Self> {
        match v {
            -1 => Some(Ternary::Neg),
            0 => Some(Ternary::Zero),
            1 => Some(Ternary::Pos),
            _ => None,
        }
    }

    /// Numeric value.
    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// True for `Neg` and `Pos`.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Ternary::Zero)
    }

    /// Multiply a weight by this sign without a general multiply:
    /// `Pos` passes, `Neg` negates, `Zero` yields zero.
    #[inline]
    pub fn apply<W: Weight>(self, w: W) -> W {
        match self {
            Ternary::Pos => w,
            Ternary::Neg => -w,
            Ternary::Zero => W::zero_weight(),
        }
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// TernaryVector
// ---------------------------------------------------------------------------

/// Dense vector of [`Ternary`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TernaryVector {
    values: Array1<Ternary>,
}

impl TernaryVector {
    /// All-`Zero` vector of length `n`.
    pub fn inactive(n: usize) -> Self {
        Self {
            values: Array1::from_elem(n, Ternary::Zero),
        }
    }

    /// Wrap a vector of digits.
    pub fn from_vec(values: Vec<Ternary>) -> Self {
        Self {
            values: Array1::from_vec(values),
        }
    }

    /// Length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Digit at `i`, or `None` past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<Ternary> {
        self.values.get(i).copied()
    }

    pub(crate) fn set(&mut self, i: usize, t: Ternary) {
        self.values[i] = t;
    }

    /// Iterate over the digits.
    pub fn iter(&self) -> impl Iterator<Item = Ternary> + '_ {
        self.values.iter().copied()
    }

    /// Number of active (nonzero) positions.
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|t| t.is_active()).count()
    }

    /// Numeric values, for display and comparison against plain arrays.
    pub fn as_values(&self) -> Vec<i8> {
        self.values.iter().map(|t| t.value()).collect()
    }

    /// One-bit column control: `Pos` stays, everything else becomes `Zero`.
    pub fn positive_mask(&self) -> Self {
        Self {
            values: self.values.mapv(|t| match t {
                Ternary::Pos => Ternary::Pos,
                _ => Ternary::Zero,
            }),
        }
    }
}

impl fmt::Display for TernaryVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:>2}", t.value())?;
        }
        write!(f, "]")
    }
}
