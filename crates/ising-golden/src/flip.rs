//! Flip detection and the ternary row/column encodings fed to the accumulator.
//!
//! For a transition `old → new`:
//!
//! | Vector        | Index `i` value                                          |
//! |---------------|----------------------------------------------------------|
//! | `sigma_f`     | `old[i] XOR new[i]`                                      |
//! | `sigma_f_inv` | `NOT sigma_f[i]`                                         |
//! | `sigma_c`     | sign of `new[i]` if flipped, else `0` (column encoding)  |
//! | `sigma_r`     | sign of `new[i]` if unflipped, else `0` (row encoding)   |
//!
//! Inside the active window every index is active in exactly one of
//! `sigma_c` / `sigma_r`; past the window both are `0`.

use std::fmt;

use tracing::debug;

use crate::error::{ensure_same_len, ensure_within, GoldenResult};
use crate::ternary::{Ternary, TernaryVector};
use crate::types::Configuration;

// ---------------------------------------------------------------------------
// FlipMask
// ---------------------------------------------------------------------------

/// One flag per site; `true` where the mask is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipMask {
    mask: Vec<bool>,
}

impl FlipMask {
    /// Wrap raw flags.
    pub fn from_bools(mask: Vec<bool>) -> Self {
        Self { mask }
    }

    /// Length.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// True if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Flag at `i`. Panics if `i` is out of range.
    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        self.mask[i]
    }

    /// Logical negation.
    pub fn complement(&self) -> Self {
        Self {
            mask: self.mask.iter().map(|&b| !b).collect(),
        }
    }

    /// Number of set flags.
    pub fn flipped_count(&self) -> usize {
        self.mask.iter().filter(|&&b| b).count()
    }

    /// Indices of set flags, ascending.
    pub fn flipped_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Flags as `0`/`1` bytes.
    pub fn as_bits(&self) -> Vec<u8> {
        self.mask.iter().map(|&b| u8::from(b)).collect()
    }
}

impl fmt::Display for FlipMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Configuration::from_bools(&self.mask), f)
    }
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// Split a transition into `(sigma_f, sigma_f_inv)`.
///
/// # Errors
///
/// [`GoldenError::LengthMismatch`](crate::GoldenError::LengthMismatch) if the
/// configurations differ in length.
pub fn decompose(old: &Configuration, new: &Configuration) -> GoldenResult<(FlipMask, FlipMask)> {
    ensure_same_len(old.len(), new.len())?;
    let sigma_f = FlipMask::from_bools(old.iter().zip(new.iter()).map(|(a, b)| a ^ b).collect());
    let sigma_f_inv = sigma_f.complement();
    Ok((sigma_f, sigma_f_inv))
}

fn encode_gated(mask: &FlipMask, new: &Configuration, active_size: usize) -> GoldenResult<TernaryVector> {
    ensure_same_len(mask.len(), new.len())?;
    ensure_within("active_size", active_size, new.len())?;
    let mut out = TernaryVector::inactive(new.len());
    for i in 0..active_size {
        out.set(i, Ternary::gated(mask.is_set(i), new.is_set(i)));
    }
    Ok(out)
}

/// Column encoding `sigma_c`: signs of `new` at flipped positions.
///
/// Indices at or past `active_size` stay `Zero`.
///
/// # Errors
///
/// `LengthMismatch` if `sigma_f` and `new` differ in length,
/// `BoundsViolation` if `active_size > new.len()`.
pub fn encode_column(
    sigma_f: &FlipMask,
    new: &Configuration,
    active_size: usize,
) -> GoldenResult<TernaryVector> {
    encode_gated(sigma_f, new, active_size)
}

/// Row encoding `sigma_r`: signs of `new` at unflipped positions.
///
/// Same contract as [`encode_column`], gated by `sigma_f_inv` instead.
pub fn encode_row(
    sigma_f_inv: &FlipMask,
    new: &Configuration,
    active_size: usize,
) -> GoldenResult<TernaryVector> {
    encode_gated(sigma_f_inv, new, active_size)
}

/// Rebuild `new` from `old`, the flip mask and the two encodings.
///
/// Within the active window the bit comes from whichever encoding is active
/// there (`sigma_c` wins if both are); outside it the bit is
/// `old XOR sigma_f`.
pub fn reconstruct_new(
    old: &Configuration,
    sigma_f: &FlipMask,
    sigma_c: &TernaryVector,
    sigma_r: &TernaryVector,
) -> GoldenResult<Configuration> {
    let n = old.len();
    ensure_same_len(n, sigma_f.len())?;
    ensure_same_len(n, sigma_c.len())?;
    ensure_same_len(n, sigma_r.len())?;

    let bits = (0..n)
        .map(|i| {
            let c = sigma_c.get(i).unwrap_or_default();
            let r = sigma_r.get(i).unwrap_or_default();
            if c.is_active() {
                c == Ternary::Pos
            } else if r.is_active() {
                r == Ternary::Pos
            } else {
                old.is_set(i) ^ sigma_f.is_set(i)
            }
        })
        .collect::<Vec<_>>();
    Ok(Configuration::from_bools(&bits))
}

// ---------------------------------------------------------------------------
// FlipEncoding
// ---------------------------------------------------------------------------

/// All four vectors for one `old → new` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipEncoding {
    /// Flipped positions.
    pub sigma_f: FlipMask,
    /// Unflipped positions.
    pub sigma_f_inv: FlipMask,
    /// Column encoding (flipped, signed by `new`).
    pub sigma_c: TernaryVector,
    /// Row encoding (unflipped, signed by `new`).
    pub sigma_r: TernaryVector,
    /// Active window the encodings were built for.
    pub active_size: usize,
}

impl FlipEncoding {
    /// Decompose `old → new` and encode over the first `active_size` sites.
    pub fn new(old: &Configuration, new: &Configuration, active_size: usize) -> GoldenResult<Self> {
        let (sigma_f, sigma_f_inv) = decompose(old, new)?;
        let sigma_c = encode_column(&sigma_f, new, active_size)?;
        let sigma_r = encode_row(&sigma_f_inv, new, active_size)?;
        debug!(
            n = new.len(),
            active_size,
            flipped = sigma_f.flipped_count(),
            "flip encoding built"
        );
        Ok(Self {
            sigma_f,
            sigma_f_inv,
            sigma_c,
            sigma_r,
            active_size,
        })
    }

    /// True when, inside the window, each index is active in exactly one
    /// encoding and, past it, in neither.
    pub fn covers_window_exactly_once(&self) -> bool {
        let n = self.sigma_c.len();
        (0..n).all(|i| {
            let c = self.sigma_c.get(i).unwrap_or_default().is_active();
            let r = self.sigma_r.get(i).unwrap_or_default().is_active();
            if i < self.active_size {
                c ^ r
            } else {
                !c && !r
            }
        })
    }
}
