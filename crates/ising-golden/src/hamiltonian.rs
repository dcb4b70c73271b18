//! Closed-form Ising energy `H = σᵀ·J·σ` and energy differences.
//!
//! These are the reference values every other path in the crate is checked
//! against. They always recompute from scratch; there is no caching and no
//! incremental shortcut here.

use tracing::debug;

use crate::error::{GoldenError, GoldenResult};
use crate::spin::to_spin;
use crate::types::{CouplingMatrix, Configuration, Weight};

/// Energy of `config` under `j`.
///
/// # Errors
///
/// [`GoldenError::ShapeMismatch`] if `config.len()` differs from the matrix
/// dimension.
///
/// # Overflow
///
/// Integer weights are summed unchecked, so `N²·max|J|` must fit in `W`.
/// [`GoldenConfig::validate`](crate::config::GoldenConfig::validate) enforces
/// this for suite runs.
pub fn energy<W: Weight>(config: &Configuration, j: &CouplingMatrix<W>) -> GoldenResult<W> {
    j.ensure_len(config.len())?;
    let s = to_spin(config).to_weights::<W>();
    let e = s.dot(&j.view().dot(&s));
    debug!(n = config.len(), energy = %e, "closed-form energy");
    Ok(e)
}

/// `energy(new) − energy(old)`, both recomputed in full.
///
/// # Errors
///
/// [`GoldenError::ShapeMismatch`] if either configuration does not match the
/// matrix dimension.
pub fn energy_difference<W: Weight>(
    old: &Configuration,
    new: &Configuration,
    j: &CouplingMatrix<W>,
) -> GoldenResult<W> {
    j.ensure_len(old.len())?;
    j.ensure_len(new.len())?;
    let e_old = energy(old, j)?;
    let e_new = energy(new, j)?;
    Ok(e_new - e_old)
}

/// Energy change from flipping only spin `k` of `config`, from local fields.
///
/// Only pairs with exactly one index equal to `k` change sign, so
///
/// ```text
/// ΔH = −2·s_k·( Σ_{c≠k} J[k,c]·s_c + Σ_{r≠k} J[r,k]·s_r )
/// ```
///
/// The diagonal term `J[k,k]·s_k²` is unaffected.
///
/// # Errors
///
/// [`GoldenError::ShapeMismatch`] on a length mismatch and
/// [`GoldenError::BoundsViolation`] if `k` is not a valid site.
pub fn single_flip_delta<W: Weight>(
    config: &Configuration,
    j: &CouplingMatrix<W>,
    k: usize,
) -> GoldenResult<W> {
    j.ensure_len(config.len())?;
    if k >= config.len() {
        return Err(GoldenError::bounds("flip index", k, config.len().saturating_sub(1)));
    }
    let s = to_spin(config).to_weights::<W>();
    let view = j.view();
    let s_k = s[k];
    let diag = view[[k, k]] * s_k;
    let row_field = view.row(k).dot(&s) - diag;
    let col_field = view.column(k).dot(&s) - diag;
    Ok(W::from(-2i8) * s_k * (row_field + col_field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn constant_coupling_scale_law() {
        let j = CouplingMatrix::filled(256, 3i64);
        let e = energy(&Configuration::all_ones(256), &j).unwrap();
        assert_eq!(e, 196_608);
    }

    #[test]
    fn small_hand_computed_energy() {
        // s = [+1, -1]; H = J00 - J01 - J10 + J11 = 1 - 2 - 3 + 4 = 0
        let j = CouplingMatrix::from_array(array![[1i64, 2], [3, 4]]).unwrap();
        assert_eq!(energy(&Configuration::from_bits(vec![1, 0]), &j).unwrap(), 0);
        // s = [+1, +1]; H = 10
        assert_eq!(energy(&Configuration::all_ones(2), &j).unwrap(), 10);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let j = CouplingMatrix::filled(4, 1i64);
        let err = energy(&Configuration::all_ones(3), &j).unwrap_err();
        assert!(matches!(err, GoldenError::ShapeMismatch { .. }));
    }

    #[test]
    fn global_flip_leaves_energy_unchanged() {
        let j = CouplingMatrix::from_array(array![[1i64, -2, 5], [0, 3, 7], [-4, 2, 9]]).unwrap();
        let delta =
            energy_difference(&Configuration::all_ones(3), &Configuration::all_zeros(3), &j).unwrap();
        assert_eq!(delta, 0);
    }

    #[test]
    fn single_flip_on_constant_coupling() {
        let n = 256;
        let j = CouplingMatrix::filled(n, 3i64);
        let old = Configuration::all_ones(n);
        let new = old.with_flipped(&[0]).unwrap();
        let closed = single_flip_delta(&old, &j, 0).unwrap();
        assert_eq!(closed, -3060);
        assert_eq!(energy_difference(&old, &new, &j).unwrap(), closed);
    }

    #[test]
    fn single_flip_on_asymmetric_coupling() {
        let j = CouplingMatrix::from_array(array![[2i64, -1, 4], [3, 5, 0], [1, -6, 7]]).unwrap();
        let old = Configuration::from_bits(vec![1, 0, 1]);
        for k in 0..3 {
            let new = old.with_flipped(&[k]).unwrap();
            assert_eq!(
                single_flip_delta(&old, &j, k).unwrap(),
                energy_difference(&old, &new, &j).unwrap(),
                "flip index {k}"
            );
        }
    }

    #[test]
    fn fractional_coupling_yields_float_energy() {
        let j = CouplingMatrix::filled(2, 0.5f64);
        assert_eq!(energy(&Configuration::all_ones(2), &j).unwrap(), 2.0);
    }
}
