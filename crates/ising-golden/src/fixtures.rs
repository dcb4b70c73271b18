//! Coupling-matrix and configuration generators for test vectors.
//!
//! Randomness is always drawn from a caller-supplied [`Rng`]; seed it with
//! `StdRng::seed_from_u64` for reproducible vectors.

use rand::Rng;

use crate::error::{ConfigError, GoldenResult};
use crate::types::{CouplingMatrix, Configuration};

/// `n × n` matrix with every entry equal to `value`.
pub fn constant_coupling(n: usize, value: i64) -> CouplingMatrix {
    CouplingMatrix::filled(n, value)
}

fn ensure_non_negative(field: &'static str, v: i64) -> GoldenResult<()> {
    if v < 0 {
        return Err(ConfigError::invalid_value(field, format!("must be >= 0, got {v}")).into());
    }
    Ok(())
}

/// `n × n` matrix with entries drawn uniformly from `[0, max_val]`.
pub fn random_coupling(n: usize, max_val: i64, rng: &mut impl Rng) -> GoldenResult<CouplingMatrix> {
    ensure_non_negative("max_val", max_val)?;
    let data = (0..n * n).map(|_| rng.gen_range(0..=max_val)).collect();
    CouplingMatrix::from_row_major(n, data)
}

/// `n × n` matrix with entries uniform in `[-max_abs, max_abs]`, mirrored so
/// that `J[i, k] == J[k, i]`.
pub fn random_symmetric_coupling(
    n: usize,
    max_abs: i64,
    rng: &mut impl Rng,
) -> GoldenResult<CouplingMatrix> {
    ensure_non_negative("max_abs", max_abs)?;
    let mut data = vec![0i64; n * n];
    for i in 0..n {
        for k in i..n {
            let v = rng.gen_range(-max_abs..=max_abs);
            data[i * n + k] = v;
            data[k * n + i] = v;
        }
    }
    CouplingMatrix::from_row_major(n, data)
}

/// Uniformly random configuration of length `n`.
pub fn random_configuration(n: usize, rng: &mut impl Rng) -> Configuration {
    Configuration::from_bits((0..n).map(|_| u8::from(rng.gen::<bool>())).collect())
}
