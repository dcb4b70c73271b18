//! Column-by-column hardware model of the energy accumulation unit.
//!
//! The datapath sees only ternary encodings, never raw spins. For column `c`
//! it forms the partial sum
//!
//! ```text
//! column_sum(c) = Σ_{row < active_size} sigma_r[row] · J[c, row]
//! ```
//!
//! and adds `sigma_c[c] · column_sum(c)` to the running total. Each multiply
//! by a ternary digit is a sign select (pass, negate or zero), which is what
//! the hardware multiply-accumulate cell does under a per-column control bit.
//!
//! Column `c` reads `J[c, ·]`, i.e. the matrix is walked along its first
//! index. With one spin vector used as both encodings this is the bilinear
//! form `σᵀ·J·σ` evaluated column-major.

use ndarray::ArrayView2;
use tracing::{debug, trace};

use crate::error::{ensure_within, GoldenError, GoldenResult};
use crate::spin::SpinVector;
use crate::ternary::TernaryVector;
use crate::types::{CouplingMatrix, Weight};

fn column_sum<W: Weight>(
    sigma_r: &TernaryVector,
    j: &ArrayView2<'_, W>,
    col: usize,
    active_size: usize,
) -> W {
    let mut sum = W::zero_weight();
    for row in 0..active_size {
        sum += sigma_r.get(row).unwrap_or_default().apply(j[[col, row]]);
    }
    sum
}

fn check_operands<W: Weight>(
    sigma_r: &TernaryVector,
    sigma_c: &TernaryVector,
    j: &CouplingMatrix<W>,
    columns_per_cycle: usize,
    active_size: usize,
) -> GoldenResult<()> {
    j.ensure_len(sigma_r.len())?;
    j.ensure_len(sigma_c.len())?;
    ensure_within("active_size", active_size, j.dim())?;
    ensure_within("columns_per_cycle", columns_per_cycle, active_size)?;
    Ok(())
}

/// Accumulate over the first `columns_per_cycle` columns.
///
/// Requires `columns_per_cycle <= active_size <= n`; only `J[c, row]` with
/// `c < columns_per_cycle` and `row < active_size` is read.
///
/// # Errors
///
/// `ShapeMismatch` if either encoding has the wrong length,
/// `BoundsViolation` if the window ordering is broken.
///
/// # Overflow
///
/// As with [`energy`](crate::hamiltonian::energy), integer sums are
/// unchecked: `columns_per_cycle · active_size · max|J|` must fit in `W`.
pub fn accumulate<W: Weight>(
    sigma_r: &TernaryVector,
    sigma_c: &TernaryVector,
    j: &CouplingMatrix<W>,
    columns_per_cycle: usize,
    active_size: usize,
) -> GoldenResult<W> {
    check_operands(sigma_r, sigma_c, j, columns_per_cycle, active_size)?;
    let view = j.view();
    let mut total = W::zero_weight();
    for col in 0..columns_per_cycle {
        let partial = column_sum(sigma_r, &view, col, active_size);
        total += sigma_c.get(col).unwrap_or_default().apply(partial);
    }
    Ok(total)
}

/// Full energy of one spin vector through the column datapath.
///
/// Uses `spins` as both row and column encoding and sweeps all
/// `active_size` columns. With `active_size == n` this equals
/// [`energy`](crate::hamiltonian::energy) for the same configuration.
pub fn energy_from_columns_full<W: Weight>(
    spins: &SpinVector,
    j: &CouplingMatrix<W>,
    active_size: usize,
) -> GoldenResult<W> {
    let signs = spins.to_ternary();
    accumulate(&signs, &signs, j, active_size, active_size)
}

// ---------------------------------------------------------------------------
// ColumnAccumulator
// ---------------------------------------------------------------------------

/// One accumulation cycle of a multi-cycle run.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord<W: Weight = i64> {
    /// Zero-based cycle number.
    pub cycle: usize,
    /// First column processed in this cycle.
    pub first_column: usize,
    /// Columns processed in this cycle (the last one may be short).
    pub columns: usize,
    /// Sum of `sigma_c[c] · column_sum(c)` over this cycle's columns.
    pub partial: W,
}

/// Per-cycle breakdown of a [`ColumnAccumulator::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationTrace<W: Weight = i64> {
    /// One record per cycle, in order.
    pub cycles: Vec<CycleRecord<W>>,
    /// Sum of all partials.
    pub total: W,
}

impl<W: Weight> AccumulationTrace<W> {
    /// Number of cycles the run took.
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Hardware accumulator with a fixed throughput of `columns_per_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAccumulator {
    columns_per_cycle: usize,
    active_size: usize,
}

impl ColumnAccumulator {
    /// Validate `1 <= columns_per_cycle <= active_size`.
    ///
    /// `active_size` is checked against the matrix on every call.
    pub fn new(columns_per_cycle: usize, active_size: usize) -> GoldenResult<Self> {
        if columns_per_cycle == 0 {
            return Err(GoldenError::bounds("columns_per_cycle", 0, active_size));
        }
        ensure_within("columns_per_cycle", columns_per_cycle, active_size)?;
        Ok(Self {
            columns_per_cycle,
            active_size,
        })
    }

    /// Columns per cycle.
    pub fn columns_per_cycle(&self) -> usize {
        self.columns_per_cycle
    }

    /// Active window.
    pub fn active_size(&self) -> usize {
        self.active_size
    }

    /// Cycles needed to sweep the active window.
    pub fn cycles_for_window(&self) -> usize {
        self.active_size.div_ceil(self.columns_per_cycle)
    }

    /// Single cycle: the first `columns_per_cycle` columns.
    pub fn accumulate<W: Weight>(
        &self,
        sigma_r: &TernaryVector,
        sigma_c: &TernaryVector,
        j: &CouplingMatrix<W>,
    ) -> GoldenResult<W> {
        accumulate(sigma_r, sigma_c, j, self.columns_per_cycle, self.active_size)
    }

    /// Sweep every active column, `columns_per_cycle` at a time.
    pub fn run<W: Weight>(
        &self,
        sigma_r: &TernaryVector,
        sigma_c: &TernaryVector,
        j: &CouplingMatrix<W>,
    ) -> GoldenResult<AccumulationTrace<W>> {
        check_operands(sigma_r, sigma_c, j, self.columns_per_cycle, self.active_size)?;
        let view = j.view();
        let mut cycles = Vec::with_capacity(self.cycles_for_window());
        let mut total = W::zero_weight();

        let mut first = 0;
        while first < self.active_size {
            let end = (first + self.columns_per_cycle).min(self.active_size);
            let mut partial = W::zero_weight();
            for col in first..end {
                let sum = column_sum(sigma_r, &view, col, self.active_size);
                partial += sigma_c.get(col).unwrap_or_default().apply(sum);
            }
            trace!(cycle = cycles.len(), first, end, partial = %partial, "accumulation cycle");
            total += partial;
            cycles.push(CycleRecord {
                cycle: cycles.len(),
                first_column: first,
                columns: end - first,
                partial,
            });
            first = end;
        }

        debug!(
            cycles = cycles.len(),
            columns_per_cycle = self.columns_per_cycle,
            total = %total,
            "accumulation run complete"
        );
        Ok(AccumulationTrace { cycles, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::energy;
    use crate::spin::to_spin;
    use crate::ternary::Ternary;
    use crate::types::Configuration;
    use ndarray::array;

    fn asym3() -> CouplingMatrix {
        CouplingMatrix::from_array(array![[2i64, -1, 4], [3, 5, 0], [1, -6, 7]]).unwrap()
    }

    #[test]
    fn full_sweep_matches_closed_form() {
        let j = asym3();
        for bits in [vec![1, 0, 1], vec![0, 0, 0], vec![0, 1, 1]] {
            let cfg = Configuration::from_bits(bits);
            let cols = energy_from_columns_full(&to_spin(&cfg), &j, 3).unwrap();
            assert_eq!(cols, energy(&cfg, &j).unwrap(), "config {cfg}");
        }
    }

    #[test]
    fn only_first_columns_are_read() {
        // Column 0 only: sigma_c[0] * Σ_row sigma_r[row] * J[0, row] = 1 * (2 - 1 + 4)
        let j = asym3();
        let ones = TernaryVector::from_vec(vec![Ternary::Pos; 3]);
        assert_eq!(accumulate(&ones, &ones, &j, 1, 3).unwrap(), 5);
        assert_eq!(accumulate(&ones, &ones, &j, 0, 3).unwrap(), 0);
    }

    #[test]
    fn inactive_column_contributes_nothing() {
        let j = asym3();
        let r = TernaryVector::from_vec(vec![Ternary::Pos; 3]);
        let c = TernaryVector::from_vec(vec![Ternary::Zero, Ternary::Neg, Ternary::Zero]);
        // -(3 + 5 + 0)
        assert_eq!(accumulate(&r, &c, &j, 3, 3).unwrap(), -8);
    }

    #[test]
    fn window_ordering_is_enforced() {
        let j = asym3();
        let v = TernaryVector::inactive(3);
        assert!(matches!(
            accumulate(&v, &v, &j, 3, 2).unwrap_err(),
            GoldenError::BoundsViolation { parameter: "columns_per_cycle", .. }
        ));
        assert!(matches!(
            accumulate(&v, &v, &j, 2, 4).unwrap_err(),
            GoldenError::BoundsViolation { parameter: "active_size", .. }
        ));
        assert!(matches!(
            accumulate(&TernaryVector::inactive(2), &v, &j, 1, 2).unwrap_err(),
            GoldenError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn multi_cycle_run_sums_to_full_energy() {
        let j: CouplingMatrix =
            CouplingMatrix::from_row_major(5, (0..25i64).map(|v| (v % 7) - 3).collect())
                .unwrap();
        let cfg = Configuration::from_bits(vec![1, 0, 0, 1, 1]);
        let signs = to_spin(&cfg).to_ternary();
        let acc = ColumnAccumulator::new(2, 5).unwrap();
        let trace = acc.run(&signs, &signs, &j).unwrap();

        assert_eq!(trace.cycle_count(), 3);
        assert_eq!(acc.cycles_for_window(), 3);
        assert_eq!(trace.cycles[2].columns, 1);
        assert_eq!(trace.cycles[2].first_column, 4);
        assert_eq!(trace.total, energy(&cfg, &j).unwrap());
        let summed: i64 = trace.cycles.iter().map(|c| c.partial).sum();
        assert_eq!(summed, trace.total);
    }

    #[test]
    fn single_cycle_matches_free_function() {
        let j = asym3();
        let signs = to_spin(&Configuration::from_bits(vec![0, 1, 0])).to_ternary();
        let acc = ColumnAccumulator::new(2, 3).unwrap();
        assert_eq!(
            acc.accumulate(&signs, &signs, &j).unwrap(),
            accumulate(&signs, &signs, &j, 2, 3).unwrap()
        );
    }

    #[test]
    fn zero_throughput_is_rejected() {
        assert!(ColumnAccumulator::new(0, 4).is_err());
        assert!(ColumnAccumulator::new(5, 4).is_err());
    }
}
