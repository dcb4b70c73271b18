//! # ising-golden
//!
//! Golden reference model for an Ising energy-accumulation hardware unit.
//!
//! The closed-form energy `H = σᵀ·J·σ` is the baseline. The hardware model
//! reproduces it one matrix column at a time from ternary sign encodings,
//! under a columns-per-cycle throughput limit. The verifier checks that the
//! two agree.
//!
//! ## Architecture
//!
//! ```text
//! fixtures ──► spin::to_spin ──► hamiltonian (closed form)
//!                 │                     │
//!                 └──► flip (σ_f, σ_c, σ_r)
//!                           │           │
//!                     accumulator ──► verify ──► suite report
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use ising_golden::prelude::*;
//!
//! let j = CouplingMatrix::filled(256, 3i64);
//! let old = Configuration::all_ones(256);
//! let new = old.with_flipped(&[0]).unwrap();
//!
//! assert_eq!(energy(&old, &j).unwrap(), 196_608);
//! let check = verify_iterative_vs_full(&old, &new, &j, 256).unwrap();
//! assert!(check.matched);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accumulator;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod flip;
pub mod hamiltonian;
pub mod spin;
pub mod suite;
pub mod ternary;
pub mod types;
pub mod verify;

pub use error::{ConfigError, GoldenError, GoldenResult};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-exports of the most commonly used items.
pub mod prelude {
    pub use crate::accumulator::{
        accumulate, energy_from_columns_full, AccumulationTrace, ColumnAccumulator, CycleRecord,
    };
    pub use crate::config::GoldenConfig;
    pub use crate::error::{ConfigError, GoldenError, GoldenResult};
    pub use crate::flip::{decompose, encode_column, encode_row, reconstruct_new, FlipEncoding, FlipMask};
    pub use crate::hamiltonian::{energy, energy_difference, single_flip_delta};
    pub use crate::spin::{to_spin, SpinVector};
    pub use crate::ternary::{Ternary, TernaryVector};
    pub use crate::types::{Configuration, CouplingMatrix, Weight};
    pub use crate::verify::{
        compare_flip_gated, verify_iterative_vs_full, verify_symmetry, FlipGatedComparison,
        IterativeCheck,
    };
}
