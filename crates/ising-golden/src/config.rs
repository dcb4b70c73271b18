//! Run configuration for the golden-model suite.
//!
//! [`GoldenConfig`] holds every knob the reference scenarios read: vector
//! size, fixture parameters, accumulator throughput and the RNG seed. It is
//! serializable so a run can be pinned to a JSON file.
//!
//! # Example
//!
//! ```rust
//! use ising_golden::config::GoldenConfig;
//!
//! let cfg = GoldenConfig::default();
//! cfg.validate().expect("default config is valid");
//! assert_eq!(cfg.vector_size, 256);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Largest energy magnitude a run produces, in units of `N²·max|J|`.
/// Energy differences reach twice that and the flip-gated symmetric
/// prediction four times.
const ENERGY_HEADROOM: i64 = 4;

/// Parameters for [`run_suite`](crate::suite::run_suite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenConfig {
    /// Number of spin sites `N`. Default: **256**.
    pub vector_size: usize,

    /// Value of every entry in the constant coupling fixture. Default: **3**.
    pub constant_coupling: i64,

    /// Upper bound (inclusive) for random coupling entries. Default: **15**.
    pub random_max: i64,

    /// Accumulator throughput in columns per cycle. Default: **8**.
    pub columns_per_cycle: usize,

    /// Random `(old, new)` pairs checked per randomized scenario. Default: **16**.
    pub random_trials: usize,

    /// Seed for every random fixture. Default: **42**.
    pub seed: u64,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        GoldenConfig {
            vector_size: 256,
            constant_coupling: 3,
            random_max: 15,
            columns_per_cycle: 8,
            random_trials: 16,
            seed: 42,
        }
    }
}

impl GoldenConfig {
    /// Load and validate a config from a JSON file. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, and
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: GoldenConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this config as pretty-printed JSON, creating parent directories.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileRead {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("(serialization)", e.to_string()))?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Check that the configuration is coherent.
    ///
    /// - `vector_size` must be > 0.
    /// - `columns_per_cycle` must be in `[1, vector_size]`.
    /// - `random_max` must be >= 0.
    /// - `random_trials` must be > 0.
    /// - `4 · vector_size² · max(|constant_coupling|, random_max)` must fit
    ///   in `i64`, so every energy the suite computes is exact.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vector_size == 0 {
            return Err(ConfigError::invalid_value("vector_size", "must be > 0"));
        }
        if self.columns_per_cycle == 0 {
            return Err(ConfigError::invalid_value("columns_per_cycle", "must be > 0"));
        }
        if self.columns_per_cycle > self.vector_size {
            return Err(ConfigError::invalid_value(
                "columns_per_cycle",
                format!("must be <= vector_size ({})", self.vector_size),
            ));
        }
        if self.random_max < 0 {
            return Err(ConfigError::invalid_value("random_max", "must be >= 0"));
        }
        if self.random_trials == 0 {
            return Err(ConfigError::invalid_value("random_trials", "must be > 0"));
        }
        if self.energy_bound().is_none() {
            let field = if self.constant_coupling.unsigned_abs() >= self.random_max.unsigned_abs() {
                "constant_coupling"
            } else {
                "random_max"
            };
            return Err(ConfigError::invalid_value(
                field,
                format!(
                    "energies for vector_size {} would overflow i64",
                    self.vector_size
                ),
            ));
        }
        Ok(())
    }

    /// `ENERGY_HEADROOM · N² · max|J|`, or `None` if it overflows `i64`.
    fn energy_bound(&self) -> Option<i64> {
        let n = i64::try_from(self.vector_size).ok()?;
        let max_abs = self.constant_coupling.checked_abs()?.max(self.random_max);
        n.checked_mul(n)?
            .checked_mul(max_abs)?
            .checked_mul(ENERGY_HEADROOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        GoldenConfig::default().validate().unwrap();
    }

    #[test]
    fn throughput_above_vector_size_is_rejected() {
        let cfg = GoldenConfig {
            vector_size: 4,
            columns_per_cycle: 5,
            ..GoldenConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "columns_per_cycle", .. }));
    }

    #[test]
    fn negative_random_max_is_rejected() {
        let cfg = GoldenConfig {
            random_max: -1,
            ..GoldenConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn overflowing_coupling_is_rejected() {
        let cfg = GoldenConfig {
            constant_coupling: 1_000_000_000_000_000,
            ..GoldenConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "constant_coupling", .. }));
    }

    #[test]
    fn overflow_limit_is_exact() {
        // 4 * 256² = 2^18, so |J| up to 2^45 - 1 keeps every energy in i64.
        let at_limit = GoldenConfig {
            constant_coupling: -((1i64 << 45) - 1),
            ..GoldenConfig::default()
        };
        at_limit.validate().unwrap();

        let past_limit = GoldenConfig {
            constant_coupling: 1i64 << 45,
            ..at_limit.clone()
        };
        assert!(past_limit.validate().is_err());

        let min = GoldenConfig {
            constant_coupling: i64::MIN,
            ..GoldenConfig::default()
        };
        assert!(min.validate().is_err());
    }

    #[test]
    fn overflowing_random_max_is_rejected() {
        let cfg = GoldenConfig {
            random_max: i64::MAX / 2,
            ..GoldenConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "random_max", .. }));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: GoldenConfig = serde_json::from_str(r#"{ "vector_size": 32 }"#).unwrap();
        assert_eq!(cfg.vector_size, 32);
        assert_eq!(cfg.seed, 42);
    }
}
