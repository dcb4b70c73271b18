//! `verify-golden` binary: runs the golden-model reference scenarios.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | PASS: every checked scenario held |
//! | 1    | FAIL: at least one checked scenario failed, or the config was invalid |
//!
//! # Usage
//!
//! ```bash
//! # Default run (N = 256, 8 columns per cycle, seed 42)
//! cargo run --bin verify-golden
//!
//! # Print intermediate vectors and values for every scenario
//! cargo run --bin verify-golden -- --verbose
//!
//! # Pin a run to a config file
//! cargo run --bin verify-golden -- --write-config golden.json
//! cargo run --bin verify-golden -- --config golden.json
//! ```

use clap::Parser;
use std::path::PathBuf;

use ising_golden::config::GoldenConfig;
use ising_golden::suite::{run_suite, SuiteReport};

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Arguments for the `verify-golden` binary.
#[derive(Parser, Debug)]
#[command(
    name = "verify-golden",
    version,
    about = "Ising energy-accumulation golden model: column datapath vs closed form",
    long_about = None,
)]
struct Args {
    /// Load the run configuration from a JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of spin sites. Unless `--columns-per-cycle` is
    /// also given, the throughput is clamped to this size.
    #[arg(long)]
    vector_size: Option<usize>,

    /// Override the accumulator throughput.
    #[arg(long)]
    columns_per_cycle: Option<usize>,

    /// Override the fixture seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to this path and exit.
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Print every scenario's intermediate values.
    #[arg(long, short = 'v', default_value_t = false)]
    verbose: bool,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn resolve_config(&self) -> Result<GoldenConfig, ising_golden::ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => GoldenConfig::from_json(path)?,
            None => GoldenConfig::default(),
        };
        if let Some(n) = self.vector_size {
            cfg.vector_size = n;
            if self.columns_per_cycle.is_none() {
                cfg.columns_per_cycle = cfg.columns_per_cycle.min(n);
            }
        }
        if let Some(c) = self.columns_per_cycle {
            cfg.columns_per_cycle = c;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(
            args.log_level
                .parse::<tracing_subscriber::filter::LevelFilter>()
                .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cfg = match args.resolve_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.write_config {
        match cfg.to_json(path) {
            Ok(()) => {
                println!("Config written: {}", path.display());
                return;
            }
            Err(e) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
        }
    }

    print_banner(&cfg);

    let report = match run_suite(&cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    print_report(&report, args.verbose);

    if report.all_passed() {
        std::process::exit(0);
    }
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn print_banner(cfg: &GoldenConfig) {
    println!("{}", "=".repeat(72));
    println!("  Ising energy-accumulation golden model  (v{})", ising_golden::VERSION);
    println!("{}", "=".repeat(72));
    println!("  Vector size:       {}", cfg.vector_size);
    println!("  Constant J:        {}", cfg.constant_coupling);
    println!("  Random J range:    [0, {}]", cfg.random_max);
    println!("  Columns per cycle: {}", cfg.columns_per_cycle);
    println!("  Random trials:     {}", cfg.random_trials);
    println!("  Seed:              {}", cfg.seed);
    println!();
}

fn print_report(report: &SuiteReport, verbose: bool) {
    for (i, outcome) in report.outcomes.iter().enumerate() {
        let status = match (outcome.informational, outcome.passed) {
            (true, _) => "INFO",
            (false, true) => "PASS",
            (false, false) => "FAIL",
        };
        println!("[{:>2}] {:<22} {status}", i + 1, outcome.name);
        if verbose || !outcome.passed || outcome.informational {
            for line in &outcome.detail {
                println!("       {line}");
            }
        }
    }

    println!();
    println!("{}", "=".repeat(72));
    if report.all_passed() {
        println!("  PASS: {} checked scenarios held.", report.passed_count());
    } else {
        println!(
            "  FAIL: {} of {} checked scenarios failed.",
            report.failed_count(),
            report.failed_count() + report.passed_count()
        );
    }
    println!("{}", "=".repeat(72));
}
