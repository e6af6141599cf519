//! Solver configuration threaded into every strategy entry point.
use clap::ValueEnum;

/// How much the strategies report through the `log` facade while they run.
///
/// Each level includes everything the levels below it emit:
/// - `Silent`: nothing except faults.
/// - `Basic`: strategy start, depth limits and bounds, the final verdict (`info`).
/// - `Detailed`: successor counts and beam sizes (`debug`).
/// - `Verbose`: rendered boards of the states being expanded (`trace`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Verbosity {
    Silent,
    #[default]
    Basic,
    Detailed,
    Verbose,
}

impl Verbosity {
    /// The `env_logger` filter that lets every message of this level through.
    ///
    /// Faults are logged at `error`, so even `Silent` keeps that level.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Silent => "error",
            Verbosity::Basic => "info",
            Verbosity::Detailed => "debug",
            Verbosity::Verbose => "trace",
        }
    }
}

/// Settings shared by all strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub verbosity: Verbosity,
}

impl SolverConfig {
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        SolverConfig { verbosity }
    }

    /// True if messages of `level` should be emitted.
    pub fn reports(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }
}
