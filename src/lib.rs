//! # Flow Solver Library
//!
//! This library models a "connect the colored endpoints" grid puzzle and explores its
//! state space with five interchangeable search strategies.
//!
//! It is used by three binaries:
//! - `flow_solver`: Solves one board (a preset or a board file) with a chosen strategy.
//! - `flow_menu`: Interactive text menu to pick a preset board and a strategy.
//! - `algorithm_benchmark`: Runs every strategy over seeded random boards and
//!   compares node counts and times.
//!
//! ## Modules
//! - `board`: The puzzle state (`Board`) and its domain queries: goal test, dead-end
//!   detection, successor generation and heuristic.
//! - `heuristics`: Manhattan distance estimates over endpoint pairs.
//! - `node`: `SearchNode` bookkeeping and the `NodeArena` that links nodes to parents.
//! - `bucket`: `PriorityBucket`, the binary-heap frontier of the cost-ordered strategies.
//! - `solver`: Iterative deepening, A*, IDA*, beam search and breadth-first exploration.
//! - `config`: `SolverConfig` and the `Verbosity` levels.
//! - `catalog`: The predefined example boards.
//! - `utils`: Parsing boards from text.
//! - `error`: Error types.

pub mod board;
pub mod bucket;
pub mod catalog;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod node;
pub mod solver;
pub mod utils;

pub use board::Board;
pub use config::{SolverConfig, Verbosity};
pub use error::{BoardError, QueueError, SolveFault};
pub use solver::{solve, SearchOutcome, Strategy};
