use flow_solver::board::Board;
use flow_solver::config::{SolverConfig, Verbosity};
use flow_solver::solver::{solve, Strategy};
use std::collections::HashMap;
use std::num::NonZeroUsize;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const BOARD_SIZE: usize = 5;
const NUM_COLORS: usize = 3;

#[derive(Default)]
struct Totals {
    solved: usize,
    nodes: u64,
    seconds: f64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let beam_width = NonZeroUsize::new(3).expect("beam width is non-zero");
    let strategies = [
        Strategy::IterativeDeepening { max_depth: (BOARD_SIZE * BOARD_SIZE) as u32 },
        Strategy::AStar,
        Strategy::IdaStar,
        Strategy::Beam { width: beam_width },
        Strategy::BreadthFirst,
    ];
    let config = SolverConfig::with_verbosity(Verbosity::Silent);

    let mut totals: HashMap<&str, Totals> = HashMap::new();

    println!(
        "Starting evaluation on {} random {}x{} boards with {} colors...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION, BOARD_SIZE, BOARD_SIZE, NUM_COLORS
    );

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let seed = START_SEED + board_idx as u64;
        let board = match Board::random_with_seed(BOARD_SIZE, NUM_COLORS, seed) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Error: cannot generate board {} (Seed: {}): {}", board_idx, seed, e);
                return;
            }
        };

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);

        for strategy in &strategies {
            let outcome = solve(&board, *strategy, &config);
            if let Some(diagnostic) = &outcome.diagnostic {
                eprintln!("Warning: {} failed on board {}: {}", strategy.name(), board_idx, diagnostic);
            }
            println!(
                "  Strategy: {:<12}, Found: {:<5}, Nodes: {:<8}, Time: {:.4}s",
                strategy.name(),
                outcome.found,
                outcome.nodes_explored,
                outcome.elapsed_seconds()
            );

            let entry = totals.entry(strategy.name()).or_default();
            entry.solved += outcome.found as usize;
            entry.nodes += outcome.nodes_explored;
            entry.seconds += outcome.elapsed_seconds();
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", NUM_RANDOM_BOARDS_FOR_EVALUATION);
    println!("\n--- Averages ---");

    let boards = NUM_RANDOM_BOARDS_FOR_EVALUATION as f64;
    let mut averages: Vec<(&str, usize, f64, f64)> = totals
        .iter()
        .map(|(name, t)| (*name, t.solved, t.nodes as f64 / boards, t.seconds / boards))
        .collect();

    // Fewest nodes first
    averages.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    for (name, solved, nodes, seconds) in averages {
        println!(
            "Strategy {:<12}: Solved {}/{}, Average Nodes = {:.2}, Average Time = {:.6}s",
            name, solved, NUM_RANDOM_BOARDS_FOR_EVALUATION, nodes, seconds
        );
    }
}
