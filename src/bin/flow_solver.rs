use clap::{Parser, ValueEnum};
use flow_solver::board::Board;
use flow_solver::catalog::Preset;
use flow_solver::config::{SolverConfig, Verbosity};
use flow_solver::solver::{solve, Strategy};
use flow_solver::utils::read_board_file;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    /// Iterative deepening search
    Ids,
    AStar,
    IdaStar,
    Beam,
    /// Breadth-first exploration
    #[value(alias = "csp")]
    Bfs,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Predefined board to solve
    #[clap(short, long, value_enum, conflicts_with = "board_file")]
    preset: Option<Preset>,

    /// Path to a board file (one row per line, space-separated cell values, 0 = empty)
    board_file: Option<PathBuf>,

    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = Algorithm::Bfs)]
    algorithm: Algorithm,

    /// Maximum depth for iterative deepening
    #[clap(long, default_value_t = 20)]
    max_depth: u32,

    /// Width for beam search
    #[clap(short, long, default_value = "3")]
    width: NonZeroUsize,

    /// How much the search logs while it runs; also the default log filter unless RUST_LOG is set
    #[clap(short, long, value_enum, default_value_t = Verbosity::Basic)]
    verbosity: Verbosity,

    /// Print the goal, connectivity and dead-end checks for the initial board
    #[clap(long)]
    analyze: bool,
}

fn load_board(args: &Args) -> Result<Board, String> {
    match (&args.preset, &args.board_file) {
        (Some(preset), _) => preset
            .board()
            .map_err(|e| format!("Invalid preset board: {}", e)),
        (None, Some(path)) => read_board_file(path)
            .map_err(|e| format!("Invalid board file {}: {}", path.display(), e)),
        (None, None) => Err("Provide either --preset or a board file".to_string()),
    }
}

fn strategy_for(args: &Args) -> Strategy {
    match args.algorithm {
        Algorithm::Ids => Strategy::IterativeDeepening { max_depth: args.max_depth },
        Algorithm::AStar => Strategy::AStar,
        Algorithm::IdaStar => Strategy::IdaStar,
        Algorithm::Beam => Strategy::Beam { width: args.width },
        Algorithm::Bfs => Strategy::BreadthFirst,
    }
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.verbosity.log_filter()))
        .init();

    let board = match load_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Selected board:\n{}", board);
    if args.analyze {
        println!("{}\n", board.analyze());
    }

    let strategy = strategy_for(&args);
    let outcome = solve(&board, strategy, &SolverConfig::with_verbosity(args.verbosity));

    println!(
        "{} - Nodes explored: {}, Total time: {:.4} seconds.\n",
        strategy.name(),
        outcome.nodes_explored,
        outcome.elapsed_seconds()
    );

    match &outcome.solution {
        Some(path) if outcome.found => {
            println!("Solution found in {} moves!\n", path.len().saturating_sub(1));
            if let Some(solved) = path.last() {
                println!("{}", solved);
            }
        }
        _ => {
            println!("No solution found.");
            if let Some(diagnostic) = &outcome.diagnostic {
                println!("Search stopped early: {}", diagnostic);
            }
        }
    }
}
