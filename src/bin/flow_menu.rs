use clap::Parser;
use flow_solver::catalog::Preset;
use flow_solver::config::{SolverConfig, Verbosity};
use flow_solver::solver::{solve, Strategy};
use std::io::{self, Write};
use std::num::NonZeroUsize;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// How much the search logs while it runs; also the default log filter unless RUST_LOG is set
    #[clap(short, long, value_enum, default_value_t = Verbosity::Basic)]
    verbosity: Verbosity,
}

/// Prints `prompt` and reads one trimmed line. `None` on end of input or a read error.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn choose_preset() -> Option<Option<Preset>> {
    loop {
        println!("Select a board:");
        for (i, preset) in Preset::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, preset.description());
        }
        println!("{}. Quit", Preset::ALL.len() + 1);

        let input = prompt_line("Enter an option: ")?;
        match input.parse::<usize>() {
            Ok(n) if (1..=Preset::ALL.len()).contains(&n) => return Some(Some(Preset::ALL[n - 1])),
            Ok(n) if n == Preset::ALL.len() + 1 => return Some(None),
            _ => println!(
                "Invalid option. Please enter a number between 1 and {}.\n",
                Preset::ALL.len() + 1
            ),
        }
    }
}

/// Asks for an algorithm and its parameter. `Some(None)` means back to the board menu.
fn choose_strategy() -> Option<Option<Strategy>> {
    loop {
        println!("Select an algorithm:");
        println!("1. IDS (Iterative Deepening Search)");
        println!("2. A*");
        println!("3. IDA*");
        println!("4. CSP (breadth-first exploration)");
        println!("5. Beam Search");
        println!("6. Back to board selection");

        let input = prompt_line("Enter an option: ")?;
        let strategy = match input.as_str() {
            "1" => {
                let depth = prompt_line("Enter the maximum depth for IDS: ")?;
                match depth.parse::<u32>() {
                    Ok(max_depth) => Strategy::IterativeDeepening { max_depth },
                    Err(_) => {
                        println!("Invalid depth. It must be a non-negative integer.\n");
                        continue;
                    }
                }
            }
            "2" => Strategy::AStar,
            "3" => Strategy::IdaStar,
            "4" => Strategy::BreadthFirst,
            "5" => {
                let width = prompt_line("Enter the width for Beam Search: ")?;
                match width.parse::<NonZeroUsize>() {
                    Ok(width) => Strategy::Beam { width },
                    Err(_) => {
                        println!("Invalid width. It must be a positive integer.\n");
                        continue;
                    }
                }
            }
            "6" => return Some(None),
            _ => {
                println!("Invalid option. Please enter a number between 1 and 6.\n");
                continue;
            }
        };
        return Some(Some(strategy));
    }
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.verbosity.log_filter()))
        .init();
    let config = SolverConfig::with_verbosity(args.verbosity);

    while let Some(Some(preset)) = choose_preset() {
        let board = match preset.board() {
            Ok(board) => board,
            Err(e) => {
                println!("Error loading board: {}\n", e);
                continue;
            }
        };
        println!("\nSelected board:\n{}", board);

        loop {
            let strategy = match choose_strategy() {
                Some(Some(strategy)) => strategy,
                Some(None) => {
                    println!();
                    break;
                }
                None => return,
            };

            let outcome = solve(&board, strategy, &config);
            println!(
                "{} - Nodes explored: {}, Total time: {:.4} seconds.\n",
                strategy.name(),
                outcome.nodes_explored,
                outcome.elapsed_seconds()
            );

            match outcome.solution.as_ref().and_then(|path| path.last()) {
                Some(solved) if outcome.found => println!("Solution found!\n{}", solved),
                _ => println!("No solution found.\n"),
            }
        }
    }

    println!("Goodbye!");
}
