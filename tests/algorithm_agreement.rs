use flow_solver::board::Board;
use flow_solver::catalog::Preset;
use flow_solver::solver::{a_star, beam_search, breadth_first, ida_star, iterative_deepening};
use flow_solver::utils::board_from_str_array;
use flow_solver::{SolverConfig, Verbosity};
use std::num::NonZeroUsize;

fn small_boards() -> Vec<Board> {
    let mut boards: Vec<Board> = [
        vec!["1 0", "0 1"],
        vec!["1 0 0", "0 0 0", "1 0 0"],
        vec!["0 1 0", "1 0 2", "0 2 0"],
        vec!["1 2 0", "2 0 0", "0 0 1"],
        vec!["1 0 1", "0 0 0", "2 0 2"],
        vec!["0 0 0", "0 1 0", "0 0 1"],
    ]
    .iter()
    .map(|rows| board_from_str_array(rows).unwrap())
    .collect();

    for seed in 0..20 {
        boards.push(Board::random_with_seed(3, 2, seed).unwrap());
    }
    boards
}

#[test_log::test]
fn complete_strategies_agree_on_small_boards() {
    let config = SolverConfig::with_verbosity(Verbosity::Silent);

    for board in small_boards() {
        // Every move paints an empty cell, so no path is longer than the empty count.
        let max_depth = board.empty_cells() as u32;

        let outcomes = [
            ("IDS", iterative_deepening(&board, max_depth, &config)),
            ("A*", a_star(&board, &config)),
            ("IDA*", ida_star(&board, &config)),
            ("BFS", breadth_first(&board, &config)),
        ];

        let expected = outcomes[0].1.found;
        for (name, outcome) in &outcomes {
            assert_eq!(outcome.found, expected, "{} disagrees on board:\n{}", name, board);
            assert!(outcome.nodes_explored >= 1);
            assert!(outcome.diagnostic.is_none());
            if let Some(path) = &outcome.solution {
                assert_eq!(&path[0], &board);
                assert!(path.last().unwrap().is_goal());
            }
        }

        // Beam search may miss a solution, but never reports one that is not there.
        let beam = beam_search(&board, NonZeroUsize::new(1).unwrap(), &config);
        if beam.found {
            assert!(expected, "beam search solved an unsolvable board:\n{}", board);
        }
    }
}

#[test_log::test]
fn three_by_three_scenario_under_breadth_first() {
    let board = Preset::OneColor3x3.board().unwrap();
    let outcome = breadth_first(&board, &SolverConfig::default());

    assert!(outcome.nodes_explored > 0);
    // Both endpoints see each other through the empty middle column already.
    assert!(board.is_goal());
    assert!(outcome.found);
    assert_eq!(outcome.nodes_explored, 1);
    assert_eq!(outcome.solution.unwrap()[0], board);
}

#[test_log::test]
fn trivial_two_by_two_needs_no_expansion() {
    let board = Preset::OneColor2x2.board().unwrap();
    let config = SolverConfig::default();

    let outcomes = [
        iterative_deepening(&board, 0, &config),
        a_star(&board, &config),
        ida_star(&board, &config),
        beam_search(&board, NonZeroUsize::new(1).unwrap(), &config),
        breadth_first(&board, &config),
    ];
    for outcome in outcomes {
        assert!(outcome.found);
        assert_eq!(outcome.nodes_explored, 1);
    }
}
