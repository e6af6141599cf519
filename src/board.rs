//! Board model for the flow puzzle.
//!
//! This module defines:
//! - `Board`: a square grid of color ids (`0` is an empty cell) together with the
//!   domain queries the search strategies rely on: goal test, dead-end detection,
//!   successor generation and the heuristic estimate.
//! - `EndpointPair`: the two cells of a color that currently occupies exactly two cells.
//! - `BoardReport`: a summary of the domain queries for one board, used for diagnostics.
//!
//! Boards are never changed by the search. Every successor is a fresh clone with one
//! extra cell painted.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::fmt;

use crate::error::BoardError;
use crate::heuristics::pair_distance_sum;

/// Cell value of an unpainted cell.
pub const EMPTY: u8 = 0;

// Neighbour order is up, down, left, right; successor order depends on it.
const DR: [isize; 4] = [-1, 1, 0, 0];
const DC: [isize; 4] = [0, 0, -1, 1];

/// The two occupied cells of a well-formed color.
///
/// `first` is the cell met first in a row-major scan and is the only cell successor
/// generation ever extends from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointPair {
    /// The color id shared by both cells.
    pub color: u8,
    /// Row-major first cell, as `(row, col)`.
    pub first: (usize, usize),
    /// Row-major second cell, as `(row, col)`.
    pub second: (usize, usize),
}

/// A puzzle state: a `size` x `size` grid of color ids.
///
/// Equality and hashing compare the size and every cell, so two boards reached along
/// different paths are the same state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Creates a board from a row-major grid.
    ///
    /// # Arguments
    /// * `grid`: The rows of the board. Every row must have as many cells as there are rows.
    ///
    /// # Returns
    /// * `Ok(Board)` for a non-empty square grid.
    /// * `Err(BoardError::Empty)` if the grid has no rows.
    /// * `Err(BoardError::NotSquare { .. })` for the first row whose length differs.
    ///
    /// # Examples
    /// ```
    /// use flow_solver::board::Board;
    /// let board = Board::new(vec![vec![1, 0], vec![0, 1]]).unwrap();
    /// assert_eq!(board.size(), 2);
    /// assert!(Board::new(vec![vec![1, 0, 0], vec![0, 1]]).is_err());
    /// ```
    pub fn new(grid: Vec<Vec<u8>>) -> Result<Self, BoardError> {
        let size = grid.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, row_cells) in grid.into_iter().enumerate() {
            if row_cells.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    expected: size,
                    found: row_cells.len(),
                });
            }
            cells.extend(row_cells);
        }

        Ok(Board { size, cells })
    }

    /// Creates a board with `colors` endpoint pairs scattered over distinct cells.
    ///
    /// The same `seed` always yields the same board. Colors are numbered `1..=colors`
    /// and every other cell is empty.
    ///
    /// # Returns
    /// * `Err(BoardError::Empty)` if `size` is zero.
    /// * `Err(BoardError::TooManyColors { .. })` if the pairs do not fit on the board
    ///   or there are more colors than cell values.
    pub fn random_with_seed(size: usize, colors: usize, seed: u64) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if colors * 2 > size * size || colors > u8::MAX as usize {
            return Err(BoardError::TooManyColors { colors, size });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut positions: Vec<usize> = (0..size * size).collect();
        positions.shuffle(&mut rng);

        let mut cells = vec![EMPTY; size * size];
        for (i, pair) in positions.chunks_exact(2).take(colors).enumerate() {
            let color = (i + 1) as u8;
            cells[pair[0]] = color;
            cells[pair[1]] = color;
        }

        Ok(Board { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the color id at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `size()`.
    pub fn get_cell(&self, r: usize, c: usize) -> u8 {
        assert!(r < self.size && c < self.size, "cell ({r}, {c}) is outside the board");
        self.cells[r * self.size + c]
    }

    /// Paints the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `size()`.
    pub fn set_cell(&mut self, r: usize, c: usize, color: u8) {
        assert!(r < self.size && c < self.size, "cell ({r}, {c}) is outside the board");
        self.cells[r * self.size + c] = color;
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size)
    }

    /// Number of empty cells.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == EMPTY).count()
    }

    /// In-bounds orthogonal neighbours of `(r, c)` in up, down, left, right order.
    fn neighbors(&self, r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size as isize;
        (0..4).filter_map(move |i| {
            let nr = r as isize + DR[i];
            let nc = c as isize + DC[i];
            if nr >= 0 && nr < size && nc >= 0 && nc < size {
                Some((nr as usize, nc as usize))
            } else {
                None
            }
        })
    }

    fn is_border(&self, r: usize, c: usize) -> bool {
        r == 0 || c == 0 || r == self.size - 1 || c == self.size - 1
    }

    /// Groups occupied cells by color, in order of each color's first appearance
    /// in a row-major scan. Cells within a group are row-major too.
    fn cells_by_color(&self) -> Vec<(u8, Vec<(usize, usize)>)> {
        let mut groups: Vec<(u8, Vec<(usize, usize)>)> = Vec::new();
        for (r, row) in self.rows().enumerate() {
            for (c, &color) in row.iter().enumerate() {
                if color == EMPTY {
                    continue;
                }
                match groups.iter_mut().find(|(existing, _)| *existing == color) {
                    Some((_, cells)) => cells.push((r, c)),
                    None => groups.push((color, vec![(r, c)])),
                }
            }
        }
        groups
    }

    /// Every color that occupies exactly two cells, in first-appearance order.
    ///
    /// Colors with any other cell count are left out; the search ignores them.
    pub fn endpoint_pairs(&self) -> Vec<EndpointPair> {
        self.cells_by_color()
            .into_iter()
            .filter(|(_, cells)| cells.len() == 2)
            .map(|(color, cells)| EndpointPair {
                color,
                first: cells[0],
                second: cells[1],
            })
            .collect()
    }

    /// True when the board has no dead end and every well-formed color is connected.
    pub fn is_goal(&self) -> bool {
        !self.has_dead_end() && self.all_colors_connected()
    }

    /// Checks that each well-formed color can reach its partner.
    ///
    /// A cell is passable for a color if it is empty or already carries that color, so a
    /// pair separated only by empty cells counts as connected. Colors that do not occupy
    /// exactly two cells are skipped.
    pub fn all_colors_connected(&self) -> bool {
        self.endpoint_pairs()
            .iter()
            .all(|pair| self.path_exists(pair.first, pair.second, pair.color))
    }

    /// Breadth-first flood fill from `start` towards `end` through cells that are
    /// empty or of `color`.
    fn path_exists(&self, start: (usize, usize), end: (usize, usize), color: u8) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        queue.push_back(start);
        visited[start.0 * self.size + start.1] = true;

        while let Some(current) = queue.pop_front() {
            if current == end {
                return true;
            }

            for (nr, nc) in self.neighbors(current.0, current.1) {
                let idx = nr * self.size + nc;
                let cell = self.cells[idx];
                if !visited[idx] && (cell == EMPTY || cell == color) {
                    visited[idx] = true;
                    queue.push_back((nr, nc));
                }
            }
        }

        false
    }

    /// True if some empty cell cannot be reached from an empty border cell through
    /// other empty cells.
    pub fn has_dead_end(&self) -> bool {
        let reached = self.reachable_from_border();
        self.cells
            .iter()
            .zip(reached)
            .any(|(&cell, was_reached)| cell == EMPTY && !was_reached)
    }

    /// Flood fill over empty cells seeded with every empty border cell.
    fn reachable_from_border(&self) -> Vec<bool> {
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        for r in 0..self.size {
            for c in 0..self.size {
                let idx = r * self.size + c;
                if self.is_border(r, c) && self.cells[idx] == EMPTY {
                    visited[idx] = true;
                    queue.push_back((r, c));
                }
            }
        }

        while let Some((r, c)) = queue.pop_front() {
            for (nr, nc) in self.neighbors(r, c) {
                let idx = nr * self.size + nc;
                if !visited[idx] && self.cells[idx] == EMPTY {
                    visited[idx] = true;
                    queue.push_back((nr, nc));
                }
            }
        }

        visited
    }

    /// Generates every board reachable with one move.
    ///
    /// For each well-formed color, the `first` endpoint is extended into each empty
    /// neighbour (up, down, left, right). The second endpoint is never used. Once a
    /// color has been extended it occupies three cells and is no longer well-formed, so
    /// no descendant extends it again.
    ///
    /// # Returns
    /// The successor boards in generation order: colors in first-appearance order, then
    /// directions in neighbour order.
    pub fn successors(&self) -> Vec<Board> {
        let mut successors = Vec::new();
        for pair in self.endpoint_pairs() {
            let (r, c) = pair.first;
            for (nr, nc) in self.neighbors(r, c) {
                if self.get_cell(nr, nc) == EMPTY {
                    successors.push(self.with_cell(nr, nc, pair.color));
                }
            }
        }
        successors
    }

    fn with_cell(&self, r: usize, c: usize, color: u8) -> Board {
        let mut next = self.clone();
        next.cells[r * self.size + c] = color;
        next
    }

    /// Sum of the Manhattan distances between the endpoints of each well-formed color.
    ///
    /// Colors that do not occupy exactly two cells contribute nothing.
    pub fn heuristic(&self) -> u32 {
        pair_distance_sum(&self.endpoint_pairs())
    }

    /// Runs every domain query once and collects the answers.
    pub fn analyze(&self) -> BoardReport {
        BoardReport {
            all_colors_connected: self.all_colors_connected(),
            is_goal: self.is_goal(),
            available_moves: self.successors().len(),
            has_dead_end: self.has_dead_end(),
        }
    }
}

impl fmt::Display for Board {
    /// One row per line, cells separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Answers of the domain queries for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardReport {
    pub all_colors_connected: bool,
    pub is_goal: bool,
    pub available_moves: usize,
    pub has_dead_end: bool,
}

impl fmt::Display for BoardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_colors_connected {
            writeln!(f, "All flows are connected.")?;
        } else {
            writeln!(f, "Not all flows are connected.")?;
        }
        if self.is_goal {
            writeln!(f, "Board is a valid solution.")?;
        } else {
            writeln!(f, "Board is not a valid solution.")?;
        }
        writeln!(f, "Available moves: {}", self.available_moves)?;
        if self.has_dead_end {
            write!(f, "Board has dead ends.")
        } else {
            write!(f, "Board has no dead ends.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(board: &Board) -> u64 {
        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_rejects_empty_grid() {
        assert!(matches!(Board::new(Vec::new()), Err(BoardError::Empty)));
    }

    #[test]
    fn test_new_rejects_non_square_grid() {
        let result = Board::new(vec![vec![1, 0, 0], vec![0, 1, 0]]);
        assert!(matches!(
            result,
            Err(BoardError::NotSquare { row: 0, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = board_from_str_array(&["1 0", "0 1"]).unwrap();
        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.set_cell(0, 1, 1);
        assert_ne!(copy, board);
        assert_eq!(board.get_cell(0, 1), EMPTY);
    }

    #[test]
    fn test_equality_and_hash_follow_cells() {
        let a = board_from_str_array(&["1 0 2", "0 0 0", "1 0 2"]).unwrap();
        let b = board_from_str_array(&["1 0 2", "0 0 0", "1 0 2"]).unwrap();
        let c = board_from_str_array(&["1 0 2", "0 0 0", "1 2 0"]).unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);

        let smaller = board_from_str_array(&["1 0", "0 1"]).unwrap();
        assert_ne!(a, smaller);
    }

    #[test]
    fn test_endpoint_pairs_skip_malformed_colors() {
        let board = board_from_str_array(&["2 1 0", "1 0 3", "3 3 0"]).unwrap();
        let pairs = board.endpoint_pairs();
        assert_eq!(
            pairs,
            vec![EndpointPair { color: 1, first: (0, 1), second: (1, 0) }]
        );
    }

    #[test]
    fn test_heuristic_sums_manhattan_distances() {
        let board = board_from_str_array(&["0 1 0", "1 0 2", "0 2 0"]).unwrap();
        assert_eq!(board.heuristic(), 4);

        let board = board_from_str_array(&["1 0 0", "0 0 0", "0 0 1"]).unwrap();
        assert_eq!(board.heuristic(), 4);
    }

    #[test]
    fn test_heuristic_zero_without_pairs() {
        let empty = board_from_str_array(&["0 0", "0 0"]).unwrap();
        assert_eq!(empty.heuristic(), 0);

        let collapsed = board_from_str_array(&["1 1 1", "0 0 0", "2 0 0"]).unwrap();
        assert_eq!(collapsed.heuristic(), 0);
    }

    #[test]
    fn test_dead_end_detects_enclosed_cell() {
        let enclosed = board_from_str_array(&["0 1 0", "1 0 2", "0 2 0"]).unwrap();
        assert!(enclosed.has_dead_end());

        let open = board_from_str_array(&["1 0 0", "0 0 0", "1 0 0"]).unwrap();
        assert!(!open.has_dead_end());

        let full = board_from_str_array(&["1 1", "1 1"]).unwrap();
        assert!(!full.has_dead_end());
    }

    #[test]
    fn test_connectivity_through_empty_cells() {
        let open = board_from_str_array(&["1 0 0", "0 0 0", "1 0 0"]).unwrap();
        assert!(open.all_colors_connected());

        let walled = board_from_str_array(&["1 2 0", "2 0 0", "0 0 1"]).unwrap();
        assert!(!walled.all_colors_connected());
    }

    #[test]
    fn test_adjacent_via_empty_board_is_goal() {
        // Neither empty cell is painted, but both endpoints see each other through them.
        let board = board_from_str_array(&["1 0", "0 1"]).unwrap();
        assert!(board.is_goal());
    }

    #[test]
    fn test_successors_extend_first_endpoint_only() {
        let board = board_from_str_array(&["0 1 0", "1 0 2", "0 2 0"]).unwrap();
        let successors = board.successors();

        let expected: Vec<Board> = [
            ["0 1 0", "1 1 2", "0 2 0"],
            ["1 1 0", "1 0 2", "0 2 0"],
            ["0 1 1", "1 0 2", "0 2 0"],
            ["0 1 2", "1 0 2", "0 2 0"],
            ["0 1 0", "1 0 2", "0 2 2"],
            ["0 1 0", "1 2 2", "0 2 0"],
        ]
        .iter()
        .map(|rows| board_from_str_array(rows).unwrap())
        .collect();

        assert_eq!(successors, expected);
        // The source board is untouched.
        assert_eq!(board.get_cell(1, 1), EMPTY);
    }

    #[test]
    fn test_extended_color_is_exhausted() {
        let board = board_from_str_array(&["0 1 0", "1 0 2", "0 2 0"]).unwrap();
        let after_one = &board.successors()[0];
        let ones = |b: &Board| b.rows().flatten().filter(|&&cell| cell == 1).count();

        assert_eq!(ones(after_one), 3);
        for child in after_one.successors() {
            assert_eq!(ones(&child), 3, "color 1 extended again:\n{}", child);
            for grandchild in child.successors() {
                assert_eq!(ones(&grandchild), 3);
            }
        }
    }

    #[test]
    fn test_random_with_seed_is_deterministic() {
        let a = Board::random_with_seed(5, 3, 42).unwrap();
        let b = Board::random_with_seed(5, 3, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.endpoint_pairs().len(), 3);
        assert_eq!(a.empty_cells(), 25 - 6);
    }

    #[test]
    fn test_random_with_seed_rejects_overfull_board() {
        assert!(matches!(
            Board::random_with_seed(2, 3, 1),
            Err(BoardError::TooManyColors { colors: 3, size: 2 })
        ));
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["1 0", "0 1"]).unwrap();
        assert_eq!(board.to_string(), "1 0\n0 1\n");
    }

    #[test]
    fn test_analyze_reports_queries() {
        let board = board_from_str_array(&["0 1 0", "1 0 2", "0 2 0"]).unwrap();
        let report = board.analyze();
        assert_eq!(
            report,
            BoardReport {
                all_colors_connected: true,
                is_goal: false,
                available_moves: 6,
                has_dead_end: true,
            }
        );
        assert!(report.to_string().contains("Available moves: 6"));
    }
}
