use crate::board::Board;
use crate::error::BoardError;
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0, holding whitespace-separated cell
/// values: `0` for an empty cell and a positive number for a color id. The grid must be
/// square.
///
/// # Arguments
/// * `s`: The rows of the board, top to bottom.
///
/// # Returns
/// * `Ok(Board)` if every token is a cell value and the grid is square.
/// * `Err(BoardError::InvalidCell { .. })` for the first token that is not a number in `0..=255`.
/// * `Err(BoardError::Empty)` or `Err(BoardError::NotSquare { .. })` from [`Board::new`].
///
/// # Examples
/// ```
/// use flow_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 0 2", "0 0 0", "1 0 2"]).unwrap();
/// assert_eq!(board.size(), 3);
/// assert_eq!(board.get_cell(2, 2), 2);
///
/// assert!(board_from_str_array(&["1 x", "0 1"]).is_err());
/// assert!(board_from_str_array(&["1 0 0", "0 1"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    let mut grid = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::new();
        for (c, token) in row_str.split_whitespace().enumerate() {
            let cell = token.parse::<u8>().map_err(|_| BoardError::InvalidCell {
                row: r,
                col: c,
                token: token.to_string(),
            })?;
            row.push(cell);
        }
        grid.push(row);
    }

    Board::new(grid)
}

/// Reads a board from a text file in the `board_from_str_array` format.
///
/// Blank lines and surrounding whitespace are ignored.
pub fn read_board_file(path: &Path) -> Result<Board, BoardError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EMPTY;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["1 0 0 0 2", "0 0 0 0 0", "0 0 0 0 0", "0 0 0 0 0", "1 0 0 0 2"])
            .unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.get_cell(0, 0), 1);
        assert_eq!(board.get_cell(4, 4), 2);
        assert_eq!(board.get_cell(2, 2), EMPTY);
    }

    #[test]
    fn test_board_from_str_array_extra_spaces() {
        let board = board_from_str_array(&["  1   0 ", "0\t1"]).unwrap();
        assert_eq!(board.to_string(), "1 0\n0 1\n");
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["1 0", "0 x"]);
        match result {
            Err(BoardError::InvalidCell { row, col, token }) => {
                assert_eq!((row, col), (1, 1));
                assert_eq!(token, "x");
            }
            other => panic!("expected InvalidCell, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_array_out_of_range_color() {
        assert!(matches!(
            board_from_str_array(&["256 0", "0 1"]),
            Err(BoardError::InvalidCell { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn test_board_from_str_array_not_square() {
        let result = board_from_str_array(&["1 0 0", "0 1 0"]);
        assert!(matches!(result, Err(BoardError::NotSquare { .. })));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board_str: [&str; 0] = [];
        assert!(matches!(board_from_str_array(&board_str), Err(BoardError::Empty)));
    }

    #[test]
    fn test_read_board_file_skips_blank_lines() {
        let path = std::env::temp_dir().join(format!("flow_solver_board_{}.txt", std::process::id()));
        fs::write(&path, "\n1 0 0\n\n0 0 0\n1 0 0\n\n").unwrap();
        let board = read_board_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(board, board_from_str_array(&["1 0 0", "0 0 0", "1 0 0"]).unwrap());
    }

    #[test]
    fn test_read_board_file_missing() {
        let path = std::env::temp_dir().join("flow_solver_missing_board_file.txt");
        assert!(matches!(read_board_file(&path), Err(BoardError::Io(_))));
    }
}
