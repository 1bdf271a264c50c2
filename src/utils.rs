use crate::engine::{is_valid_tile, Board, BOARD_SIZE};
use crate::error::EngineError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0, holding whitespace-separated
/// cells. A cell is either a tile value (a power of two >= 2) or `.`/`0` for an
/// empty cell. Missing rows, and missing cells at the end of a row, are empty.
/// The returned board has a score of zero.
///
/// # Errors
/// `EngineError::Parse` if:
///   - there are more than `BOARD_SIZE` rows,
///   - a row has more than `BOARD_SIZE` cells,
///   - a cell is neither a number nor `.`, or is a number that is not a legal tile.
///
/// # Examples
/// ```
/// use twenty48_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&[
///     "2 . 4",
///     ". 2048",
/// ])
/// .unwrap();
/// assert_eq!(board.get_tile(0, 0), 2);
/// assert_eq!(board.get_tile(0, 2), 4);
/// assert_eq!(board.get_tile(0, 3), 0);
/// assert_eq!(board.get_tile(1, 1), 2048);
/// assert_eq!(board.get_tile(3, 3), 0);
///
/// assert!(board_from_str_array(&["2 3"]).is_err());
/// assert!(board_from_str_array(&["2 x"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, EngineError> {
    if s.len() > BOARD_SIZE {
        return Err(EngineError::Parse {
            row: BOARD_SIZE,
            message: format!(
                "invalid number of rows, expected at most {}, found {}",
                BOARD_SIZE,
                s.len()
            ),
        });
    }

    let mut grid = [[0u32; BOARD_SIZE]; BOARD_SIZE];

    for (r, row_str) in s.iter().enumerate() {
        let cells: Vec<&str> = row_str.split_whitespace().collect();
        if cells.len() > BOARD_SIZE {
            return Err(EngineError::Parse {
                row: r,
                message: format!(
                    "row is too long, expected at most {} cells, found {}",
                    BOARD_SIZE,
                    cells.len()
                ),
            });
        }

        for (c, cell) in cells.iter().enumerate() {
            grid[r][c] = match *cell {
                "." | "0" => 0,
                text => {
                    let value: u32 = text.parse().map_err(|_| EngineError::Parse {
                        row: r,
                        message: format!("unrecognized cell '{}' in col {}", text, c),
                    })?;
                    if !is_valid_tile(value) {
                        return Err(EngineError::Parse {
                            row: r,
                            message: format!("tile {} in col {} is not a power of two", value, c),
                        });
                    }
                    value
                }
            };
        }
    }

    Board::from_grid(grid)
}
