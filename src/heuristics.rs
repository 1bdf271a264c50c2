//! Static evaluation of a board.
//!
//! `evaluate` is a fixed linear combination of four positional terms. Each
//! term is public so the evaluator binary and tests can inspect them on their
//! own; the weights are constants and cannot be changed per call.
use crate::engine::{Board, BOARD_SIZE};

/// Weight of [`smoothness`] in [`evaluate`].
pub const SMOOTHNESS_WEIGHT: f64 = 1.0;
/// Weight of [`empty_bonus`] in [`evaluate`].
pub const EMPTY_WEIGHT: f64 = 0.3;
/// Weight of [`potential_merges`] in [`evaluate`].
pub const MERGE_WEIGHT: f64 = 0.001;
/// Weight of [`monotonicity`] in [`evaluate`].
pub const MONOTONICITY_WEIGHT: f64 = 0.05;

/// Factor applied to the empty bonus once per empty cell.
pub const EMPTY_CELL_GROWTH: f64 = 1.1;
/// Weight of each horizontally adjacent equal pair.
pub const HORIZONTAL_MERGE_WEIGHT: f64 = 1.0;
/// Weight of each vertically adjacent equal pair.
pub const VERTICAL_MERGE_WEIGHT: f64 = 0.6;

/// Positional weights, all powers of 4, descending along a serpentine path:
/// the top row left to right from 4^15, the second row right to left, and so on.
pub const SNAKE_WEIGHTS: [[u64; BOARD_SIZE]; BOARD_SIZE] = [
    [1 << 30, 1 << 28, 1 << 26, 1 << 24],
    [1 << 16, 1 << 18, 1 << 20, 1 << 22],
    [1 << 14, 1 << 12, 1 << 10, 1 << 8],
    [1, 1 << 2, 1 << 4, 1 << 6],
];

/// Dot product of the tile values with [`SNAKE_WEIGHTS`].
///
/// Rewards boards whose large tiles follow the snake ordering from the top-left corner.
pub fn smoothness(board: &Board) -> f64 {
    let mut total = 0.0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            total += board.get_tile(r, c) as f64 * SNAKE_WEIGHTS[r][c] as f64;
        }
    }
    total
}

/// Starts at 1 and multiplies by [`EMPTY_CELL_GROWTH`] for every empty cell.
pub fn empty_bonus(board: &Board) -> f64 {
    EMPTY_CELL_GROWTH.powi(board.count_empty() as i32)
}

/// Weighted count of adjacent non-empty pairs holding the same value.
///
/// # Returns
/// `HORIZONTAL_MERGE_WEIGHT * horizontal_pairs + VERTICAL_MERGE_WEIGHT * vertical_pairs`.
pub fn potential_merges(board: &Board) -> f64 {
    let mut horizontal = 0u32;
    let mut vertical = 0u32;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = board.get_tile(r, c);
            if value == 0 {
                continue;
            }
            if c + 1 < BOARD_SIZE && board.get_tile(r, c + 1) == value {
                horizontal += 1;
            }
            if r + 1 < BOARD_SIZE && board.get_tile(r + 1, c) == value {
                vertical += 1;
            }
        }
    }
    HORIZONTAL_MERGE_WEIGHT * horizontal as f64 + VERTICAL_MERGE_WEIGHT * vertical as f64
}

/// Sum of absolute differences between successive cells of `line`, plus 1 if
/// the line never increases.
fn line_monotonicity(line: [u32; BOARD_SIZE]) -> f64 {
    let spread: u64 = line
        .windows(2)
        .map(|pair| (pair[0] as i64 - pair[1] as i64).unsigned_abs())
        .sum();
    let non_increasing = line.windows(2).all(|pair| pair[0] >= pair[1]);
    spread as f64 + if non_increasing { 1.0 } else { 0.0 }
}

/// [`line_monotonicity`] summed over every row (read left to right) and every
/// column (read top to bottom).
pub fn monotonicity(board: &Board) -> f64 {
    let grid = board.get_grid();
    let rows: f64 = grid.iter().map(|&row| line_monotonicity(row)).sum();
    let cols: f64 = (0..BOARD_SIZE)
        .map(|c| {
            let mut col = [0; BOARD_SIZE];
            for (r, slot) in col.iter_mut().enumerate() {
                *slot = grid[r][c];
            }
            line_monotonicity(col)
        })
        .sum();
    rows + cols
}

/// Scores `board` for the search; larger is better.
///
/// # Examples
/// ```
/// use twenty48_solver::engine::Board;
/// use twenty48_solver::heuristics::evaluate;
///
/// let empty = Board::new_empty();
/// let one_tile = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
/// assert!(evaluate(&one_tile) > evaluate(&empty));
/// ```
pub fn evaluate(board: &Board) -> f64 {
    SMOOTHNESS_WEIGHT * smoothness(board)
        + EMPTY_WEIGHT * empty_bonus(board)
        + MERGE_WEIGHT * potential_merges(board)
        + MONOTONICITY_WEIGHT * monotonicity(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_snake_weights_are_distinct_powers_of_four() {
        let mut exponents: Vec<u32> = SNAKE_WEIGHTS
            .iter()
            .flatten()
            .map(|w| {
                assert!(w.is_power_of_two() && w.trailing_zeros() % 2 == 0);
                w.trailing_zeros() / 2
            })
            .collect();
        exponents.sort_unstable();
        assert_eq!(exponents, (0..16).collect::<Vec<u32>>());
        assert_eq!(SNAKE_WEIGHTS[0][0], 1 << 30, "largest weight sits in the top-left corner");
    }

    #[test]
    fn test_snake_weights_descend_along_serpentine() {
        let path: Vec<u64> = (0..BOARD_SIZE)
            .flat_map(|r| {
                let row = SNAKE_WEIGHTS[r];
                if r % 2 == 0 {
                    row.to_vec()
                } else {
                    row.iter().rev().copied().collect()
                }
            })
            .collect();
        assert_eq!(path[0], 1 << 30);
        assert_eq!(path[BOARD_SIZE - 1], SNAKE_WEIGHTS[0][BOARD_SIZE - 1]);
        assert!(path.windows(2).all(|w| w[0] == w[1] * 4));
    }

    #[test]
    fn test_smoothness_prefers_corner() {
        let corner = board_from_str_array(&["2 . . ."]).unwrap();
        assert_eq!(smoothness(&corner), 2.0 * (1u64 << 30) as f64);
        let far = board_from_str_array(&[". . . .", ". . . .", ". . . .", "2 . . ."]).unwrap();
        assert_eq!(smoothness(&far), 2.0);
    }

    #[test]
    fn test_empty_bonus() {
        assert!(approx_eq(empty_bonus(&Board::new_empty()), 1.1f64.powi(16)));
        let full = board_from_str_array(&[
            "2 4 2 4",
            "4 2 4 2",
            "2 4 2 4",
            "4 2 4 2",
        ])
        .unwrap();
        assert_eq!(empty_bonus(&full), 1.0);
    }

    #[test]
    fn test_potential_merges_weights() {
        let horizontal = board_from_str_array(&["2 2 2 ."]).unwrap();
        assert!(approx_eq(potential_merges(&horizontal), 2.0));

        let vertical = board_from_str_array(&["4 . . .", "4 . . ."]).unwrap();
        assert!(approx_eq(potential_merges(&vertical), 0.6));

        assert_eq!(potential_merges(&Board::new_empty()), 0.0, "empty pairs are not merges");
    }

    #[test]
    fn test_monotonicity() {
        let ordered = board_from_str_array(&["8 4 2 ."]).unwrap();
        assert_eq!(monotonicity(&ordered), 30.0);

        let reversed = board_from_str_array(&[". 2 4 8"]).unwrap();
        assert_eq!(monotonicity(&reversed), 29.0);

        assert_eq!(monotonicity(&Board::new_empty()), 8.0);
    }

    #[test]
    fn test_evaluate_combines_terms() {
        let board = board_from_str_array(&["8 4 2 .", "2 2 . ."]).unwrap();
        let expected = SMOOTHNESS_WEIGHT * smoothness(&board)
            + EMPTY_WEIGHT * empty_bonus(&board)
            + MERGE_WEIGHT * potential_merges(&board)
            + MONOTONICITY_WEIGHT * monotonicity(&board);
        assert!(approx_eq(evaluate(&board), expected));

        let empty = Board::new_empty();
        assert!(approx_eq(evaluate(&empty), 0.3 * 1.1f64.powi(16) + 0.05 * 8.0));
    }

    #[test]
    fn test_evaluate_ignores_score() {
        let board = board_from_str_array(&["2 . . ."]).unwrap();
        assert_eq!(evaluate(&board), evaluate(&board.with_score(1000)));
    }
}
