//! Core grid mechanics for the 2048 sliding-tile puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Direction`: the four moves a player can make.
//! - `Board`: a 4x4 grid snapshot plus the score accumulated through merges,
//!   with the move, spawn and terminal-detection rules.
//! - `Game`: an owned board together with its random number generator, kind tag
//!   and move counter. This is what the binaries and the auto-play driver hold.
use crate::error::EngineError;
use crate::session::GameKind;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Width and height of the (always square) grid.
pub const BOARD_SIZE: usize = 4;

/// Reaching a tile of this value wins the game.
pub const WIN_TILE: u32 = 2048;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// A move direction.
///
/// `Direction::ALL` fixes the enumeration order (Left, Right, Up, Down). The
/// search strategies break ties by this order, so it must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Maps position `k` of line `line` to board coordinates, where `k == 0`
    /// is the cell on the edge the tiles slide toward.
    fn cell(&self, line: usize, k: usize) -> (usize, usize) {
        match self {
            Direction::Left => (line, k),
            Direction::Right => (line, BOARD_SIZE - 1 - k),
            Direction::Up => (k, line),
            Direction::Down => (BOARD_SIZE - 1 - k, line),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts the full names and the WASD keys, case-insensitively.
    ///
    /// ```
    /// use twenty48_solver::engine::Direction;
    /// assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
    /// assert_eq!("s".parse::<Direction>(), Ok(Direction::Down));
    /// assert!("sideways".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    /// Decodes the index of a direction within `Direction::ALL`.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| EngineError::InvalidArgument(format!("direction code {} out of range", code)))
    }
}

/// The result of applying a move to a board, before any tile is spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The shifted and merged board. Its score already includes `score_delta`.
    pub board: Board,
    /// Sum of the values produced by merges during this move.
    pub score_delta: u32,
    /// Whether any cell differs from the input board.
    pub changed: bool,
}

/// Terminal classification of a board, used by drivers for the end label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Returns `true` for values a tile may legally hold (a power of two >= 2).
pub fn is_valid_tile(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Slides the non-zero values of `line` toward index 0, keeping their order.
fn compress(line: [u32; BOARD_SIZE]) -> [u32; BOARD_SIZE] {
    let mut out = [0; BOARD_SIZE];
    let mut write = 0;
    for value in line.into_iter().filter(|&v| v != 0) {
        out[write] = value;
        write += 1;
    }
    out
}

/// Compress, merge each equal pair once scanning away from the edge, compress again.
///
/// A tile produced by a merge is never merged again in the same move because
/// its partner slot is zeroed before the scan moves past it.
fn slide_line(line: [u32; BOARD_SIZE]) -> ([u32; BOARD_SIZE], u32) {
    let mut line = compress(line);
    let mut gained = 0;
    for k in 0..BOARD_SIZE - 1 {
        if line[k] != 0 && line[k] == line[k + 1] {
            line[k] *= 2;
            line[k + 1] = 0;
            gained += line[k];
        }
    }
    (compress(line), gained)
}

/// An N x N grid of tiles plus the score accumulated by merges.
///
/// `Board` is `Copy`: every search branch works on its own snapshot and no
/// branch can observe another's state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u32; BOARD_SIZE]; BOARD_SIZE],
    score: u32,
}

impl Board {
    /// Creates a board with every cell empty and a score of zero.
    ///
    /// ```
    /// use twenty48_solver::engine::Board;
    /// let board = Board::new_empty();
    /// assert_eq!(board.get_tile(0, 0), 0);
    /// assert_eq!(board.empty_cells().len(), 16);
    /// ```
    pub fn new_empty() -> Self {
        Board::default()
    }

    /// Creates the starting board of a game.
    ///
    /// With `seed_tiles` set, two random tiles are placed on distinct cells;
    /// otherwise the board is left empty.
    pub fn initialize(seed_tiles: bool, rng: &mut impl Rng) -> Self {
        let mut board = Board::new_empty();
        if seed_tiles {
            board.spawn_random_tile(rng);
            board.spawn_random_tile(rng);
        }
        board
    }

    /// Creates a board from an explicit grid with a score of zero.
    ///
    /// # Errors
    /// `EngineError::InvalidArgument` if any non-zero cell is not a power of two >= 2.
    pub fn from_grid(grid: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, EngineError> {
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && !is_valid_tile(value) {
                    return Err(EngineError::InvalidArgument(format!(
                        "tile {} at ({}, {}) is not a power of two",
                        value, r, c
                    )));
                }
            }
        }
        Ok(Board { grid, score: 0 })
    }

    /// Returns a copy of this board carrying `score` instead of its own.
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// Returns the tile at (`r`, `c`); 0 means empty.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> u32 {
        self.grid[r][c]
    }

    /// Unchecked write used by the search to place simulated spawns on cells
    /// already known to be empty.
    pub(crate) fn set_tile(&mut self, r: usize, c: usize, value: u32) {
        self.grid[r][c] = value;
    }

    pub fn get_grid(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.grid[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    pub fn count_empty(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Sum of all tile values on the board.
    pub fn tile_sum(&self) -> u32 {
        self.grid.iter().flatten().sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Applies `direction` and returns the resulting board without spawning.
    ///
    /// Each row (Left/Right) or column (Up/Down) is processed independently:
    /// tiles are compressed toward the edge, equal neighbours merge once
    /// scanning outward from the edge, and the line is compressed again.
    /// The caller decides whether to spawn based on `changed`.
    ///
    /// ```
    /// use twenty48_solver::engine::{Board, Direction};
    /// let board = Board::from_grid([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// let outcome = board.apply_move(Direction::Left);
    /// assert_eq!(outcome.board.get_grid()[0], [4, 4, 0, 0]);
    /// assert_eq!(outcome.score_delta, 4);
    /// assert!(outcome.changed);
    /// ```
    pub fn apply_move(&self, direction: Direction) -> MoveOutcome {
        let mut next = *self;
        let mut score_delta = 0;

        for line_idx in 0..BOARD_SIZE {
            let mut line = [0; BOARD_SIZE];
            for (k, slot) in line.iter_mut().enumerate() {
                let (r, c) = direction.cell(line_idx, k);
                *slot = self.grid[r][c];
            }

            let (slid, gained) = slide_line(line);
            score_delta += gained;

            for (k, &value) in slid.iter().enumerate() {
                let (r, c) = direction.cell(line_idx, k);
                next.grid[r][c] = value;
            }
        }

        next.score += score_delta;
        MoveOutcome {
            board: next,
            score_delta,
            changed: next.grid != self.grid,
        }
    }

    /// Places a 2 (probability `SPAWN_TWO_PROBABILITY`) or a 4 on a uniformly
    /// chosen empty cell.
    ///
    /// # Returns
    /// The coordinates of the new tile, or `None` (and no change) if the board is full.
    pub fn spawn_random_tile(&mut self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        let &(r, c) = self.empty_cells().choose(rng)?;
        let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
        self.grid[r][c] = value;
        Some((r, c))
    }

    /// Deterministic counterpart of `spawn_random_tile` for tests and simulations.
    ///
    /// # Errors
    /// `EngineError::InvalidArgument` if the cell is outside the board, is not
    /// empty, or `value` is not a power of two >= 2.
    pub fn spawn_tile_at(&mut self, r: usize, c: usize, value: u32) -> Result<(), EngineError> {
        if r >= BOARD_SIZE || c >= BOARD_SIZE {
            return Err(EngineError::InvalidArgument(format!(
                "cell ({}, {}) is outside the {}x{} board",
                r, c, BOARD_SIZE, BOARD_SIZE
            )));
        }
        if !is_valid_tile(value) {
            return Err(EngineError::InvalidArgument(format!(
                "tile value {} is not a power of two",
                value
            )));
        }
        if self.grid[r][c] != 0 {
            return Err(EngineError::InvalidArgument(format!(
                "cell ({}, {}) is already occupied",
                r, c
            )));
        }
        self.grid[r][c] = value;
        Ok(())
    }

    /// Directions that would change the board, in `Direction::ALL` order.
    pub fn available_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.apply_move(d).changed)
            .collect()
    }

    /// `true` iff no direction changes the board.
    pub fn is_game_over(&self) -> bool {
        !Direction::ALL.iter().any(|&d| self.apply_move(d).changed)
    }

    /// `true` iff some cell holds `WIN_TILE`.
    pub fn is_win_state(&self) -> bool {
        self.grid.iter().flatten().any(|&v| v == WIN_TILE)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_win_state() {
            GameStatus::Won
        } else if self.is_game_over() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Renders the board for a terminal, optionally bracketing the tile at `pos`.
    ///
    /// Each tile gets an ANSI background colour keyed on its exponent; empty
    /// cells show as `.`. The last line carries the score.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let value = self.grid[r][c];
                let text = match (value, pos == Some((r, c))) {
                    (0, _) => ".".to_string(),
                    (v, true) => format!("[{}]", v),
                    (v, false) => v.to_string(),
                };
                output.push_str(&format!(
                    "\x1b[1;{}m{:^7}\x1b[m",
                    ansi_color_code(value),
                    text
                ));
            }
            output.push('\n');
        }
        output.push_str(&format!("Score: {}", self.score));
        output
    }
}

fn ansi_color_code(value: u32) -> &'static str {
    const PALETTE: [&str; 6] = ["47", "43", "41", "45", "44", "46"];
    if value == 0 {
        "40"
    } else {
        PALETTE[(value.trailing_zeros() as usize - 1) % PALETTE.len()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// A single running game: the board, which high-score slot it feeds, and the
/// random source used for spawns.
///
/// # Examples
/// ```
/// use twenty48_solver::engine::{Direction, Game};
/// use twenty48_solver::session::GameKind;
///
/// let mut game = Game::new_with_seed(GameKind::Classic, 7);
/// assert_eq!(game.board().count_empty(), 14);
///
/// for direction in Direction::ALL {
///     if game.process_move(direction) {
///         break;
///     }
/// }
/// assert_eq!(game.moves(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    kind: GameKind,
    rng: SmallRng,
    moves: u32,
    last_spawn: Option<(usize, usize)>,
}

impl Game {
    /// Starts a game with two random tiles, seeding the generator from entropy.
    pub fn new(kind: GameKind) -> Self {
        Game::from_rng(kind, SmallRng::from_entropy())
    }

    /// Starts a reproducible game: the same seed always yields the same spawns.
    pub fn new_with_seed(kind: GameKind, seed: u64) -> Self {
        Game::from_rng(kind, SmallRng::seed_from_u64(seed))
    }

    /// Resumes play from a given board. Later spawns come from `seed`.
    pub fn new_with_board(kind: GameKind, board: Board, seed: u64) -> Self {
        Game {
            board,
            kind,
            rng: SmallRng::seed_from_u64(seed),
            moves: 0,
            last_spawn: None,
        }
    }

    fn from_rng(kind: GameKind, mut rng: SmallRng) -> Self {
        let board = Board::initialize(true, &mut rng);
        Game {
            board,
            kind,
            rng,
            moves: 0,
            last_spawn: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Number of moves that changed the board since the last (re)start.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cell of the most recently spawned tile, if any move has been made.
    pub fn last_spawn(&self) -> Option<(usize, usize)> {
        self.last_spawn
    }

    /// Applies `direction`; when the board changes, commits it and spawns a tile.
    ///
    /// # Returns
    /// `true` if the move changed the board, `false` if it was a no-op (in
    /// which case nothing is spawned and the game is untouched).
    pub fn process_move(&mut self, direction: Direction) -> bool {
        let outcome = self.board.apply_move(direction);
        if !outcome.changed {
            return false;
        }

        self.board = outcome.board;
        self.last_spawn = self.board.spawn_random_tile(&mut self.rng);
        self.moves += 1;
        debug!(
            "{} moved {}: +{} (score {})",
            self.kind, direction, outcome.score_delta, self.board.score()
        );

        match self.board.status() {
            GameStatus::Won => info!("{} reached {} with score {}", self.kind, WIN_TILE, self.board.score()),
            GameStatus::Lost => info!("{} has no moves left, final score {}", self.kind, self.board.score()),
            GameStatus::InProgress => {}
        }
        true
    }

    /// Discards the current board and starts over with two random tiles.
    pub fn restart(&mut self) {
        info!("{} restarted after {} moves (score {})", self.kind, self.moves, self.board.score());
        self.board = Board::initialize(true, &mut self.rng);
        self.moves = 0;
        self.last_spawn = None;
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn is_win_state(&self) -> bool {
        self.board.is_win_state()
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn row_board(row: [u32; BOARD_SIZE]) -> Board {
        Board::from_grid([row, [0; BOARD_SIZE], [0; BOARD_SIZE], [0; BOARD_SIZE]]).unwrap()
    }

    #[test]
    fn test_new_empty_board() {
        let board = Board::new_empty();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                assert_eq!(board.get_tile(r, c), 0);
            }
        }
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_initialize_places_two_tiles() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = Board::initialize(true, &mut rng);
            let tiles: Vec<u32> = board.get_grid().iter().flatten().copied().filter(|&v| v != 0).collect();
            assert_eq!(tiles.len(), 2, "seed {} should start with two tiles", seed);
            assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        }

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(Board::initialize(false, &mut rng), Board::new_empty());
    }

    #[test]
    fn test_from_grid_rejects_non_powers_of_two() {
        let result = Board::from_grid([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
        let result = Board::from_grid([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(result.is_err(), "1 is not a legal tile");
    }

    #[test]
    fn test_move_left_no_cascade() {
        let outcome = row_board([2, 2, 4, 0]).apply_move(Direction::Left);
        assert_eq!(outcome.board.get_grid()[0], [4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(outcome.board.score(), 4);
        assert!(outcome.changed);
    }

    #[test]
    fn test_move_left_four_equal() {
        let outcome = row_board([4, 4, 4, 4]).apply_move(Direction::Left);
        assert_eq!(outcome.board.get_grid()[0], [8, 8, 0, 0]);
        assert_eq!(outcome.score_delta, 16);
    }

    #[test]
    fn test_move_right_merges_from_right_edge() {
        let outcome = row_board([2, 2, 2, 0]).apply_move(Direction::Right);
        assert_eq!(outcome.board.get_grid()[0], [0, 0, 2, 4]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_move_up_and_down_columns() {
        let board = board_from_str_array(&[
            "2 . . .",
            "2 . 8 .",
            ". . 8 .",
            "4 . 2 .",
        ])
        .unwrap();

        let up = board.apply_move(Direction::Up);
        let expected_up = board_from_str_array(&[
            "4 . 16 .",
            "4 . 2 .",
        ])
        .unwrap();
        assert_eq!(up.board.get_grid(), expected_up.get_grid());
        assert_eq!(up.score_delta, 4 + 16);

        let down = board.apply_move(Direction::Down);
        let expected_down = board_from_str_array(&[
            ". . . .",
            ". . . .",
            "4 . 16 .",
            "4 . 2 .",
        ])
        .unwrap();
        assert_eq!(down.board.get_grid(), expected_down.get_grid());
    }

    #[test]
    fn test_move_with_gap_merges_across_gap() {
        let outcome = row_board([2, 0, 0, 2]).apply_move(Direction::Left);
        assert_eq!(outcome.board.get_grid()[0], [4, 0, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_unchanged_move_is_stable() {
        let board = row_board([4, 2, 0, 0]);
        let first = board.apply_move(Direction::Left);
        assert!(!first.changed);
        assert_eq!(first.board, board);
        let second = first.board.apply_move(Direction::Left);
        assert!(!second.changed);
        assert_eq!(second.score_delta, 0);
    }

    #[test]
    fn test_spawn_random_tile_adds_two_or_four() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut board = Board::new_empty();
        for _ in 0..BOARD_SIZE * BOARD_SIZE {
            let sum_before = board.tile_sum();
            let empty_before = board.count_empty();
            let spawned = board.spawn_random_tile(&mut rng);
            assert!(spawned.is_some());
            let added = board.tile_sum() - sum_before;
            assert!(added == 2 || added == 4, "spawn added {}", added);
            assert_eq!(board.count_empty(), empty_before - 1);
        }

        let full = board;
        assert_eq!(board.spawn_random_tile(&mut rng), None);
        assert_eq!(board, full, "spawn on a full board must be a no-op");
    }

    #[test]
    fn test_spawn_random_tile_distribution() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut twos = 0;
        let trials = 2000;
        for _ in 0..trials {
            let mut board = Board::new_empty();
            let (r, c) = board.spawn_random_tile(&mut rng).unwrap();
            if board.get_tile(r, c) == 2 {
                twos += 1;
            }
        }
        let ratio = twos as f64 / trials as f64;
        assert!((0.85..0.95).contains(&ratio), "ratio of twos was {}", ratio);
    }

    #[test]
    fn test_spawn_tile_at_validation() {
        let mut board = Board::new_empty();
        assert!(board.spawn_tile_at(1, 2, 4).is_ok());
        assert_eq!(board.get_tile(1, 2), 4);
        assert!(board.spawn_tile_at(1, 2, 2).is_err(), "occupied cell");
        assert!(board.spawn_tile_at(BOARD_SIZE, 0, 2).is_err(), "out of bounds");
        assert!(board.spawn_tile_at(0, 0, 6).is_err(), "not a power of two");
    }

    #[test]
    fn test_available_moves_order_and_game_over() {
        let board = board_from_str_array(&["2 . . ."]).unwrap();
        assert_eq!(board.available_moves(), vec![Direction::Right, Direction::Down]);
        assert!(!board.is_game_over());

        let stuck = board_from_str_array(&[
            "2 4 2 4",
            "4 2 4 2",
            "2 4 2 4",
            "4 2 4 2",
        ])
        .unwrap();
        assert!(stuck.available_moves().is_empty());
        assert!(stuck.is_game_over());
        assert_eq!(stuck.status(), GameStatus::Lost);

        let full_but_mergeable = board_from_str_array(&[
            "2 2 4 8",
            "4 8 16 32",
            "8 16 32 64",
            "16 32 64 128",
        ])
        .unwrap();
        assert_eq!(full_but_mergeable.available_moves(), vec![Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_win_state() {
        let board = board_from_str_array(&[". . . 2048"]).unwrap();
        assert!(board.is_win_state());
        assert_eq!(board.status(), GameStatus::Won);
        let board = board_from_str_array(&["1024 1024 . ."]).unwrap();
        assert!(!board.is_win_state());
        assert!(board.apply_move(Direction::Left).board.is_win_state());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("d".parse::<Direction>(), Ok(Direction::Right));
        assert!(matches!(
            "north".parse::<Direction>(),
            Err(EngineError::InvalidArgument(_))
        ));
        assert_eq!(Direction::try_from(3), Ok(Direction::Down));
        assert!(Direction::try_from(4).is_err());
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["2 . . .", ". . . 2048"]).unwrap().with_score(36);
        let display = format!("{}", board);
        assert_eq!(display.lines().count(), BOARD_SIZE + 1);
        assert!(display.contains("2048"));
        assert!(display.ends_with("Score: 36"));

        let highlighted = board.to_string_with_highlight(Some((0, 0)));
        assert!(highlighted.contains("[2]"));
    }

    #[test]
    fn test_game_process_move_spawns_only_on_change() {
        let board = board_from_str_array(&["2 . . ."]).unwrap();
        let mut game = Game::new_with_board(GameKind::Classic, board, 5);

        assert!(!game.process_move(Direction::Left), "left does not move anything");
        assert_eq!(game.moves(), 0);
        assert_eq!(game.board(), &board);
        assert_eq!(game.last_spawn(), None);

        assert!(game.process_move(Direction::Right));
        assert_eq!(game.moves(), 1);
        assert_eq!(game.board().get_tile(0, 3), 2);
        assert_eq!(game.board().count_empty(), 14);
        assert!(game.last_spawn().is_some());
    }

    #[test]
    fn test_game_score_accumulates() {
        let board = board_from_str_array(&["2 2 4 4"]).unwrap();
        let mut game = Game::new_with_board(GameKind::Classic, board, 1);
        assert!(game.process_move(Direction::Left));
        assert_eq!(game.score(), 12);
    }

    #[test]
    fn test_game_seed_determinism_and_restart() {
        let a = Game::new_with_seed(GameKind::Ai, 42);
        let b = Game::new_with_seed(GameKind::Ai, 42);
        assert_eq!(a.board(), b.board());

        let mut game = Game::new_with_seed(GameKind::Player1, 3);
        for direction in Direction::ALL {
            game.process_move(direction);
        }
        game.restart();
        assert_eq!(game.moves(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().count_empty(), BOARD_SIZE * BOARD_SIZE - 2);
        assert_eq!(game.kind(), GameKind::Player1);
    }
}
