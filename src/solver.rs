//! Move selection.
//!
//! Two strategies pick a direction for a board:
//! - `Strategy::AlphaBetaMinimax`: depth-limited minimax with alpha-beta pruning
//!   where MAX and MIN both choose among the available directions.
//! - `Strategy::GreedyExpectimax`: for each direction, the expected heuristic
//!   value over every possible tile spawn, a fixed number of plies deep.
//!
//! Both are pure functions of the board. Successor boards are computed with
//! `Board::apply_move` only; no random tile is spawned inside the search.
//! `AutoPlayer` wraps a strategy in the Idle/Running loop used for AI play.
use crate::engine::{Board, Direction, Game, GameStatus, SPAWN_TWO_PROBABILITY};
use crate::heuristics::evaluate;
use log::{debug, info};
#[cfg(test)]
use std::cell::Cell;
use std::fmt;

/// Default search depth for `Strategy::AlphaBetaMinimax`.
pub const DEFAULT_MINIMAX_DEPTH: u32 = 7;

/// Default lookahead for `Strategy::GreedyExpectimax`.
pub const DEFAULT_EXPECTIMAX_PLY: u32 = 2;

/// Spawn outcomes considered at each chance node, with their probabilities.
const CHANCE_OUTCOMES: [(u32, f64); 2] = [(2, SPAWN_TWO_PROBABILITY), (4, 1.0 - SPAWN_TWO_PROBABILITY)];

#[cfg(test)]
thread_local! {
    static ALPHA_BETA_NODES: Cell<u64> = const { Cell::new(0) };
}

/// A move-selection algorithm and its search bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    AlphaBetaMinimax { depth: u32 },
    GreedyExpectimax { max_ply: u32 },
}

impl Strategy {
    /// Alpha-beta minimax at `DEFAULT_MINIMAX_DEPTH`.
    pub fn alpha_beta() -> Self {
        Strategy::AlphaBetaMinimax {
            depth: DEFAULT_MINIMAX_DEPTH,
        }
    }

    /// Greedy expectimax at `DEFAULT_EXPECTIMAX_PLY`.
    pub fn expectimax() -> Self {
        Strategy::GreedyExpectimax {
            max_ply: DEFAULT_EXPECTIMAX_PLY,
        }
    }
}

impl Default for Strategy {
    /// Expectimax is the strategy that drives live AI play.
    fn default() -> Self {
        Strategy::expectimax()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AlphaBetaMinimax { depth } => write!(f, "alpha-beta(depth={})", depth),
            Strategy::GreedyExpectimax { max_ply } => write!(f, "expectimax(ply={})", max_ply),
        }
    }
}

/// Outcome of a search: the chosen direction (if any) and its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Direction>,
    pub value: f64,
}

/// Minimax with alpha-beta pruning.
///
/// Cutoffs, checked in this order: `depth == 0` yields the heuristic value of
/// `board` and no move; a board with no available moves yields `-inf`; a board
/// holding the winning tile yields `+inf`. Otherwise the available moves are
/// tried in `Direction::ALL` order and iteration stops once `beta <= alpha`.
/// If no move strictly improves on the starting sentinel the first available
/// move is reported.
pub fn alpha_beta(board: &Board, depth: u32, mut alpha: f64, mut beta: f64, maximizing: bool) -> SearchResult {
    #[cfg(test)]
    ALPHA_BETA_NODES.with(|nodes| nodes.set(nodes.get() + 1));

    if depth == 0 {
        return SearchResult {
            best_move: None,
            value: evaluate(board),
        };
    }

    let moves = board.available_moves();
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            value: f64::NEG_INFINITY,
        };
    }
    if board.is_win_state() {
        return SearchResult {
            best_move: None,
            value: f64::INFINITY,
        };
    }

    let mut best_move = moves[0];
    let mut best_value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };

    for &direction in &moves {
        let child = board.apply_move(direction).board;
        let value = alpha_beta(&child, depth - 1, alpha, beta, !maximizing).value;

        if maximizing {
            if value > best_value {
                best_value = value;
                best_move = direction;
            }
            alpha = alpha.max(value);
        } else {
            if value < best_value {
                best_value = value;
                best_move = direction;
            }
            beta = beta.min(value);
        }

        if beta <= alpha {
            break;
        }
    }

    SearchResult {
        best_move: Some(best_move),
        value: best_value,
    }
}

/// Root call of `alpha_beta`: a MAX node with an unbounded window.
pub fn minimax(board: &Board, depth: u32) -> SearchResult {
    alpha_beta(board, depth, f64::NEG_INFINITY, f64::INFINITY, true)
}

/// Expected value of `board` with `ply` of `max_ply` plies already expanded.
///
/// At the last ply this is the heuristic value. Otherwise every empty cell is
/// a chance node: a 2 with probability 0.9 and a 4 with probability 0.1, each
/// followed by the best value over the directions that change the board (0 if
/// none do). The weighted values are summed over all empty cells.
pub fn expected_value(board: &Board, ply: u32, max_ply: u32) -> f64 {
    if ply >= max_ply {
        return evaluate(board);
    }

    let mut total = 0.0;
    for (r, c) in board.empty_cells() {
        for (value, probability) in CHANCE_OUTCOMES {
            let mut spawned = *board;
            spawned.set_tile(r, c, value);
            total += probability * best_reply_value(&spawned, ply, max_ply);
        }
    }
    total
}

fn best_reply_value(board: &Board, ply: u32, max_ply: u32) -> f64 {
    Direction::ALL
        .iter()
        .filter_map(|&direction| {
            let outcome = board.apply_move(direction);
            outcome
                .changed
                .then(|| expected_value(&outcome.board, ply + 1, max_ply))
        })
        .fold(0.0, f64::max)
}

/// Greedy expectimax at the root.
///
/// Scores each available direction with `expected_value(successor, 0, max_ply)`
/// and keeps the first direction with the strictly greatest score.
pub fn expectimax(board: &Board, max_ply: u32) -> SearchResult {
    let mut best = SearchResult {
        best_move: None,
        value: f64::NEG_INFINITY,
    };

    for direction in board.available_moves() {
        let outcome = board.apply_move(direction);
        let score = if outcome.changed {
            expected_value(&outcome.board, 0, max_ply)
        } else {
            0.0
        };
        debug!("expectimax: {} scores {}", direction, score);

        if score > best.value {
            best = SearchResult {
                best_move: Some(direction),
                value: score,
            };
        }
    }
    best
}

/// Runs `strategy` on `board`.
///
/// `AlphaBetaMinimax { depth: 0 }` reports the heuristic value of `board`
/// itself together with the first available move, so a driver never stalls
/// while moves remain. At every depth, a root that already holds the winning
/// tile returns no move.
pub fn search(board: &Board, strategy: Strategy) -> SearchResult {
    let result = match strategy {
        Strategy::AlphaBetaMinimax { depth: 0 } => SearchResult {
            best_move: if board.is_win_state() {
                None
            } else {
                board.available_moves().first().copied()
            },
            value: evaluate(board),
        },
        Strategy::AlphaBetaMinimax { depth } => minimax(board, depth),
        Strategy::GreedyExpectimax { max_ply } => expectimax(board, max_ply),
    };
    debug!("{} chose {:?} (value {})", strategy, result.best_move, result.value);
    result
}

/// The direction `strategy` recommends for `board`, or `None` when it has no move.
///
/// The returned direction is always one of `board.available_moves()`.
pub fn compute_best_move(board: &Board, strategy: Strategy) -> Option<Direction> {
    search(board, strategy).best_move
}

/// Whether the auto-player is making moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoPlayState {
    Idle,
    Running,
}

/// What a single `AutoPlayer::tick` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The player is idle; the game was not touched.
    Idle,
    /// The strategy's move was applied.
    Moved(Direction),
    /// The strategy had no move; the player went idle. Carries the board's status.
    Finished(GameStatus),
}

/// Drives a `Game` with a strategy, one move per tick.
///
/// Starts `Idle`; `start` switches to `Running`. While running, each tick
/// asks the strategy for a move and applies it. When the strategy returns
/// no move the player goes back to `Idle` and reports the game's status.
#[derive(Clone, Copy, Debug)]
pub struct AutoPlayer {
    strategy: Strategy,
    state: AutoPlayState,
}

impl AutoPlayer {
    pub fn new(strategy: Strategy) -> Self {
        AutoPlayer {
            strategy,
            state: AutoPlayState::Idle,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn state(&self) -> AutoPlayState {
        self.state
    }

    pub fn start(&mut self) {
        self.state = AutoPlayState::Running;
    }

    pub fn stop(&mut self) {
        self.state = AutoPlayState::Idle;
    }

    pub fn tick(&mut self, game: &mut Game) -> TickOutcome {
        if self.state == AutoPlayState::Idle {
            return TickOutcome::Idle;
        }

        match compute_best_move(game.board(), self.strategy) {
            Some(direction) if game.process_move(direction) => TickOutcome::Moved(direction),
            _ => {
                self.state = AutoPlayState::Idle;
                let status = game.status();
                info!(
                    "{} stopped after {} moves: {:?}, score {}",
                    self.strategy,
                    game.moves(),
                    status,
                    game.score()
                );
                TickOutcome::Finished(status)
            }
        }
    }

    /// Starts the player and ticks until it goes idle or `max_moves` moves
    /// have been made.
    ///
    /// # Returns
    /// The status of the game when play stopped.
    pub fn run(&mut self, game: &mut Game, max_moves: Option<u32>) -> GameStatus {
        self.start();
        let mut made = 0;
        loop {
            if max_moves.is_some_and(|limit| made >= limit) {
                self.stop();
                return game.status();
            }
            match self.tick(game) {
                TickOutcome::Moved(_) => made += 1,
                TickOutcome::Finished(status) => return status,
                TickOutcome::Idle => return game.status(),
            }
        }
    }
}
