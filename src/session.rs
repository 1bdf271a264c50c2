//! Per-mode high scores for one play session.
//!
//! A `HighScores` value is owned by whoever orchestrates the games (a binary's
//! `main`, a test) and lives exactly as long as that owner. Boards never touch
//! it themselves; the orchestrator reports a board's score once it finishes.
use crate::engine::{Board, GameStatus};
use log::info;
use std::collections::HashMap;
use std::fmt;

/// Which high-score slot a game feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// A single human-played board.
    Classic,
    /// A board driven by the auto-play loop.
    Ai,
    /// First board of a two-player session.
    Player1,
    /// Second board of a two-player session.
    Player2,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Classic,
        GameKind::Ai,
        GameKind::Player1,
        GameKind::Player2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Classic => "classic",
            GameKind::Ai => "ai",
            GameKind::Player1 => "player1",
            GameKind::Player2 => "player2",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best terminal score seen so far for each `GameKind`.
#[derive(Clone, Debug, Default)]
pub struct HighScores {
    best: HashMap<GameKind, u32>,
}

impl HighScores {
    pub fn new() -> Self {
        HighScores::default()
    }

    /// Best score recorded for `kind`, or 0 if none has been reported.
    pub fn get_high_score(&self, kind: GameKind) -> u32 {
        self.best.get(&kind).copied().unwrap_or(0)
    }

    /// Records the score of a game of `kind` that has just ended.
    ///
    /// # Returns
    /// `true` if `score` beat the stored maximum and replaced it.
    pub fn report_terminal(&mut self, kind: GameKind, score: u32) -> bool {
        let best = self.best.entry(kind).or_insert(0);
        if score > *best {
            info!("new {} high score: {} (was {})", kind, score, *best);
            *best = score;
            true
        } else {
            false
        }
    }

    /// Reports `board`'s score only if it is terminal (won or out of moves).
    ///
    /// # Returns
    /// `true` if the high score for `kind` was raised.
    pub fn record_if_terminal(&mut self, kind: GameKind, board: &Board) -> bool {
        match board.status() {
            GameStatus::InProgress => false,
            GameStatus::Won | GameStatus::Lost => self.report_terminal(kind, board.score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_unreported_kind_is_zero() {
        let scores = HighScores::new();
        for kind in GameKind::ALL {
            assert_eq!(scores.get_high_score(kind), 0);
        }
    }

    #[test]
    fn test_report_terminal_keeps_maximum() {
        let mut scores = HighScores::new();
        assert!(scores.report_terminal(GameKind::Classic, 120));
        assert!(!scores.report_terminal(GameKind::Classic, 80));
        assert!(!scores.report_terminal(GameKind::Classic, 120), "ties do not count as a new record");
        assert_eq!(scores.get_high_score(GameKind::Classic), 120);
        assert!(scores.report_terminal(GameKind::Classic, 300));
        assert_eq!(scores.get_high_score(GameKind::Classic), 300);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut scores = HighScores::new();
        scores.report_terminal(GameKind::Player1, 500);
        scores.report_terminal(GameKind::Player2, 200);
        assert_eq!(scores.get_high_score(GameKind::Player1), 500);
        assert_eq!(scores.get_high_score(GameKind::Player2), 200);
        assert_eq!(scores.get_high_score(GameKind::Ai), 0);
    }

    #[test]
    fn test_record_if_terminal_ignores_running_games() {
        let mut scores = HighScores::new();
        let running = board_from_str_array(&["2 . . ."]).unwrap().with_score(64);
        assert!(!scores.record_if_terminal(GameKind::Ai, &running));
        assert_eq!(scores.get_high_score(GameKind::Ai), 0);

        let lost = board_from_str_array(&[
            "2 4 2 4",
            "4 2 4 2",
            "2 4 2 4",
            "4 2 4 2",
        ])
        .unwrap()
        .with_score(64);
        assert!(scores.record_if_terminal(GameKind::Ai, &lost));
        assert_eq!(scores.get_high_score(GameKind::Ai), 64);

        let won = board_from_str_array(&["2048 . . ."]).unwrap().with_score(20000);
        assert!(scores.record_if_terminal(GameKind::Ai, &won));
        assert_eq!(scores.get_high_score(GameKind::Ai), 20000);
    }
}
