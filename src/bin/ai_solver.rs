use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use twenty48_solver::engine::{Board, Game, GameStatus, BOARD_SIZE};
use twenty48_solver::session::{GameKind, HighScores};
use twenty48_solver::solver::{search, AutoPlayer, Strategy, DEFAULT_EXPECTIMAX_PLY, DEFAULT_MINIMAX_DEPTH};
use twenty48_solver::utils::board_from_str_array;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Expectimax,
    AlphaBeta,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Pick (or play) 2048 moves with a search strategy", long_about = None)]
struct Args {
    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = StrategyArg::Expectimax)]
    strategy: StrategyArg,

    /// Search depth for alpha-beta
    #[clap(short, long, default_value_t = DEFAULT_MINIMAX_DEPTH)]
    depth: u32,

    /// Lookahead plies for expectimax
    #[clap(long, default_value_t = DEFAULT_EXPECTIMAX_PLY)]
    max_ply: u32,

    /// Seed for the starting board and for spawns during play
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Keep playing the recommended moves until the strategy stops
    #[clap(short, long)]
    play: bool,

    /// Stop auto-play after this many moves
    #[clap(long)]
    max_moves: Option<u32>,

    /// Path to a board file (4 rows of 4 cells, '.' for empty); a random start if omitted
    board_file: Option<PathBuf>,
}

impl Args {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Expectimax => Strategy::GreedyExpectimax { max_ply: self.max_ply },
            StrategyArg::AlphaBeta => Strategy::AlphaBetaMinimax { depth: self.depth },
        }
    }
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if lines.len() != BOARD_SIZE {
        return Err(format!(
            "Expected {} lines in board file, found {}",
            BOARD_SIZE,
            lines.len()
        ));
    }

    board_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let strategy = args.strategy();

    let mut game = match &args.board_file {
        Some(path) => match read_board_file(path) {
            Ok(board) => {
                println!("Loaded board from {}\n", path.display());
                Game::new_with_board(GameKind::Ai, board, args.seed)
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Game::new_with_seed(GameKind::Ai, args.seed),
    };

    println!("Initial board state:\n{}\n", game.board());
    println!("Searching with {}...\n", strategy);

    let result = search(game.board(), strategy);
    match result.best_move {
        Some(direction) => println!("Recommended move: {} (value {:.3})", direction, result.value),
        None => println!("No move available ({:?}).", game.status()),
    }

    if args.play {
        let mut high_scores = HighScores::new();
        let mut player = AutoPlayer::new(strategy);
        let status = player.run(&mut game, args.max_moves);
        high_scores.record_if_terminal(GameKind::Ai, game.board());
        info!("auto-play finished after {} moves", game.moves());

        println!("\nFinal board state:\n{}\n", game.board());
        println!("Moves: {}", game.moves());
        println!("Highest tile: {}", game.board().max_tile());
        match status {
            GameStatus::Won => println!("WOOHOO! Reached the winning tile."),
            GameStatus::Lost => println!("GAME OVER"),
            GameStatus::InProgress => println!("Stopped after the move limit."),
        }
        println!("Best {} score this session: {}", GameKind::Ai, high_scores.get_high_score(GameKind::Ai));
    }

    ExitCode::SUCCESS
}
