use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use std::collections::HashMap;
use twenty48_solver::engine::{Game, GameStatus, WIN_TILE};
use twenty48_solver::heuristics::{empty_bonus, evaluate, monotonicity, potential_merges, smoothness};
use twenty48_solver::session::{GameKind, HighScores};
use twenty48_solver::solver::{AutoPlayer, Strategy, DEFAULT_EXPECTIMAX_PLY, DEFAULT_MINIMAX_DEPTH};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies over seeded games", long_about = None)]
struct Args {
    /// Number of games played per strategy
    #[clap(short, long, default_value_t = 3)]
    games: u64,

    /// Seed of the first game; game i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Search depth for alpha-beta
    #[clap(short, long, default_value_t = DEFAULT_MINIMAX_DEPTH)]
    depth: u32,

    /// Lookahead plies for expectimax
    #[clap(long, default_value_t = DEFAULT_EXPECTIMAX_PLY)]
    max_ply: u32,

    /// Cap on moves per game
    #[clap(long)]
    max_moves: Option<u32>,
}

#[derive(Default)]
struct Tally {
    scores: Vec<u32>,
    max_tiles: Vec<u32>,
    wins: u32,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let strategies = [
        Strategy::GreedyExpectimax { max_ply: args.max_ply },
        Strategy::AlphaBetaMinimax { depth: args.depth },
    ];

    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();
    let mut high_scores = HighScores::new();

    info!("Starting strategy evaluation over {} games...", args.games);

    for game_idx in 0..args.games {
        let seed = args.start_seed + game_idx;
        println!("\nGame {} (Seed: {})", game_idx, seed);

        for &strategy in &strategies {
            let mut game = Game::new_with_seed(GameKind::Ai, seed);
            let status = AutoPlayer::new(strategy).run(&mut game, args.max_moves);
            if status == GameStatus::InProgress {
                warn!("{} hit the move cap on seed {}", strategy, seed);
            }
            high_scores.record_if_terminal(GameKind::Ai, game.board());

            let board = game.board();
            println!(
                "  Strategy: {:<24} Score: {:<7} Max tile: {:<5} Moves: {:<5} {:?}",
                strategy.to_string(),
                board.score(),
                board.max_tile(),
                game.moves(),
                status
            );
            println!(
                "    final eval {:.3e} (smooth {:.3e}, empty {:.3}, merges {:.1}, mono {:.1})",
                evaluate(board),
                smoothness(board),
                empty_bonus(board),
                potential_merges(board),
                monotonicity(board)
            );

            let tally = tallies.entry(strategy).or_default();
            tally.scores.push(board.score());
            tally.max_tiles.push(board.max_tile());
            if status == GameStatus::Won || board.max_tile() >= WIN_TILE {
                tally.wins += 1;
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Games per strategy: {}", args.games);
    println!("Best score this session: {}", high_scores.get_high_score(GameKind::Ai));
    println!("\n--- Average Scores ---");

    let mut summary: Vec<(Strategy, f64, u32, u32)> = tallies
        .iter()
        .filter(|(_, t)| !t.scores.is_empty())
        .map(|(&strategy, t)| {
            let total: u64 = t.scores.iter().map(|&s| s as u64).sum();
            let best_tile = t.max_tiles.iter().copied().max().unwrap_or(0);
            (strategy, total as f64 / t.scores.len() as f64, best_tile, t.wins)
        })
        .collect();

    summary.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy, avg, best_tile, wins) in summary {
        println!(
            "Strategy {:<24}: Average Score = {:.2}, Best Tile = {}, Wins = {}",
            strategy.to_string(),
            avg,
            best_tile,
            wins
        );
    }
}
