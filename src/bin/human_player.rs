use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use twenty48_solver::engine::{Direction, Game, GameStatus};
use twenty48_solver::session::{GameKind, HighScores};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Seed for tile spawns; omit for a different game every run
    #[clap(short, long)]
    seed: Option<u64>,

    /// Two boards side by side: player 1 uses w/a/s/d, player 2 uses i/j/k/l
    #[clap(short, long)]
    multiplayer: bool,
}

fn new_game(kind: GameKind, seed: Option<u64>) -> Game {
    match seed {
        Some(seed) => Game::new_with_seed(kind, seed),
        None => Game::new(kind),
    }
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won => "YOU WON!",
        GameStatus::Lost => "GAME OVER",
        GameStatus::InProgress => "",
    }
}

/// Classic play continues past 2048; only a lost board waits for a restart.
fn accepts_moves(status: GameStatus) -> bool {
    status != GameStatus::Lost
}

/// Maps the second player's keys onto directions.
fn player_two_direction(input: &str) -> Option<Direction> {
    match input {
        "i" => Some(Direction::Up),
        "j" => Some(Direction::Left),
        "k" => Some(Direction::Down),
        "l" => Some(Direction::Right),
        _ => None,
    }
}

/// Decides the two-player result once either board is finished.
///
/// A stuck board wins on equal scores; player 1's board is checked first.
fn match_label(p1: &Game, p2: &Game) -> Option<&'static str> {
    if p1.is_win_state() {
        Some("Player 1 won!")
    } else if p2.is_win_state() {
        Some("Player 2 won!")
    } else if p1.is_game_over() {
        if p1.score() >= p2.score() {
            Some("Player 1 won!")
        } else {
            Some("Player 2 won!")
        }
    } else if p2.is_game_over() {
        if p2.score() >= p1.score() {
            Some("Player 2 won!")
        } else {
            Some("Player 1 won!")
        }
    } else {
        None
    }
}

fn prompt(text: &str) -> Option<String> {
    print!("{}", text);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_ascii_lowercase()),
    }
}

fn play_classic(seed: Option<u64>, high_scores: &mut HighScores) {
    let mut game = new_game(GameKind::Classic, seed);
    println!("Welcome to 2048!");

    loop {
        println!("---------------------");
        println!("Moves: {}, Best: {}", game.moves(), high_scores.get_high_score(GameKind::Classic));
        println!("{}", game.board().to_string_with_highlight(game.last_spawn()));

        let status = game.status();
        if status != GameStatus::InProgress {
            high_scores.record_if_terminal(GameKind::Classic, game.board());
            println!("{} Final score: {}", status_label(status), game.score());
            println!("Best: {}", high_scores.get_high_score(GameKind::Classic));
        }

        let Some(input) = prompt("Move with w/a/s/d, 'r' to restart, 'q' to quit: ") else {
            break;
        };

        match input.as_str() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "r" => game.restart(),
            other => match other.parse::<Direction>() {
                Ok(direction) => {
                    if !accepts_moves(status) {
                        println!("The game is over; press 'r' to play again.");
                    } else if !game.process_move(direction) {
                        println!("Nothing moves {}.", direction);
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
    }
}

fn play_multiplayer(seed: Option<u64>, high_scores: &mut HighScores) {
    let mut p1 = new_game(GameKind::Player1, seed);
    let mut p2 = new_game(GameKind::Player2, seed.map(|s| s.wrapping_add(1)));
    println!("Welcome to 2048, two-player mode!");

    loop {
        println!("---------------------");
        println!("Player 1 (best {})", high_scores.get_high_score(GameKind::Player1));
        println!("{}", p1.board().to_string_with_highlight(p1.last_spawn()));
        println!("Player 2 (best {})", high_scores.get_high_score(GameKind::Player2));
        println!("{}", p2.board().to_string_with_highlight(p2.last_spawn()));

        let result = match_label(&p1, &p2);
        if let Some(label) = result {
            high_scores.record_if_terminal(GameKind::Player1, p1.board());
            high_scores.record_if_terminal(GameKind::Player2, p2.board());
            println!("{}", label);
        }

        let Some(input) = prompt("P1 w/a/s/d, P2 i/j/k/l, 'r' to restart, 'q' to quit: ") else {
            break;
        };

        match input.as_str() {
            "q" => break,
            "r" => {
                p1.restart();
                p2.restart();
            }
            _ if result.is_some() => println!("The match is over; press 'r' to play again."),
            other => {
                if let Some(direction) = player_two_direction(other) {
                    p2.process_move(direction);
                } else if let Ok(direction) = other.parse::<Direction>() {
                    p1.process_move(direction);
                } else {
                    println!("Unrecognized key '{}'.", other);
                }
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut high_scores = HighScores::new();
    if args.multiplayer {
        play_multiplayer(args.seed, &mut high_scores);
    } else {
        play_classic(args.seed, &mut high_scores);
    }
}
