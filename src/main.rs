//! Othello-Rust: Othello/Reversi rule engine.
//!
//! ## Usage
//!
//! - `othello-rust` - Show a demo
//! - `othello-rust console` - Play through the line-based console protocol
//! - `othello-rust selfplay --games 100` - Tally random-vs-random games
//!
//! Set `RUST_LOG=debug` to log every applied move on stderr.

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use othello_rust::ai::play_random_game;
use othello_rust::board::Color;
use othello_rust::console::Console;
use othello_rust::constants::{CLASSIC_DIMEN, DEFAULT_BONUS_TILES, MAX_DIMEN, MIN_DIMEN};
use othello_rust::game::{Game, GameConfig, GameResult};

/// Othello-Rust: Othello/Reversi rule engine
#[derive(Parser)]
#[command(name = "othello-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct BoardArgs {
    /// Board dimension (even, at least 4)
    #[arg(
        long,
        default_value_t = CLASSIC_DIMEN,
        value_parser = RangedU64ValueParser::<usize>::new()
            .range(MIN_DIMEN as u64..=MAX_DIMEN as u64)
    )]
    dimen: usize,
    /// Number of randomly placed bonus tiles
    #[arg(long, default_value_t = 0)]
    bonus: usize,
    /// Seed for bonus placement and the computer player (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read console commands from stdin and answer on stdout
    Console {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Play random-vs-random games and print the tally
    Selfplay {
        #[command(flatten)]
        board: BoardArgs,
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
    /// Run a single random game on the bonus-tile board and print it
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Console { board }) => {
            let mut rng = seeded(board.seed);
            let config = GameConfig::with_random_bonus(board.dimen, board.bonus, &mut rng);
            let game = Game::new(config).context("failed to set up the board")?;
            let mut console =
                Console::new(game, rng.u64(..)).context("failed to start the console")?;
            console
                .run(std::io::stdin().lock(), std::io::stdout())
                .context("console I/O failed")?;
        }
        Some(Commands::Selfplay { board, games }) => run_selfplay(&board, games)?,
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn seeded(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

fn run_selfplay(board: &BoardArgs, games: usize) -> Result<()> {
    let mut rng = seeded(board.seed);
    let (mut black, mut white, mut ties) = (0usize, 0usize, 0usize);

    for _ in 0..games {
        let config = GameConfig::with_random_bonus(board.dimen, board.bonus, &mut rng);
        // Random starting player, as in a casual game
        let first = if rng.bool() { Color::Black } else { Color::White };
        let mut game = Game::with_first(config, first).context("failed to set up the board")?;
        match play_random_game(&mut game, &mut rng)? {
            GameResult::Winner(Color::Black) => black += 1,
            GameResult::Winner(Color::White) => white += 1,
            GameResult::Tie => ties += 1,
            GameResult::InProgress => unreachable!("play_random_game returns a final result"),
        }
    }

    println!("games: {games}");
    println!("black wins: {black}");
    println!("white wins: {white}");
    println!("ties: {ties}");
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Othello-Rust: Othello/Reversi rule engine\n");

    let mut rng = fastrand::Rng::new();
    let config = GameConfig::bonus_variant(DEFAULT_BONUS_TILES, &mut rng);
    let mut game = Game::new(config)?;
    println!("=== Starting position ({0}x{0}) ===", game.grid().dimen());
    println!("{}", game.grid());

    let result = play_random_game(&mut game, &mut rng)?;
    println!("=== After {} moves ===", game.moves_played());
    println!("{}", game.grid());
    println!(
        "Black {} - White {}",
        game.grid().score(Color::Black),
        game.grid().score(Color::White)
    );
    println!("Result: {result:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimen_range() {
        let cli = Cli::try_parse_from(["othello-rust", "console", "--dimen", "26"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Console { board }) if board.dimen == 26
        ));
        for dimen in ["28", "320", "2"] {
            assert!(Cli::try_parse_from(["othello-rust", "console", "--dimen", dimen]).is_err());
            assert!(Cli::try_parse_from(["othello-rust", "selfplay", "--dimen", dimen]).is_err());
        }
    }
}
