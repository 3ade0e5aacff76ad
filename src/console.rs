//! Line-based console protocol for playing a game from a terminal or a script.
//!
//! Each line is an optional numeric id followed by a command and its
//! arguments. Responses start with `=` on success or `?` on failure, followed
//! by the id (if any) and the response text, then a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version` - Engine identification
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `new [dimen] [bonus]` - Start a new game, optionally with random bonus tiles
//! - `show` - Print the board
//! - `score` - Both players' scores
//! - `status` - Re-check for the end of the game
//! - `turn` - The side to move
//! - `moves` - Every move of the side to move as `from:to`
//! - `select <cell>` - Destinations reachable from one piece
//! - `play <cell>` - Place for the side to move
//! - `move <from> <to>` - Play a single line from a chosen piece
//! - `pass` - Pass when the side to move has no legal move
//! - `ai` - Let the computer play for the side to move
//!
//! ## Example
//!
//! ```ignore
//! use othello_rust::console::Console;
//! use othello_rust::game::{Game, GameConfig};
//! let game = Game::new(GameConfig::classic())?;
//! let mut console = Console::new(game, 1)?;
//! console.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use crate::ai::{AiChoice, RandomPlayer};
use crate::board::{Color, Point, parse_point, point_name};
use crate::constants::MAX_DIMEN;
use crate::error::{EngineError, Result};
use crate::game::{Game, GameConfig, GameResult};
use crate::movegen::{AllMoves, legal_destinations};

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "ai",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new",
    "pass",
    "play",
    "quit",
    "score",
    "select",
    "show",
    "status",
    "turn",
    "version",
];

/// Console state: the current game and the random source for the computer player.
pub struct Console {
    game: Game,
    rng: fastrand::Rng,
}

impl Console {
    /// Wrap `game`; `seed` drives the computer player and bonus placement.
    ///
    /// # Errors
    /// `EngineError::Config` if the board is wider than [`MAX_DIMEN`].
    pub fn new(game: Game, seed: u64) -> Result<Self> {
        check_dimen(game.grid().dimen())?;
        Ok(Self {
            game,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "new" => self.new_game(args),

            "show" => (true, format!("\n{}", self.game.grid())),

            "score" => {
                let grid = self.game.grid();
                (
                    true,
                    format!(
                        "black {} white {}",
                        grid.score(Color::Black),
                        grid.score(Color::White)
                    ),
                )
            }

            "status" => (true, result_name(self.game.check_game_over())),

            "turn" => (true, self.game.to_move().to_string()),

            "moves" => match self.game.moves() {
                AllMoves::Available(moves) => (
                    true,
                    moves
                        .iter()
                        .map(|mv| format!("{}:{}", point_name(mv.from), point_name(mv.to)))
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                AllMoves::Blocked => (true, "pass".to_string()),
                AllMoves::Eliminated => (true, "eliminated".to_string()),
            },

            "select" => {
                let Some(pt) = args.first().and_then(|a| self.point(a)) else {
                    return (false, "invalid cell".to_string());
                };
                if self.game.grid().owner(pt) != Some(self.game.to_move()) {
                    return (false, "not your piece".to_string());
                }
                match legal_destinations(self.game.grid(), pt) {
                    Ok(dests) => (true, names(&dests)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                let Some(pt) = args.first().and_then(|a| self.point(a)) else {
                    return (false, "invalid cell".to_string());
                };
                match self.game.play(pt) {
                    Ok(capture) => (true, names(&capture.flipped)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "move" => {
                let (Some(from), Some(to)) = (
                    args.first().and_then(|a| self.point(a)),
                    args.get(1).and_then(|a| self.point(a)),
                ) else {
                    return (false, "invalid cells".to_string());
                };
                match self.game.play_from(from, to) {
                    Ok(capture) => (true, names(&capture.flipped)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "pass" => {
                if self.game.pass() {
                    (true, String::new())
                } else {
                    (false, "legal moves available".to_string())
                }
            }

            "ai" => {
                let mut player = RandomPlayer::with_rng(self.game.to_move(), self.rng.fork());
                match player.choose(&mut self.game) {
                    AiChoice::Move(mv) => match self.game.play(mv.to) {
                        Ok(_) => (true, point_name(mv.to)),
                        Err(e) => (false, e.to_string()),
                    },
                    AiChoice::NoMoves => {
                        self.game.pass();
                        (true, "pass".to_string())
                    }
                    AiChoice::GameOver(result) => {
                        (true, format!("game over: {}", result_name(result)))
                    }
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn new_game(&mut self, args: &[&str]) -> (bool, String) {
        let dimen = match args.first().map(|a| a.parse::<usize>()) {
            None => self.game.config().dimen,
            Some(Ok(d)) => d,
            Some(Err(_)) => return (false, "invalid dimension".to_string()),
        };
        if let Err(e) = check_dimen(dimen) {
            return (false, e.to_string());
        }
        let bonus = match args.get(1).map(|a| a.parse::<usize>()) {
            None => 0,
            Some(Ok(n)) => n,
            Some(Err(_)) => return (false, "invalid bonus count".to_string()),
        };
        let config = GameConfig::with_random_bonus(dimen, bonus, &mut self.rng);
        match Game::new(config) {
            Ok(game) => {
                self.game = game;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn point(&self, s: &str) -> Option<Point> {
        parse_point(s, self.game.grid().dimen())
    }
}

/// Reject boards wider than the console and CLI accept.
pub fn check_dimen(dimen: usize) -> Result<()> {
    if dimen > MAX_DIMEN {
        return Err(EngineError::Config(format!(
            "dimension {dimen} exceeds {MAX_DIMEN}"
        )));
    }
    Ok(())
}

fn names(points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| point_name(p))
        .collect::<Vec<_>>()
        .join(" ")
}

fn result_name(result: GameResult) -> String {
    match result {
        GameResult::InProgress => "in_progress".to_string(),
        GameResult::Winner(color) => format!("{color} wins"),
        GameResult::Tie => "tie".to_string(),
    }
}
