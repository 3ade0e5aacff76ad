//! Random computer player and random self-play.
//!
//! The player picks uniformly among every `(source, destination)` pair
//! available to it. The generator is injected, so a fixed seed replays the
//! same game.

use crate::board::Color;
use crate::error::Result;
use crate::game::{Game, GameResult};
use crate::movegen::{AllMoves, Move, all_moves};

/// What the computer player decided to do this turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiChoice {
    Move(Move),
    /// No legal move; the player must pass.
    NoMoves,
    /// The game has already ended with this result.
    GameOver(GameResult),
}

pub struct RandomPlayer {
    color: Color,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(color: Color, seed: u64) -> Self {
        Self::with_rng(color, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(color: Color, rng: fastrand::Rng) -> Self {
        Self { color, rng }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pick a move for this player's color.
    ///
    /// Re-checks the game first, so a finished game yields `GameOver`.
    pub fn choose(&mut self, game: &mut Game) -> AiChoice {
        let result = game.check_game_over();
        if result.is_over() {
            return AiChoice::GameOver(result);
        }
        match all_moves(game.grid(), self.color) {
            AllMoves::Available(moves) => AiChoice::Move(moves[self.rng.usize(..moves.len())]),
            AllMoves::Blocked | AllMoves::Eliminated => AiChoice::NoMoves,
        }
    }
}

/// Play random moves for both sides until the game ends.
///
/// Each side passes when it has no legal move.
pub fn play_random_game(game: &mut Game, rng: &mut fastrand::Rng) -> Result<GameResult> {
    let mut black = RandomPlayer::with_rng(Color::Black, rng.fork());
    let mut white = RandomPlayer::with_rng(Color::White, rng.fork());
    loop {
        let player = match game.to_move() {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        match player.choose(game) {
            AiChoice::GameOver(result) => return Ok(result),
            AiChoice::Move(mv) => {
                game.play(mv.to)?;
            }
            AiChoice::NoMoves => {
                game.pass();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::game::GameConfig;

    #[test]
    fn test_choice_is_a_legal_move() {
        let mut game = Game::new(GameConfig::classic()).unwrap();
        let mut ai = RandomPlayer::new(Color::Black, 42);
        let legal = game.moves();
        match ai.choose(&mut game) {
            AiChoice::Move(mv) => assert!(legal.moves().contains(&mv)),
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let game = Game::new(GameConfig::classic()).unwrap();
        let picks = |seed| {
            let mut ai = RandomPlayer::new(Color::Black, seed);
            let mut g = game.clone();
            (0..10).map(|_| ai.choose(&mut g)).collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }

    #[test]
    fn test_blocked_player_reports_no_moves() {
        let grid = Grid::from_rows(&["X O . .", ". . . .", ". . . .", ". . . ."]).unwrap();
        let mut game = Game::from_grid(grid, Color::White);
        let mut ai = RandomPlayer::new(Color::White, 1);
        assert_eq!(ai.choose(&mut game), AiChoice::NoMoves);
    }

    #[test]
    fn test_finished_game_reports_game_over() {
        let grid = Grid::from_rows(&["X X . .", ". . . .", ". . . .", ". . . ."]).unwrap();
        let mut game = Game::from_grid(grid, Color::White);
        let mut ai = RandomPlayer::new(Color::White, 1);
        assert_eq!(
            ai.choose(&mut game),
            AiChoice::GameOver(GameResult::Winner(Color::Black))
        );
    }

    #[test]
    fn test_random_game_terminates() {
        let mut rng = fastrand::Rng::with_seed(2024);
        for _ in 0..5 {
            let mut game = Game::new(GameConfig::classic()).unwrap();
            let result = play_random_game(&mut game, &mut rng).unwrap();
            assert!(result.is_over());
            assert_eq!(game.winner(), result);
        }
    }
}
