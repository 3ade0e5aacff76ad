//! Game state: configuration, turn order, and terminal-state detection.
//!
//! [`check_game_over`] is a pure function of the grid. [`Game`] wraps a grid
//! with the side to move and caches the last computed result as the current
//! winner; callers re-check after every move, since playing a move never
//! triggers the check by itself.

use tracing::{info, trace};

use crate::board::{Color, Grid, Point, starting_cells};
use crate::capture::{Capture, apply, apply_from};
use crate::constants::{BONUS_DIMEN, CLASSIC_DIMEN};
use crate::error::{EngineError, Result};
use crate::movegen::{AllMoves, all_moves};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Winner(Color),
    Tie,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Evaluate the terminal rules in order; the first that matches decides.
///
/// 1. Black scores nothing: White wins.
/// 2. White scores nothing: Black wins.
/// 3. Full board: higher score wins, equal scores tie.
/// 4. Neither side has a legal move: tie, whatever the scores.
pub fn check_game_over(grid: &Grid) -> GameResult {
    let black = grid.score(Color::Black);
    let white = grid.score(Color::White);
    if black == 0 {
        return GameResult::Winner(Color::White);
    }
    if white == 0 {
        return GameResult::Winner(Color::Black);
    }
    if grid.is_full() {
        return match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameResult::Winner(Color::Black),
            std::cmp::Ordering::Less => GameResult::Winner(Color::White),
            std::cmp::Ordering::Equal => GameResult::Tie,
        };
    }
    // Both sides blocked is a tie even when one side leads on score
    if all_moves(grid, Color::Black).is_none() && all_moves(grid, Color::White).is_none() {
        return GameResult::Tie;
    }
    GameResult::InProgress
}

/// Board dimension and bonus tile placement for one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub dimen: usize,
    pub bonus: Vec<Point>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    pub fn new(dimen: usize, bonus: Vec<Point>) -> Self {
        Self { dimen, bonus }
    }

    /// Plain 8x8 Othello.
    pub fn classic() -> Self {
        Self::new(CLASSIC_DIMEN, Vec::new())
    }

    /// 10x10 board with `count` bonus tiles placed by `rng`.
    pub fn bonus_variant(count: usize, rng: &mut fastrand::Rng) -> Self {
        Self::with_random_bonus(BONUS_DIMEN, count, rng)
    }

    /// Scatter `count` bonus tiles over the cells outside the starting square.
    ///
    /// Asking for more tiles than there are free cells marks every free cell.
    pub fn with_random_bonus(dimen: usize, count: usize, rng: &mut fastrand::Rng) -> Self {
        let mut bonus = Vec::new();
        if dimen >= 2 {
            let start: Vec<Point> = starting_cells(dimen).iter().map(|&(p, _)| p).collect();
            let mut free: Vec<Point> = (0..dimen)
                .flat_map(|row| (0..dimen).map(move |col| (col, row)))
                .filter(|p| !start.contains(p))
                .collect();
            rng.shuffle(&mut free);
            free.truncate(count);
            free.sort();
            bonus = free;
        }
        Self::new(dimen, bonus)
    }

    pub fn build(&self) -> Result<Grid> {
        Grid::create(self.dimen, &self.bonus)
    }
}

/// A game in progress: the grid, the side to move, and the cached winner.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    first: Color,
    to_move: Color,
    moves_played: usize,
    winner: GameResult,
}

impl Game {
    /// Start a game with Black to move.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_first(config, Color::Black)
    }

    pub fn with_first(config: GameConfig, first: Color) -> Result<Self> {
        let grid = config.build()?;
        Ok(Self {
            config,
            grid,
            first,
            to_move: first,
            moves_played: 0,
            winner: GameResult::InProgress,
        })
    }

    /// Start a game from an existing grid, e.g. a constructed position.
    pub fn from_grid(grid: Grid, to_move: Color) -> Self {
        Self {
            config: GameConfig::new(grid.dimen(), bonus_points(&grid)),
            grid,
            first: to_move,
            to_move,
            moves_played: 0,
            winner: GameResult::InProgress,
        }
    }

    /// Discard the current grid and rebuild it from the config.
    pub fn new_game(&mut self) -> Result<()> {
        self.grid = self.config.build()?;
        self.to_move = self.first;
        self.moves_played = 0;
        self.winner = GameResult::InProgress;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// The result of the last [`Game::check_game_over`] call.
    pub fn winner(&self) -> GameResult {
        self.winner
    }

    /// Re-evaluate the terminal rules and cache the result.
    pub fn check_game_over(&mut self) -> GameResult {
        let result = check_game_over(&self.grid);
        if result.is_over() && !self.winner.is_over() {
            info!(
                ?result,
                black = self.grid.score(Color::Black),
                white = self.grid.score(Color::White),
                moves = self.moves_played,
                "game over"
            );
        }
        self.winner = result;
        result
    }

    /// Every move of the side to move.
    pub fn moves(&self) -> AllMoves {
        all_moves(&self.grid, self.to_move)
    }

    /// Place for the side to move on `dest` and hand the turn over.
    pub fn play(&mut self, dest: Point) -> Result<Capture> {
        let capture = apply(&mut self.grid, self.to_move, dest)?;
        self.end_turn();
        Ok(capture)
    }

    /// Play one line from a piece of the side to move, then hand the turn over.
    pub fn play_from(&mut self, from: Point, to: Point) -> Result<Capture> {
        if self.grid.cell(from)?.owner != Some(self.to_move) {
            return Err(EngineError::InvalidMove(to));
        }
        let capture = apply_from(&mut self.grid, from, to)?;
        self.end_turn();
        Ok(capture)
    }

    /// Hand the turn over if the side to move has no legal move.
    ///
    /// Returns whether the turn passed.
    pub fn pass(&mut self) -> bool {
        if !self.moves().is_none() {
            return false;
        }
        trace!(player = %self.to_move, "pass");
        self.to_move = self.to_move.opponent();
        true
    }

    fn end_turn(&mut self) {
        self.to_move = self.to_move.opponent();
        self.moves_played += 1;
    }
}

fn bonus_points(grid: &Grid) -> Vec<Point> {
    grid.cells()
        .filter(|c| c.is_bonus())
        .map(|c| c.point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_in_progress() {
        let grid = Grid::create(8, &[]).unwrap();
        assert_eq!(check_game_over(&grid), GameResult::InProgress);
    }

    #[test]
    fn test_elimination_beats_fullness() {
        let grid = Grid::from_rows(&["O O O O", "O O O O", "O O O O", "O O O O"]).unwrap();
        assert_eq!(check_game_over(&grid), GameResult::Winner(Color::White));

        let grid = Grid::from_rows(&["X . . .", ". . . .", ". . . .", ". . . ."]).unwrap();
        assert_eq!(check_game_over(&grid), GameResult::Winner(Color::Black));
    }

    #[test]
    fn test_full_board_winner_and_tie() {
        let grid = Grid::from_rows(&["X X X X", "X X X X", "X O O O", "O O O O"]).unwrap();
        assert_eq!(check_game_over(&grid), GameResult::Winner(Color::Black));

        let grid = Grid::from_rows(&["X X X X", "X X X X", "O O O O", "O O O O"]).unwrap();
        assert_eq!(check_game_over(&grid), GameResult::Tie);
    }

    #[test]
    fn test_full_board_counts_bonus_value() {
        // 7 black cells against 9 white, but two black bonus tiles
        let grid = Grid::from_rows(&["x x X X", "X X X O", "O O O O", "O O O O"]).unwrap();
        assert_eq!(grid.score(Color::Black), 9);
        assert_eq!(grid.score(Color::White), 9);
        assert_eq!(check_game_over(&grid), GameResult::Tie);
    }

    #[test]
    fn test_double_blocked_ties_despite_scores() {
        let grid = Grid::from_rows(&["X X . .", "X X . .", ". . . .", ". . . O"]).unwrap();
        assert_eq!(grid.score(Color::Black), 4);
        assert_eq!(grid.score(Color::White), 1);
        assert_eq!(check_game_over(&grid), GameResult::Tie);
    }

    #[test]
    fn test_game_caches_winner_until_rechecked() {
        let grid = Grid::from_rows(&["X O . .", ". . . .", ". . . .", ". . . ."]).unwrap();
        let mut game = Game::from_grid(grid, Color::White);
        assert_eq!(game.check_game_over(), GameResult::InProgress);

        game.play((2, 0)).unwrap_err();
        assert!(game.pass());
        game.play((2, 0)).unwrap();
        // Not re-checked yet
        assert_eq!(game.winner(), GameResult::InProgress);
        assert_eq!(game.check_game_over(), GameResult::Winner(Color::Black));
        assert_eq!(game.winner(), GameResult::Winner(Color::Black));
    }

    #[test]
    fn test_play_alternates_turns() {
        let mut game = Game::new(GameConfig::classic()).unwrap();
        assert_eq!(game.to_move(), Color::Black);
        game.play((3, 2)).unwrap();
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.moves_played(), 1);
        assert!(!game.pass());
        assert_eq!(
            game.play((0, 0)),
            Err(EngineError::InvalidMove((0, 0)))
        );
        assert_eq!(game.to_move(), Color::White);
    }

    #[test]
    fn test_play_from_requires_own_piece() {
        let mut game = Game::new(GameConfig::classic()).unwrap();
        assert!(game.play_from((3, 3), (3, 5)).is_err());
        let capture = game.play_from((3, 4), (3, 2)).unwrap();
        assert_eq!(capture.flipped, vec![(3, 3)]);
    }

    #[test]
    fn test_new_game_resets() {
        let mut game = Game::with_first(GameConfig::classic(), Color::White).unwrap();
        game.play((3, 5)).unwrap();
        game.new_game().unwrap();
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.grid().score(Color::Black), 2);
    }

    #[test]
    fn test_random_bonus_is_seeded_and_avoids_center() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        let first = GameConfig::bonus_variant(8, &mut a);
        let second = GameConfig::bonus_variant(8, &mut b);
        assert_eq!(first, second);
        assert_eq!(first.dimen, BONUS_DIMEN);
        assert_eq!(first.bonus.len(), 8);
        for (p, _) in starting_cells(BONUS_DIMEN) {
            assert!(!first.bonus.contains(&p));
        }
        let grid = first.build().unwrap();
        assert_eq!(grid.cells().filter(|c| c.is_bonus()).count(), 8);
    }
}
