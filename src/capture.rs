//! Move execution: placement and flipping.
//!
//! A placement claims an empty destination and flips every opponent run lying
//! between the destination and an outflanking piece of the mover. Moves are
//! validated against the current legal moves before anything changes, so an
//! illegal move never leaves a partially flipped board behind.

use tracing::debug;

use crate::board::{Color, Grid, Point};
use crate::error::{EngineError, Result};
use crate::movegen::destinations_from;

/// What a move changed, for callers that animate or log it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub player: Color,
    pub placed: Point,
    /// Flipped cells, in the order they were flipped.
    pub flipped: Vec<Point>,
}

/// Play `player` on `dest`, firing every source that outflanks toward it.
///
/// # Errors
/// - `EngineError::OutOfBounds` - `dest` is off the board
/// - `EngineError::InvalidMove` - `dest` is occupied, or no piece of `player`
///   outflanks toward it
pub fn apply(grid: &mut Grid, player: Color, dest: Point) -> Result<Capture> {
    if !grid.cell(dest)?.is_empty() {
        return Err(EngineError::InvalidMove(dest));
    }
    let view: &Grid = grid;
    let sources: Vec<Point> = view
        .owned_cells(player)
        .iter()
        .copied()
        .filter(|&src| destinations_from(view, src, player).contains(&dest))
        .collect();
    if sources.is_empty() {
        return Err(EngineError::InvalidMove(dest));
    }

    let mut flipped = Vec::new();
    for src in sources {
        flip_line(grid, player, src, dest, &mut flipped);
    }
    Ok(place(grid, player, dest, flipped))
}

/// Play the single line from the piece on `from` to `to`.
///
/// Only the run between `from` and `to` flips, even when other pieces also
/// outflank toward `to`.
///
/// # Errors
/// - `EngineError::OutOfBounds` - either point is off the board
/// - `EngineError::InvalidMove` - `from` is empty, or `to` is not one of its
///   legal destinations
pub fn apply_from(grid: &mut Grid, from: Point, to: Point) -> Result<Capture> {
    grid.cell(to)?;
    let Some(player) = grid.cell(from)?.owner else {
        return Err(EngineError::InvalidMove(to));
    };
    if !destinations_from(grid, from, player).contains(&to) {
        return Err(EngineError::InvalidMove(to));
    }

    let mut flipped = Vec::new();
    flip_line(grid, player, from, to, &mut flipped);
    Ok(place(grid, player, to, flipped))
}

fn place(grid: &mut Grid, player: Color, dest: Point, flipped: Vec<Point>) -> Capture {
    grid.set_owner(dest, player);
    debug!(
        %player,
        col = dest.0,
        row = dest.1,
        flips = flipped.len(),
        "move applied"
    );
    Capture {
        player,
        placed: dest,
        flipped,
    }
}

/// Unit step from `from` toward `to`, each component clamped to -1..=1.
#[inline]
fn direction(from: Point, to: Point) -> (isize, isize) {
    (
        (to.0 as isize - from.0 as isize).signum(),
        (to.1 as isize - from.1 as isize).signum(),
    )
}

/// Walk from `src` toward `dest`, flipping opponent pieces until the first
/// cell that is not the opponent's.
fn flip_line(grid: &mut Grid, player: Color, src: Point, dest: Point, out: &mut Vec<Point>) {
    let dir = direction(src, dest);
    let opponent = Some(player.opponent());
    let mut cursor = grid.step(src, dir);
    while let Some(pt) = cursor {
        if grid.owner(pt) != opponent {
            break;
        }
        grid.set_owner(pt, player);
        out.push(pt);
        cursor = grid.step(pt, dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::all_moves;

    #[test]
    fn test_opening_move_flips_one() {
        let mut grid = Grid::create(8, &[]).unwrap();
        let capture = apply(&mut grid, Color::Black, (3, 2)).unwrap();
        assert_eq!(capture.flipped, vec![(3, 3)]);
        assert_eq!(grid.owner((3, 2)), Some(Color::Black));
        assert_eq!(grid.owner((3, 3)), Some(Color::Black));
        assert_eq!(grid.score(Color::Black), 4);
        assert_eq!(grid.score(Color::White), 1);
    }

    #[test]
    fn test_apply_rejects_illegal_destinations() {
        let mut grid = Grid::create(8, &[]).unwrap();
        let before = grid.to_string();
        assert_eq!(
            apply(&mut grid, Color::Black, (0, 0)),
            Err(EngineError::InvalidMove((0, 0)))
        );
        assert_eq!(
            apply(&mut grid, Color::Black, (3, 3)),
            Err(EngineError::InvalidMove((3, 3)))
        );
        assert!(matches!(
            apply(&mut grid, Color::Black, (9, 9)),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert_eq!(grid.to_string(), before);
    }

    #[test]
    fn test_multiple_sources_all_fire() {
        // black (0,0), (2,0), (0,2) each outflank toward (2,2)
        let mut grid =
            Grid::from_rows(&["X . X .", ". O O .", "X O . .", ". . . ."]).unwrap();
        let capture = apply(&mut grid, Color::Black, (2, 2)).unwrap();
        let mut flipped = capture.flipped.clone();
        flipped.sort();
        assert_eq!(flipped, vec![(1, 1), (1, 2), (2, 1)]);
        assert_eq!(grid.owned_cells(Color::White).len(), 0);
        assert_eq!(grid.score(Color::Black), 7);
    }

    #[test]
    fn test_apply_from_fires_single_line() {
        let mut grid = Grid::from_rows(&["X . X .", ". O O .", "X O . .", ". . . ."]).unwrap();
        let capture = apply_from(&mut grid, (0, 0), (2, 2)).unwrap();
        assert_eq!(capture.flipped, vec![(1, 1)]);
        assert_eq!(grid.owner((2, 1)), Some(Color::White));
        assert_eq!(grid.owner((1, 2)), Some(Color::White));
        assert_eq!(grid.owner((2, 2)), Some(Color::Black));
    }

    #[test]
    fn test_apply_from_validates_source() {
        let mut grid = Grid::create(8, &[]).unwrap();
        assert_eq!(
            apply_from(&mut grid, (0, 0), (3, 2)),
            Err(EngineError::InvalidMove((3, 2)))
        );
        assert_eq!(
            apply_from(&mut grid, (4, 3), (3, 2)),
            Err(EngineError::InvalidMove((3, 2)))
        );
        assert!(apply_from(&mut grid, (3, 4), (3, 2)).is_ok());
    }

    #[test]
    fn test_flip_transfers_bonus_value() {
        let mut grid = Grid::create(8, &[(3, 3)]).unwrap();
        assert_eq!(grid.score(Color::White), 3);
        apply(&mut grid, Color::Black, (3, 2)).unwrap();
        assert_eq!(grid.score(Color::Black), 5);
        assert_eq!(grid.score(Color::White), 1);
    }

    #[test]
    fn test_every_opening_move_keeps_totals() {
        let grid = Grid::create(8, &[]).unwrap();
        for mv in all_moves(&grid, Color::Black).moves() {
            let mut g = grid.clone();
            let capture = apply(&mut g, Color::Black, mv.to).unwrap();
            assert_eq!(
                g.score(Color::Black) as usize,
                2 + 1 + capture.flipped.len()
            );
            assert_eq!(g.score(Color::Black) + g.score(Color::White), 5);
        }
    }
}
