//! Legal move enumeration.
//!
//! A destination is legal for a piece when, looking from the piece in one of
//! the 8 compass directions, there is an unbroken run of opponent pieces that
//! ends on an empty cell. Every direction is scanned independently.

use crate::board::{Color, Grid, Point};
use crate::constants::DIRECTIONS;
use crate::error::Result;

/// A placement on `to`, outflanking from the already-owned piece on `from`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Point,
    pub to: Point,
}

/// Every move available to one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllMoves {
    /// At least one legal move, in ascending source order.
    Available(Vec<Move>),
    /// The player owns pieces but none of them can move.
    Blocked,
    /// The player owns no pieces at all.
    Eliminated,
}

impl AllMoves {
    /// True for both `Blocked` and `Eliminated`.
    pub fn is_none(&self) -> bool {
        !matches!(self, AllMoves::Available(_))
    }

    pub fn moves(&self) -> &[Move] {
        match self {
            AllMoves::Available(moves) => moves,
            AllMoves::Blocked | AllMoves::Eliminated => &[],
        }
    }

    /// Distinct destinations, in first-seen order.
    pub fn destinations(&self) -> Vec<Point> {
        let mut seen = Vec::new();
        for mv in self.moves() {
            if !seen.contains(&mv.to) {
                seen.push(mv.to);
            }
        }
        seen
    }
}

/// Destinations reachable from the piece on `point`.
///
/// An empty cell yields no destinations.
///
/// # Errors
/// `EngineError::OutOfBounds` if `point` is off the board.
pub fn legal_destinations(grid: &Grid, point: Point) -> Result<Vec<Point>> {
    let cell = grid.cell(point)?;
    Ok(match cell.owner {
        Some(color) => destinations_from(grid, point, color),
        None => Vec::new(),
    })
}

/// Scan all 8 directions from `point` on behalf of `color`.
pub(crate) fn destinations_from(grid: &Grid, point: Point, color: Color) -> Vec<Point> {
    DIRECTIONS
        .iter()
        .filter_map(|&dir| outflank(grid, point, color, dir))
        .collect()
}

/// Follow one direction: at least one opponent piece, then an empty cell.
fn outflank(grid: &Grid, from: Point, color: Color, dir: (isize, isize)) -> Option<Point> {
    let opponent = Some(color.opponent());
    let mut pt = grid.step(from, dir)?;
    if grid.owner(pt) != opponent {
        return None;
    }
    loop {
        pt = grid.step(pt, dir)?;
        match grid.owner(pt) {
            None => return Some(pt),
            Some(c) if c == color => return None,
            Some(_) => {}
        }
    }
}

/// All `(source, destination)` pairs for `color`.
pub fn all_moves(grid: &Grid, color: Color) -> AllMoves {
    let owned = grid.owned_cells(color);
    if owned.is_empty() {
        return AllMoves::Eliminated;
    }
    let moves: Vec<Move> = owned
        .iter()
        .flat_map(|&from| {
            destinations_from(grid, from, color)
                .into_iter()
                .map(move |to| Move { from, to })
        })
        .collect();
    if moves.is_empty() {
        AllMoves::Blocked
    } else {
        AllMoves::Available(moves)
    }
}
