//! Constants for board dimensions, cell values, and scan directions.
//!
//! The board dimension is chosen at runtime when a grid is created; these are
//! the defaults and limits used by [`GameConfig`](crate::game::GameConfig) and
//! the command-line front end.

// =============================================================================
// Board Geometry
// =============================================================================

/// Dimension of the classic Othello board (8x8).
pub const CLASSIC_DIMEN: usize = 8;

/// Dimension of the bonus-tile variant (10x10).
pub const BONUS_DIMEN: usize = 10;

/// Smallest board that still fits the four starting pieces plus a ring.
pub const MIN_DIMEN: usize = 4;

/// Widest board the console and CLI accept.
pub const MAX_DIMEN: usize = 26;

/// Number of bonus tiles scattered on a bonus-variant board by default.
pub const DEFAULT_BONUS_TILES: usize = 8;

// =============================================================================
// Cell Values
// =============================================================================

/// Score contributed by an ordinary cell.
pub const NORMAL_VALUE: u32 = 1;

/// Score contributed by a bonus tile.
pub const BONUS_VALUE: u32 = 2;

// =============================================================================
// Scan Directions
// =============================================================================

/// The 8 compass directions as `(dcol, drow)`.
/// Order: column delta outer, row delta inner, each from -1 to 1.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
