//! Grid representation and ownership bookkeeping.
//!
//! The grid is a flat array of [`Cell`]s addressed by `(col, row)`. Next to the
//! array each player keeps an index of the coordinates they own, together with
//! a running score, so scoring and "does this player own anything" checks never
//! need a full board scan.
//!
//! All ownership changes go through [`Grid::set_owner`], which updates the cell
//! and both indexes in one step.

use std::collections::BTreeSet;
use std::fmt;

use crate::constants::{BONUS_VALUE, MIN_DIMEN, NORMAL_VALUE};
use crate::error::{EngineError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A cell coordinate as `(col, row)`.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub point: Point,
    /// `None` for an empty cell.
    pub owner: Option<Color>,
    /// Score contributed to the owner: 1, or 2 for a bonus tile.
    pub value: u32,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_bonus(&self) -> bool {
        self.value == BONUS_VALUE
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    dimen: usize,
    cells: Vec<Cell>,
    /// Owned coordinates per player, indexed by `Color::index`.
    owned: [BTreeSet<Point>; 2],
    /// Running sum of cell values per player.
    scores: [u32; 2],
}

/// The four center cells and their starting owners.
pub fn starting_cells(dimen: usize) -> [(Point, Color); 4] {
    let c = (dimen - 1) / 2;
    [
        ((c, c + 1), Color::Black),
        ((c + 1, c), Color::Black),
        ((c, c), Color::White),
        ((c + 1, c + 1), Color::White),
    ]
}

impl Grid {
    /// Build a new game grid with the four starting pieces in the center.
    ///
    /// Every point in `bonus` becomes a bonus tile.
    ///
    /// # Errors
    /// `EngineError::Config` if `dimen` is odd or smaller than
    /// [`MIN_DIMEN`], if a bonus point lies outside the grid, or if a
    /// starting cell is already taken.
    pub fn create(dimen: usize, bonus: &[Point]) -> Result<Grid> {
        let mut grid = Grid::blank(dimen, bonus)?;
        for (point, color) in starting_cells(dimen) {
            if !grid.cells[grid.idx(point)].is_empty() {
                return Err(EngineError::Config(format!(
                    "starting cell {point:?} is not free"
                )));
            }
            grid.set_owner(point, color);
        }
        Ok(grid)
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `X` is Black, `O` is White and `.` is empty. The lower-case forms `x`,
    /// `o` and `+` mark the same states on a bonus tile. Whitespace is
    /// ignored, so the output of `Display` parses back.
    pub fn from_rows(rows: &[&str]) -> Result<Grid> {
        let dimen = rows.len();
        let mut parsed = Vec::with_capacity(dimen * dimen);
        let mut bonus = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != dimen {
                return Err(EngineError::Config(format!(
                    "row {row} has {} cells, expected {dimen}",
                    symbols.len()
                )));
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                let owner = match ch {
                    'X' | 'x' => Some(Color::Black),
                    'O' | 'o' => Some(Color::White),
                    '.' | '+' => None,
                    other => {
                        return Err(EngineError::Config(format!(
                            "unknown cell symbol '{other}' at {:?}",
                            (col, row)
                        )));
                    }
                };
                if ch.is_lowercase() || ch == '+' {
                    bonus.push((col, row));
                }
                parsed.push(((col, row), owner));
            }
        }

        let mut grid = Grid::blank(dimen, &bonus)?;
        for (point, owner) in parsed {
            if let Some(color) = owner {
                grid.set_owner(point, color);
            }
        }
        Ok(grid)
    }

    /// An empty grid with bonus tiles marked and no pieces placed.
    fn blank(dimen: usize, bonus: &[Point]) -> Result<Grid> {
        if dimen < MIN_DIMEN {
            return Err(EngineError::Config(format!(
                "dimension {dimen} is smaller than {MIN_DIMEN}"
            )));
        }
        if dimen % 2 != 0 {
            return Err(EngineError::Config(format!("dimension {dimen} is odd")));
        }

        let mut cells = Vec::with_capacity(dimen * dimen);
        for row in 0..dimen {
            for col in 0..dimen {
                cells.push(Cell {
                    point: (col, row),
                    owner: None,
                    value: NORMAL_VALUE,
                });
            }
        }
        let mut grid = Grid {
            dimen,
            cells,
            owned: [BTreeSet::new(), BTreeSet::new()],
            scores: [0, 0],
        };
        for &point in bonus {
            if !grid.in_bounds(point) {
                return Err(EngineError::Config(format!(
                    "bonus cell {point:?} is outside a {dimen}x{dimen} board"
                )));
            }
            let i = grid.idx(point);
            grid.cells[i].value = BONUS_VALUE;
        }
        Ok(grid)
    }

    #[inline]
    fn idx(&self, (col, row): Point) -> usize {
        row * self.dimen + col
    }

    pub fn dimen(&self) -> usize {
        self.dimen
    }

    #[inline]
    pub fn in_bounds(&self, (col, row): Point) -> bool {
        col < self.dimen && row < self.dimen
    }

    /// The cell at `(col, row)`.
    ///
    /// # Errors
    /// `EngineError::OutOfBounds` if either index is outside `[0, dimen)`.
    pub fn cell_at(&self, col: usize, row: usize) -> Result<&Cell> {
        self.cell((col, row))
    }

    pub fn cell(&self, point: Point) -> Result<&Cell> {
        if !self.in_bounds(point) {
            return Err(EngineError::OutOfBounds {
                point,
                dimen: self.dimen,
            });
        }
        Ok(&self.cells[self.idx(point)])
    }

    /// Owner of an in-bounds point, `None` for empty or off-board points.
    #[inline]
    pub fn owner(&self, point: Point) -> Option<Color> {
        if self.in_bounds(point) {
            self.cells[self.idx(point)].owner
        } else {
            None
        }
    }

    /// The next point from `point` in direction `(dcol, drow)`, if still on the board.
    #[inline]
    pub fn step(&self, (col, row): Point, (dcol, drow): (isize, isize)) -> Option<Point> {
        let next = (col.checked_add_signed(dcol)?, row.checked_add_signed(drow)?);
        self.in_bounds(next).then_some(next)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Coordinates currently owned by `color`, in ascending order.
    pub fn owned_cells(&self, color: Color) -> &BTreeSet<Point> {
        &self.owned[color.index()]
    }

    /// Sum of cell values over the cells owned by `color`.
    pub fn score(&self, color: Color) -> u32 {
        self.scores[color.index()]
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.owned[0].len() - self.owned[1].len()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Give `point` to `color`, moving it out of the previous owner's index.
    ///
    /// The only mutation of ownership; the cell, both indexes and both scores
    /// are updated together.
    pub(crate) fn set_owner(&mut self, point: Point, color: Color) {
        let i = self.idx(point);
        let cell = &mut self.cells[i];
        if let Some(prev) = cell.owner {
            self.owned[prev.index()].remove(&point);
            self.scores[prev.index()] -= cell.value;
        }
        self.owned[color.index()].insert(point);
        self.scores[color.index()] += cell.value;
        cell.owner = Some(color);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimen {
            for col in 0..self.dimen {
                let cell = &self.cells[self.idx((col, row))];
                let ch = match (cell.owner, cell.is_bonus()) {
                    (Some(Color::Black), false) => 'X',
                    (Some(Color::White), false) => 'O',
                    (None, false) => '.',
                    (Some(Color::Black), true) => 'x',
                    (Some(Color::White), true) => 'o',
                    (None, true) => '+',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a coordinate like `"d3"` into a point: column letters, 1-based row.
///
/// Columns past `z` continue as `aa`, `ab`, ... Returns `None` for malformed
/// input or points outside a `dimen` board.
pub fn parse_point(s: &str, dimen: usize) -> Option<Point> {
    let s = s.trim();
    let (letters, digits) = s.split_at(s.find(|c: char| c.is_ascii_digit())?);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut col = 0usize;
    for b in letters.bytes() {
        let digit = (b.to_ascii_lowercase() - b'a') as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let col = col - 1;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    let point = (col, row - 1);
    (col < dimen && point.1 < dimen).then_some(point)
}

/// Format a point as a coordinate string (e.g. `(3, 2)` is `"d3"`, `(26, 0)` is `"aa1"`).
pub fn point_name((col, row): Point) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    let column: String = letters.iter().rev().collect();
    format!("{column}{}", row + 1)
}
