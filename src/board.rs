//! Board model for an N-in-a-row game.
//!
//! Cells are addressed by a flat index `row * width + col`, with row 0 at the
//! bottom of the rendered board. The board keeps the set of empty cells next
//! to the occupancy grid so move generation never scans the whole grid.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::check_geometry;
use crate::constants::NEIGHBORS;
use crate::error::GameError;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Stone symbol used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

/// A cell index in `0..width * height`.
pub type Move = usize;

/// A `(row, col)` coordinate.
pub type Location = (usize, usize);

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    n_in_row: usize,
    cells: Vec<Option<Player>>,
    available: BTreeSet<Move>,
}

impl Board {
    /// Create an empty board. Fails if the board cannot hold a run of `n_in_row`.
    pub fn new(width: usize, height: usize, n_in_row: usize) -> Result<Self, GameError> {
        check_geometry(width, height, n_in_row)?;
        Ok(Self {
            width,
            height,
            n_in_row,
            cells: vec![None; width * height],
            available: (0..width * height).collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn n_in_row(&self) -> usize {
        self.n_in_row
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Empty cells, in ascending order.
    pub fn available_moves(&self) -> &BTreeSet<Move> {
        &self.available
    }

    pub fn is_full(&self) -> bool {
        self.available.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.available.len()
    }

    /// Occupant of a cell, `None` for empty or out-of-range cells.
    #[inline]
    pub fn occupant(&self, mv: Move) -> Option<Player> {
        self.cells.get(mv).copied().flatten()
    }

    /// Place a stone for `player` at `mv`.
    pub fn place(&mut self, player: Player, mv: Move) -> Result<(), GameError> {
        if !self.available.remove(&mv) {
            return Err(GameError::InvalidMove(mv));
        }
        self.cells[mv] = Some(player);
        Ok(())
    }

    #[inline]
    pub fn move_to_location(&self, mv: Move) -> Location {
        (mv / self.width, mv % self.width)
    }

    /// Convert a coordinate to a cell index, `None` if it lies off the board.
    pub fn location_to_move(&self, (row, col): Location) -> Option<Move> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Whether any of the 8 neighbors of `mv` holds a stone.
    pub fn has_occupied_neighbor(&self, mv: Move) -> bool {
        let (row, col) = self.move_to_location(mv);
        NEIGHBORS.iter().any(|&(dr, dc)| {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                return false;
            };
            r < self.height && c < self.width && self.cells[r * self.width + c].is_some()
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.width {
            write!(f, "{col:>4}")?;
        }
        writeln!(f)?;
        for row in (0..self.height).rev() {
            write!(f, "{row:>4}")?;
            for col in 0..self.width {
                let ch = match self.cells[row * self.width + col] {
                    Some(player) => player.symbol(),
                    None => '_',
                };
                write!(f, "{ch:>4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
