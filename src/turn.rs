//! Rotating turn order.
//!
//! Stored as a fixed player list plus a cursor, so rotation never moves
//! elements and cloning for a simulation is a small copy.

use crate::board::Player;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOrder {
    players: Vec<Player>,
    cursor: usize,
}

impl TurnOrder {
    /// Turn order starting with `first`.
    pub fn new(first: Player) -> Self {
        Self {
            players: vec![first, first.opponent()],
            cursor: 0,
        }
    }

    /// The player whose move is next.
    #[inline]
    pub fn current(&self) -> Player {
        self.players[self.cursor]
    }

    /// Return the player to move and rotate them to the back.
    #[inline]
    pub fn advance(&mut self) -> Player {
        let player = self.players[self.cursor];
        self.cursor = (self.cursor + 1) % self.players.len();
        player
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
