//! Win detection.
//!
//! A player wins with `n_in_row` of their stones in an unbroken horizontal,
//! vertical or diagonal line. Every occupied cell is tried as the origin of a
//! run in four directions; the opposite four are covered by starting from the
//! other end of the line.

use crate::board::{Board, Player};

/// Return the winner if any player holds a run of `n_in_row` stones.
///
/// Runs once per simulated ply, so it scans the grid in place without
/// allocating.
pub fn has_winner(board: &Board, n_in_row: usize) -> Option<Player> {
    // A run needs at least n stones on the board
    if n_in_row == 0 || board.occupied_count() < n_in_row {
        return None;
    }

    let width = board.width();
    let height = board.height();
    let n = n_in_row;

    for m in 0..board.size() {
        let Some(player) = board.occupant(m) else {
            continue;
        };
        let (row, col) = board.move_to_location(m);
        let fits_right = col + n <= width;
        let fits_up = row + n <= height;
        let fits_left = col + 1 >= n;

        // Horizontal
        if fits_right && run_from(board, player, m, 1, n) {
            return Some(player);
        }
        // Vertical
        if fits_up && run_from(board, player, m, width, n) {
            return Some(player);
        }
        // Diagonal up-right
        if fits_right && fits_up && run_from(board, player, m, width + 1, n) {
            return Some(player);
        }
        // Diagonal up-left
        if fits_left && fits_up && run_from(board, player, m, width - 1, n) {
            return Some(player);
        }
    }

    None
}

/// Whether the `n` cells `origin, origin + step, ...` all hold `player`.
/// The caller guarantees the line stays on the board.
#[inline]
fn run_from(board: &Board, player: Player, origin: usize, step: usize, n: usize) -> bool {
    (1..n).all(|k| board.occupant(origin + k * step) == Some(player))
}
