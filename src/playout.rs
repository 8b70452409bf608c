//! Move policy used at every ply of a simulation.
//!
//! When every legal move already has statistics for the player to move, the
//! move is picked by UCB1. Otherwise an unexplored move is sampled, preferring
//! cells next to existing stones.

use fastrand::Rng;

use crate::board::{Board, Move, Player};
use crate::mcts::Stats;

/// Pick the next move for `player` on `board`.
///
/// `candidates` is scratch space reused across plies. Returns `None` only
/// when the board is full.
pub fn choose_move(
    board: &Board,
    player: Player,
    stats: &Stats,
    confidence: f64,
    rng: &mut Rng,
    candidates: &mut Vec<Move>,
) -> Option<Move> {
    let available = board.available_moves();
    if available.is_empty() {
        return None;
    }

    if available.iter().all(|&m| stats.plays(player, m) > 0) {
        return ucb_select(board, player, stats, confidence);
    }

    candidates.clear();
    if available.len() > board.n_in_row() {
        adjacent_moves(board, player, stats, candidates);
    }
    if candidates.is_empty() {
        unexplored_moves(board, player, stats, candidates);
    }

    // Non-empty: at least one available move has no plays
    let pick = rng.usize(..candidates.len());
    Some(candidates[pick])
}

/// UCB1 over the available moves. Every move must have a nonzero play count.
///
/// Ties go to the highest cell index.
pub fn ucb_select(board: &Board, player: Player, stats: &Stats, confidence: f64) -> Option<Move> {
    let available = board.available_moves();
    let total: u32 = available.iter().map(|&m| stats.plays(player, m)).sum();
    let log_total = f64::from(total).ln();

    let mut best: Option<(f64, Move)> = None;
    for &m in available {
        let plays = f64::from(stats.plays(player, m));
        let wins = f64::from(stats.wins(player, m));
        let value = wins / plays + (confidence * log_total / plays).sqrt();
        match best {
            Some((best_value, _)) if value < best_value => {}
            _ => best = Some((value, m)),
        }
    }
    best.map(|(_, m)| m)
}

/// Empty cells next to a stone with no play count for `player`.
pub fn adjacent_moves(board: &Board, player: Player, stats: &Stats, out: &mut Vec<Move>) {
    out.extend(
        board
            .available_moves()
            .iter()
            .copied()
            .filter(|&m| stats.plays(player, m) == 0 && board.has_occupied_neighbor(m)),
    );
}

/// Empty cells anywhere with no play count for `player`.
pub fn unexplored_moves(board: &Board, player: Player, stats: &Stats, out: &mut Vec<Move>) {
    out.extend(
        board
            .available_moves()
            .iter()
            .copied()
            .filter(|&m| stats.plays(player, m) == 0),
    );
}
