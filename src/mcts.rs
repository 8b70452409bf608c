//! Monte Carlo Tree Search over (player, move) statistics.
//!
//! Rather than an explicit tree, the search keeps two flat tables keyed by
//! `(player, move)`: how many simulations played that move for that player,
//! and how many of those the player went on to win. Each decision:
//!
//! - clears the tables,
//! - runs simulations on cloned boards until the time budget runs out,
//! - picks the legal move with the best observed win rate.
//!
//! Each simulation walks plies with the policy in [`crate::playout`], adds at
//! most one new entry to the tables, and backpropagates the outcome to every
//! (player, move) pair it visited.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use fastrand::Rng;
use log::{debug, info, trace};

use crate::board::{Board, Move, Player};
use crate::config::Config;
use crate::error::GameError;
use crate::playout;
use crate::rules::has_winner;
use crate::turn::TurnOrder;

/// Play and win counts per (player, move).
#[derive(Debug, Default, Clone)]
pub struct Stats {
    plays: HashMap<(Player, Move), u32>,
    wins: HashMap<(Player, Move), u32>,
}

impl Stats {
    /// Play count, 0 when the pair has no entry.
    #[inline]
    pub fn plays(&self, player: Player, mv: Move) -> u32 {
        self.plays.get(&(player, mv)).copied().unwrap_or(0)
    }

    /// Win count, 0 when the pair has no entry.
    #[inline]
    pub fn wins(&self, player: Player, mv: Move) -> u32 {
        self.wins.get(&(player, mv)).copied().unwrap_or(0)
    }

    pub fn contains(&self, player: Player, mv: Move) -> bool {
        self.plays.contains_key(&(player, mv))
    }

    /// Create a zeroed entry.
    pub fn insert(&mut self, player: Player, mv: Move) {
        self.plays.insert((player, mv), 0);
        self.wins.insert((player, mv), 0);
    }

    /// Count one play of `(player, mv)`, creating the entry if needed.
    #[cfg(test)]
    pub(crate) fn record(&mut self, player: Player, mv: Move, won: bool) {
        *self.plays.entry((player, mv)).or_insert(0) += 1;
        let wins = self.wins.entry((player, mv)).or_insert(0);
        if won {
            *wins += 1;
        }
    }

    /// Credit one play to every visited pair that has an entry, and one win
    /// to those belonging to `winner`.
    pub fn backpropagate(&mut self, visited: &HashSet<(Player, Move)>, winner: Option<Player>) {
        for &(player, mv) in visited {
            if let Some(plays) = self.plays.get_mut(&(player, mv)) {
                *plays += 1;
                if winner == Some(player) {
                    *self.wins.entry((player, mv)).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn clear(&mut self) {
        self.plays.clear();
        self.wins.clear();
    }

    /// Iterate `((player, move), plays, wins)`.
    pub fn iter(&self) -> impl Iterator<Item = ((Player, Move), u32, u32)> + '_ {
        self.plays
            .iter()
            .map(|(&key, &plays)| (key, plays, self.wins.get(&key).copied().unwrap_or(0)))
    }
}

/// The search engine. Statistics live for one decision at a time.
pub struct Mcts {
    config: Config,
    stats: Stats,
    rng: Rng,
    /// Deepest ply at which a new entry was created this decision
    max_depth: usize,
    /// Simulations run this decision
    simulations: usize,
    candidates: Vec<Move>,
}

impl Mcts {
    /// Create an engine with entropy-seeded randomness.
    pub fn new(config: &Config) -> Result<Self, GameError> {
        Self::with_rng(config, Rng::new())
    }

    /// Create an engine with a fixed seed, for reproducible play.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, Rng::with_seed(seed))
    }

    fn with_rng(config: &Config, rng: Rng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            stats: Stats::default(),
            rng,
            max_depth: 0,
            simulations: 0,
            candidates: Vec::with_capacity(config.width * config.height),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Forget all statistics and diagnostics.
    pub fn reset(&mut self) {
        self.stats.clear();
        self.max_depth = 0;
        self.simulations = 0;
    }

    /// Choose a move for the player at the front of `turn`.
    ///
    /// Returns the move and its estimated win rate. The live board is only
    /// read; all simulation happens on clones.
    pub fn choose_move(&mut self, board: &Board, turn: &TurnOrder) -> Result<(Move, f64), GameError> {
        let available = board.available_moves();
        let mut moves = available.iter().copied();
        let (first, second) = (moves.next(), moves.next());
        match (first, second) {
            (None, _) => return Err(GameError::NoLegalMoveAvailable),
            (Some(only), None) => {
                self.reset();
                debug!("only one legal move left: {only}");
                return Ok((only, 1.0));
            }
            _ => {}
        }

        self.reset();
        let budget = self.config.time_budget();
        let begin = Instant::now();
        while begin.elapsed() < budget {
            self.run_simulation(board.clone(), turn.clone())?;
            self.simulations += 1;
        }
        info!("total simulations={}", self.simulations);

        let (mv, win_rate) = self.select_one_move(board, turn.current())?;
        info!("maximum depth searched: {}", self.max_depth);
        let (row, col) = board.move_to_location(mv);
        info!("AI move: {row},{col} win rate: {win_rate:.6}");
        Ok((mv, win_rate))
    }

    /// The available move with the best observed win rate for `player`.
    ///
    /// Unseen moves count as 0 wins over 1 play. Ties go to the highest cell
    /// index.
    pub fn select_one_move(&self, board: &Board, player: Player) -> Result<(Move, f64), GameError> {
        let mut best: Option<(f64, Move)> = None;
        for &m in board.available_moves() {
            let plays = self.stats.plays(player, m).max(1);
            let rate = f64::from(self.stats.wins(player, m)) / f64::from(plays);
            match best {
                Some((best_rate, _)) if rate < best_rate => {}
                _ => best = Some((rate, m)),
            }
        }
        best.map(|(rate, m)| (m, rate))
            .ok_or(GameError::NoLegalMoveAvailable)
    }

    /// Play one simulation on `board` starting with the front of `turn`.
    ///
    /// Both arguments are consumed: the caller passes clones of the live state.
    /// Returns the winner, `None` for a full board or an exhausted ply cap.
    pub fn run_simulation(
        &mut self,
        mut board: Board,
        mut turn: TurnOrder,
    ) -> Result<Option<Player>, GameError> {
        if board.is_full() {
            return Err(GameError::NoLegalMoveAvailable);
        }

        let n_in_row = board.n_in_row();
        let mut visited: HashSet<(Player, Move)> = HashSet::new();
        let mut winner = None;
        let mut expand = true;

        for ply in 1..=self.config.max_actions {
            let player = turn.advance();
            let mv = playout::choose_move(
                &board,
                player,
                &self.stats,
                self.config.confidence,
                &mut self.rng,
                &mut self.candidates,
            )
            .ok_or(GameError::NoLegalMoveAvailable)?;

            board.place(player, mv)?;

            // Expand at most one new entry per simulation
            if expand && !self.stats.contains(player, mv) {
                expand = false;
                self.stats.insert(player, mv);
                if ply > self.max_depth {
                    self.max_depth = ply;
                }
            }

            visited.insert((player, mv));

            winner = has_winner(&board, n_in_row);
            if board.is_full() || winner.is_some() {
                break;
            }
        }

        trace!("simulation winner: {winner:?}");
        self.stats.backpropagate(&visited, winner);
        Ok(winner)
    }
}
