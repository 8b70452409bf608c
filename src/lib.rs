//! Gomoku-MCTS: an N-in-a-row game engine driven by Monte Carlo Tree Search.
//!
//! The engine keeps play/win counts per (player, move), explores with UCB1
//! once every candidate has been tried, and otherwise samples unexplored
//! cells next to existing stones.
//!
//! ## Modules
//!
//! - [`constants`] - Default board dimensions and engine parameters
//! - [`config`] - Validated runtime configuration
//! - [`error`] - Error types
//! - [`board`] - Board state, move/coordinate conversion, rendering
//! - [`turn`] - Rotating turn order
//! - [`rules`] - Win detection
//! - [`playout`] - Per-ply move policy (UCB1 and adjacency heuristic)
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`game`] - Turn-taking game loop
//! - [`logging`] - Logger setup
//!
//! ## Example
//!
//! ```
//! use gomoku_mcts::board::{Board, Player};
//! use gomoku_mcts::config::Config;
//! use gomoku_mcts::mcts::Mcts;
//! use gomoku_mcts::turn::TurnOrder;
//!
//! let config = Config { time_budget: 0.05, ..Config::default() };
//! let mut board = Board::new(config.width, config.height, config.n_in_row).unwrap();
//! board.place(Player::Two, 27).unwrap();
//!
//! let mut engine = Mcts::with_seed(&config, 1).unwrap();
//! let (mv, win_rate) = engine.choose_move(&board, &TurnOrder::new(Player::One)).unwrap();
//! println!("Best move: {:?} ({:.1}%)", board.move_to_location(mv), win_rate * 100.0);
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod logging;
pub mod mcts;
pub mod playout;
pub mod rules;
pub mod turn;
