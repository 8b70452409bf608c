//! Default parameters for the board and the search engine.
//!
//! These are the values used when nothing is overridden on the command line.
//! See [`crate::config::Config`] for the validated runtime configuration.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width (number of columns).
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height (number of rows).
pub const DEFAULT_HEIGHT: usize = 8;

/// Default number of stones in a line needed to win.
pub const DEFAULT_N_IN_ROW: usize = 5;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default wall-clock budget per decision, in seconds.
pub const DEFAULT_TIME_BUDGET: f64 = 5.0;

/// Default cap on plies played in a single simulation.
pub const DEFAULT_MAX_ACTIONS: usize = 1000;

/// UCB1 confidence constant.
pub const UCB_CONFIDENCE: f64 = 1.96;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Row/column offsets of the 8 neighbors of a cell.
/// Order: N, NE, E, SE, S, SW, W, NW
pub const NEIGHBORS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
