//! Runtime configuration for a game and its search engine.

use std::time::Duration;

use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ACTIONS, DEFAULT_N_IN_ROW, DEFAULT_TIME_BUDGET, DEFAULT_WIDTH,
    UCB_CONFIDENCE,
};
use crate::error::GameError;

/// Board geometry plus search limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Stones in a line needed to win
    pub n_in_row: usize,
    /// Wall-clock budget per decision, in seconds
    pub time_budget: f64,
    /// Maximum plies per simulation
    pub max_actions: usize,
    /// UCB1 exploration constant
    pub confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            n_in_row: DEFAULT_N_IN_ROW,
            time_budget: DEFAULT_TIME_BUDGET,
            max_actions: DEFAULT_MAX_ACTIONS,
            confidence: UCB_CONFIDENCE,
        }
    }
}

impl Config {
    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), GameError> {
        check_geometry(self.width, self.height, self.n_in_row)?;
        if !self.time_budget.is_finite() || self.time_budget <= 0.0 {
            return Err(GameError::Configuration(format!(
                "time budget must be a positive number of seconds (got {})",
                self.time_budget
            )));
        }
        if self.max_actions == 0 {
            return Err(GameError::Configuration(
                "max actions per simulation must be at least 1".to_string(),
            ));
        }
        if !self.confidence.is_finite() || self.confidence < 0.0 {
            return Err(GameError::Configuration(format!(
                "UCB confidence must be a non-negative number (got {})",
                self.confidence
            )));
        }
        Ok(())
    }

    /// The per-decision budget as a `Duration`.
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs_f64(self.time_budget)
    }
}

/// Reject boards that cannot contain a winning run.
pub(crate) fn check_geometry(width: usize, height: usize, n_in_row: usize) -> Result<(), GameError> {
    if n_in_row == 0 {
        return Err(GameError::Configuration(
            "run length must be at least 1".to_string(),
        ));
    }
    if width < n_in_row || height < n_in_row {
        return Err(GameError::Configuration(format!(
            "board width and height can not be less than {n_in_row} (got {width}x{height})"
        )));
    }
    Ok(())
}
