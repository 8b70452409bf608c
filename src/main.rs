//! Gomoku-MCTS: play N-in-a-row against a Monte Carlo Tree Search engine.
//!
//! ## Usage
//!
//! - `gomoku-mcts` - Play against the engine on an 8x8 board, 5 in a row
//! - `gomoku-mcts play --width 10 --height 10 --time 3` - Custom game
//! - `gomoku-mcts selfplay` - Watch the engine play itself

use std::io;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use gomoku_mcts::board::Player;
use gomoku_mcts::config::Config;
use gomoku_mcts::constants::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ACTIONS, DEFAULT_N_IN_ROW, DEFAULT_TIME_BUDGET, DEFAULT_WIDTH,
    UCB_CONFIDENCE,
};
use gomoku_mcts::game::{Game, assign_seats};
use gomoku_mcts::logging::setup_logging;
use gomoku_mcts::mcts::Mcts;

/// Gomoku-MCTS: an N-in-a-row engine using Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "gomoku-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine
    Play {
        #[command(flatten)]
        opts: GameOpts,

        /// Make the human move first
        #[arg(long)]
        human_first: bool,
    },
    /// Let the engine play both sides
    Selfplay {
        #[command(flatten)]
        opts: GameOpts,
    },
}

#[derive(Args, Clone)]
struct GameOpts {
    /// Board width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Stones in a row needed to win
    #[arg(short = 'n', long, default_value_t = DEFAULT_N_IN_ROW)]
    n_in_row: usize,

    /// Thinking time per move, in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIME_BUDGET)]
    time: f64,

    /// Maximum plies per simulation
    #[arg(long, default_value_t = DEFAULT_MAX_ACTIONS)]
    max_actions: usize,

    /// UCB1 confidence constant
    #[arg(long, default_value_t = UCB_CONFIDENCE)]
    confidence: f64,

    /// Seed for the engine's random number generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameOpts {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            n_in_row: DEFAULT_N_IN_ROW,
            time: DEFAULT_TIME_BUDGET,
            max_actions: DEFAULT_MAX_ACTIONS,
            confidence: UCB_CONFIDENCE,
            seed: None,
        }
    }
}

impl GameOpts {
    fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            n_in_row: self.n_in_row,
            time_budget: self.time,
            max_actions: self.max_actions,
            confidence: self.confidence,
        }
    }

    fn engine(&self, config: &Config) -> anyhow::Result<Mcts> {
        let engine = match self.seed {
            Some(seed) => Mcts::with_seed(config, seed)?,
            None => Mcts::new(config)?,
        };
        Ok(engine)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level).context("starting logger")?;

    let command = cli.command.unwrap_or(Commands::Play {
        opts: GameOpts::default(),
        human_first: false,
    });

    let mut game = match &command {
        Commands::Play { opts, human_first } => {
            let config = opts.config();
            let engine = opts.engine(&config).context("invalid configuration")?;
            let mut rng = match opts.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let (human, first) = assign_seats(&mut rng, *human_first);
            info!("human plays {human}, player {first} moves first");
            Game::new(&config, engine, Some(human), first)?
        }
        Commands::Selfplay { opts } => {
            let config = opts.config();
            let engine = opts.engine(&config).context("invalid configuration")?;
            Game::new(&config, engine, None, Player::One)?
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    game.run(&mut input, &mut output)?;
    Ok(())
}
