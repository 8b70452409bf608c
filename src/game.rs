//! Turn-taking game loop.
//!
//! Seats are either a human, who types `row,col` coordinates, or the
//! computer, which asks the [`Mcts`] engine. One engine serves both seats in
//! self-play since it always searches for the player at the front of the turn
//! order.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use fastrand::Rng;
use log::info;

use crate::board::{Board, Location, Move, Player};
use crate::config::Config;
use crate::error::GameError;
use crate::mcts::Mcts;
use crate::rules::has_winner;
use crate::turn::TurnOrder;

/// Outcome check after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(Player),
    Tie,
}

/// Who makes the moves for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Computer,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => write!(f, "Human"),
            Seat::Computer => write!(f, "AI"),
        }
    }
}

pub struct Game {
    board: Board,
    turn: TurnOrder,
    seats: [Seat; 2],
    engine: Mcts,
}

impl Game {
    /// Create a game on an empty board. `human` is the player typing moves,
    /// `None` for self-play.
    pub fn new(
        config: &Config,
        engine: Mcts,
        human: Option<Player>,
        first: Player,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::new(config.width, config.height, config.n_in_row)?;
        let seat_of = |p: Player| {
            if human == Some(p) {
                Seat::Human
            } else {
                Seat::Computer
            }
        };
        Ok(Self {
            board,
            turn: TurnOrder::new(first),
            seats: [seat_of(Player::One), seat_of(Player::Two)],
            engine,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &TurnOrder {
        &self.turn
    }

    pub fn engine(&self) -> &Mcts {
        &self.engine
    }

    pub fn seat(&self, player: Player) -> Seat {
        match player {
            Player::One => self.seats[0],
            Player::Two => self.seats[1],
        }
    }

    /// Win, tie or still going.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = has_winner(&self.board, self.board.n_in_row()) {
            GameStatus::Won(winner)
        } else if self.board.is_full() {
            GameStatus::Tie
        } else {
            GameStatus::Ongoing
        }
    }

    /// Place a stone for the player to move and pass the turn.
    pub fn apply(&mut self, mv: Move) -> Result<Player, GameError> {
        let player = self.turn.current();
        self.board.place(player, mv)?;
        self.turn.advance();
        Ok(player)
    }

    /// Let the computer pick and play a move for the player to move.
    pub fn computer_move(&mut self) -> Result<(Player, Move, f64), GameError> {
        let (mv, win_rate) = self.engine.choose_move(&self.board, &self.turn)?;
        let player = self.apply(mv)?;
        Ok((player, mv, win_rate))
    }

    /// Play until the game ends, reading human moves from `input` and
    /// rendering to `output`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<GameStatus> {
        self.render(output)?;
        loop {
            let status = self.status();
            if status != GameStatus::Ongoing {
                self.announce(status, output)?;
                return Ok(status);
            }

            let player = self.turn.current();
            match self.seat(player) {
                Seat::Human => self.human_move(input, output)?,
                Seat::Computer => {
                    let (_, mv, win_rate) = self
                        .computer_move()
                        .with_context(|| format!("choosing a move for player {player}"))?;
                    let (row, col) = self.board.move_to_location(mv);
                    writeln!(
                        output,
                        "AI move: {row},{col} the percent_wins: {win_rate:.6} ({} simulations)",
                        self.engine.simulations()
                    )?;
                }
            }
            self.render(output)?;
        }
    }

    /// Prompt until the human enters a legal move, then play it.
    fn human_move<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            write!(output, "Your move: ")?;
            output.flush()?;

            line.clear();
            let read = input.read_line(&mut line).context("reading human move")?;
            if read == 0 {
                bail!("input closed before the game ended");
            }

            let mv = parse_location(&line).and_then(|loc| self.board.location_to_move(loc));
            match mv.map(|m| self.apply(m)) {
                Some(Ok(_)) => return Ok(()),
                Some(Err(GameError::InvalidMove(_))) | None => writeln!(output, "invalid move")?,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    fn render<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        for player in [Player::One, Player::Two] {
            writeln!(
                output,
                "{:<5} Player {player} with {}",
                self.seat(player).to_string(),
                player.symbol()
            )?;
        }
        writeln!(output)?;
        write!(output, "{}", self.board)?;
        writeln!(output)?;
        Ok(())
    }

    fn announce<W: Write>(&self, status: GameStatus, output: &mut W) -> anyhow::Result<()> {
        match status {
            GameStatus::Won(winner) => {
                info!("game over, player {winner} wins");
                writeln!(
                    output,
                    "Game end. Winner is {} (player {winner})",
                    self.seat(winner)
                )?;
            }
            GameStatus::Tie => {
                info!("game over, tie");
                writeln!(output, "Game end. Tie")?;
            }
            GameStatus::Ongoing => {}
        }
        Ok(())
    }
}

/// Parse `row,col` into a location. Whitespace around either number is allowed.
pub fn parse_location(s: &str) -> Option<Location> {
    let (row, col) = s.trim().split_once(',')?;
    let row = row.trim().parse::<usize>().ok()?;
    let col = col.trim().parse::<usize>().ok()?;
    Some((row, col))
}

/// Randomly give the human one of the two players and pick who opens.
///
/// Returns `(human, first)`.
pub fn assign_seats(rng: &mut Rng, human_first: bool) -> (Player, Player) {
    let human = if rng.bool() { Player::One } else { Player::Two };
    let first = if human_first || rng.bool() {
        human
    } else {
        human.opponent()
    };
    (human, first)
}
