//! Integration tests for gomoku-mcts
//!
//! These exercise the board, win detection, search engine and game loop
//! together through the public API.

use std::collections::HashMap;
use std::io::Cursor;

use gomoku_mcts::board::{Board, Player};
use gomoku_mcts::config::Config;
use gomoku_mcts::error::GameError;
use gomoku_mcts::game::{Game, GameStatus};
use gomoku_mcts::mcts::Mcts;
use gomoku_mcts::rules::has_winner;
use gomoku_mcts::turn::TurnOrder;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// A small, fast configuration for engine tests.
fn quick_config(width: usize, height: usize, n_in_row: usize, time_budget: f64) -> Config {
    Config {
        width,
        height,
        n_in_row,
        time_budget,
        ..Config::default()
    }
}

/// Place stones alternately, starting with Player One.
fn setup_board(width: usize, height: usize, n_in_row: usize, moves: &[usize]) -> Board {
    let mut board = Board::new(width, height, n_in_row).unwrap();
    let mut turn = TurnOrder::new(Player::One);
    for &mv in moves {
        board.place(turn.advance(), mv).unwrap();
    }
    board
}

/// Place stones for one player only.
fn setpos(width: usize, height: usize, n_in_row: usize, player: Player, cells: &[usize]) -> Board {
    let mut board = Board::new(width, height, n_in_row).unwrap();
    for &mv in cells {
        board.place(player, mv).unwrap();
    }
    board
}

/// A 3x3 position with no line of three, reached by alternating moves.
///
/// ```text
/// 2  X O X
/// 1  X O O
/// 0  O X X
/// ```
const TIE_3X3: [usize; 9] = [1, 0, 2, 4, 3, 5, 6, 7, 8];

// =============================================================================
// Board model
// =============================================================================

#[test]
fn test_available_plus_occupied_is_board_size() {
    let mut board = Board::new(6, 5, 4).unwrap();
    let mut turn = TurnOrder::new(Player::Two);
    assert_eq!(board.available_moves().len() + board.occupied_count(), 30);

    for mv in [7, 0, 29, 14, 15, 22] {
        board.place(turn.advance(), mv).unwrap();
        assert_eq!(board.available_moves().len() + board.occupied_count(), 30);
    }

    // Rejected moves leave the invariant intact
    assert_eq!(board.place(Player::One, 7), Err(GameError::InvalidMove(7)));
    assert_eq!(board.place(Player::One, 30), Err(GameError::InvalidMove(30)));
    assert_eq!(board.available_moves().len() + board.occupied_count(), 30);
}

#[test]
fn test_coordinate_roundtrip() {
    for (w, h) in [(8, 8), (5, 9), (12, 6)] {
        let board = Board::new(w, h, 5).unwrap();
        for m in 0..w * h {
            let loc = board.move_to_location(m);
            assert_eq!(
                board.location_to_move(loc),
                Some(m),
                "Roundtrip failed for {m} on {w}x{h}"
            );
        }
    }
}

#[test]
fn test_out_of_range_coordinates() {
    let board = Board::new(8, 8, 5).unwrap();
    assert_eq!(board.location_to_move((8, 0)), None);
    assert_eq!(board.location_to_move((0, 8)), None);
    assert_eq!(board.location_to_move((7, 7)), Some(63));
}

// =============================================================================
// Win detection
// =============================================================================

#[test]
fn test_exact_run_wins_one_short_does_not() {
    for n in 3..=6 {
        let run: Vec<usize> = (20..20 + n).collect();
        let board = setpos(10, 10, n, Player::Two, &run);
        assert_eq!(has_winner(&board, n), Some(Player::Two), "run of {n}");

        let short = setpos(10, 10, n, Player::Two, &run[..n - 1]);
        assert_eq!(has_winner(&short, n), None, "run of {}", n - 1);
    }
}

#[test]
fn test_scenario_a_few_stones_no_winner() {
    // 8x8, five in a row, fewer than 7 stones on the board
    let arrangements: [&[usize]; 5] = [
        &[],
        &[27],
        &[0, 1, 2, 3],
        &[0, 9, 18, 27, 63, 62],
        &[0, 1, 2, 3, 5, 6],
    ];
    for cells in arrangements {
        let board = setpos(8, 8, 5, Player::One, cells);
        assert_eq!(has_winner(&board, 5), None, "cells {cells:?}");
    }

    // Alternating stones never line up five of one colour
    let board = setup_board(8, 8, 5, &[0, 1, 2, 3, 4, 5]);
    assert_eq!(has_winner(&board, 5), None);
}

#[test]
fn test_scenario_b_five_in_first_row() {
    let board = setpos(8, 8, 5, Player::One, &[0, 1, 2, 3, 4]);
    assert_eq!(has_winner(&board, 5), Some(Player::One));

    let board = setpos(8, 8, 5, Player::Two, &[0, 1, 2, 3, 4]);
    assert_eq!(has_winner(&board, 5), Some(Player::Two));
}

#[test]
fn test_all_directions_on_rectangular_board() {
    // 7 wide, 5 tall, four in a row
    let cases: [(&[usize], &str); 4] = [
        (&[17, 18, 19, 20], "horizontal"),
        (&[6, 13, 20, 27], "vertical"),
        (&[1, 9, 17, 25], "diagonal up-right"),
        (&[10, 16, 22, 28], "diagonal up-left"),
    ];
    for (cells, name) in cases {
        let board = setpos(7, 5, 4, Player::One, cells);
        assert_eq!(has_winner(&board, 4), Some(Player::One), "{name}");
    }
}

// =============================================================================
// Search engine
// =============================================================================

#[test]
fn test_single_move_returns_immediately() {
    let config = quick_config(3, 3, 3, 5.0);
    let board = setup_board(3, 3, 3, &TIE_3X3[..8]);
    let mut engine = Mcts::with_seed(&config, 1).unwrap();

    let (mv, win_rate) = engine
        .choose_move(&board, &TurnOrder::new(Player::One))
        .unwrap();
    assert_eq!(mv, 8);
    assert_eq!(win_rate, 1.0);
    assert_eq!(engine.simulations(), 0);
}

#[test]
fn test_full_board_has_no_move() {
    let config = quick_config(3, 3, 3, 0.01);
    let board = setup_board(3, 3, 3, &TIE_3X3);
    let mut engine = Mcts::with_seed(&config, 1).unwrap();
    assert_eq!(
        engine.choose_move(&board, &TurnOrder::new(Player::One)),
        Err(GameError::NoLegalMoveAvailable)
    );
}

#[test]
fn test_wins_never_exceed_plays() {
    let config = quick_config(5, 5, 4, 0.05);
    let board = setup_board(5, 5, 4, &[12, 6]);
    let mut engine = Mcts::with_seed(&config, 17).unwrap();

    engine
        .choose_move(&board, &TurnOrder::new(Player::One))
        .unwrap();
    assert!(engine.simulations() > 0);
    assert!(!engine.stats().is_empty());
    for ((player, mv), plays, wins) in engine.stats().iter() {
        assert!(wins <= plays, "({player}, {mv}): {wins} wins > {plays} plays");
    }
}

#[test]
fn test_backpropagation_accounts_for_every_play() {
    let config = quick_config(4, 4, 3, 1.0);
    let board = Board::new(4, 4, 3).unwrap();
    let turn = TurnOrder::new(Player::One);
    let mut engine = Mcts::with_seed(&config, 99).unwrap();

    let mut summed: HashMap<(Player, usize), u32> = HashMap::new();
    for _ in 0..200 {
        let before: HashMap<_, _> = engine.stats().iter().map(|(k, p, _)| (k, p)).collect();
        engine.run_simulation(board.clone(), turn.clone()).unwrap();
        for (key, plays, wins) in engine.stats().iter() {
            assert!(wins <= plays);
            let delta = plays - before.get(&key).copied().unwrap_or(0);
            assert!(delta <= 1, "{key:?} counted twice in one simulation");
            *summed.entry(key).or_insert(0) += delta;
        }
    }

    for (key, plays, _) in engine.stats().iter() {
        assert_eq!(summed.get(&key).copied().unwrap_or(0), plays, "{key:?}");
    }
    // At most one new entry per simulation
    assert!(engine.stats().len() <= 200);
    assert!(engine.max_depth() >= 1);
}

#[test]
fn test_choose_move_resets_statistics() {
    let config = quick_config(3, 3, 3, 0.02);
    let empty = Board::new(3, 3, 3).unwrap();
    let turn = TurnOrder::new(Player::One);
    let mut engine = Mcts::with_seed(&config, 3).unwrap();

    for _ in 0..50 {
        engine.run_simulation(empty.clone(), turn.clone()).unwrap();
    }
    assert!(!engine.stats().is_empty());

    // A new decision starts from empty tables
    let last_cell = setup_board(3, 3, 3, &TIE_3X3[..8]);
    engine.choose_move(&last_cell, &turn).unwrap();
    assert!(engine.stats().is_empty());
    assert_eq!(engine.max_depth(), 0);

    // Each simulation expands at most one entry
    engine.choose_move(&empty, &turn).unwrap();
    assert!(engine.stats().len() <= engine.simulations());
}

#[test]
fn test_takes_immediate_win() {
    // X X .      One to move, 2 completes the bottom row
    // O O .      and Two threatens 5
    let config = quick_config(3, 3, 3, 0.3);
    let board = setup_board(3, 3, 3, &[0, 3, 1, 4]);
    let mut engine = Mcts::with_seed(&config, 2024).unwrap();

    let (mv, win_rate) = engine
        .choose_move(&board, &TurnOrder::new(Player::One))
        .unwrap();
    assert_eq!(mv, 2);
    assert_eq!(win_rate, 1.0);
}

#[test]
fn test_scenario_d_board_smaller_than_run() {
    let config = Config {
        width: 4,
        n_in_row: 5,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(GameError::Configuration(_))));
    assert!(matches!(
        Board::new(4, 8, 5),
        Err(GameError::Configuration(_))
    ));
    assert!(matches!(
        Mcts::new(&config),
        Err(GameError::Configuration(_))
    ));
}

// =============================================================================
// Game loop
// =============================================================================

#[test]
fn test_scenario_c_full_board_is_a_tie() {
    let config = quick_config(3, 3, 3, 0.01);
    let engine = Mcts::with_seed(&config, 1).unwrap();
    let mut game = Game::new(&config, engine, Some(Player::One), Player::One).unwrap();

    for (i, &mv) in TIE_3X3.iter().enumerate() {
        assert_eq!(game.status(), GameStatus::Ongoing, "before move {i}");
        game.apply(mv).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Tie);
    assert!(game.board().is_full());
}

#[test]
fn test_game_detects_win() {
    let config = quick_config(3, 3, 3, 0.01);
    let engine = Mcts::with_seed(&config, 1).unwrap();
    let mut game = Game::new(&config, engine, None, Player::Two).unwrap();

    for mv in [0, 3, 1, 4, 2] {
        game.apply(mv).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Won(Player::Two));
}

#[test]
fn test_selfplay_runs_to_completion() {
    let config = quick_config(4, 4, 3, 0.005);
    let engine = Mcts::with_seed(&config, 8).unwrap();
    let mut game = Game::new(&config, engine, None, Player::One).unwrap();

    while game.status() == GameStatus::Ongoing {
        let (player, mv, win_rate) = game.computer_move().unwrap();
        assert_eq!(game.board().occupant(mv), Some(player));
        assert!((0.0..=1.0).contains(&win_rate));
        assert_eq!(
            game.board().available_moves().len() + game.board().occupied_count(),
            16
        );
    }
}

#[test]
fn test_human_game_with_scripted_input() {
    let config = quick_config(3, 3, 3, 0.01);
    let engine = Mcts::with_seed(&config, 5).unwrap();
    let mut game = Game::new(&config, engine, Some(Player::One), Player::One).unwrap();

    // Junk first, then every cell; occupied cells are rejected and skipped
    let script = "hello\n9,9\n1\n0,0\n0,1\n0,2\n1,0\n1,1\n1,2\n2,0\n2,1\n2,2\n";
    let mut input = Cursor::new(script.as_bytes());
    let mut output = Vec::new();

    let status = game.run(&mut input, &mut output).unwrap();
    assert_ne!(status, GameStatus::Ongoing);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Human Player 1 with X"));
    assert!(text.contains("invalid move"));
    assert!(text.contains("AI move:"));
    assert!(text.contains("Game end."));
    assert_eq!(game.board().occupant(0), Some(Player::One));
}

#[test]
fn test_human_input_closed() {
    let config = quick_config(3, 3, 3, 0.01);
    let engine = Mcts::with_seed(&config, 5).unwrap();
    let mut game = Game::new(&config, engine, Some(Player::Two), Player::Two).unwrap();

    let mut input = Cursor::new(&b"2,2\n"[..]);
    let mut output = Vec::new();
    assert!(game.run(&mut input, &mut output).is_err());
    assert_eq!(game.board().occupant(8), Some(Player::Two));
}
