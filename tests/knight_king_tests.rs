// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use gambit::{Color, Game, MoveError, MoveFlags, Square};

#[test]
fn knight_jumps_over_occupied_squares() {
    // From the starting position every square around b1 is friendly or
    // off-board, yet the knight is free to move.
    let mut game = Game::new();
    assert!(game.attempt_move(Square::B1, Square::C3).is_ok());
}

#[test]
fn knight_l_shapes_from_an_open_square() {
    for &to in &[
        Square::C6,
        Square::E6,
        Square::F5,
        Square::F3,
        Square::E2,
        Square::C2,
        Square::B3,
        Square::B5,
    ] {
        let mut game = Game::from_fen("8/8/8/8/3N4/8/8/8 w - - 0 1").unwrap();
        assert!(game.attempt_move(Square::D4, to).is_ok(), "d4 -> {}", to);
    }
}

#[test]
fn knight_rejects_non_l_shapes() {
    for &to in &[Square::D5, Square::E5, Square::D6, Square::G4, Square::H8] {
        let mut game = Game::from_fen("8/8/8/8/3N4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(
            Err(MoveError::Illegal),
            game.attempt_move(Square::D4, to),
            "d4 -> {}",
            to
        );
    }
}

#[test]
fn knight_captures_on_landing() {
    let mut game = Game::from_fen("8/8/4q3/8/3N4/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::D4, Square::E6).unwrap();
    assert!(record.flags.contains(MoveFlags::CAPTURE));
    assert_eq!(9, game.score(Color::Black));
}

#[test]
fn king_steps_one_square_in_any_direction() {
    for &to in &[
        Square::D5,
        Square::E5,
        Square::E4,
        Square::E3,
        Square::D3,
        Square::C3,
        Square::C4,
        Square::C5,
    ] {
        let mut game = Game::from_fen("8/8/8/8/3K4/8/8/8 w - - 0 1").unwrap();
        assert!(game.attempt_move(Square::D4, to).is_ok(), "d4 -> {}", to);
    }
}

#[test]
fn king_rejects_longer_steps() {
    // Two squares is only ever legal as castling geometry on the back row.
    let mut game = Game::from_fen("8/8/8/8/3K4/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::D6)
    );
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::F4)
    );
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::F6)
    );
}

#[test]
fn king_captures_adjacent_enemy() {
    let mut game = Game::from_fen("8/8/8/8/3Kp3/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::D4, Square::E4).unwrap();
    assert!(record.flags.contains(MoveFlags::CAPTURE));
    assert_eq!(1, game.score(Color::Black));
}
