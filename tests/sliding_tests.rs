// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use gambit::{Color, Game, MoveError, MoveFlags, Square};

#[test]
fn rook_blocked_by_interposed_piece() {
    // Black rook on a8 cannot reach a5 while the pawn sits on a7.
    let mut game = Game::from_fen("r7/p7/8/8/8/8/8/8 b - - 0 1").unwrap();
    let before = game.as_fen();

    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::A8, Square::A5)
    );

    // Nothing mutated: same position, same side to move.
    assert_eq!(before, game.as_fen());
    assert_eq!(Color::Black, game.side_to_move());
}

#[test]
fn rook_moves_along_ranks_and_files() {
    let mut game = Game::from_fen("8/8/8/8/3R4/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::D4, Square::D8).unwrap();
    assert_eq!(MoveFlags::QUIET, record.flags);

    let mut game = Game::from_fen("8/8/8/8/3R4/8/8/8 w - - 0 1").unwrap();
    assert!(game.attempt_move(Square::D4, Square::H4).is_ok());

    // Diagonals are not rook moves.
    let mut game = Game::from_fen("8/8/8/8/3R4/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::F6)
    );
}

#[test]
fn rook_captures_at_destination_but_not_beyond_blockers() {
    // Rook takes the pawn at d7.
    let mut game = Game::from_fen("8/3p4/8/8/3R4/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::D4, Square::D7).unwrap();
    assert!(record.flags.contains(MoveFlags::CAPTURE));
    assert_eq!(1, game.score(Color::Black));

    // With a knight interposed on d5, d7 is unreachable even though the
    // destination itself holds a capturable piece.
    let mut game = Game::from_fen("8/3p4/8/3N4/3R4/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::D7)
    );
}

#[test]
fn bishop_moves_diagonally_only() {
    let mut game = Game::from_fen("8/8/8/8/8/8/8/2B5 w - - 0 1").unwrap();
    assert!(game.attempt_move(Square::C1, Square::H6).is_ok());

    let mut game = Game::from_fen("8/8/8/8/8/8/8/2B5 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::C1, Square::C4)
    );
}

#[test]
fn bishop_blocked_by_interior_piece() {
    // A pawn on e3 blocks the c1 bishop's northeast diagonal, no matter
    // what occupies the destination.
    let mut game = Game::from_fen("8/8/8/8/8/4P3/8/2B5 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::C1, Square::F4)
    );
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::C1, Square::H6)
    );
}

#[test]
fn bishop_captures_enemy_at_destination() {
    let mut game = Game::from_fen("8/8/8/8/5n2/8/8/2B5 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::C1, Square::F4).unwrap();
    assert!(record.flags.contains(MoveFlags::CAPTURE));
    assert_eq!(3, game.score(Color::Black));
}

#[test]
fn queen_unions_rook_and_bishop() {
    let mut game = Game::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
    assert!(game.attempt_move(Square::D4, Square::D1).is_ok());

    let mut game = Game::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
    assert!(game.attempt_move(Square::D4, Square::G7).is_ok());

    // Knight-shaped queen moves do not exist.
    let mut game = Game::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::E6)
    );
}

#[test]
fn queen_respects_obstructions_on_both_branches() {
    let mut game = Game::from_fen("8/8/8/3p4/3Q4/2P5/8/8 w - - 0 1").unwrap();
    // The d5 pawn is capturable, but d8 beyond it is not reachable.
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::D8)
    );
    // The c3 pawn blocks the southwest diagonal.
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D4, Square::A1)
    );
}

#[test]
fn friendly_destination_is_never_legal() {
    let mut game = Game::from_fen("8/8/8/8/8/8/3P4/3R4 w - - 0 1").unwrap();
    assert_eq!(
        Err(MoveError::Illegal),
        game.attempt_move(Square::D1, Square::D2)
    );
}
