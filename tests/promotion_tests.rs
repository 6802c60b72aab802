// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use gambit::{Color, Game, MoveFlags, PieceKind, PromotionError, Square};

#[test]
fn reaching_the_back_rank_registers_a_pending_promotion() {
    let mut game = Game::from_fen("8/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();

    let record = game.attempt_move(Square::E7, Square::E8).unwrap();
    assert!(record.flags.contains(MoveFlags::PROMOTION));
    assert!(game.promotion_pending(record.piece));

    // Until the decision arrives the piece keeps its pawn identity on the
    // destination square.
    let pawn = game.board().piece(record.piece);
    assert_eq!(PieceKind::Pawn, pawn.kind());
    assert_eq!(Some(Square::E8), pawn.square());
}

#[test]
fn resolution_changes_kind_and_value_in_place() {
    let mut game = Game::from_fen("8/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::E7, Square::E8).unwrap();

    game.resolve_promotion(record.piece, PieceKind::Queen).unwrap();

    let piece = game.board().piece(record.piece);
    assert_eq!(PieceKind::Queen, piece.kind());
    assert_eq!(9, piece.value());
    // Identity is preserved: same square, same color, still active.
    assert_eq!(Some(Square::E8), piece.square());
    assert_eq!(Color::White, piece.color());
    assert!(piece.is_active());
    assert!(!game.promotion_pending(record.piece));
}

#[test]
fn resolution_happens_exactly_once() {
    let mut game = Game::from_fen("8/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::E7, Square::E8).unwrap();

    game.resolve_promotion(record.piece, PieceKind::Knight).unwrap();
    assert_eq!(
        Err(PromotionError::NothingPending),
        game.resolve_promotion(record.piece, PieceKind::Queen)
    );
}

#[test]
fn resolving_without_a_pending_promotion_fails() {
    let mut game = Game::new();
    let pawn = game.board().piece_at(Square::E2).unwrap();
    assert_eq!(
        Err(PromotionError::NothingPending),
        game.resolve_promotion(pawn, PieceKind::Queen)
    );
}

#[test]
fn king_and_pawn_are_ineligible_choices() {
    let mut game = Game::from_fen("8/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::E7, Square::E8).unwrap();

    assert_eq!(
        Err(PromotionError::IneligibleKind),
        game.resolve_promotion(record.piece, PieceKind::King)
    );
    assert_eq!(
        Err(PromotionError::IneligibleKind),
        game.resolve_promotion(record.piece, PieceKind::Pawn)
    );

    // A refused choice does not consume the pending record.
    assert!(game.promotion_pending(record.piece));
    assert!(game.resolve_promotion(record.piece, PieceKind::Rook).is_ok());
}

#[test]
fn unanswered_promotion_does_not_block_the_game() {
    let mut game = Game::from_fen("3k4/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::E7, Square::E8).unwrap();

    // Board and turn state are already committed; black plays on while the
    // promotion decision is still outstanding.
    assert_eq!(Color::Black, game.side_to_move());
    assert!(game.attempt_move(Square::D8, Square::D7).is_ok());
    assert!(game.promotion_pending(record.piece));
    assert_eq!(PieceKind::Pawn, game.board().piece(record.piece).kind());
}

#[test]
fn capture_onto_the_back_rank_promotes_too() {
    let mut game = Game::from_fen("3n4/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();

    let record = game.attempt_move(Square::E7, Square::D8).unwrap();
    assert!(record.flags.contains(MoveFlags::CAPTURE));
    assert!(record.flags.contains(MoveFlags::PROMOTION));
    assert_eq!(3, game.score(Color::Black));
    assert!(game.promotion_pending(record.piece));
}

#[test]
fn black_promotes_on_row_seven() {
    let mut game = Game::from_fen("8/8/8/8/8/8/4p3/8 b - - 0 1").unwrap();

    let record = game.attempt_move(Square::E2, Square::E1).unwrap();
    assert!(record.flags.contains(MoveFlags::PROMOTION));

    game.resolve_promotion(record.piece, PieceKind::Queen).unwrap();
    assert_eq!(PieceKind::Queen, game.board().piece(record.piece).kind());
    assert_eq!(Color::Black, game.board().piece(record.piece).color());
}

#[test]
fn captured_pawn_forfeits_its_pending_promotion() {
    let mut game = Game::from_fen("r7/4P3/8/8/8/8/8/8 w - - 0 1").unwrap();
    let record = game.attempt_move(Square::E7, Square::E8).unwrap();
    assert!(game.promotion_pending(record.piece));

    // The rook takes the freshly promoted-in-name-only pawn on e8.
    game.attempt_move(Square::A8, Square::E8).unwrap();
    assert!(!game.promotion_pending(record.piece));
    assert_eq!(1, game.score(Color::White));
    assert_eq!(
        Err(PromotionError::NothingPending),
        game.resolve_promotion(record.piece, PieceKind::Queen)
    );
}

#[test]
fn several_promotions_may_be_outstanding() {
    let mut game = Game::from_fen("8/2P1P3/8/8/8/8/4p3/8 w - - 0 1").unwrap();

    let first = game.attempt_move(Square::C7, Square::C8).unwrap();
    let reply = game.attempt_move(Square::E2, Square::E1).unwrap();
    let second = game.attempt_move(Square::E7, Square::E8).unwrap();

    assert_eq!(3, game.pending_promotions().count());
    game.resolve_promotion(reply.piece, PieceKind::Queen).unwrap();
    game.resolve_promotion(first.piece, PieceKind::Knight).unwrap();
    game.resolve_promotion(second.piece, PieceKind::Rook).unwrap();
    assert_eq!(0, game.pending_promotions().count());
}
