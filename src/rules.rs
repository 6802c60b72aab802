// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality. One routine per piece kind, each aware of obstruction and
//! capture eligibility. Validation never mutates anything; a successful
//! check yields a `MoveRecord` describing the side effects the commit path
//! must apply.
use arrayvec::ArrayVec;
use std::fmt::{self, Display};

use crate::board::{Board, PieceId};
use crate::special;
use crate::types::{Direction, MoveFlags, Piece, PieceKind, Square};

/// Why a move attempt was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// No piece stands on the origin square.
    VacantOrigin,
    /// The piece on the origin square belongs to the player not on move.
    NotToMove,
    /// Geometry, obstruction, or capture eligibility failed.
    Illegal,
}

impl Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            MoveError::VacantOrigin => "no piece on the origin square",
            MoveError::NotToMove => "that piece belongs to the other player",
            MoveError::Illegal => "invalid move",
        };
        f.write_str(msg)
    }
}

/// A validated move and the side effects committing it entails.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// The moving piece.
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub flags: MoveFlags,
    /// The piece this move captures. For en passant this piece does not
    /// stand on the destination square.
    pub captured: Option<PieceId>,
    /// The castling rook and the square it lands on.
    pub rook: Option<(PieceId, Square)>,
}

/// Capture eligibility: a piece may only ever capture the enemy's.
pub fn can_capture(a: &Piece, b: &Piece) -> bool {
    a.color() != b.color()
}

/// Classified but uncommitted move data, prior to promotion tagging.
struct Classified {
    flags: MoveFlags,
    captured: Option<PieceId>,
    rook: Option<(PieceId, Square)>,
}

/// Decides whether the piece on `from` may move to `to`, given only the
/// board. Turn ownership is the caller's concern.
pub fn check_move(board: &Board, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
    let id = board.piece_at(from).ok_or(MoveError::VacantOrigin)?;
    let piece = board.piece(id);

    // A friendly piece on the destination blocks every kind of move.
    if let Some(target) = board.piece_at(to) {
        if !can_capture(piece, board.piece(target)) {
            return Err(MoveError::Illegal);
        }
    }

    let classified = match piece.kind() {
        PieceKind::Pawn => pawn_move(board, piece, from, to),
        PieceKind::Knight => knight_move(board, from, to),
        PieceKind::Bishop => bishop_move(board, from, to),
        PieceKind::Rook => rook_move(board, from, to),
        PieceKind::Queen => queen_move(board, from, to),
        PieceKind::King => king_move(board, piece, from, to),
    };

    let Classified {
        mut flags,
        captured,
        rook,
    } = classified.ok_or(MoveError::Illegal)?;

    // A pawn landing on the opposing back rank promotes, whatever else the
    // move was.
    if piece.kind() == PieceKind::Pawn && to.row() == piece.color().promotion_row() {
        flags |= MoveFlags::PROMOTION;
    }

    Ok(MoveRecord {
        piece: id,
        from,
        to,
        flags,
        captured,
        rook,
    })
}

/// The squares strictly between two squares sharing a row, column, or
/// diagonal. Empty when the squares are adjacent or unaligned.
pub(crate) fn squares_between(from: Square, to: Square) -> ArrayVec<[Square; 8]> {
    let mut path = ArrayVec::new();
    let dir = match Direction::between(from, to) {
        Some(dir) => dir,
        None => return path,
    };

    let mut sq = from.towards(dir);
    while sq != to {
        path.push(sq);
        sq = sq.towards(dir);
    }

    path
}

fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .iter()
        .all(|&sq| board.piece_at(sq).is_none())
}

/// The flags and capture for a move that simply lands on its destination.
/// The destination is already known to be vacant or enemy-held.
fn landing(board: &Board, to: Square) -> Classified {
    match board.piece_at(to) {
        Some(id) => Classified {
            flags: MoveFlags::CAPTURE,
            captured: Some(id),
            rook: None,
        },
        None => Classified {
            flags: MoveFlags::QUIET,
            captured: None,
            rook: None,
        },
    }
}

fn pawn_move(board: &Board, pawn: &Piece, from: Square, to: Square) -> Option<Classified> {
    let dir = pawn.color().advance_dir();
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    // Straight advance: one step forward, or two from the starting square.
    // A pawn cannot capture forward, so every traversed square including
    // the destination must be vacant.
    if dc == 0 && (dr == dir || (dr == 2 * dir && !pawn.has_moved())) {
        let mut row = from.row();
        while row != to.row() {
            row += dir;
            if board.piece_at(Square::of(row, from.col())).is_some() {
                return None;
            }
        }

        let flags = if dr == 2 * dir {
            MoveFlags::DOUBLE_STEP
        } else {
            MoveFlags::QUIET
        };
        return Some(Classified {
            flags,
            captured: None,
            rook: None,
        });
    }

    // Diagonal, one step forward only.
    if dr == dir && dc.abs() == 1 {
        // Onto an enemy piece: an ordinary capture. (Friendly occupancy was
        // rejected before dispatch.)
        if let Some(victim) = board.piece_at(to) {
            return Some(Classified {
                flags: MoveFlags::CAPTURE,
                captured: Some(victim),
                rook: None,
            });
        }

        // Onto an empty square: legal only as en passant.
        if let Some(victim) = special::en_passant_victim(board, pawn, from, to) {
            return Some(Classified {
                flags: MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
                captured: Some(victim),
                rook: None,
            });
        }
    }

    None
}

fn knight_move(board: &Board, from: Square, to: Square) -> Option<Classified> {
    let dr = (to.row() - from.row()).abs();
    let dc = (to.col() - from.col()).abs();

    // The L-shaped jump. Intervening occupancy is irrelevant; knights are
    // the only pieces that jump.
    if (dr, dc) == (1, 2) || (dr, dc) == (2, 1) {
        Some(landing(board, to))
    } else {
        None
    }
}

fn bishop_move(board: &Board, from: Square, to: Square) -> Option<Classified> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();
    if dr == 0 || dr.abs() != dc.abs() {
        return None;
    }

    if !path_is_clear(board, from, to) {
        return None;
    }

    Some(landing(board, to))
}

fn rook_move(board: &Board, from: Square, to: Square) -> Option<Classified> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();
    // Exactly one axis moves.
    if (dr == 0) == (dc == 0) {
        return None;
    }

    if !path_is_clear(board, from, to) {
        return None;
    }

    Some(landing(board, to))
}

fn queen_move(board: &Board, from: Square, to: Square) -> Option<Classified> {
    rook_move(board, from, to).or_else(|| bishop_move(board, from, to))
}

fn king_move(board: &Board, king: &Piece, from: Square, to: Square) -> Option<Classified> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    if dr.abs().max(dc.abs()) == 1 {
        return Some(landing(board, to));
    }

    // The king's only multi-square move is the two-column castling step.
    if dr == 0 && dc.abs() == 2 {
        if let Some((rook, rook_to)) = special::castling_rook(board, king, from, to) {
            return Some(Classified {
                flags: MoveFlags::CASTLE,
                captured: None,
                rook: Some((rook, rook_to)),
            });
        }
    }

    None
}
