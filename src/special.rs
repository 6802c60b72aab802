// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The three compound moves: en passant, castling, and promotion. The first
//! two contribute extra preconditions during validation and extra board
//! mutations at commit; promotion is a deferred decision resolved by an
//! external collaborator after the move has already committed.
use hashbrown::HashMap;
use std::fmt::{self, Display};

use crate::board::{Board, PieceId};
use crate::rules::squares_between;
use crate::types::{Piece, PieceKind, Square};

/// Finds the pawn an en passant move would capture, if the move qualifies.
///
/// The mover is a pawn stepping one square diagonally forward into an empty
/// destination. The capturable pawn stands beside the mover's origin, on
/// the destination column, and must still be inside the one-reply window
/// opened by its own two-square advance.
pub(crate) fn en_passant_victim(
    board: &Board,
    pawn: &Piece,
    from: Square,
    to: Square,
) -> Option<PieceId> {
    let beside = Square::of(from.row(), to.col());
    let id = board.piece_at(beside)?;
    let victim = board.piece(id);
    if victim.kind() == PieceKind::Pawn
        && victim.color() != pawn.color()
        && victim.en_passant_eligible()
    {
        Some(id)
    } else {
        None
    }
}

/// Finds the rook a castling move would carry along, if the move qualifies.
///
/// The king must never have moved. The rook sits on the king's row at
/// column 0 (queenside) or 7 (kingside), chosen by the direction of travel;
/// it must be a rook that has never moved, and every square strictly
/// between king and rook must be vacant. Whether the king's path is
/// attacked is deliberately not considered.
///
/// On success, returns the rook and its destination: the square adjacent to
/// the king's destination on the side the rook came from.
pub(crate) fn castling_rook(
    board: &Board,
    king: &Piece,
    from: Square,
    to: Square,
) -> Option<(PieceId, Square)> {
    if king.has_moved() {
        return None;
    }

    let dc = to.col() - from.col();
    let rook_col = if dc > 0 { 7 } else { 0 };
    let rook_square = Square::of(from.row(), rook_col);

    let id = board.piece_at(rook_square)?;
    let rook = board.piece(id);
    if rook.kind() != PieceKind::Rook || rook.has_moved() {
        return None;
    }

    if squares_between(from, rook_square)
        .iter()
        .any(|&sq| board.piece_at(sq).is_some())
    {
        return None;
    }

    let rook_to = Square::of(from.row(), to.col() - dc.signum());
    Some((id, rook_to))
}

/// Why a promotion could not be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromotionError {
    /// The piece has no promotion awaiting a decision.
    NothingPending,
    /// Pawns promote only to queen, rook, bishop, or knight.
    IneligibleKind,
}

impl Display for PromotionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            PromotionError::NothingPending => "no promotion is pending for that piece",
            PromotionError::IneligibleKind => "pawns promote to queen, rook, bishop, or knight",
        };
        f.write_str(msg)
    }
}

/// The deferred promotion registry. A pawn landing on the opposing back
/// rank is registered here and keeps its pawn identity until the external
/// decision source answers — exactly once per promotion event. Several
/// promotions may be outstanding at the same time.
#[derive(Clone, Debug, Default)]
pub(crate) struct Promotions {
    pending: HashMap<PieceId, Square>,
}

impl Promotions {
    pub fn new() -> Promotions {
        Promotions {
            pending: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: PieceId, square: Square) {
        self.pending.insert(id, square);
    }

    pub fn is_pending(&self, id: PieceId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Consumes the pending record, enforcing the single-resolution
    /// contract: a second take for the same piece finds nothing.
    pub fn take(&mut self, id: PieceId) -> Option<Square> {
        self.pending.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.pending.iter().map(|(&id, &sq)| (id, sq))
    }
}
