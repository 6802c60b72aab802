// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::{Color, Piece, PieceKind, Square, TableIndex, COLORS, FILES, RANKS};

/// Stable handle to a piece in a `Board`'s arena. Handles stay valid for the
/// whole game, including after the piece is captured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kinds on each back rank at the start of a game, queenside to kingside.
static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A mailbox board: 64 slots of optional piece occupancy over an arena of
/// piece records. Slot index = row * 8 + col.
///
/// The board maintains the occupancy invariant (each occupied slot holds
/// exactly one active piece whose own square matches the slot) but performs
/// no move validation; legality is entirely the caller's concern.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
}

impl Board {
    /// An empty board with no pieces, for setup from a position string.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            pieces: Vec::new(),
        }
    }

    /// A board holding the standard starting layout.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for &color in &COLORS {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board
                    .add_piece(Square::of(color.back_row(), col as i32), kind, color)
                    .expect("starting layout double-add");
            }

            for col in 0..8 {
                board
                    .add_piece(Square::of(color.pawn_row(), col), PieceKind::Pawn, color)
                    .expect("starting layout double-add");
            }
        }

        board
    }

    /// Places a new piece on the given square. Fails if the square is
    /// occupied.
    pub fn add_piece(
        &mut self,
        square: Square,
        kind: PieceKind,
        color: Color,
    ) -> Result<PieceId, ()> {
        if self.piece_at(square).is_some() {
            return Err(());
        }

        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Piece::new(kind, color, square));
        self.squares[square.as_index()] = Some(id);
        Ok(id)
    }

    /// The piece occupying the given square, if any. O(1).
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square.as_index()]
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Moves a piece to a new square: clears its old slot, writes the new
    /// slot, updates the piece's own position, and marks it as having moved.
    /// The destination must already be vacant; captures are resolved by the
    /// caller before relocation.
    pub fn relocate(&mut self, id: PieceId, to: Square) {
        debug_assert!(self.piece_at(to).is_none(), "relocate into occupied slot");
        if let Some(from) = self.pieces[id.index()].square {
            self.squares[from.as_index()] = None;
        }

        self.squares[to.as_index()] = Some(id);
        let piece = &mut self.pieces[id.index()];
        piece.square = Some(to);
        piece.has_moved = true;
    }

    /// Raw slot write. No occupancy bookkeeping happens on the piece side;
    /// this is the primitive beneath `remove` and position setup.
    pub fn place_at(&mut self, square: Square, id: Option<PieceId>) {
        self.squares[square.as_index()] = id;
    }

    /// Raw slot clear.
    pub fn clear(&mut self, square: Square) {
        self.place_at(square, None);
    }

    /// Takes a piece off the board: clears the slot it stands on (which for
    /// an en passant victim is not the mover's destination square) and
    /// marks the piece inactive.
    pub fn remove(&mut self, id: PieceId) {
        if let Some(square) = self.pieces[id.index()].square.take() {
            self.clear(square);
        }
    }

    /// All pieces ever placed this game, active or captured.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| (PieceId(i as u8), piece))
    }

    /// Clears en passant eligibility on every pawn of the given color. Called
    /// when the opposing side commits a move, closing any capture window its
    /// pawns had opened.
    pub(crate) fn expire_en_passant(&mut self, color: Color) {
        for piece in &mut self.pieces {
            if piece.kind == PieceKind::Pawn && piece.color == color {
                piece.en_passant_eligible = false;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::at(rank, file);
                if let Some(id) = self.piece_at(sq) {
                    write!(f, " {} ", self.piece(id))?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
