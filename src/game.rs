// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turn controller: whose move it is, the two-click selection protocol,
//! and the commit pipeline that turns a validated move into board and score
//! mutations. Also hosts position setup from FEN, which is how tests and
//! front-ends construct mid-game states.
use std::convert::TryFrom;

use crate::board::{Board, PieceId};
use crate::rules::{self, MoveError, MoveRecord};
use crate::special::{PromotionError, Promotions};
use crate::types::{Color, File, MoveFlags, PieceKind, Rank, Square, TableIndex};

/// Possible errors that can arise when parsing a FEN string into a `Game`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

bitflags! {
    /// Castling rights as carried by a position string, before being
    /// lowered onto king and rook `has_moved` state.
    struct CastleRights: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
    }
}

/// The pending-selection state of the two-click protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Selection {
    Idle,
    Armed { piece: PieceId, from: Square },
}

/// What a click accomplished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Clicking an empty square or an opposing piece while idle selects
    /// nothing and is silently ignored.
    Ignored,
    /// The click armed a selection on the given square.
    Selected(Square),
    /// The click landed on the armed square again, clearing the selection.
    Deselected,
    /// The move committed.
    Moved(MoveRecord),
    /// The move was rejected; the selection stays armed.
    Rejected(MoveError),
}

/// One game session: the board plus all turn state. Construct one per game
/// and thread it through every call; there is no global instance.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    scores: [u32; 2],
    selection: Selection,
    promotions: Promotions,
}

impl Game {
    /// A fresh game: standard layout, White to move, zero scores.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            side_to_move: Color::White,
            scores: [0, 0],
            selection: Selection::Idle,
            promotions: Promotions::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Total point value captured from the given color so far.
    pub fn score(&self, color: Color) -> u32 {
        self.scores[color.as_index()]
    }

    /// The armed origin square, if a selection is pending.
    pub fn selection(&self) -> Option<Square> {
        match self.selection {
            Selection::Idle => None,
            Selection::Armed { from, .. } => Some(from),
        }
    }

    /// Feeds one click of the two-phase selection protocol.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        match self.selection {
            Selection::Idle => match self.board.piece_at(square) {
                Some(id) if self.board.piece(id).color() == self.side_to_move => {
                    self.selection = Selection::Armed { piece: id, from: square };
                    debug!("{} armed {}", self.side_to_move, square);
                    ClickOutcome::Selected(square)
                }
                _ => ClickOutcome::Ignored,
            },
            Selection::Armed { from, .. } => {
                if square == from {
                    self.selection = Selection::Idle;
                    debug!("{} deselected {}", self.side_to_move, from);
                    return ClickOutcome::Deselected;
                }

                match self.attempt_move(from, square) {
                    Ok(record) => {
                        self.selection = Selection::Idle;
                        ClickOutcome::Moved(record)
                    }
                    // The selection survives a rejected move.
                    Err(err) => ClickOutcome::Rejected(err),
                }
            }
        }
    }

    /// Validates and, if legal, commits a move of the active color's piece
    /// from one square to another.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        let id = self.board.piece_at(from).ok_or(MoveError::VacantOrigin)?;
        if self.board.piece(id).color() != self.side_to_move {
            return Err(MoveError::NotToMove);
        }

        let record = rules::check_move(&self.board, from, to)?;
        self.commit(&record);
        Ok(record)
    }

    /// Applies a validated move: capture scoring and removal, the castling
    /// rook shift, the relocation itself, en passant flag maintenance,
    /// promotion registration, and the turn flip.
    fn commit(&mut self, record: &MoveRecord) {
        let mover = self.side_to_move;

        if let Some(victim) = record.captured {
            let (color, value) = {
                let piece = self.board.piece(victim);
                (piece.color(), piece.value())
            };
            self.scores[color.as_index()] += value;
            // The victim leaves from the square it stands on, which for en
            // passant is not the destination square. A captured piece also
            // forfeits any promotion decision still outstanding for it.
            self.board.remove(victim);
            let _ = self.promotions.take(victim);
            debug!("{} captured {} points of {} material", mover, value, color);
        }

        if let Some((rook, rook_to)) = record.rook {
            self.board.relocate(rook, rook_to);
        }

        self.board.relocate(record.piece, record.to);

        // Any capture window the opposing pawns had opened closes the
        // moment this reply commits; a double step just played opens a
        // fresh one for the mover.
        self.board.expire_en_passant(mover.toggle());
        if self.board.piece(record.piece).kind() == PieceKind::Pawn {
            self.board.piece_mut(record.piece).en_passant_eligible =
                record.flags.contains(MoveFlags::DOUBLE_STEP);
        }

        if record.flags.contains(MoveFlags::PROMOTION) {
            self.promotions.register(record.piece, record.to);
            info!("{} promotion pending at {}", mover, record.to);
        }

        self.side_to_move = mover.toggle();
        debug!(
            "{} moved {} to {} ({:?}); {} to move",
            mover, record.from, record.to, record.flags, self.side_to_move
        );
    }

    /// Answers a pending promotion, exactly once, replacing the pawn's kind
    /// in place. Position, color, and activity are untouched; point value
    /// and glyph follow the new kind.
    pub fn resolve_promotion(&mut self, id: PieceId, kind: PieceKind) -> Result<(), PromotionError> {
        if !kind.promotable() {
            warn!("promotion to {} refused", kind);
            return Err(PromotionError::IneligibleKind);
        }

        let square = self.promotions.take(id).ok_or(PromotionError::NothingPending)?;
        self.board.piece_mut(id).kind = kind;
        info!("pawn on {} promoted to {}", square, kind);
        Ok(())
    }

    /// Whether the given piece has a promotion awaiting its decision.
    pub fn promotion_pending(&self, id: PieceId) -> bool {
        self.promotions.is_pending(id)
    }

    /// All promotions awaiting a decision.
    pub fn pending_promotions(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.promotions.iter()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

//
// FEN parsing and generation.
//
// FEN here is position *setup*, not persistence: the piece placement,
// side to move, castling, and en passant fields are lowered onto the
// engine's per-piece state, and the clock fields are validated but
// discarded, since this engine tracks neither.
//

impl Game {
    /// Constructs a game from a FEN position string.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance(iter: &mut Stream<'_>) -> Result<(), FenParseError> {
            let _ = iter.next();
            Ok(())
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move(iter: &mut Stream<'_>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter)?;
            Ok(side)
        }

        fn eat_castle_rights(iter: &mut Stream<'_>) -> Result<CastleRights, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter)?;
                return Ok(CastleRights::NONE);
            }

            let mut rights = CastleRights::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => rights |= CastleRights::WHITE_KINGSIDE,
                    'Q' => rights |= CastleRights::WHITE_QUEENSIDE,
                    'k' => rights |= CastleRights::BLACK_KINGSIDE,
                    'q' => rights |= CastleRights::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter)?;
            }

            Ok(rights)
        }

        fn eat_en_passant(iter: &mut Stream<'_>) -> Result<Option<Square>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                advance(iter)?;
                return Ok(None);
            }

            if let Ok(file) = File::try_from(c) {
                advance(iter)?;
                let rank_c = peek(iter)?;
                if let Ok(rank) = Rank::try_from(rank_c) {
                    advance(iter)?;
                    Ok(Some(Square::at(rank, file)))
                } else {
                    Err(FenParseError::InvalidEnPassant)
                }
            } else {
                Err(FenParseError::InvalidEnPassant)
            }
        }

        fn eat_halfmove(iter: &mut Stream<'_>) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            loop {
                let c = peek(iter)?;
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                advance(iter)?;
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyHalfmove);
            }

            buf.parse::<u32>()
                .map_err(|_| FenParseError::InvalidHalfmove)
        }

        fn eat_fullmove(iter: &mut Stream<'_>) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            for ch in iter {
                if !ch.is_digit(10) {
                    if buf.is_empty() {
                        return Err(FenParseError::EmptyFullmove);
                    }

                    break;
                }

                buf.push(ch);
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyFullmove);
            }

            buf.parse::<u32>()
                .map_err(|_| FenParseError::InvalidFullmove)
        }

        fn piece_from_char(c: char) -> Option<(PieceKind, Color)> {
            let res = match c {
                'P' => (PieceKind::Pawn, Color::White),
                'N' => (PieceKind::Knight, Color::White),
                'B' => (PieceKind::Bishop, Color::White),
                'R' => (PieceKind::Rook, Color::White),
                'Q' => (PieceKind::Queen, Color::White),
                'K' => (PieceKind::King, Color::White),
                'p' => (PieceKind::Pawn, Color::Black),
                'n' => (PieceKind::Knight, Color::Black),
                'b' => (PieceKind::Bishop, Color::Black),
                'r' => (PieceKind::Rook, Color::Black),
                'q' => (PieceKind::Queen, Color::Black),
                'k' => (PieceKind::King, Color::Black),
                _ => return None,
            };
            Some(res)
        }

        let mut board = Board::empty();
        let str_ref = fen.as_ref();
        let iter = &mut str_ref.chars().peekable();

        // Placement arrives rank 8 first, which is row 0 here.
        for row in 0..8 {
            let mut col = 0;
            while col < 8 {
                let c = peek(iter)?;
                // Digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    col += c as i32 - '0' as i32;
                    if col > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter)?;
                    continue;
                }

                let (kind, color) = match piece_from_char(c) {
                    Some(pair) => pair,
                    None => return Err(FenParseError::UnknownPiece),
                };

                board
                    .add_piece(Square::of(row, col), kind, color)
                    .expect("FEN double-add piece?");
                advance(iter)?;
                col += 1;
            }

            if row != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side_to_move = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let rights = eat_castle_rights(iter)?;
        eat(iter, ' ')?;
        let ep_target = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        let _ = eat_halfmove(iter)?;
        eat(iter, ' ')?;
        let _ = eat_fullmove(iter)?;

        let mut game = Game {
            board,
            side_to_move,
            scores: [0, 0],
            selection: Selection::Idle,
            promotions: Promotions::new(),
        };
        game.lower_setup_state(rights, ep_target)?;
        Ok(game)
    }

    /// Lowers the castling and en passant FEN fields onto per-piece state.
    fn lower_setup_state(
        &mut self,
        rights: CastleRights,
        ep_target: Option<Square>,
    ) -> Result<(), FenParseError> {
        // Pawns off their starting row have necessarily moved; kings and
        // rooks are assumed moved unless a castling right vouches for them.
        let ids: Vec<PieceId> = self.board.pieces().map(|(id, _)| id).collect();
        for id in ids {
            let (kind, color, square) = {
                let piece = self.board.piece(id);
                (piece.kind(), piece.color(), piece.square())
            };
            let square = square.expect("setup piece without a square");
            let moved = match kind {
                PieceKind::Pawn => square.row() != color.pawn_row(),
                PieceKind::King | PieceKind::Rook => true,
                _ => false,
            };
            self.board.piece_mut(id).has_moved = moved;
        }

        for &(right, color, rook_col) in &[
            (CastleRights::WHITE_KINGSIDE, Color::White, 7),
            (CastleRights::WHITE_QUEENSIDE, Color::White, 0),
            (CastleRights::BLACK_KINGSIDE, Color::Black, 7),
            (CastleRights::BLACK_QUEENSIDE, Color::Black, 0),
        ] {
            if !rights.contains(right) {
                continue;
            }

            let king = self.board.piece_at(Square::of(color.back_row(), 4));
            let rook = self.board.piece_at(Square::of(color.back_row(), rook_col));
            if let (Some(king), Some(rook)) = (king, rook) {
                let king_fits = self.board.piece(king).kind() == PieceKind::King
                    && self.board.piece(king).color() == color;
                let rook_fits = self.board.piece(rook).kind() == PieceKind::Rook
                    && self.board.piece(rook).color() == color;
                if king_fits && rook_fits {
                    self.board.piece_mut(king).has_moved = false;
                    self.board.piece_mut(rook).has_moved = false;
                }
            }
        }

        if let Some(target) = ep_target {
            // The target is the square passed over; the pawn that just
            // double-stepped stands one row beyond it, on the side that is
            // not about to move.
            let mover = self.side_to_move.toggle();
            let pawn_square = Square::try_of(target.row() + mover.advance_dir(), target.col())
                .ok_or(FenParseError::InvalidEnPassant)?;
            let id = self
                .board
                .piece_at(pawn_square)
                .ok_or(FenParseError::InvalidEnPassant)?;
            let fits = {
                let pawn = self.board.piece(id);
                pawn.kind() == PieceKind::Pawn && pawn.color() == mover
            };
            if !fits {
                return Err(FenParseError::InvalidEnPassant);
            }

            self.board.piece_mut(id).en_passant_eligible = true;
        }

        Ok(())
    }

    /// Renders the position as FEN. The clock fields this engine does not
    /// track are emitted as "0 1".
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut vacant = 0;
            for col in 0..8 {
                match self.board.piece_at(Square::of(row, col)) {
                    Some(id) => {
                        if vacant > 0 {
                            buf.push_str(&vacant.to_string());
                            vacant = 0;
                        }
                        buf.push_str(&self.board.piece(id).to_string());
                    }
                    None => vacant += 1,
                }
            }

            if vacant > 0 {
                buf.push_str(&vacant.to_string());
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.side_to_move.to_string());
        buf.push(' ');

        let mut rights = String::new();
        for &(chr, color, rook_col) in &[
            ('K', Color::White, 7),
            ('Q', Color::White, 0),
            ('k', Color::Black, 7),
            ('q', Color::Black, 0),
        ] {
            if self.castle_intact(color, rook_col) {
                rights.push(chr);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        buf.push_str(&rights);

        buf.push(' ');
        match self.en_passant_target() {
            Some(target) => buf.push_str(&target.to_string()),
            None => buf.push('-'),
        }

        buf.push_str(" 0 1");
        buf
    }

    /// Whether the given color's king and the rook on the given column are
    /// both unmoved on their starting squares.
    fn castle_intact(&self, color: Color, rook_col: i32) -> bool {
        let unmoved = |square: Square, kind: PieceKind| {
            self.board.piece_at(square).map_or(false, |id| {
                let piece = self.board.piece(id);
                piece.kind() == kind && piece.color() == color && !piece.has_moved()
            })
        };

        unmoved(Square::of(color.back_row(), 4), PieceKind::King)
            && unmoved(Square::of(color.back_row(), rook_col), PieceKind::Rook)
    }

    /// The square an eligible enemy pawn passed over, if any pawn is still
    /// inside its en passant window.
    fn en_passant_target(&self) -> Option<Square> {
        self.board
            .pieces()
            .find(|(_, piece)| piece.en_passant_eligible() && piece.is_active())
            .and_then(|(_, piece)| {
                let square = piece.square()?;
                Square::try_of(square.row() - piece.color().advance_dir(), square.col())
            })
    }
}
