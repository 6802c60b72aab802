// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! gambit is a two-player chess rule engine. It owns the board, the
//! per-piece move-legality rules, the compound moves (castling, en passant,
//! promotion), and the two-click turn controller. It deliberately does not
//! detect check, checkmate, or draws, keep move history, or play either
//! side; rendering and input mapping belong to the caller.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

mod board;
mod game;
mod rules;
mod special;
mod types;

pub use board::{Board, PieceId};
pub use game::{ClickOutcome, FenParseError, Game};
pub use rules::{can_capture, check_move, MoveError, MoveRecord};
pub use special::PromotionError;
pub use types::{
    Color, Direction, File, MoveFlags, Piece, PieceKind, Rank, Square, TableIndex, COLORS, FILES,
    PIECE_KINDS, RANKS,
};
