// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the board. The discriminant is the board slot index,
/// `row * 8 + col`, with row 0 being Black's back rank (rank 8) and row 7
/// being White's back rank (rank 1). White pawns therefore advance toward
/// smaller rows and Black pawns toward larger rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Square {
    A8,
    B8,
    C8,
    D8,
    E8,
    F8,
    G8,
    H8,
    A7,
    B7,
    C7,
    D7,
    E7,
    F7,
    G7,
    H7,
    A6,
    B6,
    C6,
    D6,
    E6,
    F6,
    G6,
    H6,
    A5,
    B5,
    C5,
    D5,
    E5,
    F5,
    G5,
    H5,
    A4,
    B4,
    C4,
    D4,
    E4,
    F4,
    G4,
    H4,
    A3,
    B3,
    C3,
    D3,
    E3,
    F3,
    G3,
    H3,
    A2,
    B2,
    C2,
    D2,
    E2,
    F2,
    G2,
    H2,
    A1,
    B1,
    C1,
    D1,
    E1,
    F1,
    G1,
    H1,
}

impl Square {
    /// Constructs a Square from zero-based row and column coordinates.
    /// Callers are expected to pass coordinates already within [0, 7];
    /// the input mapping layer enforces this before the core is entered.
    pub fn of(row: i32, col: i32) -> Square {
        FromPrimitive::from_i32(row * 8 + col).unwrap()
    }

    /// Bounds-checked variant of `of`, for input mapping layers that work
    /// with untrusted coordinates.
    pub fn try_of(row: i32, col: i32) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::of(row, col))
        } else {
            None
        }
    }

    /// Constructs a Square from its conventional rank and file.
    pub fn at(rank: Rank, file: File) -> Square {
        Square::of(7 - rank.to_i32().unwrap(), file.to_i32().unwrap())
    }

    pub fn row(self) -> i32 {
        self.to_i32().unwrap() >> 3
    }

    pub fn col(self) -> i32 {
        self.to_i32().unwrap() & 7
    }

    pub fn rank(self) -> Rank {
        FromPrimitive::from_i32(7 - self.row()).unwrap()
    }

    pub fn file(self) -> File {
        FromPrimitive::from_i32(self.col()).unwrap()
    }

    pub fn towards(self, dir: Direction) -> Square {
        let (dr, dc) = dir.as_vector();
        Square::of(self.row() + dr, self.col() + dc)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Rank::One => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            '1' => Rank::One,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            File::A => 'a',
            File::B => 'b',
            File::C => 'c',
            File::D => 'd',
            File::E => 'e',
            File::F => 'f',
            File::G => 'g',
            File::H => 'h',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row delta of a single forward pawn step for this color. White
    /// advances toward row 0, Black toward row 7.
    pub fn advance_dir(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row this color's pawns start on.
    pub fn pawn_row(self) -> i32 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row this color's back-rank pieces start on.
    pub fn back_row(self) -> i32 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The opposing back rank; a pawn of this color landing here promotes.
    pub fn promotion_row(self) -> i32 {
        self.toggle().back_row()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The point value credited when a piece of this kind is captured.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Whether a pawn may promote to this kind.
    pub fn promotable(self) -> bool {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            PieceKind::Pawn | PieceKind::King => false,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// The (row delta, column delta) of a single step in this direction.
    /// North points toward row 0 (rank 8).
    pub fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction of travel from one square to another, if the two lie on
    /// a common row, column, or diagonal.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let dr = to.row() - from.row();
        let dc = to.col() - from.col();
        if (dr, dc) == (0, 0) {
            return None;
        }

        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }

        let dir = match (dr.signum(), dc.signum()) {
            (-1, 0) => Direction::North,
            (-1, 1) => Direction::NorthEast,
            (0, 1) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (1, 0) => Direction::South,
            (1, -1) => Direction::SouthWest,
            (0, -1) => Direction::West,
            (-1, -1) => Direction::NorthWest,
            _ => unreachable!(),
        };
        Some(dir)
    }
}

bitflags! {
    /// Classification of a validated move. A move may carry several of these
    /// at once: an en passant move is also a capture, and a capture on the
    /// back rank may also be a promotion.
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const DOUBLE_STEP = 0b0000_0010;
        const EN_PASSANT = 0b0000_0100;
        const CASTLE = 0b0000_1000;
        const PROMOTION = 0b0001_0000;
    }
}

/// A game piece: identity (kind, color) plus positional and lifecycle state.
///
/// A captured piece keeps its identity but loses its square; `is_active`
/// reflects whether it still stands on the board. `en_passant_eligible` is
/// meaningful only for pawns and holds only in the window immediately
/// following that pawn's own two-square advance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) color: Color,
    pub(crate) square: Option<Square>,
    pub(crate) has_moved: bool,
    pub(crate) en_passant_eligible: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square: Some(square),
            has_moved: false,
            en_passant_eligible: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The square this piece stands on, or None once captured.
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    pub fn is_active(&self) -> bool {
        self.square.is_some()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn en_passant_eligible(&self) -> bool {
        self.en_passant_eligible
    }

    pub fn value(&self) -> u32 {
        self.kind.value()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.color {
            Color::White => match self.kind {
                PieceKind::Pawn => 'P',
                PieceKind::Knight => 'N',
                PieceKind::Bishop => 'B',
                PieceKind::Rook => 'R',
                PieceKind::Queen => 'Q',
                PieceKind::King => 'K',
            },
            Color::Black => match self.kind {
                PieceKind::Pawn => 'p',
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                PieceKind::Queen => 'q',
                PieceKind::King => 'k',
            },
        };
        f.write_char(chr)
    }
}
