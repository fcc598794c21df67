//! Ponder Chess - Type definitions and constants
//!
//! This module provides the core type definitions for sides, pieces and the
//! board geometry. Rows are counted from Black's back rank (`y = 0`) down to
//! White's back rank (`y = 7`), so White pawns advance toward smaller `y`.

/// Number of files and ranks on the board
pub const BOARD_SIZE: i32 = 8;

/// File of both kings at the start of the game
pub const KING_FILE: i32 = 4;

/// Side to move. The discriminant is the side bit stored in every piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a pawn step
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    #[inline]
    pub fn back_row(self) -> i32 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    #[inline]
    pub fn pawn_row(self) -> i32 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    /// Row a pawn must stand on to capture en passant
    #[inline]
    pub fn en_passant_row(self) -> i32 {
        match self {
            Side::White => 3,
            Side::Black => 4,
        }
    }

    #[inline]
    pub fn promotion_row(self) -> i32 {
        self.opponent().back_row()
    }
}

/// Piece type without colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Content of a square.
///
/// White pieces have odd discriminants and Black pieces even ones, so the
/// owner of any non-empty piece is `value % 2` read as a [`Side`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    #[default]
    None = 0,
    WhitePawn = 1,
    BlackPawn = 2,
    WhiteKnight = 3,
    BlackKnight = 4,
    WhiteBishop = 5,
    BlackBishop = 6,
    WhiteRook = 7,
    BlackRook = 8,
    WhiteQueen = 9,
    BlackQueen = 10,
    WhiteKing = 11,
    BlackKing = 12,
}

impl Piece {
    /// Build a piece from its type and owner
    pub fn new(kind: PieceKind, side: Side) -> Piece {
        match (kind, side) {
            (PieceKind::Pawn, Side::White) => Piece::WhitePawn,
            (PieceKind::Pawn, Side::Black) => Piece::BlackPawn,
            (PieceKind::Knight, Side::White) => Piece::WhiteKnight,
            (PieceKind::Knight, Side::Black) => Piece::BlackKnight,
            (PieceKind::Bishop, Side::White) => Piece::WhiteBishop,
            (PieceKind::Bishop, Side::Black) => Piece::BlackBishop,
            (PieceKind::Rook, Side::White) => Piece::WhiteRook,
            (PieceKind::Rook, Side::Black) => Piece::BlackRook,
            (PieceKind::Queen, Side::White) => Piece::WhiteQueen,
            (PieceKind::Queen, Side::Black) => Piece::BlackQueen,
            (PieceKind::King, Side::White) => Piece::WhiteKing,
            (PieceKind::King, Side::Black) => Piece::BlackKing,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Piece::None
    }

    /// Owner of the piece, read from the low bit of the discriminant
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Piece::None => None,
            _ if self as u8 % 2 == 1 => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    /// True if the square is occupied by a piece of `side`
    #[inline]
    pub fn is(self, side: Side) -> bool {
        self != Piece::None && self as u8 % 2 == side as u8
    }

    #[inline]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::None => None,
            Piece::WhitePawn | Piece::BlackPawn => Some(PieceKind::Pawn),
            Piece::WhiteKnight | Piece::BlackKnight => Some(PieceKind::Knight),
            Piece::WhiteBishop | Piece::BlackBishop => Some(PieceKind::Bishop),
            Piece::WhiteRook | Piece::BlackRook => Some(PieceKind::Rook),
            Piece::WhiteQueen | Piece::BlackQueen => Some(PieceKind::Queen),
            Piece::WhiteKing | Piece::BlackKing => Some(PieceKind::King),
        }
    }

    /// Diagram character: uppercase for White, lowercase for Black
    pub fn symbol(self) -> char {
        let c = match self.kind() {
            None => return '.',
            Some(PieceKind::Pawn) => 'p',
            Some(PieceKind::Knight) => 'n',
            Some(PieceKind::Bishop) => 'b',
            Some(PieceKind::Rook) => 'r',
            Some(PieceKind::Queen) => 'q',
            Some(PieceKind::King) => 'k',
        };
        if self.is(Side::White) {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

/// Check that a coordinate pair lies on the board
#[inline]
pub fn on_board(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y)
}
