//! Ponder Chess - Board Representation Module
//!
//! This module provides the board, the move type and the rules that decide
//! whether a move is legal: ordinary piece movement, the double pawn step,
//! en passant and castling. Moves carry no metadata; captures, castling and
//! en passant are derived from the board when a move is checked or applied.
//!
//! There is no check detection. A game ends when a king is captured.

use std::fmt;

use crate::move_generator::MoveGenerator;
use crate::types::*;

/// Represents a move from `(x1, y1)` to `(x2, y2)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Move {
    /// Create a new move
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Move { x1, y1, x2, y2 }
    }

    /// True if all four coordinates lie on the board
    pub fn is_on_board(&self) -> bool {
        on_board(self.x1, self.y1) && on_board(self.x2, self.y2)
    }
}

/// Whether each castling home square has ever been vacated.
///
/// Set when a move starts from the square and never cleared, so a rook or king
/// that leaves and comes back has still lost its castling right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HomeSquares {
    pub a1: bool,
    pub e1: bool,
    pub h1: bool,
    pub a8: bool,
    pub e8: bool,
    pub h8: bool,
}

impl HomeSquares {
    fn record_departure(&mut self, x: i32, y: i32) {
        match (x, y) {
            (0, 0) => self.a8 = true,
            (4, 0) => self.e8 = true,
            (7, 0) => self.h8 = true,
            (0, 7) => self.a1 = true,
            (4, 7) => self.e1 = true,
            (7, 7) => self.h1 = true,
            _ => {}
        }
    }

    fn king_moved(&self, side: Side) -> bool {
        match side {
            Side::White => self.e1,
            Side::Black => self.e8,
        }
    }

    fn rook_moved(&self, side: Side, rook_x: i32) -> bool {
        match (side, rook_x) {
            (Side::White, 0) => self.a1,
            (Side::White, _) => self.h1,
            (Side::Black, 0) => self.a8,
            (Side::Black, _) => self.h8,
        }
    }
}

/// Chess board representation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    /// 64 squares indexed by `x + 8 * y`; row 0 is Black's back rank
    squares: [Piece; 64],
    turn: Side,
    last_move: Option<Move>,
    home: HomeSquares,
    winner: Option<Side>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::cleared();
        for side in [Side::White, Side::Black] {
            for (x, kind) in BACK_RANK.iter().enumerate() {
                board.set(x as i32, side.back_row(), Piece::new(*kind, side));
                board.set(x as i32, side.pawn_row(), Piece::new(PieceKind::Pawn, side));
            }
        }
        board
    }

    /// Create a board with no pieces, White to move
    pub fn cleared() -> Self {
        Board {
            squares: [Piece::None; 64],
            turn: Side::White,
            last_move: None,
            home: HomeSquares::default(),
            winner: None,
        }
    }

    #[inline]
    fn index(x: i32, y: i32) -> usize {
        if !on_board(x, y) {
            panic!("attempt to access ({}, {})", x, y);
        }
        (x + y * BOARD_SIZE) as usize
    }

    /// Piece on a square. Panics if the square is off the board.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Piece {
        self.squares[Self::index(x, y)]
    }

    /// Piece on a square, or `None` if the square is off the board
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Piece> {
        on_board(x, y).then(|| self.squares[(x + y * BOARD_SIZE) as usize])
    }

    /// Place a piece on a square. Panics if the square is off the board.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, piece: Piece) {
        self.squares[Self::index(x, y)] = piece;
    }

    /// All squares with their content, file by file
    pub fn pieces(&self) -> impl Iterator<Item = (i32, i32, Piece)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
            .map(|(x, y)| (x, y, self.at(x, y)))
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Change the side to move, for setting up positions
    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn home_squares(&self) -> HomeSquares {
        self.home
    }

    /// Number of occupied squares
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| !p.is_none()).count()
    }

    /// Execute a move on the board. The caller must have checked legality.
    pub fn apply_move(&mut self, m: Move) {
        let mover = self.turn;

        if self.will_be_en_passant(m) {
            self.set(m.x2, m.y1, Piece::None);
        } else if self.will_be_castle(m) {
            let direction = (m.x2 - m.x1).signum();
            let rook_x = if direction < 0 { 0 } else { BOARD_SIZE - 1 };
            let rook = self.at(rook_x, m.y2);
            self.set(m.x2 - direction, m.y2, rook);
            self.set(rook_x, m.y2, Piece::None);
        }

        if self.at(m.x2, m.y2) == Piece::new(PieceKind::King, mover.opponent()) {
            self.winner = Some(mover);
        }

        let mut piece = self.at(m.x1, m.y1);
        if piece.kind() == Some(PieceKind::Pawn) && m.y2 == mover.promotion_row() {
            piece = Piece::new(PieceKind::Queen, mover);
        }

        self.set(m.x2, m.y2, piece);
        self.set(m.x1, m.y1, Piece::None);
        self.turn = mover.opponent();
        self.last_move = Some(m);
        self.home.record_departure(m.x1, m.y1);
    }

    /// Copy of the board with the move applied
    pub fn apply(&self, m: Move) -> Board {
        let mut next = *self;
        next.apply_move(m);
        next
    }

    /// True if the move is a legal en passant capture.
    ///
    /// The captured pawn must have reached the square beside the mover with a
    /// double step on the immediately preceding move.
    pub fn will_be_en_passant(&self, m: Move) -> bool {
        let side = self.turn;
        if self.at(m.x1, m.y1) != Piece::new(PieceKind::Pawn, side) {
            return false;
        }

        let forward = side.forward();
        let row = side.en_passant_row();
        if m.y1 != row
            || m.y2 != row + forward
            || (m.x2 - m.x1).abs() != 1
            || !self.at(m.x2, m.y2).is_none()
        {
            return false;
        }

        let double_step = Move::new(m.x2, row + 2 * forward, m.x2, row);
        self.last_move == Some(double_step)
            && self.at(m.x2, m.y1) == Piece::new(PieceKind::Pawn, side.opponent())
    }

    /// True if the move is a legal castling move for the side to move.
    ///
    /// Only the square the king passes over is tested for attacks; the king's
    /// start and landing squares are not.
    pub fn will_be_castle(&self, m: Move) -> bool {
        let side = self.turn;
        let back = side.back_row();
        let direction = (m.x2 - m.x1).signum();
        if direction == 0
            || m != Move::new(KING_FILE, back, KING_FILE + 2 * direction, back)
            || self.at(KING_FILE, back) != Piece::new(PieceKind::King, side)
        {
            return false;
        }

        let rook_x = if direction < 0 { 0 } else { BOARD_SIZE - 1 };
        if self.home.king_moved(side)
            || self.home.rook_moved(side, rook_x)
            || self.at(rook_x, back) != Piece::new(PieceKind::Rook, side)
        {
            return false;
        }

        let mut x = KING_FILE + direction;
        while x != rook_x {
            if !self.at(x, back).is_none() {
                return false;
            }
            x += direction;
        }

        !self.is_attacked(KING_FILE + direction, back, side.opponent())
    }

    /// True if any piece of `by` could capture on `(x, y)`.
    ///
    /// Opponent moves are checked on a copy with the turn flipped; pawns are
    /// tested by their diagonal capture pattern since the square may be empty.
    pub fn is_attacked(&self, x: i32, y: i32, by: Side) -> bool {
        let mut probe = *self;
        probe.turn = by;
        let attacked = probe.pieces().any(|(px, py, piece)| {
            if !piece.is(by) {
                return false;
            }
            match piece.kind() {
                Some(PieceKind::Pawn) => y - py == by.forward() && (x - px).abs() == 1,
                _ => probe.is_move_legal(Move::new(px, py, x, y)),
            }
        });
        attacked
    }

    /// Check whether a move is legal for the side to move
    pub fn is_move_legal(&self, m: Move) -> bool {
        if self.winner.is_some() || !m.is_on_board() {
            return false;
        }

        if self.will_be_en_passant(m) || self.will_be_castle(m) {
            return true;
        }

        let side = self.turn;
        let source = self.at(m.x1, m.y1);
        let dest = self.at(m.x2, m.y2);
        if !source.is(side) || dest.is(side) {
            return false;
        }

        let ox = m.x2 - m.x1;
        let oy = m.y2 - m.y1;

        match source.kind() {
            Some(PieceKind::Pawn) => {
                let forward = side.forward();
                if ox == 0 && oy == forward {
                    return dest.is_none();
                }
                if ox == 0 && oy == 2 * forward && m.y1 == side.pawn_row() {
                    return dest.is_none() && self.at(m.x1, m.y1 + forward).is_none();
                }
                ox.abs() == 1 && oy == forward && dest.is(side.opponent())
            }
            Some(PieceKind::Knight) => ox != 0 && oy != 0 && oy.abs() == 3 - ox.abs(),
            Some(PieceKind::King) => ox.abs() <= 1 && oy.abs() <= 1,
            Some(PieceKind::Bishop) => ox.abs() == oy.abs() && self.is_path_clear(m),
            Some(PieceKind::Rook) => (ox == 0) != (oy == 0) && self.is_path_clear(m),
            Some(PieceKind::Queen) => {
                (ox.abs() == oy.abs() || (ox == 0) != (oy == 0)) && self.is_path_clear(m)
            }
            None => false,
        }
    }

    /// Walk from origin toward destination; every square in between must be empty
    fn is_path_clear(&self, m: Move) -> bool {
        let dx = (m.x2 - m.x1).signum();
        let dy = (m.y2 - m.y1).signum();
        let (mut x, mut y) = (m.x1 + dx, m.y1 + dy);
        while (x, y) != (m.x2, m.y2) {
            if !self.at(x, y).is_none() {
                return false;
            }
            x += dx;
            y += dy;
        }
        true
    }

    /// Legal moves of the piece standing on `(x, y)`
    pub fn get_moves(&self, x: i32, y: i32) -> Vec<Move> {
        MoveGenerator::new().moves_from(self, x, y)
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +-----------------+".to_string());
        for y in 0..BOARD_SIZE {
            let mut row = format!("{} |", BOARD_SIZE - y);
            for x in 0..BOARD_SIZE {
                row.push(' ');
                row.push(self.at(x, y).symbol());
            }
            row.push_str(" |");
            lines.push(row);
        }
        lines.push("  +-----------------+".to_string());
        lines.push("    a b c d e f g h".to_string());
        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
