//! Ponder Chess - Move Generator Module
//!
//! Candidate destinations are produced from each piece's movement pattern,
//! including off-board squares, and then filtered through
//! [`Board::is_move_legal`], which owns every rule.

use crate::board::{Board, Move};
use crate::types::*;

/// Knight jump offsets
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// King steps, including the two castling slides
const KING_OFFSETS: [(i32, i32); 10] = [
    (1, 1),
    (1, 0),
    (2, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-2, 0),
    (-1, -1),
];

/// Move generator for chess positions
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Generate all legal moves for the side to move
    pub fn generate_legal_moves(&self, board: &Board) -> Vec<Move> {
        let side = board.turn();
        let mut moves = Vec::with_capacity(64);
        for (x, y, piece) in board.pieces() {
            if piece.is(side) {
                moves.extend(self.moves_from(board, x, y));
            }
        }
        moves
    }

    /// Legal captures for the side to move, en passant included
    pub fn generate_captures(&self, board: &Board) -> Vec<Move> {
        let mut moves = self.generate_legal_moves(board);
        moves.retain(|m| self.is_capture(board, m));
        moves
    }

    /// True if a legal move removes an opponent piece
    pub fn is_capture(&self, board: &Board, m: &Move) -> bool {
        !board.at(m.x2, m.y2).is_none() || board.will_be_en_passant(*m)
    }

    /// Legal moves of the piece on `(x, y)`
    pub fn moves_from(&self, board: &Board, x: i32, y: i32) -> Vec<Move> {
        let piece = board.at(x, y);
        let Some(side) = piece.side() else {
            return Vec::new();
        };
        let mut candidates = Vec::with_capacity(32);

        match piece.kind() {
            Some(PieceKind::Pawn) => {
                let forward = side.forward();
                candidates.push(Move::new(x, y, x, y + forward));
                candidates.push(Move::new(x, y, x, y + 2 * forward));
                candidates.push(Move::new(x, y, x + 1, y + forward));
                candidates.push(Move::new(x, y, x - 1, y + forward));
            }
            Some(PieceKind::Knight) => {
                for (dx, dy) in KNIGHT_OFFSETS {
                    candidates.push(Move::new(x, y, x + dx, y + dy));
                }
            }
            Some(PieceKind::Bishop) => {
                for v in 0..BOARD_SIZE {
                    push_diagonals(&mut candidates, x, y, v);
                }
            }
            Some(PieceKind::Rook) => {
                for v in 0..BOARD_SIZE {
                    push_lines(&mut candidates, x, y, v);
                }
            }
            Some(PieceKind::Queen) => {
                for v in 0..BOARD_SIZE {
                    push_lines(&mut candidates, x, y, v);
                    push_diagonals(&mut candidates, x, y, v);
                }
            }
            Some(PieceKind::King) => {
                for (dx, dy) in KING_OFFSETS {
                    candidates.push(Move::new(x, y, x + dx, y + dy));
                }
            }
            None => {}
        }

        candidates.retain(|m| board.is_move_legal(*m));
        candidates
    }
}

/// Rank and file projections through `(x, y)` at coordinate `v`
fn push_lines(candidates: &mut Vec<Move>, x: i32, y: i32, v: i32) {
    candidates.push(Move::new(x, y, v, y));
    candidates.push(Move::new(x, y, x, v));
}

/// Both diagonal projections through `(x, y)` at file `v`
fn push_diagonals(candidates: &mut Vec<Move>, x: i32, y: i32, v: i32) {
    candidates.push(Move::new(x, y, v, v - x + y));
    candidates.push(Move::new(x, y, v, x + y - v));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_moves_from_the_start() {
        let moves = MoveGenerator::new().generate_legal_moves(&Board::new());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn black_also_has_twenty_replies() {
        let board = Board::new().apply(Move::new(4, 6, 4, 4));
        let moves = MoveGenerator::new().generate_legal_moves(&board);
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|m| board.at(m.x1, m.y1).is(Side::Black)));
    }

    #[test]
    fn queen_in_the_open() {
        let mut board = Board::cleared();
        board.set(3, 4, Piece::WhiteQueen);
        let moves = board.get_moves(3, 4);
        assert_eq!(moves.len(), 27);
        assert!(moves.iter().all(|m| m.is_on_board()));
    }

    #[test]
    fn rook_and_bishop_rays_stop_at_pieces() {
        let mut board = Board::cleared();
        board.set(0, 7, Piece::WhiteRook);
        board.set(0, 4, Piece::BlackKnight);
        board.set(3, 7, Piece::WhiteKing);
        let moves = board.get_moves(0, 7);
        // a2, a3, a4 (capture) up the file and b1, c1 along the rank
        assert_eq!(moves.len(), 5);
        assert!(moves.contains(&Move::new(0, 7, 0, 4)));
        assert!(!moves.contains(&Move::new(0, 7, 0, 3)));

        board.set(2, 2, Piece::WhiteBishop);
        assert_eq!(board.get_moves(2, 2).len(), 11);
    }

    #[test]
    fn knight_in_the_corner() {
        let mut board = Board::cleared();
        board.set(0, 0, Piece::WhiteKnight);
        assert_eq!(board.get_moves(0, 0).len(), 2);
    }

    #[test]
    fn only_captures_are_returned() {
        let mut board = Board::cleared();
        board.set(4, 4, Piece::WhiteRook);
        board.set(4, 1, Piece::BlackPawn);
        board.set(6, 4, Piece::BlackBishop);
        let generator = MoveGenerator::new();
        let captures = generator.generate_captures(&board);
        assert_eq!(captures.len(), 2);
        assert!(captures.iter().all(|m| generator.is_capture(&board, m)));
    }
}
