//! Ponder Chess - Position Evaluation Module
//!
//! Static evaluation from White's point of view (positive = White is better):
//! - Material balance
//! - Piece positioning (piece-square tables, optional)
//!
//! The weights live in an [`EvalConfig`] that is fixed when the [`Evaluator`]
//! is built and shared read-only between search threads.

use crate::board::{Board, Move};
use crate::types::*;

/// Score of a finished game, larger than any material swing
pub const WIN_SCORE: i32 = 100_000;

/// Centipawns per pawn, used to express move-ordering values in pawns
const PAWN_UNIT: i32 = 100;

/// Ordering bonus that puts every capture ahead of every quiet move
const CAPTURE_ORDER_BASE: i32 = 1_000_000;

// ============================================================================
// PIECE VALUES
// ============================================================================

/// Material values in centipawns, indexed by [`PieceKind::index`]
pub const PIECE_VALUES: [i32; 6] = [
    100,     // PAWN
    300,     // KNIGHT
    300,     // BISHOP
    500,     // ROOK
    900,     // QUEEN
    100_000, // KING
];

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
//
// Written from White's side with the first row being White's back rank.
// Black reads the same table with the rank mirrored.

// Pawn PST - encourages central control and advancement
const PAWN_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 1
    5,  10,  10, -20, -20,  10,  10,   5,   // Rank 2
    5,  -5, -10,   0,   0, -10,  -5,   5,   // Rank 3
    0,   0,   0,  20,  20,   0,   0,   0,   // Rank 4
    5,   5,  10,  25,  25,  10,   5,   5,   // Rank 5
   10,  10,  20,  30,  30,  20,  10,  10,   // Rank 6
   50,  50,  50,  50,  50,  50,  50,  50,   // Rank 7
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 8
];

// Knight PST - encourages central positioning
const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

// Rook PST - connected rooks on the back rank, pressure on the 7th
const ROOK_PST: [i32; 64] = [
    0,   0,   0,   5,   5,   0,   0,   0,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
    5,  10,  10,  10,  10,  10,  10,   5,
    0,   0,   0,   0,   0,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

// King PST - rewards a castled king behind its pawns
const KING_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

/// Piece-square tables, indexed by [`PieceKind::index`]
pub type PieceSquareTables = [[i32; 64]; 6];

pub const DEFAULT_TABLES: PieceSquareTables =
    [PAWN_PST, KNIGHT_PST, BISHOP_PST, ROOK_PST, QUEEN_PST, KING_PST];

/// Evaluation weights
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    pub piece_values: [i32; 6],
    pub tables: Option<PieceSquareTables>,
}

impl EvalConfig {
    /// Material only, no positional terms
    pub fn material_only() -> Self {
        EvalConfig {
            piece_values: PIECE_VALUES,
            tables: None,
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            piece_values: PIECE_VALUES,
            tables: Some(DEFAULT_TABLES),
        }
    }
}

/// Index into a piece-square table as seen by the piece's owner
#[inline]
fn table_index(side: Side, x: i32, y: i32) -> usize {
    let rank = match side {
        Side::White => BOARD_SIZE - 1 - y,
        Side::Black => y,
    };
    (rank * BOARD_SIZE + x) as usize
}

/// Static evaluator holding immutable weights
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    #[inline]
    pub fn piece_value(&self, kind: PieceKind) -> i32 {
        self.config.piece_values[kind.index()]
    }

    /// Signed contribution of one piece on one square
    #[inline]
    pub fn square_score(&self, piece: Piece, x: i32, y: i32) -> i32 {
        let (Some(kind), Some(side)) = (piece.kind(), piece.side()) else {
            return 0;
        };
        let mut value = self.piece_value(kind);
        if let Some(tables) = &self.config.tables {
            value += tables[kind.index()][table_index(side, x, y)];
        }
        match side {
            Side::White => value,
            Side::Black => -value,
        }
    }

    /// Evaluate the position from White's perspective
    pub fn evaluate(&self, board: &Board) -> i32 {
        match board.winner() {
            Some(Side::White) => return WIN_SCORE,
            Some(Side::Black) => return -WIN_SCORE,
            None => {}
        }

        board
            .pieces()
            .map(|(x, y, piece)| self.square_score(piece, x, y))
            .sum()
    }

    /// Move ordering score: MVV-LVA for captures, zero for quiet moves
    pub fn move_order_score(&self, board: &Board, m: &Move) -> i32 {
        let victim = if board.will_be_en_passant(*m) {
            Some(PieceKind::Pawn)
        } else {
            board.at(m.x2, m.y2).kind()
        };
        let (Some(victim), Some(attacker)) = (victim, board.at(m.x1, m.y1).kind()) else {
            return 0;
        };

        let victim_value = self.piece_value(victim).abs() / PAWN_UNIT;
        let attacker_value = self.piece_value(attacker).abs() / PAWN_UNIT;
        CAPTURE_ORDER_BASE + 100 * victim_value - attacker_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate(&Board::new()), 0);
        assert_eq!(Evaluator::new(EvalConfig::material_only()).evaluate(&Board::new()), 0);
    }

    #[test]
    fn tables_are_side_symmetric() {
        let evaluator = Evaluator::default();
        for kind in PieceKind::ALL {
            for x in 0..8 {
                for y in 0..8 {
                    let white = evaluator.square_score(Piece::new(kind, Side::White), x, y);
                    let black = evaluator.square_score(Piece::new(kind, Side::Black), x, 7 - y);
                    assert_eq!(white, -black);
                }
            }
        }
    }

    #[test]
    fn material_counts() {
        let mut board = Board::new();
        board.set(3, 0, Piece::None);
        let evaluator = Evaluator::new(EvalConfig::material_only());
        assert_eq!(evaluator.evaluate(&board), 900);
    }

    #[test]
    fn winner_dominates() {
        let mut board = Board::cleared();
        board.set(0, 0, Piece::BlackQueen);
        board.set(4, 1, Piece::BlackKing);
        board.set(4, 4, Piece::WhiteRook);
        board.apply_move(Move::new(4, 4, 4, 1));
        assert_eq!(board.winner(), Some(Side::White));
        assert_eq!(Evaluator::default().evaluate(&board), WIN_SCORE);
    }

    #[test]
    fn captures_are_ordered_by_victim_then_attacker() {
        let mut board = Board::cleared();
        board.set(0, 4, Piece::WhitePawn);
        board.set(1, 3, Piece::BlackQueen);
        board.set(7, 3, Piece::WhiteRook);
        board.set(7, 0, Piece::BlackKnight);
        let evaluator = Evaluator::default();
        let pawn_takes_queen = evaluator.move_order_score(&board, &Move::new(0, 4, 1, 3));
        let rook_takes_queen = evaluator.move_order_score(&board, &Move::new(7, 3, 1, 3));
        let rook_takes_knight = evaluator.move_order_score(&board, &Move::new(7, 3, 7, 0));
        let quiet = evaluator.move_order_score(&board, &Move::new(7, 3, 7, 4));
        assert_eq!(pawn_takes_queen, 1_000_000 + 900 - 1);
        assert!(pawn_takes_queen > rook_takes_queen);
        assert!(rook_takes_queen > rook_takes_knight);
        assert_eq!(quiet, 0);
    }
}
