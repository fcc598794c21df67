//! Ponder Chess - Search Engine Module
//!
//! This module implements the single-threaded search:
//! - Minimax with alpha-beta pruning (White maximises, Black minimises)
//! - MVV-LVA move ordering
//! - Quiescence extension on captures at the horizon
//!
//! Boards are copied on every move, so a searcher never touches the board it
//! was handed.

use crate::board::{Board, Move};
use crate::evaluation::Evaluator;
use crate::move_generator::MoveGenerator;
use crate::sync::StopFlag;
use crate::types::Side;

/// Bound larger than any evaluation
pub const INFINITY: i32 = 10_000_000;

pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    move_generator: MoveGenerator,
    quiescence: bool,
    stop: Option<StopFlag>,
    pub nodes_searched: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Searcher {
            evaluator,
            move_generator: MoveGenerator::new(),
            quiescence: true,
            stop: None,
            nodes_searched: 0,
        }
    }

    /// Enable or disable the capture extension at the horizon
    pub fn with_quiescence(mut self, enabled: bool) -> Self {
        self.quiescence = enabled;
        self
    }

    /// Abort the search as soon as `stop` is set. Scores returned after that
    /// point are meaningless and must be discarded by the caller.
    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = Some(stop);
        self
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.as_ref().is_some_and(StopFlag::is_stopped)
    }

    /// Sort moves so captures come first, most valuable victim first.
    /// The sort is stable, so quiet moves keep generation order.
    pub fn order_moves(&self, board: &Board, moves: Vec<Move>) -> Vec<Move> {
        let mut scored: Vec<(Move, i32)> = moves
            .into_iter()
            .map(|m| (m, self.evaluator.move_order_score(board, &m)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(m, _)| m).collect()
    }

    /// Score of playing `m` from `board` with `depth` plies left, `m` included
    fn child_score(&mut self, board: &Board, m: Move, depth: i32, alpha: i32, beta: i32) -> i32 {
        let capture = self.move_generator.is_capture(board, &m);
        let child = board.apply(m);
        if self.quiescence && capture && depth - 1 <= 0 {
            self.alpha_beta(&child, 1, alpha, beta, true)
        } else {
            self.alpha_beta(&child, depth - 1, alpha, beta, false)
        }
    }

    /// Minimax value of `board` from White's point of view.
    ///
    /// With `only_captures` the side to move may also stand pat on the static
    /// evaluation instead of capturing.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        only_captures: bool,
    ) -> i32 {
        if self.is_stopped() {
            return 0;
        }
        self.nodes_searched += 1;

        if depth <= 0 || board.winner().is_some() {
            return self.evaluator.evaluate(board);
        }

        let maximizing = board.turn() == Side::White;
        let moves = if only_captures {
            self.move_generator.generate_captures(board)
        } else {
            self.move_generator.generate_legal_moves(board)
        };

        let mut best = if only_captures || moves.is_empty() {
            let stand_pat = self.evaluator.evaluate(board);
            if maximizing {
                alpha = alpha.max(stand_pat);
            } else {
                beta = beta.min(stand_pat);
            }
            if beta <= alpha || moves.is_empty() {
                return stand_pat;
            }
            stand_pat
        } else if maximizing {
            -INFINITY
        } else {
            INFINITY
        };

        for m in self.order_moves(board, moves) {
            let score = self.child_score(board, m, depth, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Best move for the side to move and its score.
    ///
    /// Ties go to the move seen first in ordered move order. Returns `None`
    /// when the side to move has no legal move.
    pub fn best_move(&mut self, board: &Board, depth: i32) -> Option<(Move, i32)> {
        let maximizing = board.turn() == Side::White;
        let moves = self.move_generator.generate_legal_moves(board);
        let mut best: Option<(Move, i32)> = None;

        for m in self.order_moves(board, moves) {
            let (alpha, beta) = match best {
                Some((_, score)) if maximizing => (score, INFINITY),
                Some((_, score)) => (-INFINITY, score),
                None => (-INFINITY, INFINITY),
            };
            let score = self.child_score(board, m, depth, alpha, beta);
            let improves = match best {
                None => true,
                Some((_, current)) if maximizing => score > current,
                Some((_, current)) => score < current,
            };
            if improves {
                best = Some((m, score));
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{EvalConfig, WIN_SCORE};
    use crate::types::Piece;

    fn material() -> Evaluator {
        Evaluator::new(EvalConfig::material_only())
    }

    #[test]
    fn takes_a_free_queen() {
        let evaluator = material();
        let mut board = Board::cleared();
        board.set(4, 7, Piece::WhiteKing);
        board.set(4, 0, Piece::BlackKing);
        board.set(0, 7, Piece::WhiteRook);
        board.set(0, 2, Piece::BlackQueen);
        let (m, score) = Searcher::new(&evaluator).best_move(&board, 1).unwrap();
        assert_eq!(m, Move::new(0, 7, 0, 2));
        assert_eq!(score, 500);
    }

    #[test]
    fn captures_the_king_when_possible() {
        let evaluator = material();
        let mut board = Board::cleared();
        board.set(4, 7, Piece::WhiteKing);
        board.set(4, 0, Piece::BlackKing);
        board.set(4, 5, Piece::WhiteRook);
        board.set(0, 1, Piece::BlackQueen);
        let (m, score) = Searcher::new(&evaluator).best_move(&board, 2).unwrap();
        assert_eq!(m, Move::new(4, 5, 4, 0));
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn black_minimises() {
        let evaluator = material();
        let mut board = Board::cleared();
        board.set(4, 7, Piece::WhiteKing);
        board.set(4, 0, Piece::BlackKing);
        board.set(7, 0, Piece::BlackRook);
        board.set(7, 5, Piece::WhiteKnight);
        board.set_turn(Side::Black);
        let (m, _) = Searcher::new(&evaluator).best_move(&board, 1).unwrap();
        assert_eq!(m, Move::new(7, 0, 7, 5));
    }

    #[test]
    fn quiescence_sees_the_recapture() {
        let evaluator = material();
        let mut board = Board::cleared();
        board.set(7, 7, Piece::WhiteKing);
        board.set(7, 0, Piece::BlackKing);
        board.set(3, 7, Piece::WhiteQueen);
        board.set(3, 3, Piece::BlackPawn);
        board.set(4, 2, Piece::BlackPawn);
        let capture = Move::new(3, 7, 3, 3);

        let mut searcher = Searcher::new(&evaluator);
        assert!(searcher.child_score(&board, capture, 1, -INFINITY, INFINITY) < 0);

        let mut blind = Searcher::new(&evaluator).with_quiescence(false);
        assert!(blind.child_score(&board, capture, 1, -INFINITY, INFINITY) > 0);
    }

    #[test]
    fn ordering_puts_captures_first() {
        let evaluator = material();
        let mut board = Board::cleared();
        board.set(4, 4, Piece::WhiteRook);
        board.set(4, 1, Piece::BlackPawn);
        board.set(6, 4, Piece::BlackQueen);
        let searcher = Searcher::new(&evaluator);
        let moves = MoveGenerator::new().generate_legal_moves(&board);
        let ordered = searcher.order_moves(&board, moves);
        assert_eq!(ordered[0], Move::new(4, 4, 6, 4));
        assert_eq!(ordered[1], Move::new(4, 4, 4, 1));
    }

    #[test]
    fn stopped_search_returns_immediately() {
        let evaluator = material();
        let mut searcher = Searcher::new(&evaluator).with_stop(StopFlag::stopped());
        assert_eq!(searcher.alpha_beta(&Board::new(), 4, -INFINITY, INFINITY, false), 0);
        assert_eq!(searcher.nodes_searched, 0);
    }
}
