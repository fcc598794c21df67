//! Property-based tests over random games.

use ponder_chess::move_generator::MoveGenerator;
use ponder_chess::{Board, Move, PieceKind};
use proptest::prelude::*;
use rand::prelude::*;

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn ply_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Play `plies` random legal moves, calling `check` before each one
fn random_game(seed: u64, plies: usize, mut check: impl FnMut(&Board, Move)) -> Board {
    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let generator = MoveGenerator::new();
    for _ in 0..plies {
        let moves = generator.generate_legal_moves(&board);
        let Some(&m) = moves.choose(&mut rng) else {
            break;
        };
        check(&board, m);
        board.apply_move(m);
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every move flips the turn and removes at most one piece
    #[test]
    fn prop_apply_flips_turn_and_keeps_material(seed in seed_strategy(), plies in ply_strategy()) {
        random_game(seed, plies, |board, m| {
            let after = board.apply(m);
            assert_eq!(after.turn(), board.turn().opponent());
            assert!(after.piece_count() + 1 >= board.piece_count());
            assert!(after.piece_count() <= board.piece_count());
            assert_eq!(after.last_move(), Some(m));
        });
    }

    /// Taking the king ends the game in the mover's favour
    #[test]
    fn prop_king_capture_decides_the_game(seed in seed_strategy(), plies in ply_strategy()) {
        random_game(seed, plies, |board, m| {
            let takes_king = board.at(m.x2, m.y2).kind() == Some(PieceKind::King);
            let after = board.apply(m);
            assert_eq!(after.winner().is_some(), takes_king);
            if takes_king {
                assert_eq!(after.winner(), Some(board.turn()));
            }
        });
    }

    /// The generator lists exactly the moves the rules accept
    #[test]
    fn prop_generator_matches_legality(seed in seed_strategy(), plies in 0..=30usize) {
        let board = random_game(seed, plies, |_, _| {});
        let generated = MoveGenerator::new().generate_legal_moves(&board);
        for m in &generated {
            prop_assert!(board.is_move_legal(*m));
        }

        let mut accepted = 0;
        for (x1, y1, piece) in board.pieces() {
            if !piece.is(board.turn()) {
                continue;
            }
            for x2 in 0..8 {
                for y2 in 0..8 {
                    let m = Move::new(x1, y1, x2, y2);
                    if board.is_move_legal(m) {
                        accepted += 1;
                        prop_assert!(generated.contains(&m));
                    }
                }
            }
        }
        prop_assert_eq!(accepted, generated.len());
    }
}
