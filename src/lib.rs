//! Ponder Chess - Chess Engine Core
//!
//! A chess engine that thinks on the opponent's time:
//! - Board with en passant, castling and double pawn pushes
//! - Material and piece-square evaluation
//! - Minimax search with alpha-beta pruning and a capture extension
//! - Multi-threaded iterative deepening over every opponent move
//! - A non-blocking controller that answers the move actually played

pub mod types;
pub mod board;
pub mod move_generator;
pub mod evaluation;
pub mod search;
pub mod parallel_search;
pub mod sync;
pub mod config;
pub mod ai;

pub use ai::Ai;
pub use board::{Board, HomeSquares, Move};
pub use config::{ConfigError, EngineConfig};
pub use evaluation::{EvalConfig, Evaluator};
pub use parallel_search::{ParallelSearchEngine, SearchReport, SearchResult};
pub use sync::StopFlag;
pub use types::{Piece, PieceKind, Side};
