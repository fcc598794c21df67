//! Ponder Chess - Ponder Controller
//!
//! The engine thinks while the player does. A background search computes a
//! reply to every move the player might make; when the player commits a
//! move, the search is allowed to run a little longer and then stopped, and
//! the reply for the move actually played is handed back. Nothing here
//! blocks: the caller polls [`Ai::pop_response`] once per frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::parallel_search::{ParallelSearchEngine, SearchReport};
use crate::search::Searcher;
use crate::sync::StopFlag;

/// Background opponent for one game
pub struct Ai {
    /// Game state as the engine sees it
    board: Board,
    next_move: Option<Move>,
    engine: Arc<ParallelSearchEngine>,
    responses: Receiver<SearchReport>,
    /// Report received before the player moved
    pending: Option<SearchReport>,
    stop: StopFlag,
    last_reply: Instant,
    max_ponder: Duration,
    last_depth: Option<u32>,
}

impl Ai {
    /// Start pondering on `board` with the default configuration
    pub fn new(board: Board) -> Self {
        Self::with_config(board, EngineConfig::default())
    }

    pub fn with_config(board: Board, config: EngineConfig) -> Self {
        let engine = Arc::new(ParallelSearchEngine::from_config(&config));
        let (stop, responses) = spawn_search(&engine, board);

        Ai {
            board,
            next_move: None,
            engine,
            responses,
            pending: None,
            stop,
            last_reply: Instant::now(),
            max_ponder: config.max_ponder,
            last_depth: None,
        }
    }

    /// Record the move the player just made.
    ///
    /// The running search is stopped after as long as the player took to
    /// move, capped at the configured limit.
    pub fn push_move(&mut self, m: Move) {
        let delay = self.last_reply.elapsed().min(self.max_ponder);
        debug!(?m, delay_ms = delay.as_millis() as u64, "player moved");
        self.next_move = Some(m);
        self.stop.stop_after(delay);
    }

    /// The engine's reply to the pushed move, if the search has finished.
    ///
    /// Returns `None` while the search is still running, before any move was
    /// pushed and once the game is over.
    pub fn pop_response(&mut self) -> Option<Move> {
        if self.board.winner().is_some() {
            return None;
        }

        if self.pending.is_none() {
            match self.responses.try_recv() {
                Ok(report) => self.pending = Some(report),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    error!("search thread ended without a report, restarting");
                    self.relaunch();
                    return None;
                }
            }
        }

        let played = self.next_move?;
        let report = self.pending.take()?;
        self.next_move = None;
        self.last_depth = Some(report.depth);

        self.board.apply_move(played);
        if self.board.winner().is_some() {
            return None;
        }

        let reply = match report.responses.get(&played) {
            Some(reply) => *reply,
            None => {
                warn!(?played, depth = report.depth, "no precomputed reply, searching now");
                // one reply ply plus one ply below it, as at search depth 1
                let fallback = Searcher::new(self.engine.evaluator())
                    .with_quiescence(self.engine.quiescence)
                    .best_move(&self.board, 2);
                match fallback {
                    Some((reply, _)) => reply,
                    None => {
                        warn!(?played, "no legal reply");
                        self.relaunch();
                        return None;
                    }
                }
            }
        };

        debug!(?played, ?reply, depth = report.depth, "replying");
        self.board.apply_move(reply);
        self.relaunch();
        self.last_reply = Instant::now();
        Some(reply)
    }

    /// Board after every move the engine has seen
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Depth of the search behind the last reply
    pub fn last_depth(&self) -> Option<u32> {
        self.last_depth
    }

    fn relaunch(&mut self) {
        self.stop.stop();
        let (stop, responses) = spawn_search(&self.engine, self.board);
        self.stop = stop;
        self.responses = responses;
        self.pending = None;
    }
}

impl Drop for Ai {
    fn drop(&mut self) {
        self.stop.stop();
    }
}

fn spawn_search(engine: &Arc<ParallelSearchEngine>, board: Board) -> (StopFlag, Receiver<SearchReport>) {
    let stop = StopFlag::new();
    let (tx, rx) = mpsc::channel();
    let engine = Arc::clone(engine);
    let flag = stop.clone();
    thread::spawn(move || engine.search_best_response(board, &tx, &flag));
    (stop, rx)
}
