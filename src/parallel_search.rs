//! Ponder Chess - Parallel Search Module
//!
//! Iterative deepening over every root move at once. For each move the
//! current side could play, the workers find the opponent's best reply, and a
//! depth produces a full `move -> reply` map. Root moves are pulled from a
//! shared index by a fixed pool of threads, so the fan-out is bounded by the
//! thread count rather than the number of legal moves.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::evaluation::Evaluator;
use crate::move_generator::MoveGenerator;
use crate::search::Searcher;
use crate::sync::StopFlag;

/// Planned reply for every root move: "if you play this, I play that"
pub type SearchResult = HashMap<Move, Move>;

/// Result of one iterative-deepening run
#[derive(Clone, Debug, Default)]
pub struct SearchReport {
    /// Deepest fully completed depth, 0 if none completed
    pub depth: u32,
    pub responses: SearchResult,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Reply search fanned out over a pool of threads
pub struct ParallelSearchEngine {
    pub num_threads: usize,
    evaluator: Arc<Evaluator>,
    pub quiescence: bool,
    /// Depths up to this one ignore the stop flag
    pub min_depth: u32,
    pub max_depth: Option<u32>,
}

impl ParallelSearchEngine {
    pub fn new(evaluator: Arc<Evaluator>, num_threads: usize) -> Self {
        let threads = if num_threads == 0 { num_cpus::get() } else { num_threads };

        ParallelSearchEngine {
            num_threads: threads.max(1),
            evaluator,
            quiescence: true,
            min_depth: 1,
            max_depth: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new(Arc::new(Evaluator::new(config.eval.clone())), config.threads);
        engine.quiescence = config.quiescence;
        engine.min_depth = config.min_depth;
        engine.max_depth = config.max_depth;
        engine
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Best reply to every root move at one depth.
    ///
    /// Each reply `r` to root move `m` is scored by an alpha-beta search of
    /// `depth` plies below `board + m + r`. Returns `None` when `stop` fired
    /// before every root move reported; the partial map is dropped.
    pub fn search_depth(
        &self,
        board: &Board,
        depth: u32,
        stop: Option<&StopFlag>,
    ) -> Option<(SearchResult, u64)> {
        let roots = Arc::new(MoveGenerator::new().generate_legal_moves(board));
        let next = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(Move, Option<Move>, u64)>();

        let workers = self.num_threads.min(roots.len()).max(1);
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let roots = Arc::clone(&roots);
                let next = Arc::clone(&next);
                let evaluator = Arc::clone(&self.evaluator);
                let stop = stop.cloned();
                let tx = tx.clone();
                let board = *board;
                let quiescence = self.quiescence;

                thread::spawn(move || {
                    let mut searcher = Searcher::new(&evaluator).with_quiescence(quiescence);
                    if let Some(stop) = stop {
                        searcher = searcher.with_stop(stop);
                    }

                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(&root) = roots.get(index) else {
                            break;
                        };

                        let before = searcher.nodes_searched;
                        let after = board.apply(root);
                        let reply = searcher
                            .best_move(&after, depth as i32 + 1)
                            .map(|(reply, _)| reply);

                        // an aborted branch must not report into the map
                        if searcher.is_stopped() {
                            break;
                        }
                        let nodes = searcher.nodes_searched - before;
                        if tx.send((root, reply, nodes)).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        drop(tx);

        let mut responses = SearchResult::with_capacity(roots.len());
        let mut reported = 0;
        let mut nodes = 0;
        for (root, reply, branch_nodes) in rx {
            reported += 1;
            nodes += branch_nodes;
            if let Some(reply) = reply {
                responses.insert(root, reply);
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                warn!(depth, "search worker panicked");
            }
        }

        // a worker that saw the stop flag quits without reporting its root
        if reported < roots.len() {
            return None;
        }
        Some((responses, nodes))
    }

    /// Deepen until cancelled, then send the last complete map on `out`.
    ///
    /// Depths up to `min_depth` run to completion even if `stop` is already
    /// set. A position without legal moves reports an empty map at once.
    pub fn search_best_response(&self, board: Board, out: &Sender<SearchReport>, stop: &StopFlag) {
        let start = Instant::now();
        let mut last = SearchReport::default();

        if MoveGenerator::new().generate_legal_moves(&board).is_empty() {
            debug!("no legal moves, nothing to search");
            let _ = out.send(last);
            return;
        }

        let mut depth = 0;
        loop {
            depth += 1;
            if self.max_depth.is_some_and(|max| depth > max) {
                break;
            }
            if depth > self.min_depth && stop.is_stopped() {
                break;
            }

            let interruptible = (depth > self.min_depth).then_some(stop);
            match self.search_depth(&board, depth, interruptible) {
                Some((responses, nodes)) => {
                    debug!(depth, replies = responses.len(), nodes, "completed depth");
                    last = SearchReport {
                        depth,
                        responses,
                        nodes: last.nodes + nodes,
                        elapsed: start.elapsed(),
                    };
                }
                None => break,
            }
        }

        info!(
            depth = last.depth,
            nodes = last.nodes,
            elapsed_ms = last.elapsed.as_millis() as u64,
            "search finished"
        );
        // the receiver is gone when the controller was dropped
        let _ = out.send(last);
    }
}
