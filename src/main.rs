//! Ponder Chess - Self-Play Demo
//!
//! White plays random legal moves, Black is the pondering engine.
//!
//! Usage:
//!     ponder_chess [--seed N] [--plies N] [Option=value ...]
//!
//! Options are the engine options, e.g. `Threads=4 PonderLimitMs=500`.
//! Set `RUST_LOG=ponder_chess=debug` to watch the search.

use std::error::Error;
use std::thread;
use std::time::Duration;

use ponder_chess::move_generator::MoveGenerator;
use ponder_chess::{Ai, Board, EngineConfig};
use rand::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

struct DemoArgs {
    seed: u64,
    plies: u32,
    config: EngineConfig,
}

fn parse_args() -> Result<DemoArgs, Box<dyn Error>> {
    let mut args = DemoArgs {
        seed: 12345,
        plies: 40,
        config: EngineConfig::default(),
    };
    args.config.max_ponder = Duration::from_millis(500);

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => args.seed = iter.next().ok_or("--seed needs a value")?.parse()?,
            "--plies" => args.plies = iter.next().ok_or("--plies needs a value")?.parse()?,
            _ => {
                let (name, value) = arg
                    .split_once('=')
                    .ok_or_else(|| format!("expected Option=value, got '{arg}'"))?;
                args.config.set_option(name, value)?;
            }
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let generator = MoveGenerator::new();
    let mut board = Board::new();
    let mut ai = Ai::with_config(board, args.config);

    println!("{board}");
    for _ in 0..args.plies / 2 {
        let moves = generator.generate_legal_moves(&board);
        let Some(&played) = moves.choose(&mut rng) else {
            break;
        };
        board.apply_move(played);
        ai.push_move(played);
        println!("White: {played:?}\n{board}");
        if board.winner().is_some() {
            break;
        }

        if generator.generate_legal_moves(&board).is_empty() {
            info!("Black has no legal move");
            break;
        }
        let reply = loop {
            if let Some(reply) = ai.pop_response() {
                break reply;
            }
            thread::sleep(POLL_INTERVAL);
        };
        board.apply_move(reply);
        println!("Black: {reply:?} (depth {:?})\n{board}", ai.last_depth());
        if board.winner().is_some() {
            break;
        }
    }

    info!(winner = ?board.winner(), "game over");
    Ok(())
}
