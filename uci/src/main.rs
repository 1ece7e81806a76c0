/*
  Strix, a UCI-compatible chess engine core.
  Copyright (C) 2024 The Strix Authors (see AUTHORS.md file)

  Strix is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Strix is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The `strix` binary: a thin Universal Chess Interface wrapper around
//! `strix_core`. Every line of protocol chatter goes to stdout; every
//! diagnostic goes to stderr through `tracing`, since stdout is reserved
//! for the GUI talking to the engine.

mod error;
mod options;
mod protocol;

use error::UciError;
use options::Options;
use protocol::{GoOptions, UciCommand};
use std::io::{self, BufRead, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread::{self, JoinHandle};
use strix_core::{legal_moves, Move, Position, SearchLimits, Searcher};
use tracing::{info, warn};

const ENGINE_NAME: &str = "Strix";
const ENGINE_AUTHOR: &str = "The Strix Authors";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("starting {ENGINE_NAME}");

    let stdin = io::stdin();
    let mut pos = Position::starting();
    let stop = Arc::new(AtomicBool::new(false));
    let searcher = Arc::new(Mutex::new(Searcher::with_stop_flag(Arc::clone(&stop))));
    let mut options = Options::new();
    let mut running_search: Option<JoinHandle<()>> = None;

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match protocol::parse_line(&line) {
            Ok(UciCommand::Uci) => handle_uci(),
            Ok(UciCommand::IsReady) => handle_isready(),
            Ok(UciCommand::UciNewGame) => {
                join_running_search(&mut running_search);
                searcher.lock().expect("search lock poisoned").reset();
                pos = Position::starting();
            }
            Ok(UciCommand::SetOption { name, value }) => {
                if let Err(e) = options.set(&name, &value) {
                    warn!("{e}");
                }
            }
            Ok(UciCommand::Position { fen, moves }) => {
                join_running_search(&mut running_search);
                match apply_position(fen, &moves) {
                    Ok(new_pos) => pos = new_pos,
                    Err(e) => warn!("{e}"),
                }
            }
            Ok(UciCommand::Go(go_opts)) => {
                join_running_search(&mut running_search);
                stop.store(false, Ordering::Relaxed);
                let limits = limits_for(&go_opts, pos.side_to_move());
                let mut search_pos = pos.clone();
                let searcher = Arc::clone(&searcher);
                running_search = Some(thread::spawn(move || {
                    let info_report = searcher.lock().expect("search lock poisoned").search(&mut search_pos, limits);
                    report_search_info(&info_report);
                    print_bestmove(info_report.principal_variation.first().copied());
                }));
            }
            Ok(UciCommand::Stop) => {
                stop.store(true, Ordering::Relaxed);
            }
            Ok(UciCommand::Quit) => {
                stop.store(true, Ordering::Relaxed);
                join_running_search(&mut running_search);
                break;
            }
            Ok(UciCommand::Ignored) => {}
            Err(e) => warn!("{e}"),
        }
    }

    join_running_search(&mut running_search);
}

/// Blocks until any in-flight `go` search finishes. Called before
/// anything that would otherwise race with the search thread over
/// `pos` or the shared `Searcher`.
fn join_running_search(running_search: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = running_search.take() {
        let _ = handle.join();
    }
}

fn handle_uci() {
    println!("id name {ENGINE_NAME}");
    println!("id author {ENGINE_AUTHOR}");
    Options::advertise();
    println!("uciok");
    let _ = io::stdout().flush();
}

fn handle_isready() {
    println!("readyok");
    let _ = io::stdout().flush();
}

fn apply_position(fen: Option<String>, moves: &[String]) -> Result<Position, UciError> {
    let mut pos = match fen {
        Some(fen) => Position::from_fen(&fen).map_err(|_| UciError::MissingPositionArgument)?,
        None => Position::starting(),
    };
    for lan in moves {
        let mv = find_move(&mut pos, lan)?;
        pos.make_move(mv);
    }
    Ok(pos)
}

/// Matches a long-algebraic move string like `"e2e4"` or `"e7e8q"`
/// against the position's legal moves.
fn find_move(pos: &mut Position, lan: &str) -> Result<Move, UciError> {
    if lan.len() < 4 || lan.len() > 5 {
        return Err(UciError::MalformedMove(lan.to_string()));
    }
    legal_moves(pos)
        .into_iter()
        .find(|mv| mv.to_uci() == lan)
        .ok_or_else(|| UciError::IllegalMove(lan.to_string()))
}

fn limits_for(go_opts: &GoOptions, side: strix_core::Color) -> SearchLimits {
    if let Some(movetime) = go_opts.movetime {
        return SearchLimits {
            max_depth: go_opts.depth,
            max_nodes: go_opts.nodes,
            movetime: Some(movetime),
        };
    }
    let clock = match side {
        strix_core::Color::White => go_opts.wtime,
        strix_core::Color::Black => go_opts.btime,
    };
    // A simple fixed fraction of the remaining clock, with no increment
    // modeling; good enough until real time management is built.
    let movetime = clock.map(|t| t / 20);
    SearchLimits {
        max_depth: go_opts.depth,
        max_nodes: go_opts.nodes,
        movetime,
    }
}

fn report_search_info(info: &strix_core::SearchInfo) {
    let pv: Vec<String> = info.principal_variation.iter().map(|m| m.to_uci()).collect();
    println!(
        "info depth {} score cp {} nodes {} pv {}",
        info.depth,
        info.score,
        info.nodes,
        pv.join(" ")
    );
    let _ = io::stdout().flush();
}

fn print_bestmove(best: Option<Move>) {
    match best {
        Some(mv) => println!("bestmove {}", mv.to_uci()),
        None => println!("bestmove 0000"),
    }
    let _ = io::stdout().flush();
}
