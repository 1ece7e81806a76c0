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

//! Iterative-deepening alpha-beta search with quiescence, a
//! transposition table, and killer-move ordering.

use super::{
    eval::{evaluate, evaluate_move},
    killers::KillerTable,
    movegen::{is_legal, pseudo_legal_moves},
    moves::Move,
    position::Position,
    tt::{NodeKind, TTEntry, TranspositionTable},
};

use std::{
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    time::{Duration, Instant},
};

/// A score outside any realistic evaluation, used as the starting alpha
/// and beta bounds and as the basis for mate-distance scores.
pub const INFINITY: i32 = 1_000_000;
/// The score assigned to "checkmate right now"; scores between this and
/// [`INFINITY`] encode "mate in N plies" by subtracting N.
pub const MATE_SCORE: i32 = 900_000;

const KILLER_BONUS: i32 = INFINITY / 32;
const CAPTURE_BONUS: i32 = INFINITY / 64;
const PV_BONUS: i32 = INFINITY / 16;

/// Caps on how much work a search is allowed to do before it must return
/// its best answer so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    pub max_depth: Option<u8>,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
}

/// What the search learned, reported back after every completed
/// iterative-deepening iteration (and once more at the end).
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: u8,
    pub score: i32,
    pub principal_variation: Vec<Move>,
    pub nodes: u64,
    pub transposition_hits: u64,
}

pub struct Searcher {
    tt: TranspositionTable,
    killers: KillerTable,
    stop: Arc<AtomicBool>,
    nodes: u64,
    transposition_hits: u64,
    start: Instant,
    limits: SearchLimits,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Searcher {
        Searcher::with_stop_flag(Arc::new(AtomicBool::new(false)))
    }

    #[must_use]
    /// Builds a searcher that watches an externally-owned stop flag,
    /// letting a caller hold onto the `Arc` and request a stop from
    /// another thread while this searcher's `search` call is in
    /// progress on its own thread.
    pub fn with_stop_flag(stop: Arc<AtomicBool>) -> Searcher {
        Searcher {
            tt: TranspositionTable::with_default_capacity(),
            killers: KillerTable::new(),
            stop,
            nodes: 0,
            transposition_hits: 0,
            start: Instant::now(),
            limits: SearchLimits::default(),
        }
    }

    #[must_use]
    /// A handle that, when set, asks any in-progress search to return its
    /// best move so far as soon as it next checks in. Used to implement
    /// the UCI `stop` command from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Drops every learned transposition and killer entry, e.g. on
    /// `ucinewgame`.
    pub fn reset(&mut self) {
        self.tt.clear();
        self.killers.clear();
    }

    #[must_use]
    /// Runs iterative deepening from depth 1 up to `limits.max_depth`
    /// (or until time/node limits or an external stop request arrives),
    /// returning the info gathered at the deepest completed iteration.
    pub fn search(&mut self, pos: &mut Position, limits: SearchLimits) -> SearchInfo {
        self.nodes = 0;
        self.transposition_hits = 0;
        self.start = Instant::now();
        self.limits = limits;
        self.stop.store(false, Ordering::Relaxed);

        let max_depth = limits.max_depth.unwrap_or(64);
        let mut best = SearchInfo {
            depth: 0,
            score: evaluate(pos),
            principal_variation: Vec::new(),
            nodes: 0,
            transposition_hits: 0,
        };

        for depth in 1..=max_depth {
            let score = self.negamax(pos, depth, 0, -INFINITY, INFINITY);
            if self.should_stop() && depth > 1 {
                break;
            }
            let pv = self.extract_pv(pos, depth);
            best = SearchInfo {
                depth,
                score,
                principal_variation: pv,
                nodes: self.nodes,
                transposition_hits: self.transposition_hits,
            };
            if score.abs() >= MATE_SCORE {
                break;
            }
        }

        best
    }

    fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(max_nodes) = self.limits.max_nodes {
            if self.nodes >= max_nodes {
                return true;
            }
        }
        if let Some(movetime) = self.limits.movetime {
            if self.start.elapsed() >= movetime {
                return true;
            }
        }
        false
    }

    /// Negamax alpha-beta search. Returns a score from the perspective
    /// of the side to move at `pos`.
    fn negamax(&mut self, pos: &mut Position, depth: u8, ply: u16, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return self.quiescence(pos, alpha, beta);
        }
        if self.nodes % 2048 == 0 && self.should_stop() {
            return evaluate(pos);
        }

        let hash = pos.hash();
        let mut tt_move = Move::NULL;
        if let Some(entry) = self.tt.get(hash) {
            self.transposition_hits += 1;
            tt_move = entry.best_move;
            if entry.depth >= depth {
                match entry.node_kind {
                    NodeKind::Exact => return entry.score,
                    NodeKind::LowerBound if entry.score >= beta => return entry.score,
                    NodeKind::UpperBound if entry.score <= alpha => return entry.score,
                    _ => {}
                }
            }
        }

        let mut moves = Vec::with_capacity(48);
        pseudo_legal_moves(pos, &mut moves);
        let killers = self.killers.get(ply as usize);
        let mut scored: Vec<(i32, Move)> = moves
            .into_iter()
            .map(|mv| (order_score(pos, mv, tt_move, killers), mv))
            .collect();

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = Move::NULL;
        let mut legal_move_found = false;

        for i in 0..scored.len() {
            let (_, mv) = select_best_remaining(&mut scored, i);
            if !is_legal(pos, mv) {
                continue;
            }
            legal_move_found = true;

            pos.make_move(mv);
            let score = -self.negamax(pos, depth - 1, ply + 1, -beta, -alpha);
            pos.undo_move(mv);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.killers.record(ply as usize, mv);
                break;
            }
        }

        if !legal_move_found {
            return if pos.is_in_check(pos.side_to_move()) {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }

        let node_kind = if best_score <= original_alpha {
            NodeKind::UpperBound
        } else if best_score >= beta {
            NodeKind::LowerBound
        } else {
            NodeKind::Exact
        };
        self.tt.store(TTEntry {
            hash,
            score: best_score,
            depth,
            node_kind,
            best_move,
        });

        best_score
    }

    /// Extends a search past the horizon along captures only, so a side
    /// that just captured with a worse recapture waiting isn't
    /// misjudged from a position that still has material hanging.
    fn quiescence(&mut self, pos: &mut Position, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = evaluate(pos);
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = Vec::with_capacity(16);
        pseudo_legal_moves(pos, &mut moves);
        let mut captures: Vec<(i32, Move)> = moves
            .into_iter()
            .filter(|mv| mv.is_capture())
            .map(|mv| (evaluate_move(pos, mv), mv))
            .collect();

        for i in 0..captures.len() {
            let (_, mv) = select_best_remaining(&mut captures, i);
            if !is_legal(pos, mv) {
                continue;
            }
            pos.make_move(mv);
            let score = -self.quiescence(pos, -beta, -alpha);
            pos.undo_move(mv);

            if score >= beta {
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Walks the principal variation out of the transposition table by
    /// replaying the best move from each position up to `max_len` plies.
    fn extract_pv(&mut self, pos: &mut Position, max_len: u8) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut undo_stack = Vec::new();
        for _ in 0..max_len {
            let Some(entry) = self.tt.get(pos.hash()) else {
                break;
            };
            if entry.best_move.is_null() {
                break;
            }
            if !is_legal(pos, entry.best_move) {
                break;
            }
            pos.make_move(entry.best_move);
            undo_stack.push(entry.best_move);
            pv.push(entry.best_move);
        }
        for mv in undo_stack.into_iter().rev() {
            pos.undo_move(mv);
        }
        pv
    }
}

impl Default for Searcher {
    fn default() -> Searcher {
        Searcher::new()
    }
}

fn order_score(pos: &Position, mv: Move, tt_move: Move, killers: [Move; 2]) -> i32 {
    if mv == tt_move {
        return PV_BONUS;
    }
    if mv.is_capture() {
        return CAPTURE_BONUS + evaluate_move(pos, mv);
    }
    if mv == killers[0] || mv == killers[1] {
        return KILLER_BONUS;
    }
    evaluate_move(pos, mv)
}

/// Lazy selection sort: picks the highest-scoring move out of
/// `scored[from..]` and swaps it into `scored[from]`, returning it. Move
/// lists are short enough (rarely more than 40-odd moves) that doing a
/// full sort up front wastes work compared to only ever finding the next
/// best one as the search needs it.
fn select_best_remaining(scored: &mut [(i32, Move)], from: usize) -> (i32, Move) {
    let mut best_idx = from;
    for i in (from + 1)..scored.len() {
        if scored[i].0 > scored[best_idx].0 {
            best_idx = i;
        }
    }
    scored.swap(from, best_idx);
    scored[from]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn finds_mate_in_one() {
        let mut pos = Position::from_fen("7k/6pp/8/8/8/8/6PP/R6K w - - 0 1").unwrap();
        let mut searcher = Searcher::new();
        let info = searcher.search(
            &mut pos,
            SearchLimits {
                max_depth: Some(3),
                ..Default::default()
            },
        );
        assert_eq!(info.principal_variation.first().map(|m| m.origin()), Some(Square::A1));
        assert_eq!(info.principal_variation.first().map(|m| m.target()), Some(Square::A8));
        assert!(info.score >= MATE_SCORE - 2);
    }

    #[test]
    fn node_limit_is_respected() {
        let mut pos = Position::starting();
        let mut searcher = Searcher::new();
        let info = searcher.search(
            &mut pos,
            SearchLimits {
                max_depth: Some(64),
                max_nodes: Some(500),
                ..Default::default()
            },
        );
        assert!(info.nodes < 5000);
    }

    #[test]
    fn external_stop_flag_halts_a_deep_search() {
        let mut pos = Position::starting();
        let mut searcher = Searcher::new();
        let stop = searcher.stop_handle();
        stop.store(true, Ordering::Relaxed);
        let info = searcher.search(
            &mut pos,
            SearchLimits {
                max_depth: Some(64),
                ..Default::default()
            },
        );
        assert_eq!(info.depth, 1);
    }
}
