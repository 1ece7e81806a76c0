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

//! Property-based checks that making and undoing any legal move returns
//! a position bit-for-bit identical to the one before it, including its
//! Zobrist hash, for a handful of reachable positions.

use proptest::prelude::*;
use strix_core::{legal_moves, Position};

fn reachable_positions(seed_fen: &str, plies: usize) -> Vec<Position> {
    let mut pos = Position::from_fen(seed_fen).unwrap();
    let mut out = vec![pos.clone()];
    for i in 0..plies {
        let moves = legal_moves(&mut pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves[i % moves.len()];
        pos.make_move(mv);
        out.push(pos.clone());
    }
    out
}

proptest! {
    #[test]
    fn make_then_undo_restores_fen_and_hash(ply_choice in 0usize..20) {
        let mut pos = Position::starting();
        let moves = legal_moves(&mut pos);
        prop_assume!(!moves.is_empty());
        let mv = moves[ply_choice % moves.len()];

        let fen_before = pos.to_fen();
        let hash_before = pos.hash();

        pos.make_move(mv);
        prop_assert_ne!(pos.hash(), hash_before);

        pos.undo_move(mv);
        prop_assert_eq!(pos.to_fen(), fen_before);
        prop_assert_eq!(pos.hash(), hash_before);
    }
}

#[test]
fn every_legal_move_from_several_reachable_positions_round_trips() {
    let positions = reachable_positions("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 2);
    for mut pos in positions {
        let moves = legal_moves(&mut pos);
        for mv in moves {
            let fen_before = pos.to_fen();
            let hash_before = pos.hash();
            pos.make_move(mv);
            pos.undo_move(mv);
            assert_eq!(pos.to_fen(), fen_before);
            assert_eq!(pos.hash(), hash_before);
        }
    }
}
