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

//! Move-count (perft) checks against known-good node counts at shallow
//! depths, plus a handful of end-to-end scenario positions.

use strix_core::{legal_moves, Position};

fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut count = 0;
    for mv in moves {
        pos.make_move(mv);
        count += perft(pos, depth - 1);
        pos.undo_move(mv);
    }
    count
}

#[test]
fn starting_position_perft_depth_1() {
    let mut pos = Position::starting();
    assert_eq!(perft(&mut pos, 1), 20);
}

#[test]
fn starting_position_perft_depth_2() {
    let mut pos = Position::starting();
    assert_eq!(perft(&mut pos, 2), 400);
}

#[test]
fn starting_position_perft_depth_3() {
    let mut pos = Position::starting();
    assert_eq!(perft(&mut pos, 3), 8_902);
}

#[test]
fn kiwipete_like_midgame_position_perft_depth_1() {
    // A heavily-tactical midgame position with castling rights on both
    // sides, a pinned piece, and an en passant target, commonly used to
    // stress-test move generators beyond the symmetric starting position.
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut pos, 1), 48);
}

#[test]
fn castling_rights_fen_reflects_legal_castling_moves() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves = legal_moves(&mut pos);
    assert!(moves.iter().any(|m| m.kind().is_castle()));
}

#[test]
fn en_passant_fen_produces_an_en_passant_capture() {
    let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let moves = legal_moves(&mut pos);
    assert!(moves.iter().any(|m| m.to_uci() == "e5d6"));
}

#[test]
fn promotion_fen_produces_all_four_promotion_choices() {
    let mut pos = Position::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&mut pos);
    let promotions: Vec<_> = moves.iter().filter(|m| m.promotion().is_some()).collect();
    assert_eq!(promotions.len(), 4);
}
