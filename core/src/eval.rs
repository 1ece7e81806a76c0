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

//! Static position evaluation and move-ordering heuristics.
//!
//! The evaluation is a classical hand-tuned sum: material, mobility, and
//! piece-square positioning, weighted and added from the perspective of
//! the side to move. It is not meant to be strong on its own; it exists
//! to give the search something to compare leaf positions with.

use super::{
    bitboard::Bitboard,
    color::Color,
    magic,
    moves::{Move, MoveKind},
    piece::PieceType,
    position::{Position, ENDGAME_PIECE_THRESHOLD},
    square::Square,
};

/// Centipawn material values, indexed by [`PieceType`].
pub const MATERIAL_VALUE: [i32; 6] = [100, 320, 350, 500, 1000, 10000];

const MATERIAL_WEIGHT: i32 = 4;
const MOBILITY_WEIGHT: i32 = 2;

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_ENDGAME_PST: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

fn pst_table(pt: PieceType, endgame: bool) -> &'static [i32; 64] {
    match pt {
        PieceType::Pawn => &PAWN_PST,
        PieceType::Knight => &KNIGHT_PST,
        PieceType::Bishop => &BISHOP_PST,
        PieceType::Rook => &ROOK_PST,
        PieceType::Queen => &QUEEN_PST,
        PieceType::King => {
            if endgame {
                &KING_ENDGAME_PST
            } else {
                &KING_MIDDLEGAME_PST
            }
        }
    }
}

/// The piece-square table index for `sq` from `color`'s point of view:
/// White reads the table top-to-bottom as printed, Black reads it
/// mirrored across the horizontal center.
fn pst_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => (7 - sq.rank()) as usize * 8 + sq.file() as usize,
        Color::Black => sq.rank() as usize * 8 + sq.file() as usize,
    }
}

/// Does `color` have too little material left for the middlegame king
/// table to still apply? Decided per side: one color's king can be
/// in its endgame table while the other's is still in the middlegame
/// one.
fn is_endgame_for(pos: &Position, color: Color) -> bool {
    pos.color_occupied(color).len() < ENDGAME_PIECE_THRESHOLD
}

fn mobility(pos: &Position, color: Color) -> i32 {
    let mut count = 0i32;
    let occ = pos.occupied();
    let own = pos.color_occupied(color);
    for sq in pos.pieces_of(color, PieceType::Knight) {
        count += (magic::knight_attacks(sq) & !own).len() as i32;
    }
    for sq in pos.pieces_of(color, PieceType::Bishop) {
        count += (magic::bishop_attacks(sq, occ) & !own).len() as i32;
    }
    for sq in pos.pieces_of(color, PieceType::Rook) {
        count += (magic::rook_attacks(sq, occ) & !own).len() as i32;
    }
    for sq in pos.pieces_of(color, PieceType::Queen) {
        count += (magic::queen_attacks(sq, occ) & !own).len() as i32;
    }
    count
}

fn material_and_positioning(pos: &Position, color: Color, endgame: bool) -> (i32, i32) {
    let mut material = 0;
    let mut positioning = 0;
    for &pt in PieceType::ALL.iter() {
        let value = MATERIAL_VALUE[pt as usize];
        let table = pst_table(pt, endgame);
        for sq in pos.pieces_of(color, pt) {
            material += value;
            positioning += table[pst_index(sq, color)];
        }
    }
    (material, positioning)
}

#[must_use]
/// A static evaluation of `pos`, in centipawns from the perspective of
/// the side to move: positive means that side stands better.
pub fn evaluate(pos: &Position) -> i32 {
    let us = pos.side_to_move();
    let them = !us;

    let (material_us, positioning_us) = material_and_positioning(pos, us, is_endgame_for(pos, us));
    let (material_them, positioning_them) = material_and_positioning(pos, them, is_endgame_for(pos, them));

    let material = material_us - material_them;
    let positioning = positioning_us - positioning_them;
    let mobility_score = mobility(pos, us) - mobility(pos, them);

    MATERIAL_WEIGHT * material + MOBILITY_WEIGHT * mobility_score + positioning
}

/// The attacker-side term of a capture score: a piece's value here is
/// *inverted* relative to its own material value — a pawn capturing
/// anything is cheap to risk (scored as if it were worth a king), while
/// a queen capturing is scored as if it were worth only a knight, so
/// that low-value attackers taking high-value targets sort ahead of the
/// reverse.
fn attacker_value(pt: PieceType) -> i32 {
    let as_if = match pt {
        PieceType::Pawn => PieceType::King,
        PieceType::Knight => PieceType::Queen,
        PieceType::Bishop => PieceType::Rook,
        PieceType::Rook => PieceType::Bishop,
        PieceType::Queen => PieceType::Knight,
        PieceType::King => PieceType::Pawn,
    };
    MATERIAL_VALUE[as_if as usize]
}

/// How many squares a piece of type `pt` would reach from `sq` on an
/// otherwise empty board. Used as a cheap positional term for
/// non-pawns in [`evaluate_move`]; pawns use a rank-advance term
/// instead since their mobility doesn't vary by square.
fn mobility_on_empty_board(pt: PieceType, sq: Square) -> i32 {
    let attacks = match pt {
        PieceType::Knight => magic::knight_attacks(sq),
        PieceType::Bishop => magic::bishop_attacks(sq, Bitboard::EMPTY),
        PieceType::Rook => magic::rook_attacks(sq, Bitboard::EMPTY),
        PieceType::Queen => magic::queen_attacks(sq, Bitboard::EMPTY),
        PieceType::King => magic::king_attacks(sq),
        PieceType::Pawn => unreachable!("pawns use the rank-advance term instead"),
    };
    attacks.len() as i32
}

#[must_use]
/// A cheap heuristic score used only to order moves before searching
/// them, not a real evaluation. A capture scores by the victim's value
/// plus the attacker's inverted value; a move is additionally scored by
/// whether it walks into or out of an attack (checked on the occupancy
/// with the mover itself removed, so it isn't counted as attacking its
/// own target or origin square), by its pawn-advance or empty-board
/// mobility at the target square, and by the piece-square delta between
/// origin and target.
pub fn evaluate_move(pos: &Position, mv: Move) -> i32 {
    let origin = mv.origin();
    let target = mv.target();
    let mover_color = pos.side_to_move();
    let mover_type = pos
        .piece_at(origin)
        .piece_type()
        .expect("move origin holds the moving piece");

    let mut score = 0;

    if mv.kind() == MoveKind::Capture {
        let captured = pos
            .piece_at(target)
            .piece_type()
            .expect("capture target holds the captured piece");
        score += MATERIAL_VALUE[captured as usize] + attacker_value(mover_type);
    }

    // Temporarily vacate the origin square so the mover isn't counted as
    // defending its own target or origin.
    let occ_without_mover = pos.occupied() & !Bitboard::from(origin);
    if pos.is_attacked_with_occupancy(target, !mover_color, occ_without_mover) {
        score -= MATERIAL_VALUE[mover_type as usize];
    } else {
        score += 1;
    }
    if pos.is_attacked_with_occupancy(origin, !mover_color, occ_without_mover) {
        score += MATERIAL_VALUE[mover_type as usize];
    }

    if mover_type == PieceType::Pawn {
        score += match mover_color {
            Color::White => target.rank() as i32,
            Color::Black => 6 - target.rank() as i32,
        };
    } else {
        score += mobility_on_empty_board(mover_type, target);
    }

    let table = pst_table(mover_type, is_endgame_for(pos, mover_color));
    score += table[pst_index(target, mover_color)];
    score -= table[pst_index(origin, mover_color)];

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;
    use crate::MoveKind;

    #[test]
    fn starting_position_is_balanced() {
        let pos = Position::starting();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn being_up_a_queen_is_a_large_advantage() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(evaluate(&pos) > 500);
    }

    #[test]
    fn capturing_a_queen_scores_higher_than_capturing_a_pawn() {
        let pos = Position::from_fen("3qk3/8/8/8/8/8/3p4/3QK3 w - - 0 1").unwrap();
        let capture_queen = Move::new(Square::D1, Square::D8, MoveKind::Capture);
        let capture_pawn = Move::new(Square::D1, Square::D2, MoveKind::Capture);
        assert!(evaluate_move(&pos, capture_queen) > evaluate_move(&pos, capture_pawn));
    }
}
