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

//! Sliding-piece attack generation via magic bitboards, plus the
//! precomputed step tables for knights, kings, and pawns.
//!
//! For each square we precompute a "relevant occupancy" mask (the squares
//! a rook or bishop's rays pass over, excluding the board edge, since a
//! piece sitting on the edge always blocks regardless of what's beyond
//! it) and a magic multiplier that, when multiplied against any masked
//! occupancy and shifted down, produces a collision-free index into a
//! per-square attack table. The tables and magics are computed once at
//! startup and cached behind [`once_cell::sync::Lazy`].

use super::{
    bitboard::Bitboard,
    direction::Direction,
    rng::Rng,
    square::{Square, ALL_SQUARES},
};
use once_cell::sync::Lazy;

/// One slider's magic data for a single square.
#[derive(Clone)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

struct SliderTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    #[inline(always)]
    fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let e = &self.entries[sq.index() as usize];
        let masked = occupied.0 & e.mask.0;
        let index = (masked.wrapping_mul(e.magic)) >> e.shift;
        self.attacks[e.offset + index as usize]
    }
}

/// Walks from `origin` in each of `dirs`, one ray at a time, stopping at
/// the board edge or (if `blockers` is given) the first occupied square
/// in that ray inclusive.
fn ray_attacks(origin: Square, dirs: &[Direction], blockers: Option<Bitboard>) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for dir in dirs {
        let mut file = origin.file() as i16;
        let mut rank = origin.rank() as i16;
        loop {
            let (df, dr) = step_delta(*dir);
            file += df;
            rank += dr;
            if !(0..8).contains(&file) || !(0..8).contains(&rank) {
                break;
            }
            let sq = Square::new(rank as u8, file as u8).expect("in-range rank/file");
            result.insert(sq);
            if let Some(b) = blockers {
                if b.contains(sq) {
                    break;
                }
            }
        }
    }
    result
}

/// Decomposes a ray direction into file/rank deltas so we can detect
/// wraparound at the board edge (a raw `square index + direction` step
/// can silently wrap from the H file to the A file).
fn step_delta(dir: Direction) -> (i16, i16) {
    match dir.0 {
        8 => (0, 1),
        -8 => (0, -1),
        1 => (1, 0),
        -1 => (-1, 0),
        9 => (1, 1),
        7 => (-1, 1),
        -7 => (1, -1),
        -9 => (-1, -1),
        _ => panic!("not a single ray step"),
    }
}

/// The relevant-occupancy mask for a slider on `sq`: every square its
/// rays pass through, excluding the outer edge of the board *except* the
/// edge that is the slider's own rank or file. A piece on the far edge
/// of a ray always blocks regardless of what's beyond it, so its
/// presence never needs to be part of the occupancy key — but a rook on
/// the A file still needs its own file's squares (A2..A8) in the mask,
/// since those are interior squares along that ray, not its terminus.
fn relevant_mask(sq: Square, dirs: &[Direction]) -> Bitboard {
    let full = ray_attacks(sq, dirs, None);
    let edge = (Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::file_of(sq)
        | (Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::rank_of(sq);
    Bitboard(full.0 & !edge.0)
}

/// Enumerates every subset of `mask` via the Carry-Rippler trick: each
/// iteration produces the next subset in ascending numeric order, cycling
/// back to zero after the full mask has been produced.
fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut out = Vec::with_capacity(1 << mask.len());
    let mut subset = 0u64;
    loop {
        out.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }
    out
}

/// Searches for a magic multiplier for `sq` that maps every occupancy
/// subset of `mask` to a collision-free index in `0..(1 << mask.len())`.
fn find_magic(sq: Square, mask: Bitboard, dirs: &[Direction], rng: &mut Rng) -> u64 {
    let shift = 64 - mask.len();
    let subsets = subsets(mask);
    let reference: Vec<Bitboard> = subsets
        .iter()
        .map(|&occ| ray_attacks(sq, dirs, Some(occ)))
        .collect();

    let table_size = 1usize << mask.len();
    let mut used = vec![Bitboard::EMPTY; table_size];
    let mut seen = vec![false; table_size];

    'search: loop {
        let magic = rng.next_sparse();
        // A magic with too few high bits almost never spreads an
        // occupancy mask into distinct indices; reject early.
        if ((mask.0.wrapping_mul(magic)) >> 56).count_ones() < 6 {
            continue;
        }
        for slot in seen.iter_mut() {
            *slot = false;
        }
        for (occ, &att) in subsets.iter().zip(reference.iter()) {
            let index = ((occ.0.wrapping_mul(magic)) >> shift) as usize;
            if seen[index] && used[index] != att {
                continue 'search;
            }
            seen[index] = true;
            used[index] = att;
        }
        return magic;
    }
}

fn build_slider_table(dirs: &'static [Direction]) -> SliderTable {
    let mut rng = Rng::default_seeded();
    let mut attacks = Vec::new();
    let entries: Vec<MagicEntry> = ALL_SQUARES
        .iter()
        .map(|&sq| {
            let mask = relevant_mask(sq, dirs);
            let magic = find_magic(sq, mask, dirs, &mut rng);
            let shift = 64 - mask.len();
            let offset = attacks.len();
            let subs = subsets(mask);
            let mut slot = vec![Bitboard::EMPTY; 1usize << mask.len()];
            for occ in &subs {
                let index = ((occ.0.wrapping_mul(magic)) >> shift) as usize;
                slot[index] = ray_attacks(sq, dirs, Some(*occ));
            }
            attacks.extend(slot);
            MagicEntry {
                mask,
                magic,
                shift,
                offset,
            }
        })
        .collect();

    SliderTable {
        entries: entries.try_into().unwrap_or_else(|_| panic!("64 squares")),
        attacks,
    }
}

static ROOK_TABLE: Lazy<SliderTable> = Lazy::new(|| build_slider_table(&Direction::ROOK_DIRECTIONS));
static BISHOP_TABLE: Lazy<SliderTable> = Lazy::new(|| build_slider_table(&Direction::BISHOP_DIRECTIONS));

#[must_use]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ROOK_TABLE.attacks(sq, occupied)
}

#[must_use]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    BISHOP_TABLE.attacks(sq, occupied)
}

#[must_use]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

fn build_step_table(steps: &[i8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for &sq in ALL_SQUARES.iter() {
        let file = sq.file() as i16;
        let rank = sq.rank() as i16;
        let mut bb = Bitboard::EMPTY;
        for &step in steps {
            let (df, dr) = knight_or_king_delta(step);
            let f = file + df;
            let r = rank + dr;
            if (0..8).contains(&f) && (0..8).contains(&r) {
                bb.insert(Square::new(r as u8, f as u8).expect("in range"));
            }
        }
        table[sq.index() as usize] = bb;
    }
    table
}

fn knight_or_king_delta(step: i8) -> (i16, i16) {
    match step {
        17 => (1, 2),
        15 => (-1, 2),
        10 => (2, 1),
        6 => (-2, 1),
        -17 => (-1, -2),
        -15 => (1, -2),
        -10 => (-2, -1),
        -6 => (2, -1),
        8 => (0, 1),
        -8 => (0, -1),
        1 => (1, 0),
        -1 => (-1, 0),
        9 => (1, 1),
        7 => (-1, 1),
        -9 => (-1, -1),
        _ => panic!("not a knight or king step"),
    }
}

static KNIGHT_TABLE: Lazy<[Bitboard; 64]> = Lazy::new(|| build_step_table(&Direction::KNIGHT_STEPS));
static KING_TABLE: Lazy<[Bitboard; 64]> = Lazy::new(|| build_step_table(&Direction::KING_STEPS));

#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE[sq.index() as usize]
}

#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE[sq.index() as usize]
}

#[must_use]
/// Pawn attacks (diagonal captures only, not the push) for a pawn of
/// `color` standing on `sq`. Computed on the fly; there are only two
/// targets per square so a table buys nothing.
pub fn pawn_attacks(sq: Square, color: super::Color) -> Bitboard {
    let file = sq.file() as i16;
    let rank = sq.rank() as i16;
    let dr: i16 = match color {
        super::Color::White => 1,
        super::Color::Black => -1,
    };
    let mut bb = Bitboard::EMPTY;
    for df in [-1i16, 1] {
        let f = file + df;
        let r = rank + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            bb.insert(Square::new(r as u8, f as u8).expect("in range"));
        }
    }
    bb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn rook_on_empty_board_attacks_whole_rank_and_file() {
        let attacks = rook_attacks(Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 14);
    }

    #[test]
    fn rook_attack_stops_at_first_blocker() {
        let occ = Bitboard::EMPTY.with_square(Square::D6);
        let attacks = rook_attacks(Square::D4, occ);
        assert!(attacks.contains(Square::D5));
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
    }

    #[test]
    fn bishop_on_empty_board_from_corner_covers_the_long_diagonal() {
        let attacks = bishop_attacks(Square::A1, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 7);
        assert!(attacks.contains(Square::H8));
    }

    #[test]
    fn knight_in_the_corner_has_two_targets() {
        assert_eq!(knight_attacks(Square::A1).len(), 2);
    }

    #[test]
    fn king_in_the_center_has_eight_targets() {
        assert_eq!(king_attacks(Square::D4).len(), 8);
    }

    #[test]
    fn white_pawn_attacks_go_forward() {
        let attacks = pawn_attacks(Square::E4, Color::White);
        assert!(attacks.contains(Square::D5));
        assert!(attacks.contains(Square::F5));
        assert!(!attacks.contains(Square::D3));
    }
}
