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

//! Zobrist hashing: an incrementally-updatable position key built by
//! XORing together random constants for every feature of the position
//! that affects move generation or evaluation (piece placement, castling
//! rights, the en passant file, and side to move).

use super::{Color, PieceType, Square};
use once_cell::sync::Lazy;

use super::rng::Rng;

struct ZobristKeys {
    /// Indexed by `piece_type as usize * 2 + color as usize`, then by
    /// square index.
    piece_square: [[u64; 64]; 12],
    /// Indexed by the raw `CastleRights` bit pattern, `0..16`.
    castling: [u64; 16],
    /// Indexed by file, `0..8`.
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

fn next_unique(rng: &mut Rng, seen: &mut Vec<u64>) -> u64 {
    loop {
        let candidate = rng.next();
        if candidate != 0 && !seen.contains(&candidate) {
            seen.push(candidate);
            return candidate;
        }
    }
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = Rng::default_seeded();
    let mut seen = Vec::with_capacity(12 * 64 + 16 + 8 + 1);

    let mut piece_square = [[0u64; 64]; 12];
    for row in &mut piece_square {
        for slot in row.iter_mut() {
            *slot = next_unique(&mut rng, &mut seen);
        }
    }

    let mut castling = [0u64; 16];
    for slot in &mut castling {
        *slot = next_unique(&mut rng, &mut seen);
    }

    let mut en_passant_file = [0u64; 8];
    for slot in &mut en_passant_file {
        *slot = next_unique(&mut rng, &mut seen);
    }

    let side_to_move = next_unique(&mut rng, &mut seen);

    ZobristKeys {
        piece_square,
        castling,
        en_passant_file,
        side_to_move,
    }
});

#[inline]
fn piece_index(pt: PieceType, color: Color) -> usize {
    pt as usize * 2 + color as usize
}

#[must_use]
/// The key contribution of `color`'s `pt` sitting on `sq`. XOR this in to
/// place the piece, XOR it again to remove it.
pub fn piece_square_key(pt: PieceType, color: Color, sq: Square) -> u64 {
    KEYS.piece_square[piece_index(pt, color)][sq.index() as usize]
}

#[must_use]
/// The key contribution of a raw castling-rights bit pattern, `0..16`.
pub fn castling_key(rights_bits: u8) -> u64 {
    KEYS.castling[rights_bits as usize]
}

#[must_use]
/// The key contribution of an en passant target on `file`, `0..8`.
pub fn en_passant_key(file: u8) -> u64 {
    KEYS.en_passant_file[file as usize]
}

#[must_use]
/// The key contribution of it being Black to move. Flip this in whenever
/// the side to move changes; White contributes nothing.
pub fn side_to_move_key() -> u64 {
    KEYS.side_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_piece_square_combinations_get_distinct_keys() {
        let a = piece_square_key(PieceType::Pawn, Color::White, Square::E4);
        let b = piece_square_key(PieceType::Pawn, Color::White, Square::E5);
        let c = piece_square_key(PieceType::Pawn, Color::Black, Square::E4);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn keys_are_stable_across_calls() {
        let a = piece_square_key(PieceType::Knight, Color::Black, Square::G8);
        let b = piece_square_key(PieceType::Knight, Color::Black, Square::G8);
        assert_eq!(a, b);
    }

    #[test]
    fn side_to_move_key_is_nonzero() {
        assert_ne!(side_to_move_key(), 0);
    }
}
