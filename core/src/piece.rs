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

//! Piece types and colored pieces.

use super::Color;
use std::fmt::{self, Display, Formatter};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// The six kinds of chess pieces, independent of color.
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Rook = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// All six piece types, indexable by `PieceType as usize`.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    #[must_use]
    /// The upper-case FEN letter for this piece type (e.g. `'N'` for knight).
    pub const fn code(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    #[must_use]
    /// Parse an upper-case FEN piece letter. Returns `None` for anything
    /// else, including lower-case letters (callers are expected to
    /// uppercase first and track color separately).
    pub const fn from_code(c: char) -> Option<PieceType> {
        match c {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A piece of a specific color. Encoded internally as `type * 2 + color`,
/// giving the 12 distinct pieces used to index `Position::board`.
pub struct Piece {
    code: u8,
}

impl Piece {
    /// Sentinel for "no piece", used only in the square-indexed board
    /// array. Outside the 12 valid `(type, color)` codes.
    pub const NONE: Piece = Piece { code: 12 };

    #[inline(always)]
    #[must_use]
    /// Construct a piece from its type and color.
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece {
            code: (piece_type as u8) * 2 + (color as u8),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Is this the "no piece" sentinel?
    pub const fn is_none(self) -> bool {
        self.code == Self::NONE.code
    }

    #[must_use]
    /// This piece's type, or `None` if this is the "no piece" sentinel.
    pub const fn piece_type(self) -> Option<PieceType> {
        if self.is_none() {
            return None;
        }
        Some(match self.code / 2 {
            0 => PieceType::Pawn,
            1 => PieceType::Knight,
            2 => PieceType::Rook,
            3 => PieceType::Bishop,
            4 => PieceType::Queen,
            _ => PieceType::King,
        })
    }

    #[must_use]
    /// This piece's color, or `None` if this is the "no piece" sentinel.
    pub const fn color(self) -> Option<Color> {
        if self.is_none() {
            return None;
        }
        Some(if self.code % 2 == 0 {
            Color::White
        } else {
            Color::Black
        })
    }

    #[must_use]
    /// The FEN letter for this piece: upper-case for White, lower-case for
    /// Black. Panics if this is the "no piece" sentinel.
    pub fn code(self) -> char {
        let pt = self.piece_type().expect("Piece::code called on Piece::NONE");
        let c = pt.code();
        match self.color().unwrap() {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_roundtrips_through_encoding() {
        for &pt in PieceType::ALL.iter() {
            for &c in Color::ALL.iter() {
                let p = Piece::new(pt, c);
                assert_eq!(p.piece_type(), Some(pt));
                assert_eq!(p.color(), Some(c));
            }
        }
    }

    #[test]
    fn none_piece_has_no_type_or_color() {
        assert!(Piece::NONE.is_none());
        assert_eq!(Piece::NONE.piece_type(), None);
        assert_eq!(Piece::NONE.color(), None);
    }

    #[test]
    fn code_is_case_by_color() {
        assert_eq!(Piece::new(PieceType::Knight, Color::White).code(), 'N');
        assert_eq!(Piece::new(PieceType::Knight, Color::Black).code(), 'n');
    }
}
