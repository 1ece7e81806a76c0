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

//! Moves, packed into 16 bits: a 6-bit origin, a 6-bit target, and a 4-bit
//! kind tag. Sixteen bits is small enough to pass around by value and to
//! store two-deep in the killer table without a second thought.

use super::{PieceType, Square};
use std::fmt::{self, Display, Formatter};

const ORIGIN_MASK: u16 = 0x003F;
const TARGET_SHIFT: u16 = 6;
const TARGET_MASK: u16 = 0x0FC0;
const KIND_SHIFT: u16 = 12;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// The sixteen kinds a move can take. Promotions are split into capturing
/// and non-capturing variants so a single 4-bit tag carries both the
/// promoted piece and whether the move captures.
pub enum MoveKind {
    Quiet = 0,
    DoublePawnPush = 1,
    KingCastle = 2,
    QueenCastle = 3,
    Capture = 4,
    EpCapture = 5,
    PromoteKnight = 8,
    PromoteBishop = 9,
    PromoteRook = 10,
    PromoteQueen = 11,
    PromoteKnightCapture = 12,
    PromoteBishopCapture = 13,
    PromoteRookCapture = 14,
    PromoteQueenCapture = 15,
}

impl MoveKind {
    #[must_use]
    const fn from_bits(bits: u16) -> MoveKind {
        match bits {
            0 => MoveKind::Quiet,
            1 => MoveKind::DoublePawnPush,
            2 => MoveKind::KingCastle,
            3 => MoveKind::QueenCastle,
            4 => MoveKind::Capture,
            5 => MoveKind::EpCapture,
            8 => MoveKind::PromoteKnight,
            9 => MoveKind::PromoteBishop,
            10 => MoveKind::PromoteRook,
            11 => MoveKind::PromoteQueen,
            12 => MoveKind::PromoteKnightCapture,
            13 => MoveKind::PromoteBishopCapture,
            14 => MoveKind::PromoteRookCapture,
            15 => MoveKind::PromoteQueenCapture,
            _ => panic!("invalid move kind bit pattern"),
        }
    }

    #[must_use]
    /// Does this kind of move remove an enemy piece from the target
    /// square (or, for en passant, the square behind it)?
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture
                | MoveKind::EpCapture
                | MoveKind::PromoteKnightCapture
                | MoveKind::PromoteBishopCapture
                | MoveKind::PromoteRookCapture
                | MoveKind::PromoteQueenCapture
        )
    }

    #[must_use]
    /// Does this kind of move promote a pawn? If so, to what?
    pub const fn promotion(self) -> Option<PieceType> {
        match self {
            MoveKind::PromoteKnight | MoveKind::PromoteKnightCapture => Some(PieceType::Knight),
            MoveKind::PromoteBishop | MoveKind::PromoteBishopCapture => Some(PieceType::Bishop),
            MoveKind::PromoteRook | MoveKind::PromoteRookCapture => Some(PieceType::Rook),
            MoveKind::PromoteQueen | MoveKind::PromoteQueenCapture => Some(PieceType::Queen),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::KingCastle | MoveKind::QueenCastle)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
/// A move, packed as `(kind << 12) | (target << 6) | origin`.
pub struct Move(pub u16);

impl Move {
    /// The null move: origin and target both A1, kind `Quiet`. Never
    /// legal, used as a "no move yet" sentinel (e.g. an empty best-move
    /// slot in a transposition table entry).
    pub const NULL: Move = Move(0);

    #[must_use]
    pub const fn new(origin: Square, target: Square, kind: MoveKind) -> Move {
        Move((origin.index() as u16) | ((target.index() as u16) << TARGET_SHIFT) | ((kind as u16) << KIND_SHIFT))
    }

    #[inline(always)]
    #[must_use]
    pub const fn origin(self) -> Square {
        Square::from_index((self.0 & ORIGIN_MASK) as u8)
    }

    #[inline(always)]
    #[must_use]
    pub const fn target(self) -> Square {
        Square::from_index(((self.0 & TARGET_MASK) >> TARGET_SHIFT) as u8)
    }

    #[inline(always)]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_bits(self.0 >> KIND_SHIFT)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.kind().is_capture()
    }

    #[inline(always)]
    #[must_use]
    pub const fn promotion(self) -> Option<PieceType> {
        self.kind().promotion()
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == Move::NULL.0
    }

    #[must_use]
    /// The long-algebraic form used by UCI, e.g. `"e2e4"` or `"e7e8q"`.
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.origin(), self.target());
        if let Some(pt) = self.promotion() {
            s.push(pt.code().to_ascii_lowercase());
        }
        s
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_uci(), self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_roundtrip() {
        let m = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        assert_eq!(m.origin(), Square::E2);
        assert_eq!(m.target(), Square::E4);
        assert_eq!(m.kind(), MoveKind::DoublePawnPush);
    }

    #[test]
    fn promotion_capture_reports_both_capture_and_piece() {
        let m = Move::new(Square::B7, Square::A8, MoveKind::PromoteQueenCapture);
        assert!(m.is_capture());
        assert_eq!(m.promotion(), Some(PieceType::Queen));
    }

    #[test]
    fn quiet_move_has_no_promotion_and_is_not_a_capture() {
        let m = Move::new(Square::G1, Square::F3, MoveKind::Quiet);
        assert!(!m.is_capture());
        assert_eq!(m.promotion(), None);
    }

    #[test]
    fn uci_text_includes_promotion_letter() {
        let m = Move::new(Square::E7, Square::E8, MoveKind::PromoteQueen);
        assert_eq!(m.to_uci(), "e7e8q");
        let quiet = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        assert_eq!(quiet.to_uci(), "e2e4");
    }

    #[test]
    fn null_move_is_distinguishable() {
        assert!(Move::NULL.is_null());
        let real = Move::new(Square::A1, Square::A1, MoveKind::Capture);
        assert!(!real.is_null());
    }
}
