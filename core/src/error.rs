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

//! Error types surfaced by this crate.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
/// Something went wrong parsing a FEN record.
pub enum PositionError {
    #[error("FEN record has {0} fields, expected 6")]
    WrongFieldCount(usize),

    #[error("piece placement field has {0} ranks, expected 8")]
    WrongRankCount(usize),

    #[error("rank {0} does not describe exactly 8 files")]
    WrongFileCount(u8),

    #[error("unrecognized piece letter {0:?}")]
    UnknownPieceLetter(char),

    #[error("side to move field {0:?} is neither \"w\" nor \"b\"")]
    BadSideToMove(String),

    #[error("castling rights field {0:?} contains an unrecognized character")]
    BadCastlingRights(String),

    #[error("en passant field {0:?} is not \"-\" or a valid square")]
    BadEnPassantSquare(String),

    #[error("halfmove clock field {0:?} is not a non-negative integer")]
    BadHalfmoveClock(String),

    #[error("fullmove counter field {0:?} is not a positive integer")]
    BadFullmoveCounter(String),
}
