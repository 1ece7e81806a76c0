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

//! Errors surfaced while reading UCI input. None of these are fatal: the
//! engine logs and ignores a bad line rather than exiting, since a GUI
//! occasionally sends things this engine doesn't recognize (unsupported
//! options, vendor extensions) and the protocol has no way to reply with
//! an error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UciError {
    #[error("unrecognized command {0:?}")]
    UnknownCommand(String),

    #[error("{0:?} is not a legal move in the current position")]
    IllegalMove(String),

    #[error("{0:?} is not a well-formed long algebraic move")]
    MalformedMove(String),

    #[error("\"position\" command is missing its FEN or \"startpos\" argument")]
    MissingPositionArgument,

    #[error("unrecognized option name {0:?}")]
    UnknownOption(String),

    #[error("option {0:?} was given a value that isn't valid for it: {1:?}")]
    BadOptionValue(String, String),
}
