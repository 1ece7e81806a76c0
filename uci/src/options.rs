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

//! The small set of options this engine advertises via `uci` and accepts
//! via `setoption`. These are stored only; nothing downstream reads
//! `ponder` or `UCI_AnalyseMode` back out yet, since pondering and
//! analysis-mode search differences are both out of scope for now.

use crate::error::UciError;

const MIN_HASH_MB: u32 = 64;
const MAX_HASH_MB: u32 = 32768;
const DEFAULT_HASH_MB: u32 = 64;

#[derive(Debug, Clone)]
pub struct Options {
    pub hash_mb: u32,
    pub ponder: bool,
    pub analyse_mode: bool,
}

impl Options {
    #[must_use]
    pub fn new() -> Options {
        Options {
            hash_mb: DEFAULT_HASH_MB,
            ponder: false,
            analyse_mode: false,
        }
    }

    /// Prints the `option` lines this engine's `uci` handshake advertises
    /// to the GUI.
    pub fn advertise() {
        println!(
            "option name Hash type spin default {DEFAULT_HASH_MB} min {MIN_HASH_MB} max {MAX_HASH_MB}"
        );
        println!("option name Ponder type check default false");
        println!("option name UCI_AnalyseMode type check default false");
    }

    /// Applies a `setoption name <name> value <value>` command.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), UciError> {
        match name {
            "Hash" => {
                let mb: u32 = value
                    .parse()
                    .map_err(|_| UciError::BadOptionValue(name.to_string(), value.to_string()))?;
                if !(MIN_HASH_MB..=MAX_HASH_MB).contains(&mb) {
                    return Err(UciError::BadOptionValue(name.to_string(), value.to_string()));
                }
                self.hash_mb = mb;
                Ok(())
            }
            "Ponder" => {
                self.ponder = parse_bool(name, value)?;
                Ok(())
            }
            "UCI_AnalyseMode" => {
                self.analyse_mode = parse_bool(name, value)?;
                Ok(())
            }
            other => Err(UciError::UnknownOption(other.to_string())),
        }
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, UciError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(UciError::BadOptionValue(name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_accepts_values_in_range() {
        let mut opts = Options::new();
        opts.set("Hash", "64").unwrap();
        assert_eq!(opts.hash_mb, 64);
    }

    #[test]
    fn hash_rejects_values_out_of_range() {
        let mut opts = Options::new();
        assert!(opts.set("Hash", "99999").is_err());
    }

    #[test]
    fn ponder_parses_boolean_text() {
        let mut opts = Options::new();
        opts.set("Ponder", "true").unwrap();
        assert!(opts.ponder);
    }

    #[test]
    fn unknown_option_name_is_rejected() {
        let mut opts = Options::new();
        assert_eq!(opts.set("NotAnOption", "1"), Err(UciError::UnknownOption("NotAnOption".to_string())));
    }
}
