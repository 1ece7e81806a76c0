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

//! Parsing for the text lines the Universal Chess Interface protocol
//! sends to an engine over stdin.

use crate::error::UciError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    SetOption { name: String, value: String },
    Position { fen: Option<String>, moves: Vec<String> },
    Go(GoOptions),
    Stop,
    Quit,
    /// A line this engine recognizes as harmless and silently ignores,
    /// e.g. `debug on`.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoOptions {
    pub depth: Option<u8>,
    pub nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub infinite: bool,
}

/// Parses a single line of UCI input. Unrecognized top-level commands
/// are reported as errors; unrecognized tokens within an otherwise
/// understood command (e.g. a `go` suboption this engine doesn't
/// implement) are simply skipped, matching how real GUIs expect engines
/// to be forwards-tolerant of the protocol.
pub fn parse_line(line: &str) -> Result<UciCommand, UciError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(UciCommand::Ignored);
    };

    match head {
        "uci" => Ok(UciCommand::Uci),
        "isready" => Ok(UciCommand::IsReady),
        "ucinewgame" => Ok(UciCommand::UciNewGame),
        "stop" => Ok(UciCommand::Stop),
        "quit" => Ok(UciCommand::Quit),
        "debug" | "ponderhit" => Ok(UciCommand::Ignored),
        "setoption" => parse_setoption(tokens),
        "position" => parse_position(tokens),
        "go" => Ok(UciCommand::Go(parse_go(tokens))),
        other => Err(UciError::UnknownCommand(other.to_string())),
    }
}

fn parse_setoption<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<UciCommand, UciError> {
    if tokens.next() != Some("name") {
        return Err(UciError::UnknownCommand("setoption".to_string()));
    }
    let mut name_parts = Vec::new();
    let mut value_parts = Vec::new();
    let mut in_value = false;
    for tok in tokens {
        if tok == "value" {
            in_value = true;
            continue;
        }
        if in_value {
            value_parts.push(tok);
        } else {
            name_parts.push(tok);
        }
    }
    Ok(UciCommand::SetOption {
        name: name_parts.join(" "),
        value: value_parts.join(" "),
    })
}

fn parse_position<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<UciCommand, UciError> {
    let head = tokens.next().ok_or(UciError::MissingPositionArgument)?;
    let fen = match head {
        "startpos" => None,
        "fen" => {
            let rest: Vec<&str> = tokens.by_ref().take_while(|&t| t != "moves").collect();
            if rest.is_empty() {
                return Err(UciError::MissingPositionArgument);
            }
            Some(rest.join(" "))
        }
        _ => return Err(UciError::MissingPositionArgument),
    };

    // When `fen` consumed the "moves" marker via take_while, anything
    // that follows in the original iterator is the move list; when
    // "startpos" was given, the next token (if present) should itself be
    // "moves".
    let mut moves = Vec::new();
    let mut remaining = tokens.peekable();
    if fen.is_none() {
        if remaining.peek() == Some(&"moves") {
            remaining.next();
        }
    }
    for tok in remaining {
        moves.push(tok.to_string());
    }

    Ok(UciCommand::Position { fen, moves })
}

fn parse_go<'a>(mut tokens: impl Iterator<Item = &'a str>) -> GoOptions {
    let mut opts = GoOptions::default();
    while let Some(tok) = tokens.next() {
        match tok {
            "depth" => opts.depth = next_parsed(&mut tokens),
            "nodes" => opts.nodes = next_parsed(&mut tokens),
            "movetime" => opts.movetime = next_parsed::<u64>(&mut tokens).map(Duration::from_millis),
            "wtime" => opts.wtime = next_parsed::<u64>(&mut tokens).map(Duration::from_millis),
            "btime" => opts.btime = next_parsed::<u64>(&mut tokens).map(Duration::from_millis),
            "winc" => opts.winc = next_parsed::<u64>(&mut tokens).map(Duration::from_millis),
            "binc" => opts.binc = next_parsed::<u64>(&mut tokens).map(Duration::from_millis),
            "infinite" => opts.infinite = true,
            _ => {}
        }
    }
    opts
}

fn next_parsed<'a, T: std::str::FromStr>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    tokens.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands_parse() {
        assert_eq!(parse_line("uci"), Ok(UciCommand::Uci));
        assert_eq!(parse_line("isready"), Ok(UciCommand::IsReady));
        assert_eq!(parse_line("quit"), Ok(UciCommand::Quit));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert_eq!(parse_line("frobnicate"), Err(UciError::UnknownCommand("frobnicate".to_string())));
    }

    #[test]
    fn position_startpos_with_moves() {
        let cmd = parse_line("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()],
            }
        );
    }

    #[test]
    fn position_fen_without_moves() {
        let cmd = parse_line("position fen 8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()),
                moves: Vec::new(),
            }
        );
    }

    #[test]
    fn position_fen_with_trailing_moves() {
        let cmd = parse_line("position fen 8/8/8/8/8/8/8/K6k w - - 0 1 moves a1a2").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()),
                moves: vec!["a1a2".to_string()],
            }
        );
    }

    #[test]
    fn go_parses_numeric_and_flag_suboptions() {
        let cmd = parse_line("go depth 5 movetime 1000 infinite").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Go(GoOptions {
                depth: Some(5),
                movetime: Some(Duration::from_millis(1000)),
                infinite: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn setoption_splits_name_and_value() {
        let cmd = parse_line("setoption name Hash value 64").unwrap();
        assert_eq!(
            cmd,
            UciCommand::SetOption {
                name: "Hash".to_string(),
                value: "64".to_string(),
            }
        );
    }
}
