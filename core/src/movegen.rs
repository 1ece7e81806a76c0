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

//! Move generation: every pseudo-legal move for the side to move, and a
//! legality filter that rejects the ones leaving that side's own king in
//! check.

use super::{
    bitboard::Bitboard,
    color::Color,
    magic,
    moves::{Move, MoveKind},
    piece::PieceType,
    position::Position,
    square::Square,
};

/// Appends every pseudo-legal move for the side to move onto `moves`.
/// "Pseudo-legal" here means every rule is obeyed except that a move may
/// still leave its own king in check; use [`legal_moves`] or
/// [`is_legal`] to filter those out.
pub fn pseudo_legal_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_occupied(us);
    let occ = pos.occupied();

    generate_pawn_moves(pos, moves);

    for origin in pos.pieces_of(us, PieceType::Knight) {
        emit_targets(moves, origin, magic::knight_attacks(origin) & !own, MoveKind::Quiet, MoveKind::Capture, pos);
    }
    for origin in pos.pieces_of(us, PieceType::Bishop) {
        emit_targets(moves, origin, magic::bishop_attacks(origin, occ) & !own, MoveKind::Quiet, MoveKind::Capture, pos);
    }
    for origin in pos.pieces_of(us, PieceType::Rook) {
        emit_targets(moves, origin, magic::rook_attacks(origin, occ) & !own, MoveKind::Quiet, MoveKind::Capture, pos);
    }
    for origin in pos.pieces_of(us, PieceType::Queen) {
        emit_targets(moves, origin, magic::queen_attacks(origin, occ) & !own, MoveKind::Quiet, MoveKind::Capture, pos);
    }
    for origin in pos.pieces_of(us, PieceType::King) {
        emit_targets(moves, origin, magic::king_attacks(origin) & !own, MoveKind::Quiet, MoveKind::Capture, pos);
    }

    generate_castles(pos, moves);
}

fn emit_targets(
    moves: &mut Vec<Move>,
    origin: Square,
    targets: Bitboard,
    quiet_kind: MoveKind,
    capture_kind: MoveKind,
    pos: &Position,
) {
    for target in targets {
        let kind = if pos.piece_at(target).is_none() { quiet_kind } else { capture_kind };
        moves.push(Move::new(origin, target, kind));
    }
}

fn generate_pawn_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let enemy = pos.color_occupied(!us);
    let promote_rank: u8 = match us {
        Color::White => 7,
        Color::Black => 0,
    };
    let start_rank: u8 = match us {
        Color::White => 1,
        Color::Black => 6,
    };
    let forward: i16 = match us {
        Color::White => 8,
        Color::Black => -8,
    };

    for origin in pos.pieces_of(us, PieceType::Pawn) {
        let one_step = (origin.index() as i16) + forward;
        if (0..64).contains(&one_step) {
            let target = Square::from_index(one_step as u8);
            if !pos.piece_at(target).is_none() {
                // blocked, no push available
            } else if target.rank() == promote_rank {
                push_promotions(moves, origin, target, false);
            } else {
                moves.push(Move::new(origin, target, MoveKind::Quiet));
                if origin.rank() == start_rank {
                    let two_step = one_step + forward;
                    let target2 = Square::from_index(two_step as u8);
                    if pos.piece_at(target2).is_none() {
                        moves.push(Move::new(origin, target2, MoveKind::DoublePawnPush));
                    }
                }
            }
        }

        let attacks = magic::pawn_attacks(origin, us);
        for target in attacks & enemy {
            if target.rank() == promote_rank {
                push_promotions(moves, origin, target, true);
            } else {
                moves.push(Move::new(origin, target, MoveKind::Capture));
            }
        }

        if let Some(ep_file) = pos.en_passant_file() {
            let ep_rank = match us {
                Color::White => 5,
                Color::Black => 2,
            };
            if let Some(ep_sq) = Square::new(ep_rank, ep_file) {
                if attacks.contains(ep_sq) {
                    moves.push(Move::new(origin, ep_sq, MoveKind::EpCapture));
                }
            }
        }
    }
}

fn push_promotions(moves: &mut Vec<Move>, origin: Square, target: Square, capture: bool) {
    let kinds = if capture {
        [
            MoveKind::PromoteQueenCapture,
            MoveKind::PromoteRookCapture,
            MoveKind::PromoteBishopCapture,
            MoveKind::PromoteKnightCapture,
        ]
    } else {
        [
            MoveKind::PromoteQueen,
            MoveKind::PromoteRook,
            MoveKind::PromoteBishop,
            MoveKind::PromoteKnight,
        ]
    };
    for kind in kinds {
        moves.push(Move::new(origin, target, kind));
    }
}

fn generate_castles(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    if pos.is_in_check(us) {
        return;
    }
    let rank = match us {
        Color::White => 0,
        Color::Black => 7,
    };
    let rights = pos.castle_rights();

    if rights.kingside(us) {
        let f = Square::new(rank, 5).expect("rank in range");
        let g = Square::new(rank, 6).expect("rank in range");
        if pos.piece_at(f).is_none()
            && pos.piece_at(g).is_none()
            && !pos.is_square_attacked(f, !us)
            && !pos.is_square_attacked(g, !us)
        {
            let e = Square::new(rank, 4).expect("rank in range");
            moves.push(Move::new(e, g, MoveKind::KingCastle));
        }
    }
    if rights.queenside(us) {
        let d = Square::new(rank, 3).expect("rank in range");
        let c = Square::new(rank, 2).expect("rank in range");
        let b = Square::new(rank, 1).expect("rank in range");
        if pos.piece_at(d).is_none()
            && pos.piece_at(c).is_none()
            && pos.piece_at(b).is_none()
            && !pos.is_square_attacked(d, !us)
            && !pos.is_square_attacked(c, !us)
        {
            let e = Square::new(rank, 4).expect("rank in range");
            moves.push(Move::new(e, c, MoveKind::QueenCastle));
        }
    }
}

#[must_use]
/// Does making `mv` leave the mover's own king in check? Used to filter
/// [`pseudo_legal_moves`] down to strictly legal ones.
pub fn is_legal(pos: &mut Position, mv: Move) -> bool {
    let mover = pos.side_to_move();
    pos.make_move(mv);
    let illegal = pos.is_in_check(mover);
    pos.undo_move(mv);
    !illegal
}

#[must_use]
/// Every fully legal move available to the side to move.
pub fn legal_moves(pos: &mut Position) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_legal_moves(pos, &mut pseudo);
    pseudo.into_iter().filter(|&mv| is_legal(pos, mv)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let mut pos = Position::starting();
        assert_eq!(legal_moves(&mut pos).len(), 20);
    }

    #[test]
    fn pinned_knight_has_no_legal_moves() {
        let mut pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&mut pos);
        assert!(!moves.iter().any(|m| m.origin() == Square::E2));
    }

    #[test]
    fn en_passant_capture_is_generated_when_available() {
        let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = legal_moves(&mut pos);
        assert!(moves.iter().any(|m| m.kind() == MoveKind::EpCapture && m.target() == Square::D6));
    }

    #[test]
    fn castling_is_blocked_while_in_check() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
        let moves = legal_moves(&mut pos);
        assert!(!moves.iter().any(|m| m.kind().is_castle()));
    }

    #[test]
    fn mate_in_one_is_found_among_legal_moves() {
        let mut pos = Position::from_fen("7k/6pp/8/8/8/8/6PP/R6K w - - 0 1").unwrap();
        let moves = legal_moves(&mut pos);
        assert!(moves.iter().any(|m| m.origin() == Square::A1 && m.target() == Square::A8));
    }
}
