//! Check evasion filter

use crate::analyze::{Analysis, CheckInfo};
use crate::bitboard::Bitboard;
use crate::movegen::MoveList;
use crate::types::{Coord, Piece};

/// Returns the squares where a non-king piece may go to stop the check `check` on `king`
///
/// A knight check is stopped only by capturing the knight. Other checks can also be blocked, so
/// the squares between the king and the attacker are added.
pub fn relief(king: Coord, check: &CheckInfo) -> Bitboard {
    if check.piece == Piece::Knight {
        return Bitboard::from_coord(check.attacker);
    }
    let mut res = Bitboard::EMPTY;
    for dist in 1..8 {
        match check.axis.apply(king, dist) {
            Some(c) => {
                res |= Bitboard::from_coord(c);
                if c == check.attacker {
                    break;
                }
            }
            None => break,
        }
    }
    res
}

/// Leaves only the moves which get the king out of check
///
/// The moves must respect pins and must not put the king under attack, as generated by
/// [`gen_pseudo()`](crate::movegen::gen_pseudo). Outside of check, `moves` are returned as is.
/// In double check, only the king can move.
pub fn filter(mut moves: MoveList, analysis: &Analysis) -> MoveList {
    match analysis.checks() {
        [] => {}
        [check] => {
            let relief = relief(analysis.king(), check);
            moves.retain(|mv| {
                mv.is_king_move()
                    || relief.has(mv.dst())
                    || (mv.is_enpassant() && relief.has(mv.capture_square()))
            });
        }
        _ => moves.retain(|mv| mv.is_king_move()),
    }
    moves
}
