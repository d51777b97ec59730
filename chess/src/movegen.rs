//! Move generation
//!
//! Moves are generated square by square, in the order of [`Coord::index()`]. The generator
//! consults the pins found by [`analyze`](crate::analyze), so a pinned piece only moves along
//! its pin line, and probes every king step for safety. The remaining check handling is done
//! by [`legal::filter()`](crate::legal::filter).

use crate::analyze::{self, Pins};
use crate::board::{Board, KingProbe};
use crate::geometry::{self, Delta};
use crate::legal;
use crate::moves::{self, Move};
use crate::types::{Color, Coord, Piece};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;
use log::trace;

/// List of moves
///
/// No chess position has more than 218 legal moves, so the list never overflows.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Destination for the generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

#[inline]
fn follows_pin(pin: Option<Delta>, dir: Delta) -> bool {
    match pin {
        Some(axis) => axis.is_parallel(dir),
        None => true,
    }
}

struct MoveGen<'a, P> {
    board: Board,
    side: Color,
    pins: Pins,
    dst: &'a mut P,
}

impl<'a, P: MovePush> MoveGen<'a, P> {
    fn new(b: &Board, pins: Pins, dst: &'a mut P) -> Self {
        MoveGen {
            board: b.clone(),
            side: b.side(),
            pins,
            dst,
        }
    }

    #[inline]
    fn add_move(&mut self, src: Coord, dst: Coord) {
        let mv = Move::new(&self.board, src, dst);
        self.dst.push(mv);
    }

    /// Returns `true` if the king of the side to move is not attacked on `target`
    fn is_king_safe(&mut self, target: Coord) -> bool {
        let probe = KingProbe::new(&mut self.board, target);
        !analyze::analyze(&probe).is_check()
    }

    /// Returns `true` if the king is not attacked after enpassant
    ///
    /// Enpassant removes two pieces from the same rank, so the pin analysis misses the case
    /// when the king and an enemy slider stand on this rank. Thus, the move is made and checked.
    fn is_enpassant_safe(&mut self, mv: Move) -> bool {
        let undo = moves::make_move_unchecked(&mut self.board, mv);
        let ok = !analyze::analyze_side(&self.board, self.side).is_check();
        moves::unmake_move_unchecked(&mut self.board, mv, undo);
        ok
    }

    fn gen_pawn(&mut self, src: Coord) {
        let pin = self.pins.take(src);
        let forward = geometry::pawn_forward(self.side);

        let push = Delta::new(forward, 0);
        if follows_pin(pin, push) {
            if let Some(dst) = push.apply(src, 1) {
                if self.board.get(dst).is_empty() {
                    self.add_move(src, dst);
                    if src.rank() == geometry::double_move_src_rank(self.side) {
                        if let Some(dst2) = push.apply(src, 2) {
                            if self.board.get(dst2).is_empty() {
                                self.add_move(src, dst2);
                            }
                        }
                    }
                }
            }
        }

        for side_col in [-1, 1] {
            let dir = Delta::new(forward, side_col);
            if !follows_pin(pin, dir) {
                continue;
            }
            let dst = match dir.apply(src, 1) {
                Some(c) => c,
                None => continue,
            };
            if self.board.get(dst).is_color(self.side.inv()) {
                self.add_move(src, dst);
            } else if self.board.ep_dest() == Some(dst) {
                let mv = Move::new(&self.board, src, dst);
                if self.is_enpassant_safe(mv) {
                    self.dst.push(mv);
                }
            }
        }
    }

    fn gen_knight(&mut self, src: Coord) {
        if self.pins.take(src).is_some() {
            // Any knight jump leaves the pin line
            return;
        }
        for jump in geometry::KNIGHT {
            if let Some(dst) = jump.apply(src, 1) {
                if !self.board.get(dst).is_color(self.side) {
                    self.add_move(src, dst);
                }
            }
        }
    }

    fn gen_slider(&mut self, src: Coord, dirs: &[Delta], pin: Option<Delta>) {
        for &dir in dirs {
            if !follows_pin(pin, dir) {
                continue;
            }
            for dist in 1..8 {
                let dst = match dir.apply(src, dist) {
                    Some(c) => c,
                    None => break,
                };
                let cell = self.board.get(dst);
                if cell.is_color(self.side) {
                    break;
                }
                self.add_move(src, dst);
                if cell.is_occupied() {
                    break;
                }
            }
        }
    }

    fn gen_king(&mut self, src: Coord) {
        for step in geometry::KING {
            let dst = match step.apply(src, 1) {
                Some(c) => c,
                None => continue,
            };
            if self.board.get(dst).is_color(self.side) {
                continue;
            }
            if self.is_king_safe(dst) {
                self.add_move(src, dst);
            }
        }
    }

    fn gen_piece(&mut self, src: Coord, piece: Piece) {
        match piece {
            Piece::Pawn => self.gen_pawn(src),
            Piece::Knight => self.gen_knight(src),
            Piece::Bishop => {
                let pin = self.pins.take(src);
                self.gen_slider(src, &geometry::DIAGONAL, pin);
            }
            Piece::Rook => {
                let pin = self.pins.take(src);
                self.gen_slider(src, &geometry::ORTHOGONAL, pin);
            }
            Piece::Queen => {
                // The pin is taken once and restricts both kinds of rays
                let pin = self.pins.take(src);
                self.gen_slider(src, &geometry::ORTHOGONAL, pin);
                self.gen_slider(src, &geometry::DIAGONAL, pin);
            }
            Piece::King => self.gen_king(src),
        }
    }

    fn gen_all(&mut self) {
        for src in Coord::iter() {
            let cell = self.board.get(src);
            if !cell.is_color(self.side) {
                continue;
            }
            if let Some(piece) = cell.piece() {
                self.gen_piece(src, piece);
            }
        }
    }
}

/// Generates the moves of the side to move which respect pins and never put the king under attack
///
/// Check evasion is not taken into account, so the result is not legal if the king is in check.
pub fn gen_pseudo_into<P: MovePush>(b: &Board, dst: &mut P) {
    let pins = analyze::analyze(b).into_pins();
    MoveGen::new(b, pins, dst).gen_all();
}

/// Generates the moves of the side to move which respect pins and never put the king under attack
///
/// See [`gen_pseudo_into()`] for details.
pub fn gen_pseudo(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    gen_pseudo_into(b, &mut res);
    res
}

/// Generates only the king moves for the side to move
pub fn gen_king_into<P: MovePush>(b: &Board, dst: &mut P) {
    let king = b.king_pos(b.side());
    MoveGen::new(b, Pins::default(), dst).gen_king(king);
}

/// Generates all the legal moves for the side to move
pub fn gen_legal(b: &Board) -> MoveList {
    let analysis = analyze::analyze(b);
    let mut res = MoveList::new();
    if analysis.is_double_check() {
        trace!("double check on {}, generating king moves only", analysis.king());
        gen_king_into(b, &mut res);
        return res;
    }
    MoveGen::new(b, analysis.pins().clone(), &mut res).gen_all();
    legal::filter(res, &analysis)
}

/// Counts the leaf nodes of the legal move tree of the given depth
pub fn perft(b: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = gen_legal(b);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut scratch = b.clone();
    let mut count = 0;
    for mv in moves {
        let undo = moves::make_move_unchecked(&mut scratch, mv);
        count += perft(&scratch, depth - 1);
        moves::unmake_move_unchecked(&mut scratch, mv, undo);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use std::collections::BTreeSet;

    fn legal_set(fen: &str) -> BTreeSet<String> {
        let b = Board::from_fen(fen).unwrap();
        gen_legal(&b).iter().map(|m| m.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        let moves = gen_legal(&b);
        assert_eq!(moves.len(), 20);
        assert_eq!(gen_pseudo(&b).len(), 20);
        // Squares are scanned from a8 to h1, so pawn moves go before knight moves
        assert_eq!(moves[0].to_string(), "a2a3");
        assert_eq!(moves[1].to_string(), "a2a4");
        assert_eq!(moves[16].to_string(), "b1a3");
        assert!(moves.iter().all(|m| m.side() == Some(Color::White)));
    }

    #[test]
    fn test_king_retreat_along_ray() {
        assert_eq!(
            legal_set("k7/8/8/8/4r3/8/4K3/8 w - -"),
            set(&["e2d1", "e2d2", "e2d3", "e2f1", "e2f2", "e2f3"])
        );
    }

    #[test]
    fn test_check_block() {
        assert_eq!(
            legal_set("k3r3/8/8/8/8/8/8/4K3 w - -"),
            set(&["e1d1", "e1d2", "e1f1", "e1f2"])
        );
        assert_eq!(
            legal_set("4r2k/8/8/8/8/8/R7/4K3 w - -"),
            set(&["e1d1", "e1d2", "e1f1", "e1f2", "a2e2"])
        );
        assert_eq!(
            legal_set("k3r2R/8/8/8/8/8/8/4K3 w - -"),
            set(&["e1d1", "e1d2", "e1f1", "e1f2", "h8e8"])
        );
    }

    #[test]
    fn test_double_check() {
        assert_eq!(
            legal_set("4r2k/8/8/8/8/R2n4/8/4K3 w - -"),
            set(&["e1d1", "e1d2", "e1f1"])
        );
    }

    #[test]
    fn test_pins() {
        let moves = legal_set("k3r3/8/8/8/8/8/4R3/4K3 w - -");
        assert_eq!(moves.len(), 10);
        for dst in ["e3", "e4", "e5", "e6", "e7", "e8"] {
            assert!(moves.contains(&format!("e2{}", dst)));
        }
        assert!(!moves.contains("e2d2"));

        let moves = legal_set("k7/8/8/8/7b/8/5Q2/4K3 w - -");
        let queen: BTreeSet<String> = moves.into_iter().filter(|m| m.starts_with("f2")).collect();
        assert_eq!(queen, set(&["f2g3", "f2h4"]));

        let moves = legal_set("k3r3/8/8/8/8/8/4P3/4K3 w - -");
        assert!(moves.contains("e2e3"));
        assert!(moves.contains("e2e4"));

        let moves = legal_set("k7/8/8/8/8/6b1/5P2/4K3 w - -");
        let pawn: BTreeSet<String> = moves.into_iter().filter(|m| m.starts_with("f2")).collect();
        assert_eq!(pawn, set(&["f2g3"]));

        let moves = legal_set("k7/8/8/8/8/8/3N4/2K5 w - - 0 1");
        assert!(moves.iter().any(|m| m.starts_with("d2")));
        let moves = legal_set("k7/8/8/8/5b2/8/3N4/2K5 w - - 0 1");
        assert!(!moves.iter().any(|m| m.starts_with("d2")));
    }

    #[test]
    fn test_enpassant() {
        let moves = legal_set("k7/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.contains("e5d6"));

        // Both pawns leave the rank, exposing the king to the rook
        let moves = legal_set("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!moves.contains("e5d6"));

        let b = Board::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
        let mv = gen_legal(&b)
            .iter()
            .copied()
            .find(|m| m.to_string() == "e4d3")
            .unwrap();
        assert!(mv.is_enpassant());
        assert_eq!(mv.capture_square().to_string(), "d4");
        assert_eq!(mv.captured(), Cell::EMPTY);
    }

    #[test]
    fn test_enpassant_evasion() {
        // Enpassant captures the pawn which gives check
        let moves = legal_set("8/8/8/3pP3/4K3/8/8/k7 w - d6 0 1");
        assert!(moves.contains("e5d6"));
    }

    #[test]
    fn test_promote() {
        let b = Board::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = gen_legal(&b)
            .iter()
            .copied()
            .find(|m| m.src().to_string() == "e7")
            .unwrap();
        assert_eq!(mv.to_string(), "e7e8q");
    }

    #[test]
    fn test_king_only() {
        let b = Board::initial();
        let mut res = Vec::new();
        gen_king_into(&b, &mut res);
        assert!(res.is_empty());

        let b = Board::from_fen("k7/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut res = MoveList::new();
        gen_king_into(&b, &mut res);
        assert_eq!(res.len(), 5);
    }

    #[test]
    fn test_pure() {
        let b = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        let copy = b.clone();
        let _ = gen_legal(&b);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_perft() {
        assert_eq!(perft(&Board::initial(), 0), 1);
        assert_eq!(perft(&Board::initial(), 1), 20);
        assert_eq!(perft(&Board::initial(), 2), 400);
        assert_eq!(perft(&Board::initial(), 3), 8902);

        let b = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&b, 1), 14);
        assert_eq!(perft(&b, 2), 191);
        assert_eq!(perft(&b, 3), 2812);
        assert_eq!(perft(&b, 4), 43238);
    }
}
