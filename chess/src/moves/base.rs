use super::uci;
use crate::board::Board;
use crate::geometry;
use crate::types::{Cell, Color, Coord, InvalidSquareError, Piece};

use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Any move which is neither enpassant nor promotion, including double pawn moves
    #[default]
    Simple,
    /// Enpassant capture
    Enpassant,
    /// Pawn promotion (either non-capture or capture)
    Promote(PromotePiece),
}

/// Chess move
///
/// Alongside with source and destination squares, the move remembers the moved piece and the
/// captured piece, so it can be undone without looking into the history of the board.
///
/// Two moves are equal if they have the same source and destination squares. The remaining
/// fields, including the promotion piece, are ignored while comparing or hashing.
///
/// # Validity
///
/// A move created by [`Move::new()`] or parsed from UCI is not checked for legality. It's validated
/// only when applied, by finding the legal move with the same squares in the position (see
/// [`Move::resolve()`]).
#[derive(Debug, Copy, Clone)]
pub struct Move {
    src: Coord,
    dst: Coord,
    moved: Cell,
    captured: Cell,
    kind: MoveKind,
}

/// Error indicating that the move is not legal in the given position
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("move {0} is not legal")]
pub struct IllegalMoveError(pub Move);

/// Error creating a move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CreateError {
    /// Promotion piece is given for a move which is not a promotion
    #[error("move is not a pawn promotion")]
    NotPromotion,
}

impl Move {
    /// Creates a move from `src` to `dst` with the pieces currently found on the board `b`
    ///
    /// Pawn moves to the last rank are promotions to a queen. Use [`Move::with_promote()`] to
    /// pick another piece.
    pub fn new(b: &Board, src: Coord, dst: Coord) -> Move {
        let moved = b.get(src);
        let captured = b.get(dst);
        let mut kind = MoveKind::Simple;
        if let (Some(Piece::Pawn), Some(color)) = (moved.piece(), moved.color()) {
            if dst.rank() == geometry::promote_dst_rank(color) {
                kind = MoveKind::Promote(PromotePiece::Queen);
            } else if src.file() != dst.file() && Some(dst) == b.ep_dest() && captured.is_empty() {
                kind = MoveKind::Enpassant;
            }
        }
        Move {
            src,
            dst,
            moved,
            captured,
            kind,
        }
    }

    /// Creates a move from (row, column) pairs, where row `0` is the 8th rank and column `0` is
    /// the `a` file
    pub fn from_row_col(
        b: &Board,
        src: (usize, usize),
        dst: (usize, usize),
    ) -> Result<Move, InvalidSquareError> {
        let src = Coord::from_row_col(src.0, src.1)?;
        let dst = Coord::from_row_col(dst.0, dst.1)?;
        Ok(Move::new(b, src, dst))
    }

    /// Parses a move from UCI
    ///
    /// The move is not checked for legality.
    #[inline]
    pub fn from_uci(s: &str, b: &Board) -> Result<Move, uci::BasicParseError> {
        Ok(s.parse::<uci::Move>()?.into_move(b)?)
    }

    /// Parses a legal move from UCI
    #[inline]
    pub fn from_uci_legal(s: &str, b: &Board) -> Result<Move, uci::ParseError> {
        let mv = s.parse::<uci::Move>()?.into_move(b)?;
        Ok(mv.resolve(b)?)
    }

    /// Returns the same move with another promotion piece
    ///
    /// Moves which are not promotions are returned unchanged.
    #[inline]
    pub fn with_promote(self, p: PromotePiece) -> Move {
        match self.kind {
            MoveKind::Promote(_) => Move {
                kind: MoveKind::Promote(p),
                ..self
            },
            _ => self,
        }
    }

    /// Finds the legal move in position `b` which has the same squares as this one
    ///
    /// The returned move keeps the promotion piece chosen in `self`.
    pub fn resolve(&self, b: &Board) -> Result<Move, IllegalMoveError> {
        let found = b
            .legal_moves()
            .iter()
            .find(|mv| *mv == self)
            .copied()
            .ok_or(IllegalMoveError(*self))?;
        Ok(match self.kind {
            MoveKind::Promote(p) => found.with_promote(p),
            _ => found,
        })
    }

    /// Returns `true` if the move is legal in position `b`
    #[inline]
    pub fn is_legal(&self, b: &Board) -> bool {
        self.resolve(b).is_ok()
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Piece that makes the move
    #[inline]
    pub const fn moved(&self) -> Cell {
        self.moved
    }

    /// Piece that stood on the destination square
    ///
    /// It is empty for enpassant, though the move still captures a pawn.
    #[inline]
    pub const fn captured(&self) -> Cell {
        self.captured
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Color of the moving side, if the move has a piece to move
    #[inline]
    pub const fn side(&self) -> Option<Color> {
        self.moved.color()
    }

    #[inline]
    pub fn promote(&self) -> Option<PromotePiece> {
        match self.kind {
            MoveKind::Promote(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_enpassant(&self) -> bool {
        self.kind == MoveKind::Enpassant
    }

    #[inline]
    pub fn is_promote(&self) -> bool {
        matches!(self.kind, MoveKind::Promote(_))
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_occupied() || self.is_enpassant()
    }

    #[inline]
    pub fn is_king_move(&self) -> bool {
        self.moved.piece() == Some(Piece::King)
    }

    /// Square from which the captured piece is removed
    ///
    /// For enpassant, it's the square of the pawn that has just made a double move, i.e. the
    /// destination file on the source rank. Otherwise, it's the destination square.
    #[inline]
    pub fn capture_square(&self) -> Coord {
        match self.kind {
            MoveKind::Enpassant => Coord::from_parts(self.dst.file(), self.src.rank()),
            _ => self.dst,
        }
    }

    /// Numeric identifier of the move, with the decimal digits `src_row`, `src_col`, `dst_row`,
    /// `dst_col`
    ///
    /// So, `e2e4` is `6444`.
    #[inline]
    pub fn id(&self) -> u32 {
        (self.src.row() * 1000 + self.src.col() * 100 + self.dst.row() * 10 + self.dst.col())
            as u32
    }

    /// Converts the move into UCI representation
    #[inline]
    pub fn uci(&self) -> uci::Move {
        (*self).into()
    }
}

impl PartialEq for Move {
    #[inline]
    fn eq(&self, other: &Move) -> bool {
        self.src == other.src && self.dst == other.dst
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.src.hash(state);
        self.dst.hash(state);
    }
}

impl fmt::Display for Move {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&self.uci(), f)
    }
}

/// Metadata necessary to undo the applied move
#[derive(Debug, Copy, Clone)]
pub struct RawUndo {
    ep_dest: Option<Coord>,
    move_counter: u16,
    move_number: u16,
}

/// Makes the move `mv` on the board `b`
///
/// The move must come from the legal move list of `b`, otherwise the board invariants are broken.
/// Returns `RawUndo` to pass into [`unmake_move_unchecked()`].
pub(crate) fn make_move_unchecked(b: &mut Board, mv: Move) -> RawUndo {
    let side = b.r.side;
    let undo = RawUndo {
        ep_dest: b.r.ep_dest,
        move_counter: b.r.move_counter,
        move_number: b.r.move_number,
    };

    b.r.ep_dest = None;
    b.r.put(mv.src, Cell::EMPTY);
    match mv.kind {
        MoveKind::Simple => {
            b.r.put(mv.dst, mv.moved);
            if mv.moved.piece() == Some(Piece::Pawn) && mv.src.row().abs_diff(mv.dst.row()) == 2
            {
                b.r.ep_dest = mv.src.try_shift(geometry::pawn_forward(side), 0);
            }
        }
        MoveKind::Enpassant => {
            b.r.put(mv.dst, mv.moved);
            b.r.put(mv.capture_square(), Cell::EMPTY);
        }
        MoveKind::Promote(p) => {
            b.r.put(mv.dst, Cell::from_parts(side, p.into()));
        }
    }
    if mv.is_king_move() {
        b.set_king_pos(side, mv.dst);
    }

    if mv.is_capture() || mv.moved.piece() == Some(Piece::Pawn) {
        b.r.move_counter = 0;
    } else {
        b.r.move_counter = b.r.move_counter.saturating_add(1);
    }
    if side == Color::Black {
        b.r.move_number = b.r.move_number.saturating_add(1);
    }
    b.r.side = side.inv();

    undo
}

/// Unmakes the move `mv` on the board `b`
///
/// Must be called with the move and the undo data returned by the corresponding
/// [`make_move_unchecked()`], on the position that occured right after it.
pub(crate) fn unmake_move_unchecked(b: &mut Board, mv: Move, u: RawUndo) {
    let side = b.r.side.inv();
    b.r.put(mv.src, mv.moved);
    b.r.put(mv.dst, mv.captured);
    if mv.kind == MoveKind::Enpassant {
        b.r.put(
            mv.capture_square(),
            Cell::from_parts(side.inv(), Piece::Pawn),
        );
    }
    if mv.is_king_move() {
        b.set_king_pos(side, mv.src);
    }

    b.r.ep_dest = u.ep_dest;
    b.r.move_counter = u.move_counter;
    b.r.move_number = u.move_number;
    b.r.side = side;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::make::{self, Make};
    use crate::types::{File, Rank};

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_simple() {
        let mut b = Board::initial();
        for (mv_str, fen_str) in [
            (
                "e2e4",
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - e3 0 1",
            ),
            (
                "b8c6",
                "r1bqkbnr/pppppppp/2n5/8/4P3/8/PPPP1PPP/RNBQKBNR w - - 1 2",
            ),
            (
                "g1f3",
                "r1bqkbnr/pppppppp/2n5/8/4P3/5N2/PPPP1PPP/RNBQKB1R b - - 2 2",
            ),
            (
                "e7e5",
                "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - e6 0 3",
            ),
            (
                "f1b5",
                "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b - - 1 3",
            ),
            (
                "g8f6",
                "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w - - 2 4",
            ),
            (
                "e1f1",
                "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQ1K1R b - - 3 4",
            ),
            (
                "f6e4",
                "r1bqkb1r/pppp1ppp/2n5/1B2p3/4n3/5N2/PPPP1PPP/RNBQ1K1R w - - 0 5",
            ),
        ] {
            b = b.make_move(make::Uci(mv_str)).unwrap();
            assert_eq!(b.as_fen(), fen_str);
            assert_eq!(b.raw().try_into(), Ok(b.clone()));
        }
        assert_eq!(b.king_pos(Color::White), sq("f1"));
    }

    #[test]
    fn test_promote() {
        let mut b = Board::from_fen("1b1b1K2/2P5/8/8/7k/8/8/8 w - - 0 1").unwrap();
        let b_copy = b.clone();

        for (mv_str, fen_str) in [
            ("c7c8q", "1bQb1K2/8/8/8/7k/8/8/8 b - - 0 1"),
            ("c7c8", "1bQb1K2/8/8/8/7k/8/8/8 b - - 0 1"),
            ("c7b8n", "1N1b1K2/8/8/8/7k/8/8/8 b - - 0 1"),
            ("c7d8r", "1b1R1K2/8/8/8/7k/8/8/8 b - - 0 1"),
        ] {
            let (m, u) = make::Uci(mv_str).make_raw(&mut b).unwrap();
            assert!(m.is_promote());
            assert_eq!(b.as_fen(), fen_str);
            assert_eq!(b.raw().try_into(), Ok(b.clone()));
            unmake_move_unchecked(&mut b, m, u);
            assert_eq!(b, b_copy);
        }
    }

    #[test]
    fn test_undo() {
        let mut b =
            Board::from_fen("r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R w - - 0 6")
                .unwrap();
        let b_copy = b.clone();

        for (mv_str, fen_str) in [
            (
                "e1f1",
                "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQ1K1R b - - 1 6",
            ),
            (
                "f3e5",
                "r1bqk2r/ppp2ppp/2np1n2/1Bb1N3/4P3/2PP4/PP3PPP/RNBQK2R b - - 0 6",
            ),
            (
                "b2b4",
                "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/1P2P3/2PP1N2/P4PPP/RNBQK2R b - b3 0 6",
            ),
            (
                "c3c4",
                "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/2P1P3/3P1N2/PP3PPP/RNBQK2R b - - 0 6",
            ),
        ] {
            let (m, u) = make::Uci(mv_str).make_raw(&mut b).unwrap();
            assert_eq!(b.as_fen(), fen_str);
            assert_eq!(b.raw().try_into(), Ok(b.clone()));
            unmake_move_unchecked(&mut b, m, u);
            assert_eq!(b, b_copy);
        }
    }

    #[test]
    fn test_pawns() {
        let mut b = Board::from_fen("3K4/3p4/8/3PpP2/8/5p2/6P1/2k5 w - e6 0 1").unwrap();
        let b_copy = b.clone();

        for (mv_str, fen_str) in [
            ("g2g3", "3K4/3p4/8/3PpP2/8/5pP1/8/2k5 b - - 0 1"),
            ("g2g4", "3K4/3p4/8/3PpP2/6P1/5p2/8/2k5 b - g3 0 1"),
            ("g2f3", "3K4/3p4/8/3PpP2/8/5P2/8/2k5 b - - 0 1"),
            ("d5e6", "3K4/3p4/4P3/5P2/8/5p2/6P1/2k5 b - - 0 1"),
            ("f5e6", "3K4/3p4/4P3/3P4/8/5p2/6P1/2k5 b - - 0 1"),
        ] {
            let (m, u) = make::Uci(mv_str).make_raw(&mut b).unwrap();
            assert_eq!(b.as_fen(), fen_str);
            assert_eq!(b.raw().try_into(), Ok(b.clone()));
            unmake_move_unchecked(&mut b, m, u);
            assert_eq!(b, b_copy);
        }

        let m = Move::from_uci("d5e6", &b).unwrap();
        assert!(m.is_enpassant());
        assert!(m.is_capture());
        assert_eq!(m.captured(), Cell::EMPTY);
        assert_eq!(m.capture_square(), sq("e5"));
    }

    #[test]
    fn test_legal() {
        let b = Board::from_fen("r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R w - - 0 6")
            .unwrap();

        for mv_str in ["e1g1", "e1c1", "b5e8", "a3a4", "e1d1", "e4e5"] {
            let m = Move::from_uci(mv_str, &b).unwrap();
            assert!(!m.is_legal(&b));
            assert_eq!(m.resolve(&b), Err(IllegalMoveError(m)));
        }
        assert!(Move::from_uci("f3g5", &b).unwrap().is_legal(&b));

        assert_eq!(
            Move::from_uci("g1f3q", &Board::initial()),
            Err(uci::BasicParseError::Create(CreateError::NotPromotion))
        );
    }

    #[test]
    fn test_identity() {
        let b = Board::initial();
        let mv = Move::new(&b, sq("e2"), sq("e4"));
        assert_eq!(mv.id(), 6444);
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.moved(), Cell::from_parts(Color::White, Piece::Pawn));
        assert_eq!(mv.captured(), Cell::EMPTY);
        assert_eq!(mv.side(), Some(Color::White));
        assert_eq!(Move::from_row_col(&b, (6, 4), (4, 4)), Ok(mv));
        assert_eq!(
            Move::from_row_col(&b, (8, 0), (0, 0)),
            Err(InvalidSquareError { row: 8, col: 0 })
        );
        assert_eq!(
            Move::new(&b, Coord::from_parts(File::A, Rank::R1), sq("h8")).id(),
            7007
        );
    }

    #[test]
    fn test_promote_equality() {
        let b = Board::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::new(&b, sq("e7"), sq("e8"));
        assert_eq!(mv.promote(), Some(PromotePiece::Queen));
        let knight = mv.with_promote(PromotePiece::Knight);
        assert_eq!(knight.promote(), Some(PromotePiece::Knight));
        assert_eq!(mv, knight);
        assert_eq!(knight.to_string(), "e7e8n");

        let quiet = Move::new(&b, sq("e1"), sq("e2"));
        assert_eq!(quiet.with_promote(PromotePiece::Rook).kind(), MoveKind::Simple);
    }
}
