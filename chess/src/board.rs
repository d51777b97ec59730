//! Board and related things

use crate::analyze::{self, Analysis};
use crate::bitboard::Bitboard;
use crate::geometry;
use crate::movegen::{self, MoveList};
use crate::moves::Make;
use crate::types::{self, Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Invalid enpassant target specified (i.e. it is located on an invalid rank)
    #[error("invalid enpassant position {0}")]
    InvalidEnpassant(Coord),
    /// Too many pieces of given color
    ///
    /// No more than 16 pieces of each color is allowed.
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1th or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
    /// Opponent's king is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

/// Error parsing the first part of FEN (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`RawBoard`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// FEN doesn't have castling rights part
    #[error("no castling rights")]
    NoCastling,
    /// Castling rights contain an unexpected character
    #[error("bad castling rights char {0:?}")]
    Castling(char),
    /// FEN doesn't have enpassant part
    #[error("no enpassant")]
    NoEnpassant,
    /// Error parsing enpassant from FEN
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::CoordParseError),
    /// Enpassant rank is invalid
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing move counter
    #[error("bad move counter: {0}")]
    MoveCounter(ParseIntError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Board cannot be parsed
    #[error("cannot parse fen: {0}")]
    Fen(#[from] RawFenParseError),
    /// Board was parsed, but it's invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// Raw board contains all the information about the chess position, but, unlike [`Board`], it is
/// not validated and may contain an invalid position. Use it to set up positions programmatically
/// and convert to [`Board`] via [`Board::try_from()`].
///
/// # Example
///
/// ```
/// # use raychess::{RawBoard, Board, File, Rank, Color, Piece, Cell};
/// #
/// let mut raw = RawBoard::empty();
/// raw.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// raw.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
///
/// let board: Board = raw.try_into().unwrap();
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8 w - - 0 1");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the board, indexed by [`Coord::index()`]
    pub cells: [Cell; 64],
    /// Side to move
    pub side: Color,
    /// En passant target square
    ///
    /// It is set to the square skipped by a pawn which has just made a double move, and is
    /// `None` otherwise.
    pub ep_dest: Option<Coord>,
    /// Number of half-moves without pawn moves or captures
    pub move_counter: u16,
    /// Move number
    ///
    /// Incremented after each move by Black.
    pub move_number: u16,
}

impl RawBoard {
    /// Returns an empty `RawBoard`
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            ep_dest: None,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> RawBoard {
        let mut res = RawBoard::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Parses a board from FEN
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        RawBoard::from_str(fen)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// # Example
    ///
    /// ```
    /// # use raychess::{RawBoard, board::PrettyStyle};
    /// #
    /// let r = RawBoard::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Board that contains a valid position
///
/// Alongside with [`RawBoard`], it keeps the squares of both kings. The king squares are updated
/// incrementally when moves are made and are never searched for on the board.
///
/// There is exactly one king of each color on a valid board, and the king of the side which
/// has just moved is never under attack.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) r: RawBoard,
    pub(crate) kings: [Coord; 2],
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial() -> Board {
        Board {
            r: RawBoard::initial(),
            kings: [
                Coord::from_parts(File::E, Rank::R1),
                Coord::from_parts(File::E, Rank::R8),
            ],
        }
    }

    /// Parses a board from FEN
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns a view over the raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.r.get(c)
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.r.get2(file, rank)
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.r.side
    }

    /// Returns the en passant target square, if any
    #[inline]
    pub fn ep_dest(&self) -> Option<Coord> {
        self.r.ep_dest
    }

    /// Returns the position of the king of color `c`
    #[inline]
    pub fn king_pos(&self, c: Color) -> Coord {
        self.kings[c as usize]
    }

    #[inline]
    pub(crate) fn set_king_pos(&mut self, c: Color, pos: Coord) {
        self.kings[c as usize] = pos;
    }

    /// Convenience alias for [`Make::make`]
    pub fn make_move<M: Make>(&self, m: M) -> Result<Self, M::Err> {
        m.make(self)
    }

    /// Runs the attack and pin analysis for the side to move
    #[inline]
    pub fn analyze(&self) -> Analysis {
        analyze::analyze(self)
    }

    /// Returns all the legal moves for the side to move
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        movegen::gen_legal(self)
    }

    /// Returns `true` if the opponent's king is under attack
    ///
    /// This never holds for a valid position, so it is mostly useful for debugging.
    #[inline]
    pub fn is_opponent_king_attacked(&self) -> bool {
        analyze::analyze_side(self, self.r.side.inv()).is_check()
    }

    /// Returns `true` if the current side is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.analyze().is_check()
    }

    /// Returns all the pieces that give check currently
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        self.analyze().checks().iter().map(|c| c.attacker).collect()
    }

    /// Verifies that the cached king squares and the en passant target agree with the board
    #[cfg(feature = "selftest")]
    pub(crate) fn self_test(&self) {
        for color in [Color::White, Color::Black] {
            let king = Cell::from_parts(color, Piece::King);
            let found: Vec<Coord> = Coord::iter().filter(|&c| self.get(c) == king).collect();
            assert_eq!(found, vec![self.king_pos(color)], "king cache is stale");
        }
        if let Some(p) = self.r.ep_dest {
            assert_eq!(p.rank(), geometry::enpassant_dst_rank(self.r.side));
            assert!(self.get(p).is_empty(), "en passant target is occupied");
        }
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// See docs for [`RawBoard::pretty()`] for more usage details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.r.pretty(style)
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.r == other.r && self.kings == other.kings
    }
}

impl Eq for Board {}

/// Places the king of the side to move on another square for the duration of an attack probe
///
/// The king is lifted from its square and the king cache points to the probed square. Both are
/// restored when the probe is dropped.
pub(crate) struct KingProbe<'a> {
    board: &'a mut Board,
    origin: Coord,
}

impl<'a> KingProbe<'a> {
    pub(crate) fn new(board: &'a mut Board, target: Coord) -> Self {
        let side = board.r.side;
        let origin = board.king_pos(side);
        board.r.put(origin, Cell::EMPTY);
        board.set_king_pos(side, target);
        KingProbe { board, origin }
    }
}

impl<'a> Deref for KingProbe<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> Drop for KingProbe<'a> {
    fn drop(&mut self) {
        let side = self.board.r.side;
        self.board
            .r
            .put(self.origin, Cell::from_parts(side, Piece::King));
        self.board.set_king_pos(side, self.origin);
    }
}

fn find_king(raw: &RawBoard, color: Color) -> Result<Coord, ValidateError> {
    let king = Cell::from_parts(color, Piece::King);
    let mut iter = Coord::iter().filter(|&c| raw.get(c) == king);
    let pos = iter.next().ok_or(ValidateError::NoKing(color))?;
    if iter.next().is_some() {
        return Err(ValidateError::TooManyKings(color));
    }
    Ok(pos)
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(mut raw: RawBoard) -> Result<Board, ValidateError> {
        // Check enpassant
        if let Some(p) = raw.ep_dest {
            if p.rank() != geometry::enpassant_dst_rank(raw.side) {
                return Err(ValidateError::InvalidEnpassant(p));
            }

            // Reset enpassant if there is no pawn which could just make a double move
            let forward = geometry::pawn_forward(raw.side);
            let pawn_pos = p.try_shift(-forward, 0);
            let src_pos = p.try_shift(forward, 0);
            let their_pawn = Cell::from_parts(raw.side.inv(), Piece::Pawn);
            let ok = match (pawn_pos, src_pos) {
                (Some(pawn_pos), Some(src_pos)) => {
                    raw.get(pawn_pos) == their_pawn
                        && raw.get(p).is_empty()
                        && raw.get(src_pos).is_empty()
                }
                _ => false,
            };
            if !ok {
                raw.ep_dest = None;
            }
        }

        // Check TooManyPieces
        for color in [Color::White, Color::Black] {
            if raw.cells.iter().filter(|c| c.is_color(color)).count() > 16 {
                return Err(ValidateError::TooManyPieces(color));
            }
        }

        // Check NoKing, TooManyKings
        let kings = [
            find_king(&raw, Color::White)?,
            find_king(&raw, Color::Black)?,
        ];

        // Check InvalidPawn
        for rank in [Rank::R1, Rank::R8] {
            for file in File::iter() {
                if raw.get2(file, rank).piece() == Some(Piece::Pawn) {
                    return Err(ValidateError::InvalidPawn(Coord::from_parts(file, rank)));
                }
            }
        }

        // Check OpponentKingAttacked
        let res = Board { r: raw, kings };
        if res.is_opponent_king_attacked() {
            return Err(ValidateError::OpponentKingAttacked);
        }

        Ok(res)
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

/// Style for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`RawBoard::pretty()`] for more details.
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    type Error = CellsParseError;

    let mut cells = [Cell::EMPTY; 64];
    let mut lines = s.split('/');
    for (row, rank) in Rank::iter().enumerate() {
        let line = lines.next().ok_or(Error::Underflow)?;
        let mut col = 0_usize;
        for ch in line.chars() {
            if let Some(skip) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += skip as usize;
                if col > 8 {
                    return Err(Error::RankOverflow(rank));
                }
                continue;
            }
            let cell = Cell::from_char(ch)
                .filter(Cell::is_occupied)
                .ok_or(Error::UnexpectedChar(ch))?;
            if col >= 8 {
                return Err(Error::RankOverflow(rank));
            }
            cells[row * 8 + col] = cell;
            col += 1;
        }
        if col < 8 {
            return Err(Error::RankUnderflow(rank));
        }
    }
    if lines.next().is_some() {
        return Err(Error::Overflow);
    }

    Ok(cells)
}

fn parse_castling(s: &str) -> Result<(), RawFenParseError> {
    if s == "-" {
        return Ok(());
    }
    match s.chars().find(|c| !matches!(c, 'K' | 'Q' | 'k' | 'q')) {
        Some(c) => Err(RawFenParseError::Castling(c)),
        None if s.is_empty() => Err(RawFenParseError::NoCastling),
        None => Ok(()),
    }
}

fn parse_ep_dest(s: &str, side: Color) -> Result<Option<Coord>, RawFenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let enpassant = Coord::from_str(s)?;
    if enpassant.rank() != geometry::enpassant_dst_rank(side) {
        return Err(RawFenParseError::InvalidEnpassantRank(enpassant.rank()));
    }
    Ok(Some(enpassant))
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        type Error = RawFenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let cells = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        // Castling is not supported, so the rights are only checked for well-formedness.
        parse_castling(iter.next().ok_or(Error::NoCastling)?)?;
        let ep_dest = parse_ep_dest(iter.next().ok_or(Error::NoEnpassant)?, side)?;
        let move_counter = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveCounter)?,
            None => 0,
        };
        let move_number = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveNumber)?,
            None => 1,
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(RawBoard {
            cells,
            side,
            ep_dest,
            move_counter,
            move_number,
        })
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

fn format_cells(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for (row, line) in cells.chunks(8).enumerate() {
        if row != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for &cell in line {
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", empty)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)?;
        write!(f, " {} -", self.side)?;
        match self.ep_dest {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.move_counter, self.move_number)?;
        Ok(())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.r.fmt(f)
    }
}

impl PrettyStyle {
    /// Frame characters: vertical, horizontal and the corner between them
    fn frame(self) -> (char, char, char) {
        match self {
            PrettyStyle::Ascii => ('|', '-', '+'),
            PrettyStyle::Utf8 => ('│', '─', '┼'),
        }
    }

    fn side(self, c: Color) -> char {
        match (self, c) {
            (PrettyStyle::Ascii, Color::White) => 'W',
            (PrettyStyle::Ascii, Color::Black) => 'B',
            (PrettyStyle::Utf8, Color::White) => '○',
            (PrettyStyle::Utf8, Color::Black) => '●',
        }
    }

    fn cell(self, c: Cell) -> char {
        match self {
            PrettyStyle::Ascii => c.as_char(),
            PrettyStyle::Utf8 => c.as_utf8_char(),
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let (vert, horz, corner) = self.style.frame();
        for (line, rank) in self.raw.cells.chunks(8).zip(Rank::iter()) {
            write!(f, "{}{}", rank, vert)?;
            for &cell in line {
                write!(f, "{}", self.style.cell(cell))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}{}{}", horz, corner, horz.to_string().repeat(8))?;
        write!(f, "{}{}", self.style.side(self.raw.side), vert)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

    #[test]
    fn test_initial() {
        assert_eq!(RawBoard::initial().to_string(), INI_FEN);
        assert_eq!(Board::initial().to_string(), INI_FEN);
        assert_eq!(RawBoard::from_str(INI_FEN), Ok(RawBoard::initial()));
        assert_eq!(Board::from_str(INI_FEN), Ok(Board::initial()));
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Ok(Board::initial())
        );
        assert_eq!(RawBoard::initial().try_into(), Ok(Board::initial()));
    }

    #[test]
    fn test_midgame() {
        const FEN: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21";

        let board = Board::from_fen(FEN).unwrap();
        assert_eq!(board.as_fen(), FEN);
        assert_eq!(
            board.get2(File::B, Rank::R4),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            board.get2(File::F, Rank::R2),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(
            board.king_pos(Color::White),
            Coord::from_parts(File::H, Rank::R1)
        );
        assert_eq!(
            board.king_pos(Color::Black),
            Coord::from_parts(File::G, Rank::R8)
        );
        assert_eq!(board.side(), Color::White);
        assert_eq!(board.ep_dest(), None);
        assert_eq!(board.raw().move_counter, 1);
        assert_eq!(board.raw().move_number, 21);
    }

    #[test]
    fn test_enpassant() {
        const FEN: &str = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w - d6 0 3";

        let board = Board::from_fen(FEN).unwrap();
        assert_eq!(board.ep_dest(), Some(Coord::from_parts(File::D, Rank::R6)));
        assert_eq!(board.as_fen(), FEN);

        // No pawn which could make a double move, so the target is dropped
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w - d6 0 3").unwrap();
        assert_eq!(board.ep_dest(), None);

        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w - e3 0 1"),
            Err(RawFenParseError::InvalidEnpassantRank(Rank::R3))
        );
    }

    #[test]
    fn test_incomplete() {
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(RawFenParseError::NoMoveSide)
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(RawFenParseError::NoCastling)
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
            Err(RawFenParseError::NoEnpassant)
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX -"),
            Err(RawFenParseError::Castling('X'))
        );

        let raw =
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(raw.move_counter, 0);
        assert_eq!(raw.move_number, 1);

        let raw =
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 10").unwrap();
        assert_eq!(raw.move_counter, 10);
        assert_eq!(raw.move_number, 1);
    }

    #[test]
    fn test_pretty_utf8() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").unwrap();
        let res = "8│....♚...
7│........
6│........
5│........
4│........
3│........
2│....♙...
1│....♔...
─┼────────
●│abcdefgh
";
        assert_eq!(b.pretty(PrettyStyle::Utf8).to_string(), res);
    }

    #[test]
    fn test_bad_cells() {
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w - -"),
            Err(RawFenParseError::Board(CellsParseError::UnexpectedChar('9')))
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w - -"),
            Err(RawFenParseError::Board(CellsParseError::Underflow))
        );
        assert_eq!(
            RawBoard::from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - -"),
            Err(RawFenParseError::Board(CellsParseError::RankOverflow(
                Rank::R8
            )))
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/4K3 w - -"),
            Err(FenParseError::Valid(ValidateError::NoKing(Color::Black)))
        );
        assert_eq!(
            Board::from_fen("k6k/8/8/8/8/8/8/4K3 w - -"),
            Err(FenParseError::Valid(ValidateError::TooManyKings(
                Color::Black
            )))
        );
        assert_eq!(
            Board::from_fen("k3P3/8/8/8/8/8/8/4K3 w - -"),
            Err(FenParseError::Valid(ValidateError::InvalidPawn(
                Coord::from_parts(File::E, Rank::R8)
            )))
        );
        assert_eq!(
            Board::from_fen("k3R3/8/8/8/8/8/8/4K3 w - -"),
            Err(FenParseError::Valid(ValidateError::OpponentKingAttacked))
        );
        assert!(!Board::from_fen("k7/8/8/8/8/8/8/4K2R b - -")
            .unwrap()
            .is_check());
    }

    #[test]
    fn test_king_probe() {
        let mut board = Board::initial();
        let copy = board.clone();
        let e3 = Coord::from_parts(File::E, Rank::R3);
        {
            let probe = KingProbe::new(&mut board, e3);
            assert_eq!(probe.king_pos(Color::White), e3);
            assert!(probe.get2(File::E, Rank::R1).is_empty());
        }
        assert_eq!(board, copy);
    }

    #[test]
    fn test_checkers() {
        let board = Board::from_fen("k3r3/8/8/8/8/3n4/8/4K3 w - -").unwrap();
        assert!(board.is_check());
        assert_eq!(
            board.checkers(),
            Bitboard::EMPTY
                .with(Coord::from_parts(File::E, Rank::R8))
                .with(Coord::from_parts(File::D, Rank::R3))
        );
        assert!(!Board::initial().is_check());
        assert_eq!(Board::initial().checkers(), Bitboard::EMPTY);
    }
}
