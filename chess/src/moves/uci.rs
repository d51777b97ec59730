//! Utilities to work with moves in coordinate (UCI) format

use super::base::{self, CreateError, IllegalMoveError, PromotePiece};
use crate::board::Board;
use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error creating a parsed UCI representation from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Error parsing UCI into a [`moves::Move`](super::Move) which is not checked for legality
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum BasicParseError {
    /// Error parsing move
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    /// Error converting the parsed move into a move
    #[error("cannot create move: {0}")]
    Create(#[from] CreateError),
}

/// Error parsing UCI into a legal [`moves::Move`](super::Move)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Error parsing move
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    /// Error converting the parsed move into a move
    #[error("cannot create move: {0}")]
    Create(#[from] CreateError),
    /// Move is not legal
    #[error("invalid move: {0}")]
    Illegal(#[from] IllegalMoveError),
}

/// Parsed move in UCI format
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
    /// Piece to promote, if any
    pub promote: Option<PromotePiece>,
}

impl Move {
    /// Converts the UCI move into [`moves::Move`](super::Move) in position `b`
    ///
    /// A pawn move to the last rank without promote piece specified becomes a promotion to a queen.
    pub fn into_move(self, b: &Board) -> Result<base::Move, CreateError> {
        let mv = base::Move::new(b, self.src, self.dst);
        match self.promote {
            Some(p) if mv.is_promote() => Ok(mv.with_promote(p)),
            Some(_) => Err(CreateError::NotPromotion),
            None => Ok(mv),
        }
    }
}

impl From<base::Move> for Move {
    #[inline]
    fn from(mv: base::Move) -> Move {
        Move {
            src: mv.src(),
            dst: mv.dst(),
            promote: mv.promote(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        match self.promote {
            Some(PromotePiece::Knight) => write!(f, "n")?,
            Some(PromotePiece::Bishop) => write!(f, "b")?,
            Some(PromotePiece::Rook) => write!(f, "r")?,
            Some(PromotePiece::Queen) => write!(f, "q")?,
            None => {}
        };
        Ok(())
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !matches!(s.len(), 4 | 5) || !s.is_ascii() {
            return Err(RawParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(RawParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(RawParseError::BadDst)?;
        let promote = if s.len() == 5 {
            Some(match s.as_bytes()[4] {
                b'n' => PromotePiece::Knight,
                b'b' => PromotePiece::Bishop,
                b'r' => PromotePiece::Rook,
                b'q' => PromotePiece::Queen,
                b => return Err(RawParseError::BadPromote(b as char)),
            })
        } else {
            None
        };
        Ok(Move { src, dst, promote })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{File, Rank};

    #[test]
    fn test_simple() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        assert_eq!(
            Move::from_str("e2e4").unwrap(),
            Move {
                src: e2,
                dst: e4,
                promote: None
            }
        );
        let mv = Move::from_str("e2e4")
            .unwrap()
            .into_move(&Board::initial())
            .unwrap();
        assert_eq!(mv, base::Move::new(&Board::initial(), e2, e4));
        assert_eq!(mv.uci().to_string(), "e2e4");
    }

    #[test]
    fn test_promote() {
        let b = Board::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::from_str("e7e8r").unwrap();
        assert_eq!(mv.promote, Some(PromotePiece::Rook));
        assert_eq!(mv.to_string(), "e7e8r");
        assert_eq!(
            mv.into_move(&b).unwrap().promote(),
            Some(PromotePiece::Rook)
        );
        assert_eq!(
            Move::from_str("e7e8").unwrap().into_move(&b).unwrap().promote(),
            Some(PromotePiece::Queen)
        );
        assert_eq!(
            Move::from_str("e1e2q").unwrap().into_move(&b),
            Err(CreateError::NotPromotion)
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(Move::from_str("e2"), Err(RawParseError::BadLength));
        assert_eq!(Move::from_str("e2e4qq"), Err(RawParseError::BadLength));
        assert_eq!(
            Move::from_str("i2e4"),
            Err(RawParseError::BadSrc(CoordParseError::UnexpectedFileChar(
                'i'
            )))
        );
        assert_eq!(
            Move::from_str("e2e9"),
            Err(RawParseError::BadDst(CoordParseError::UnexpectedRankChar(
                '9'
            )))
        );
        assert_eq!(
            Move::from_str("e7e8k"),
            Err(RawParseError::BadPromote('k'))
        );
    }
}
