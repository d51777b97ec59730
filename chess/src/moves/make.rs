//! Making moves on a board

use super::base::{self, IllegalMoveError, Move, RawUndo};
use super::uci;
use crate::board::Board;

/// Something that can be made on the board as a legal move
pub trait Make {
    type Err;

    /// Makes the move on `board` in place
    ///
    /// Returns the move actually made, with its pieces taken from the board, and the data
    /// required to undo it. On error, `board` is left unchanged.
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err>;

    /// Returns a new board with the move made
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let mut cloned = board.clone();
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

impl Make for Move {
    type Err = IllegalMoveError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err> {
        let mv = self.resolve(board)?;
        let undo = base::make_move_unchecked(board, mv);
        Ok((mv, undo))
    }
}

/// Move given as a UCI string
pub struct Uci<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Uci<S> {
    type Err = uci::ParseError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err> {
        let mv = Move::from_uci_legal(self.0.as_ref(), board)?;
        let undo = base::make_move_unchecked(board, mv);
        Ok((mv, undo))
    }
}
