//! Game state with move history

use crate::board::{self, Board};
use crate::movegen::MoveList;
use crate::moves::{self, uci, IllegalMoveError, Make, Move, RawUndo};

use std::fmt;

use log::{debug, trace};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse UCI move #{}: {}", .pos + 1, .source)]
pub struct UciParseError {
    pub pos: usize,
    pub source: uci::ParseError,
}

/// Current position together with the moves that led to it
///
/// Only legal moves are accepted, and each of them can be undone, restoring the position
/// exactly as it was (including the enpassant target square).
#[derive(Debug, Clone)]
pub struct MoveChain {
    board: Board,
    stack: Vec<(Move, RawUndo)>,
}

impl MoveChain {
    pub fn new(b: Board) -> Self {
        MoveChain {
            board: b,
            stack: Vec::new(),
        }
    }

    pub fn new_initial() -> Self {
        Self::new(Board::initial())
    }

    pub fn from_uci_list(b: Board, uci_list: &str) -> Result<Self, UciParseError> {
        let mut res = MoveChain::new(b);
        res.push_uci_list(uci_list)?;
        Ok(res)
    }

    pub fn from_fen(s: &str) -> Result<Self, board::FenParseError> {
        Ok(Self::new(Board::from_fen(s)?))
    }

    /// Current position
    pub fn last(&self) -> &Board {
        &self.board
    }

    /// Number of moves made
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(m, _)| *m)
    }

    pub fn get(&self, idx: usize) -> Move {
        self.stack[idx].0
    }

    /// Last move made, if any
    pub fn last_move(&self) -> Option<Move> {
        self.stack.last().map(|(m, _)| *m)
    }

    /// Returns all the legal moves in the current position
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves()
    }

    /// Applies the move if it's legal in the current position
    ///
    /// The move is matched against the legal moves by its squares only. For promotions, the
    /// piece chosen in `mv` is kept. If the move is illegal, the position stays unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let (made, u) = mv.make_raw(&mut self.board).map_err(|e| {
            debug!("rejected illegal move {} in {}", mv, self.board);
            e
        })?;
        self.finish_push(made, u);
        Ok(())
    }

    pub fn push_uci(&mut self, s: &str) -> Result<(), uci::ParseError> {
        let (made, u) = moves::make::Uci(s).make_raw(&mut self.board)?;
        self.finish_push(made, u);
        Ok(())
    }

    pub fn push_uci_list(&mut self, uci_list: &str) -> Result<(), UciParseError> {
        for (pos, token) in uci_list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciParseError { pos, source })?;
        }
        Ok(())
    }

    fn finish_push(&mut self, mv: Move, u: RawUndo) {
        trace!("made move {} (ply {})", mv, self.stack.len() + 1);
        self.stack.push((mv, u));
        #[cfg(feature = "selftest")]
        self.board.self_test();
    }

    /// Undoes the last move and returns it
    ///
    /// Does nothing and returns `None` if no moves were made.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let (m, u) = self.stack.pop()?;
        moves::unmake_move_unchecked(&mut self.board, m, u);
        trace!("undone move {} (ply {})", m, self.stack.len() + 1);
        #[cfg(feature = "selftest")]
        self.board.self_test();
        Some(m)
    }

    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }
}

impl PartialEq<Self> for MoveChain {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.stack.len() == other.stack.len()
            && self
                .stack
                .iter()
                .zip(other.stack.iter())
                .all(|((m1, _), (m2, _))| m1 == m2)
    }
}

impl Eq for MoveChain {}

pub struct UciList<'a>(&'a MoveChain);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
