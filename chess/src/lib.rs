//! # Raychess
//!
//! Legal move generator and game state tracker for standard chess, without castling.
//!
//! The board is a plain 8x8 array of cells. Legal moves are produced in three steps:
//!
//! - [`analyze`] scans the eight rays and the knight jumps around the king, finding the checks
//!   and the pinned pieces;
//! - [`movegen`] generates moves which respect the pins and never move the king onto an
//!   attacked square;
//! - [`legal`] drops the moves which don't get the king out of check.
//!
//! [`MoveChain`] keeps the current position with the history of moves, so they can be undone.
//!
//! # Example
//!
//! ```
//! # use raychess::{MoveChain, Move, Coord};
//! #
//! let mut chain = MoveChain::new_initial();
//! assert_eq!(chain.legal_moves().len(), 20);
//!
//! let e2: Coord = "e2".parse().unwrap();
//! let e4: Coord = "e4".parse().unwrap();
//! chain.apply_move(Move::new(chain.last(), e2, e4)).unwrap();
//! assert_eq!(chain.last().ep_dest(), Some("e3".parse().unwrap()));
//!
//! assert_eq!(chain.undo_last_move().map(|m| m.to_string()), Some("e2e4".to_string()));
//! ```

pub mod analyze;
pub mod board;
pub mod chain;
pub mod legal;
pub mod movegen;
pub mod moves;

pub use raychess_base::{bitboard, geometry, types};

pub use analyze::{Analysis, CheckInfo, PinInfo};
pub use bitboard::Bitboard;
pub use board::{Board, RawBoard};
pub use chain::MoveChain;
pub use movegen::MoveList;
pub use moves::{IllegalMoveError, Make, Move, MoveKind, PromotePiece};
pub use types::{Cell, Color, Coord, File, InvalidSquareError, Piece, Rank};
