mod base;

pub mod make;
pub mod uci;

pub use base::*;
pub use make::Make;

pub(crate) use base::{make_move_unchecked, unmake_move_unchecked};
