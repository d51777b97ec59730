//! # Base types for raychess
//!
//! This is an auxiliary crate for `raychess`, which contains the plain value types: squares,
//! pieces, board geometry and square sets. It is kept separate so that these types have no
//! dependency on the move generator.
//!
//! Normally you don't want to use this crate directly. Use `raychess` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
