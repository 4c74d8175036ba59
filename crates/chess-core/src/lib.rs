//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`], [`MoveFlag`] and [`CastleSide`] for move representation

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{CastleSide, Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{ParseSquareError, Square};
