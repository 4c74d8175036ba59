//! Move representation.

use crate::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The side of the board a castling king moves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// Toward the rook on file 7 (O-O).
    Kingside,
    /// Toward the rook on file 0 (O-O-O).
    Queenside,
}

impl CastleSide {
    /// Returns the file step the king takes toward the rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// Returns the file the castling rook starts on.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }
}

/// Flags describing what kind of move was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal,
    /// Pawn two-square advance from its starting rank.
    DoublePush,
    /// King moved two files; the rook was relocated.
    Castle(CastleSide),
    /// Pawn captured a bypassing pawn en passant.
    EnPassant,
    /// Pawn reached the last rank and awaits (or received) a promotion choice.
    Promotion,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::Castle(_))
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveFlag::Promotion)
    }
}

/// A move of one piece from one square to another.
///
/// The special-move handler derives everything else (castling, en passant,
/// promotion) from the board the move is applied to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the signed file distance covered by the move.
    #[inline]
    pub const fn file_delta(self) -> i8 {
        self.to.file() as i8 - self.from.file() as i8
    }

    /// Returns the signed rank distance covered by the move.
    #[inline]
    pub const fn rank_delta(self) -> i8 {
        self.to.rank() as i8 - self.from.rank() as i8
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
