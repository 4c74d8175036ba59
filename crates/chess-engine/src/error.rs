//! Error types for the rules engine.

use chess_core::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an intent was refused.
///
/// These are ordinary user-input errors. A rejected intent leaves the game
/// exactly as it was.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}, but it is {turn}'s turn")]
    OpponentPiece {
        square: Square,
        owner: Color,
        turn: Color,
    },

    #[error("no piece is selected")]
    NoSelection,

    #[error("{to} is not a legal destination for the piece on {from}")]
    IllegalDestination { from: Square, to: Square },

    #[error("a promotion choice is pending for the pawn on {0}")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("a pawn cannot promote to a {0}")]
    InvalidPromotionPiece(PieceKind),

    #[error("the game is over")]
    GameOver,
}

/// A position that breaks a board invariant.
///
/// Legal play never produces one of these; the engine treats a violation
/// found after applying a move as a fatal bug.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{color} has {count} kings")]
    MultipleKings { color: Color, count: usize },

    #[error("{0} is in check but it is not their turn")]
    OpponentInCheck(Color),

    #[error("expected 64 squares, got {0}")]
    BadSquareCount(usize),

    #[error("{0} is in check while choosing a promotion piece")]
    PromotingSideInCheck(Color),

    #[error("pawn on {0} stands on a back rank")]
    PawnOnBackRank(Square),

    #[error("pending promotion on {square} does not hold a {color} pawn on its last rank")]
    BadPendingPromotion { square: Square, color: Color },
}

/// Errors from saving or restoring a game.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode or decode saved game: {0}")]
    Json(#[from] serde_json::Error),

    #[error("saved game is not a valid position: {0}")]
    Position(#[from] PositionError),
}
