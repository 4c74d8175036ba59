//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 piece placement with per-piece move counters
//! - [`SquareSet`] - 64-bit set of squares used for destinations and attacks
//! - [`Game`] - Intent-driven game state machine with check, checkmate and
//!   stalemate detection
//! - Pseudo-legal move generation per piece kind and a check-aware filter
//! - Castling, en passant and a two-step promotion sub-turn
//! - JSON save/restore via [`SavedGame`]
//!
//! # Architecture
//!
//! Move generators only follow movement patterns and occupancy. The legality
//! filter replays each candidate on a copy of the board with the same routine
//! the live game uses, then discards moves that leave the mover's king
//! attacked. The game drives everything from four intents and returns a
//! read-only [`Snapshot`] after each one.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{Game, Intent, Phase};
//!
//! let mut game = Game::new();
//! let e2: Square = "e2".parse().unwrap();
//! let e4: Square = "e4".parse().unwrap();
//!
//! game.apply_intent(Intent::SelectSquare(e2));
//! let result = game.apply_intent(Intent::MoveTo(e4));
//! assert!(result.is_accepted());
//! assert_eq!(result.snapshot.phase, Phase::Idle);
//! println!("{}", game.board());
//! ```

mod board;
mod config;
mod error;
mod game;
pub mod legality;
pub mod movegen;
mod persist;
pub mod special;
mod square_set;

pub use board::Board;
pub use config::RulesConfig;
pub use error::{IntentError, PersistError, PositionError};
pub use game::{
    CheckStatus, Game, Intent, IntentResult, MoveRecord, PendingPromotion, Phase, Snapshot,
    Transition,
};
pub use legality::{filter_legal, is_in_check, legal_destinations, legal_moves};
pub use movegen::{attacked_by, generate, is_square_attacked};
pub use persist::SavedGame;
pub use square_set::SquareSet;
