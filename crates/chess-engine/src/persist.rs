//! Saving and restoring games.
//!
//! A [`SavedGame`] holds the 64 squares in row-major order, the side to move,
//! the last move (needed for en passant) and any pending promotion. Move
//! history and selection are not persisted.

use chess_core::{Color, Move, Piece, Square};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PersistError, PositionError};
use crate::game::{Game, PendingPromotion};
use crate::{Board, RulesConfig};

/// Serializable game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Square contents indexed `rank * 8 + file`.
    pub squares: Vec<Option<Piece>>,
    pub turn: Color,
    pub last_move: Option<Move>,
    #[serde(default)]
    pub pending_promotion: Option<PendingPromotion>,
}

impl SavedGame {
    /// Rebuilds the board, checking the square count.
    fn board(&self) -> Result<Board, PositionError> {
        if self.squares.len() != 64 {
            return Err(PositionError::BadSquareCount(self.squares.len()));
        }
        let mut board = Board::empty();
        for (sq, piece) in Square::all().zip(&self.squares) {
            if let Some(piece) = piece {
                board.put(sq, *piece);
            }
        }
        Ok(board)
    }
}

impl Game {
    /// Captures the persistent part of the game.
    pub fn save(&self) -> SavedGame {
        SavedGame {
            squares: Square::all().map(|sq| self.board().piece_at(sq)).collect(),
            turn: self.turn(),
            last_move: self.last_move(),
            pending_promotion: self.pending_promotion(),
        }
    }

    /// Rebuilds a game from saved state, validating it like a custom position.
    pub fn restore(saved: &SavedGame, config: RulesConfig) -> Result<Self, PositionError> {
        let board = saved.board()?;
        match saved.pending_promotion {
            Some(pending) if pending.color != saved.turn => {
                Err(PositionError::BadPendingPromotion {
                    square: pending.square,
                    color: pending.color,
                })
            }
            Some(pending) => Game::with_pending_promotion(board, pending, saved.last_move, config),
            None => Game::from_position(board, saved.turn, saved.last_move, config),
        }
    }

    /// Saves the game as JSON.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(&self.save())?)
    }

    /// Restores a game from JSON produced by [`Game::to_json`].
    pub fn from_json(json: &str, config: RulesConfig) -> Result<Self, PersistError> {
        let saved: SavedGame = serde_json::from_str(json)?;
        let game = Game::restore(&saved, config)?;
        debug!(turn = %game.turn(), "game restored");
        Ok(game)
    }
}
