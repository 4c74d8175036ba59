//! The game state machine.
//!
//! The [`Game`] struct owns the board and all positional metadata and is
//! driven exclusively by [`Intent`]s:
//! - `Idle` -> `Selected` when a piece of the side to move is selected
//! - `Selected` -> `Idle` on deselect, or after a completed move
//! - `Selected` -> `PromotionPending` when a pawn reaches the last rank
//! - `PromotionPending` -> `Idle` once a promotion piece is chosen
//!
//! Every intent returns an [`IntentResult`] carrying a read-only [`Snapshot`]
//! for the presentation layer. Rejected intents leave the game untouched.

use chess_core::{Color, Move, MoveFlag, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::{IntentError, PositionError};
use crate::legality::{has_any_legal_move, is_in_check, legal_destinations};
use crate::{special, Board, RulesConfig, SquareSet};

/// A request from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Select the piece on a square (or, while selected, cancel the selection).
    SelectSquare(Square),
    /// Move the selected piece to a square.
    MoveTo(Square),
    /// Complete a pending promotion with the given piece kind.
    ChoosePromotion(PieceKind),
    /// Drop the current selection.
    Deselect,
}

/// Control state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// A piece of the side to move is selected.
    Selected,
    /// A pawn reached the last rank and waits for a piece choice.
    PromotionPending,
}

/// Check annotation for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// The side to move is not in check.
    None,
    /// The side to move is in check; the payload is its king's square.
    Check(Square),
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

impl CheckStatus {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, CheckStatus::Checkmate | CheckStatus::Stalemate)
    }
}

/// A pawn waiting on its last rank for a promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub square: Square,
    pub color: Color,
}

/// A completed move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Side that made the move.
    pub color: Color,
    /// Kind of the piece that moved (a promoting pawn is recorded as a pawn).
    pub kind: PieceKind,
    /// Source and destination squares.
    pub mov: Move,
    /// What kind of move it was.
    pub flag: MoveFlag,
    /// The captured piece, if any.
    pub captured: Option<Piece>,
    /// The kind the pawn promoted to, once chosen.
    pub promotion: Option<PieceKind>,
}

/// What an accepted intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// A piece was selected; its legal destinations are attached.
    Selected {
        square: Square,
        destinations: SquareSet,
    },
    /// The selection was dropped.
    Deselected,
    /// A move completed and the turn passed to the opponent.
    Moved(MoveRecord),
    /// A pawn reached the last rank; a promotion choice is now required.
    PromotionRequested { square: Square },
    /// A pending promotion completed and the turn passed to the opponent.
    Promoted { square: Square, kind: PieceKind },
}

/// Read-only view of the game for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Color,
    pub phase: Phase,
    pub selection: Option<Square>,
    pub legal_destinations: SquareSet,
    pub check_status: CheckStatus,
    pub pending_promotion: Option<PendingPromotion>,
    pub last_move: Option<Move>,
}

/// The outcome of one intent plus the resulting game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    pub outcome: Result<Transition, IntentError>,
    pub snapshot: Snapshot,
}

impl IntentResult {
    /// Returns true if the intent was accepted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// A two-player chess game driven by intents.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    last_move: Option<Move>,
    selection: Option<Square>,
    legal: SquareSet,
    check_status: CheckStatus,
    pending_promotion: Option<PendingPromotion>,
    history: Vec<MoveRecord>,
    config: RulesConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard setup and default rules.
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Creates a new game with the standard setup.
    pub fn with_config(config: RulesConfig) -> Self {
        Game {
            board: Board::standard(),
            turn: Color::White,
            last_move: None,
            selection: None,
            legal: SquareSet::EMPTY,
            check_status: CheckStatus::None,
            pending_promotion: None,
            history: Vec::new(),
            config,
        }
    }

    /// Creates a game from a custom position.
    ///
    /// The board must hold exactly one king per color and no pawn on a back
    /// rank, and the side not to move must not be in check. Check status for
    /// `turn` is computed.
    pub fn from_position(
        board: Board,
        turn: Color,
        last_move: Option<Move>,
        config: RulesConfig,
    ) -> Result<Self, PositionError> {
        board.validate()?;
        board.validate_pawn_ranks(None)?;
        if is_in_check(&board, turn.opposite()) {
            return Err(PositionError::OpponentInCheck(turn.opposite()));
        }
        let mut game = Game {
            board,
            turn,
            last_move,
            ..Self::with_config(config)
        };
        game.refresh_check_status();
        Ok(game)
    }

    /// Restores a game that stopped while a promotion choice was pending.
    ///
    /// Rejects boards where the promoting side's own king is in check.
    pub(crate) fn with_pending_promotion(
        board: Board,
        pending: PendingPromotion,
        last_move: Option<Move>,
        config: RulesConfig,
    ) -> Result<Self, PositionError> {
        board.validate()?;
        let bad = PositionError::BadPendingPromotion {
            square: pending.square,
            color: pending.color,
        };
        let holds_pawn = board
            .piece_at(pending.square)
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == pending.color);
        if !holds_pawn || pending.square.rank() != pending.color.promotion_rank() {
            return Err(bad);
        }
        board.validate_pawn_ranks(Some(pending.square))?;
        if is_in_check(&board, pending.color) {
            return Err(PositionError::PromotingSideInCheck(pending.color));
        }
        Ok(Game {
            board,
            turn: pending.color,
            last_move,
            pending_promotion: Some(pending),
            ..Self::with_config(config)
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move (the promoting side while a promotion is pending).
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns the selected square, if any.
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// Returns the cached legal destinations of the selected piece.
    pub fn legal_destinations(&self) -> SquareSet {
        self.legal
    }

    /// Returns the check status of the side to move.
    pub fn check_status(&self) -> CheckStatus {
        self.check_status
    }

    /// Returns the pending promotion, if any.
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// Returns the current control state.
    pub fn phase(&self) -> Phase {
        if self.pending_promotion.is_some() {
            Phase::PromotionPending
        } else if self.selection.is_some() {
            Phase::Selected
        } else {
            Phase::Idle
        }
    }

    /// Returns true after checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.check_status.is_terminal()
    }

    /// Returns completed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the pieces `color` has captured, in capture order.
    pub fn captured_by(&self, color: Color) -> Vec<Piece> {
        self.history
            .iter()
            .filter(|record| record.color == color)
            .filter_map(|record| record.captured)
            .collect()
    }

    /// Returns the legal destinations of the piece on `square` without
    /// selecting it.
    pub fn legal_destinations_from(&self, square: Square) -> SquareSet {
        legal_destinations(square, &self.board, self.last_move, &self.config)
    }

    /// Returns a read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            turn: self.turn,
            phase: self.phase(),
            selection: self.selection,
            legal_destinations: self.legal,
            check_status: self.check_status,
            pending_promotion: self.pending_promotion,
            last_move: self.last_move,
        }
    }

    /// Starts over from the standard setup, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
        debug!("game reset");
    }

    /// Applies one intent.
    pub fn apply_intent(&mut self, intent: Intent) -> IntentResult {
        let outcome = self.dispatch(intent);
        if let Err(err) = &outcome {
            debug!(?intent, %err, "intent rejected");
        }
        IntentResult {
            outcome,
            snapshot: self.snapshot(),
        }
    }

    /// Applies a click on a square the way a board UI does: select in `Idle`;
    /// in `Selected`, re-clicking the selection or clicking a non-destination
    /// deselects and clicking a legal destination moves.
    pub fn click(&mut self, square: Square) -> IntentResult {
        let intent = match self.selection {
            Some(selected) if self.pending_promotion.is_none() => {
                if selected != square && self.legal.contains(square) {
                    Intent::MoveTo(square)
                } else {
                    Intent::Deselect
                }
            }
            _ => Intent::SelectSquare(square),
        };
        self.apply_intent(intent)
    }

    fn dispatch(&mut self, intent: Intent) -> Result<Transition, IntentError> {
        if let Some(pending) = self.pending_promotion {
            return match intent {
                Intent::ChoosePromotion(kind) => self.complete_promotion(pending, kind),
                _ => Err(IntentError::PromotionPending(pending.square)),
            };
        }

        match intent {
            Intent::ChoosePromotion(_) => Err(IntentError::NoPromotionPending),
            Intent::Deselect => {
                self.clear_selection();
                Ok(Transition::Deselected)
            }
            Intent::SelectSquare(_) | Intent::MoveTo(_)
                if self.config.lock_finished_games && self.is_game_over() =>
            {
                Err(IntentError::GameOver)
            }
            Intent::SelectSquare(square) => match self.selection {
                None => self.select(square),
                Some(_) => {
                    self.clear_selection();
                    Ok(Transition::Deselected)
                }
            },
            Intent::MoveTo(square) => self.move_selected(square),
        }
    }

    fn select(&mut self, square: Square) -> Result<Transition, IntentError> {
        let piece = self
            .board
            .piece_at(square)
            .ok_or(IntentError::EmptySquare(square))?;
        if piece.color != self.turn {
            return Err(IntentError::OpponentPiece {
                square,
                owner: piece.color,
                turn: self.turn,
            });
        }

        let destinations = self.legal_destinations_from(square);
        self.selection = Some(square);
        self.legal = destinations;
        debug!(%square, %piece, moves = destinations.len(), "piece selected");
        Ok(Transition::Selected {
            square,
            destinations,
        })
    }

    fn clear_selection(&mut self) {
        if let Some(square) = self.selection.take() {
            debug!(%square, "selection cleared");
        }
        self.legal = SquareSet::EMPTY;
    }

    fn move_selected(&mut self, to: Square) -> Result<Transition, IntentError> {
        let from = self.selection.ok_or(IntentError::NoSelection)?;
        if !self.legal.contains(to) {
            return Err(IntentError::IllegalDestination { from, to });
        }

        let mov = Move::new(from, to);
        let applied =
            special::apply(&mut self.board, mov).ok_or(IntentError::EmptySquare(from))?;
        self.clear_selection();
        self.last_move = Some(mov);
        self.verify_invariants();

        let record = MoveRecord {
            color: applied.piece.color,
            kind: applied.piece.kind,
            mov,
            flag: applied.flag,
            captured: applied.captured,
            promotion: None,
        };
        self.history.push(record);

        if applied.promotion_pending() {
            self.pending_promotion = Some(PendingPromotion {
                square: to,
                color: applied.piece.color,
            });
            info!(%mov, color = %applied.piece.color, "pawn reached last rank, awaiting promotion");
            return Ok(Transition::PromotionRequested { square: to });
        }

        info!(%mov, color = %record.color, kind = %record.kind, flag = ?record.flag, "move completed");
        self.finish_turn();
        Ok(Transition::Moved(record))
    }

    fn complete_promotion(
        &mut self,
        pending: PendingPromotion,
        kind: PieceKind,
    ) -> Result<Transition, IntentError> {
        if !kind.is_promotion_target() {
            return Err(IntentError::InvalidPromotionPiece(kind));
        }

        special::promote(&mut self.board, pending.square, kind);
        self.pending_promotion = None;
        if let Some(record) = self
            .history
            .last_mut()
            .filter(|r| r.flag.is_promotion() && r.mov.to == pending.square)
        {
            record.promotion = Some(kind);
        }
        self.verify_invariants();

        info!(square = %pending.square, %kind, color = %pending.color, "promotion completed");
        self.finish_turn();
        Ok(Transition::Promoted {
            square: pending.square,
            kind,
        })
    }

    fn finish_turn(&mut self) {
        self.turn = self.turn.opposite();
        self.refresh_check_status();
    }

    /// Recomputes the check status for the side to move.
    ///
    /// The search for any legal move only runs when the side to move is in
    /// check, or when stalemate detection is enabled.
    fn refresh_check_status(&mut self) {
        let in_check = is_in_check(&self.board, self.turn);
        let needs_search = in_check || self.config.detect_stalemate;
        let can_move = !needs_search
            || has_any_legal_move(&self.board, self.turn, self.last_move, &self.config);

        self.check_status = match (in_check, self.board.king_square(self.turn)) {
            (true, Some(_)) if !can_move => CheckStatus::Checkmate,
            (true, Some(king)) => CheckStatus::Check(king),
            _ if !can_move => CheckStatus::Stalemate,
            _ => CheckStatus::None,
        };

        match self.check_status {
            CheckStatus::Checkmate => info!(loser = %self.turn, "checkmate"),
            CheckStatus::Stalemate => info!(side = %self.turn, "stalemate"),
            CheckStatus::Check(king) => debug!(side = %self.turn, %king, "check"),
            CheckStatus::None => {}
        }
    }

    /// Aborts on a board that breaks the one-king invariant.
    fn verify_invariants(&self) {
        if let Err(err) = self.board.validate() {
            error!(%err, board = %self.board, "board invariant violated");
            panic!("internal invariant violation: {err}");
        }
    }
}
