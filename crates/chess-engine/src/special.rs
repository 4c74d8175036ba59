//! Move execution, including castling, en passant and promotion.
//!
//! [`apply`] is the only routine that moves pieces. The legality filter runs it
//! on a cloned board to build each hypothetical position, and the game runs it
//! on the live board once a destination is chosen.

use chess_core::{CastleSide, Move, MoveFlag, Piece, PieceKind, Square};

use crate::Board;

/// The effect of applying a move to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The move that was applied.
    pub mov: Move,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    /// What kind of move it turned out to be.
    pub flag: MoveFlag,
    /// The captured piece, including a pawn taken en passant.
    pub captured: Option<Piece>,
}

impl Applied {
    /// Returns true if the moved pawn now waits for a promotion choice.
    #[inline]
    pub fn promotion_pending(&self) -> bool {
        self.flag.is_promotion()
    }
}

/// Applies a move to the board.
///
/// The moving piece's `move_count` goes up by one, and so does a castling
/// rook's. A pawn reaching rank 0 or 7 stays a pawn; the caller completes the
/// promotion with [`promote`]. Returns `None` without touching the board when
/// `mov.from` is empty.
pub fn apply(board: &mut Board, mov: Move) -> Option<Applied> {
    let before = board.take(mov.from)?;
    let mut piece = before;
    let mut captured = board.take(mov.to);
    let mut flag = MoveFlag::Normal;

    match piece.kind {
        PieceKind::Pawn => {
            if mov.file_delta() != 0 && captured.is_none() {
                // Diagonal step onto an empty square: the bypassed pawn sits
                // beside the origin.
                captured = Square::new(mov.to.file(), mov.from.rank()).and_then(|sq| board.take(sq));
                flag = MoveFlag::EnPassant;
            } else if mov.rank_delta().abs() == 2 {
                flag = MoveFlag::DoublePush;
            }
            if mov.to.rank() == 0 || mov.to.rank() == 7 {
                flag = MoveFlag::Promotion;
            }
        }
        PieceKind::King if mov.file_delta().abs() == 2 => {
            let side = if mov.file_delta() > 0 {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            relocate_rook(board, mov, side);
            flag = MoveFlag::Castle(side);
        }
        _ => {}
    }

    piece.move_count += 1;
    board.put(mov.to, piece);

    Some(Applied {
        mov,
        piece: before,
        flag,
        captured,
    })
}

/// Moves the castling rook next to the king's destination, on the side the
/// rook came from.
fn relocate_rook(board: &mut Board, king_move: Move, side: CastleSide) {
    let rook_from = Square::new(side.rook_file(), king_move.from.rank());
    let rook_to = king_move.to.offset(-side.direction(), 0);
    if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
        if let Some(mut rook) = board.take(rook_from) {
            rook.move_count += 1;
            board.put(rook_to, rook);
        }
    }
}

/// Replaces the pawn on `square` with a fresh piece of the chosen kind.
///
/// The new piece starts with `move_count` 0. Returns the replaced pawn, or
/// `None` (leaving the board untouched) if no piece stands there.
pub fn promote(board: &mut Board, square: Square, kind: PieceKind) -> Option<Piece> {
    let pawn = board.piece_at(square)?;
    board.put(square, Piece::new(kind, pawn.color))
}
