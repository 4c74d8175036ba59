//! Pseudo-legal move generation.
//!
//! One generator per piece kind, dispatched by [`generate`]. Generators only
//! follow movement patterns and board occupancy; whether the mover's king
//! ends up attacked is decided by [`crate::legality`].

mod attacks;

use chess_core::{CastleSide, Color, Move, Piece, PieceKind, Square};

use crate::{Board, SquareSet};

pub use attacks::{
    attacked_by, bishop_attacks, is_square_attacked, king_attacks, knight_attacks,
    pawn_attacks, piece_attacks, queen_attacks, rook_attacks, slider_attacks,
};

/// Generates the pseudo-legal destinations of the piece standing on `from`.
///
/// `last_move` is the most recent completed move and is only consulted for en
/// passant. An empty square yields an empty set.
pub fn generate(from: Square, board: &Board, last_move: Option<Move>) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    let own = board.occupied_by(piece.color);

    match piece.kind {
        PieceKind::Pawn => pawn_moves(from, piece, board, last_move),
        PieceKind::Knight => knight_attacks(from) & !own,
        PieceKind::Bishop => bishop_attacks(from, board) & !own,
        PieceKind::Rook => rook_attacks(from, board) & !own,
        PieceKind::Queen => queen_attacks(from, board) & !own,
        PieceKind::King => king_moves(from, piece, board) & !own,
    }
}

/// Generates pseudo-legal pawn moves: pushes, captures and en passant.
fn pawn_moves(from: Square, pawn: Piece, board: &Board, last_move: Option<Move>) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let dir = pawn.color.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        moves.insert(one);
        if pawn.is_unmoved() {
            if let Some(two) = one.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
                moves.insert(two);
            }
        }
    }

    // Captures
    let enemies = board.occupied_by(pawn.color.opposite());
    moves |= pawn_attacks(from, pawn.color) & enemies;

    // En passant
    for df in [-1, 1] {
        let Some(beside) = from.offset(df, 0) else {
            continue;
        };
        if !just_double_pushed(beside, pawn.color.opposite(), board, last_move) {
            continue;
        }
        if let Some(target) = from.offset(df, dir).filter(|&sq| board.is_empty(sq)) {
            moves.insert(target);
        }
    }

    moves
}

/// Returns true if `sq` holds a pawn of `color` whose only move so far was the
/// two-square advance recorded as `last_move`.
fn just_double_pushed(sq: Square, color: Color, board: &Board, last_move: Option<Move>) -> bool {
    let Some(piece) = board.piece_at(sq) else {
        return false;
    };
    if piece.kind != PieceKind::Pawn || piece.color != color || piece.move_count != 1 {
        return false;
    }
    let start = color.pawn_start_rank();
    let landing = start as i8 + 2 * color.pawn_direction();
    if sq.rank() as i8 != landing {
        return false;
    }
    Square::new(sq.file(), start).is_some_and(|origin| last_move == Some(Move::new(origin, sq)))
}

/// Generates one-step king moves plus castling candidates.
///
/// Castling candidates only require an unmoved king and rook with nothing in
/// between; attack constraints are applied by the legality filter.
fn king_moves(from: Square, king: Piece, board: &Board) -> SquareSet {
    let mut moves = king_attacks(from);
    if !king.is_unmoved() {
        return moves;
    }

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if let Some(target) = castling_target(from, king.color, side, board) {
            moves.insert(target);
        }
    }
    moves
}

/// Returns the king's landing square if castling toward `side` is available
/// as far as piece placement goes.
pub(crate) fn castling_target(
    king_sq: Square,
    color: Color,
    side: CastleSide,
    board: &Board,
) -> Option<Square> {
    let rook_sq = Square::new(side.rook_file(), king_sq.rank())?;
    let rook = board.piece_at(rook_sq)?;
    if rook.kind != PieceKind::Rook || rook.color != color || !rook.is_unmoved() {
        return None;
    }

    // The king needs two squares of travel strictly short of the rook.
    let distance = (rook_sq.file() as i8 - king_sq.file() as i8).abs();
    if distance < 3 {
        return None;
    }

    let dir = side.direction();
    let mut cursor = king_sq.offset(dir, 0)?;
    while cursor != rook_sq {
        if !board.is_empty(cursor) {
            return None;
        }
        cursor = cursor.offset(dir, 0)?;
    }

    king_sq.offset(2 * dir, 0)
}
