//! Attack sets for all piece kinds.
//!
//! An attack set is every square a piece threatens, whoever stands there.
//! For an occupied enemy square it agrees with the piece's pseudo-legal
//! destinations; it differs only on empty squares (pawns threaten their
//! diagonals but not their push squares, kings never threaten by castling).

use chess_core::{Color, Piece, PieceKind, Square};

use crate::{Board, SquareSet};

/// Knight jump offsets as (file, rank) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// One-step king offsets.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Rook directions.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop directions.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

fn offsets_from(sq: Square, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .collect()
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> SquareSet {
    offsets_from(sq, &KNIGHT_OFFSETS)
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> SquareSet {
    offsets_from(sq, &KING_OFFSETS)
}

/// Returns the two forward diagonals a pawn of the given color threatens.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    let dir = color.pawn_direction();
    offsets_from(sq, &[(-1, dir), (1, dir)])
}

/// Walks each direction until the board edge, including the first occupied
/// square met on the way.
pub fn slider_attacks(sq: Square, board: &Board, directions: &[(i8, i8)]) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = sq.offset(df, dr);
        while let Some(target) = cursor {
            attacks.insert(target);
            if !board.is_empty(target) {
                break;
            }
            cursor = target.offset(df, dr);
        }
    }
    attacks
}

/// Returns rook attacks from the given square.
#[inline]
pub fn rook_attacks(sq: Square, board: &Board) -> SquareSet {
    slider_attacks(sq, board, &ORTHOGONAL)
}

/// Returns bishop attacks from the given square.
#[inline]
pub fn bishop_attacks(sq: Square, board: &Board) -> SquareSet {
    slider_attacks(sq, board, &DIAGONAL)
}

/// Returns queen attacks from the given square.
#[inline]
pub fn queen_attacks(sq: Square, board: &Board) -> SquareSet {
    rook_attacks(sq, board) | bishop_attacks(sq, board)
}

/// Returns the squares a piece standing on `sq` threatens.
pub fn piece_attacks(sq: Square, piece: Piece, board: &Board) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(sq, piece.color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, board),
        PieceKind::Rook => rook_attacks(sq, board),
        PieceKind::Queen => queen_attacks(sq, board),
        PieceKind::King => king_attacks(sq),
    }
}

/// Returns every square threatened by at least one piece of `color`.
pub fn attacked_by(board: &Board, color: Color) -> SquareSet {
    board
        .pieces_of(color)
        .fold(SquareSet::EMPTY, |acc, (sq, piece)| {
            acc | piece_attacks(sq, piece, board)
        })
}

/// Returns true if the given square is threatened by `by_color`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| piece_attacks(from, piece, board).contains(sq))
}
