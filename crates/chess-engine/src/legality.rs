//! Check detection and legal move filtering.

use chess_core::{CastleSide, Color, Move, PieceKind, Square};

use crate::movegen::{self, attacked_by};
use crate::{special, Board, RulesConfig, SquareSet};

/// Returns true if the king of `color` is attacked on `board`.
///
/// A board without a king for `color` is never in check; such boards break
/// the one-king invariant and are rejected by [`Board::validate`].
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => attacked_by(board, color.opposite()).contains(king),
        None => false,
    }
}

/// Returns the board that results from applying `mov` to a copy of `board`.
///
/// Uses the same execution routine as the live game, so an en passant
/// capture or a castling rook move is reflected in the result.
pub fn hypothetical(board: &Board, mov: Move) -> Board {
    let mut next = board.clone();
    special::apply(&mut next, mov);
    next
}

/// Removes from `candidates` every destination that would leave the mover's
/// own king attacked, plus castling moves that start in or cross an attacked
/// square.
pub fn filter_legal(
    candidates: SquareSet,
    from: Square,
    board: &Board,
    config: &RulesConfig,
) -> SquareSet {
    let Some(mover) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    let them = mover.color.opposite();

    // Attacked squares on the real board; only needed for castling.
    let mut attacked: Option<SquareSet> = None;

    candidates
        .iter()
        .filter(|&to| {
            if board.piece_at(to).is_some_and(|p| p.kind == PieceKind::King) {
                return false;
            }

            let mov = Move::new(from, to);
            if mover.kind == PieceKind::King && mov.file_delta().abs() == 2 {
                let attacked = *attacked.get_or_insert_with(|| attacked_by(board, them));
                if !castling_path_safe(mov, attacked, config) {
                    return false;
                }
            }

            !is_in_check(&hypothetical(board, mov), mover.color)
        })
        .collect()
}

/// Returns false if the castling king starts in check (unless allowed) or
/// passes through an attacked square on its way toward the rook.
fn castling_path_safe(mov: Move, attacked: SquareSet, config: &RulesConfig) -> bool {
    if !config.castle_out_of_check && attacked.contains(mov.from) {
        return false;
    }
    let side = if mov.file_delta() > 0 {
        CastleSide::Kingside
    } else {
        CastleSide::Queenside
    };
    let dir = side.direction();
    [mov.from.offset(dir, 0), mov.from.offset(2 * dir, 0)]
        .into_iter()
        .flatten()
        .all(|sq| !attacked.contains(sq))
}

/// Returns the legal destinations of the piece standing on `from`.
pub fn legal_destinations(
    from: Square,
    board: &Board,
    last_move: Option<Move>,
    config: &RulesConfig,
) -> SquareSet {
    let candidates = movegen::generate(from, board, last_move);
    filter_legal(candidates, from, board, config)
}

/// Returns every legal move available to `color`.
pub fn legal_moves(
    board: &Board,
    color: Color,
    last_move: Option<Move>,
    config: &RulesConfig,
) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            legal_destinations(from, board, last_move, config)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Returns true if `color` has at least one legal move.
pub fn has_any_legal_move(
    board: &Board,
    color: Color,
    last_move: Option<Move>,
    config: &RulesConfig,
) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_destinations(from, board, last_move, config).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn put(board: &mut Board, file: u8, rank: u8, kind: PieceKind, color: Color) {
        board.put(sq(file, rank), Piece::new(kind, color));
    }

    #[test]
    fn startpos_not_in_check() {
        let board = Board::standard();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn rook_gives_check_on_open_file() {
        let mut board = Board::empty();
        put(&mut board, 4, 0, PieceKind::King, Color::White);
        put(&mut board, 4, 5, PieceKind::Rook, Color::Black);
        put(&mut board, 0, 7, PieceKind::King, Color::Black);
        assert!(is_in_check(&board, Color::White));

        put(&mut board, 4, 3, PieceKind::Knight, Color::White);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 4, 5, PieceKind::Bishop, Color::White);
        put(&mut board, 4, 0, PieceKind::Rook, Color::Black);
        put(&mut board, 0, 0, PieceKind::King, Color::Black);

        assert!(legal_destinations(sq(4, 5), &board, None, &RulesConfig::default()).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 3, 0, PieceKind::Rook, Color::Black);
        put(&mut board, 0, 0, PieceKind::King, Color::Black);

        let moves = legal_destinations(sq(4, 7), &board, None, &RulesConfig::default());
        assert!(!moves.contains(sq(3, 7)));
        assert!(!moves.contains(sq(3, 6)));
        assert!(moves.contains(sq(5, 7)));
        assert!(moves.contains(sq(4, 6)));
    }

    #[test]
    fn king_captures_are_never_legal() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 4, 0, PieceKind::King, Color::Black);
        put(&mut board, 4, 3, PieceKind::Rook, Color::White);

        let candidates = movegen::generate(sq(4, 3), &board, None);
        assert!(candidates.contains(sq(4, 0)));
        let legal = filter_legal(candidates, sq(4, 3), &board, &RulesConfig::default());
        assert!(!legal.contains(sq(4, 0)));
    }

    #[test]
    fn castling_through_attacked_square_rejected() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 0, 7, PieceKind::Rook, Color::White);
        put(&mut board, 7, 7, PieceKind::Rook, Color::White);
        put(&mut board, 5, 0, PieceKind::Rook, Color::Black);
        put(&mut board, 6, 2, PieceKind::King, Color::Black);

        let moves = legal_destinations(sq(4, 7), &board, None, &RulesConfig::default());
        assert!(!moves.contains(sq(6, 7)));
        assert!(moves.contains(sq(2, 7)));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 0, 7, PieceKind::Rook, Color::White);
        put(&mut board, 1, 0, PieceKind::Rook, Color::Black);
        put(&mut board, 7, 0, PieceKind::King, Color::Black);

        let moves = legal_destinations(sq(4, 7), &board, None, &RulesConfig::default());
        assert!(moves.contains(sq(2, 7)));
    }

    #[test]
    fn castling_out_of_check_is_configurable() {
        let mut board = Board::empty();
        put(&mut board, 4, 7, PieceKind::King, Color::White);
        put(&mut board, 7, 7, PieceKind::Rook, Color::White);
        put(&mut board, 4, 0, PieceKind::Rook, Color::Black);
        put(&mut board, 0, 0, PieceKind::King, Color::Black);

        let strict = legal_destinations(sq(4, 7), &board, None, &RulesConfig::default());
        assert!(!strict.contains(sq(6, 7)));

        let lenient = RulesConfig {
            castle_out_of_check: true,
            ..RulesConfig::default()
        };
        let moves = legal_destinations(sq(4, 7), &board, None, &lenient);
        assert!(moves.contains(sq(6, 7)));
    }

    #[test]
    fn en_passant_exposing_king_on_rank_rejected() {
        let mut board = Board::empty();
        put(&mut board, 0, 3, PieceKind::King, Color::White);
        board.put(
            sq(1, 3),
            Piece {
                kind: PieceKind::Pawn,
                color: Color::White,
                move_count: 3,
            },
        );
        board.put(
            sq(2, 3),
            Piece {
                kind: PieceKind::Pawn,
                color: Color::Black,
                move_count: 1,
            },
        );
        put(&mut board, 7, 3, PieceKind::Rook, Color::Black);
        put(&mut board, 7, 0, PieceKind::King, Color::Black);
        let double = Move::new(sq(2, 1), sq(2, 3));

        let candidates = movegen::generate(sq(1, 3), &board, Some(double));
        assert!(candidates.contains(sq(2, 2)));
        let legal = legal_destinations(sq(1, 3), &board, Some(double), &RulesConfig::default());
        assert!(!legal.contains(sq(2, 2)));
        assert!(legal.contains(sq(1, 2)));
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let board = Board::standard();
        let config = RulesConfig::default();
        assert_eq!(legal_moves(&board, Color::White, None, &config).len(), 20);
        assert_eq!(legal_moves(&board, Color::Black, None, &config).len(), 20);
        assert!(has_any_legal_move(&board, Color::White, None, &config));
    }

    #[test]
    fn hypothetical_leaves_original_untouched() {
        let board = Board::standard();
        let after = hypothetical(&board, Move::new(sq(4, 6), sq(4, 4)));
        assert_eq!(board, Board::standard());
        assert!(after.is_empty(sq(4, 6)));
        assert!(after.piece_at(sq(4, 4)).is_some());
    }
}
