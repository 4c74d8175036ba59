//! Property tests over random legal playouts.

use chess_core::{Color, Move, PieceKind, Square};
use chess_engine::legality::hypothetical;
use chess_engine::movegen::{attacked_by, generate};
use chess_engine::{
    is_in_check, legal_moves, Board, CheckStatus, Game, Intent, Phase, RulesConfig, SquareSet,
};
use proptest::prelude::*;

/// Plays up to `choices.len()` moves, picking each from the legal move list
/// by index, and hands every position to `check` before its move is played.
fn playout(choices: &[usize], mut check: impl FnMut(&Game, &[Move])) {
    let config = RulesConfig::default();
    let mut game = Game::new();

    for &choice in choices {
        let moves = legal_moves(game.board(), game.turn(), game.last_move(), &config);
        check(&game, &moves);
        if moves.is_empty() {
            break;
        }

        let mov = moves[choice % moves.len()];
        assert!(game.apply_intent(Intent::SelectSquare(mov.from)).is_accepted());
        assert!(game.apply_intent(Intent::MoveTo(mov.to)).is_accepted());
        if game.phase() == Phase::PromotionPending {
            let kind = PieceKind::PROMOTIONS[choice % PieceKind::PROMOTIONS.len()];
            assert!(game.apply_intent(Intent::ChoosePromotion(kind)).is_accepted());
        }
    }
}

fn changed_squares(before: &Board, after: &Board) -> Vec<Square> {
    Square::all()
        .filter(|&sq| before.piece_at(sq) != after.piece_at(sq))
        .collect()
}

/// Union of pseudo-legal destinations of every piece of `color`.
fn pseudo_legal_union(board: &Board, color: Color, last_move: Option<Move>) -> SquareSet {
    board
        .pieces_of(color)
        .fold(SquareSet::EMPTY, |acc, (sq, _)| acc | generate(sq, board, last_move))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pseudo_legal_destinations_avoid_own_pieces(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        playout(&choices, |game, _| {
            let board = game.board();
            for (sq, piece) in board.pieces() {
                let own = board.occupied_by(piece.color);
                let destinations = generate(sq, board, game.last_move());
                assert!((destinations & own).is_empty(), "{} hits own piece", sq);
            }
        });
    }

    #[test]
    fn legal_moves_never_expose_own_king(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        playout(&choices, |game, moves| {
            for &mov in moves {
                let next = hypothetical(game.board(), mov);
                assert!(!is_in_check(&next, game.turn()), "{} exposes the king", mov);
            }
        });
    }

    #[test]
    fn hypothetical_moves_one_piece(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        playout(&choices, |game, moves| {
            let board = game.board();
            for &mov in moves {
                let next = hypothetical(board, mov);
                let changed = changed_squares(board, &next);
                let is_castle = board.piece_at(mov.from).map(|p| p.kind) == Some(PieceKind::King)
                    && mov.file_delta().abs() == 2;
                let limit = if is_castle { 4 } else { 3 };
                assert!(changed.contains(&mov.from) && changed.contains(&mov.to));
                assert!(changed.len() <= limit, "{} changed {:?}", mov, changed);
                let lost = board.pieces().count() - next.pieces().count();
                assert!(lost <= 1, "{} captured {} pieces", mov, lost);
            }
        });
    }

    #[test]
    fn attack_union_agrees_on_check(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        playout(&choices, |game, _| {
            let board = game.board();
            let us = game.turn();
            let them = us.opposite();
            let king = board.king_square(us).expect("king present");
            let by_attacks = attacked_by(board, them).contains(king);
            let by_moves = pseudo_legal_union(board, them, game.last_move()).contains(king);
            assert_eq!(by_attacks, by_moves);
            assert_eq!(by_attacks, is_in_check(board, us));
        });
    }

    #[test]
    fn check_status_is_consistent(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        playout(&choices, |game, moves| {
            assert!(game.board().validate().is_ok());
            let in_check = is_in_check(game.board(), game.turn());
            match game.check_status() {
                CheckStatus::None => assert!(!in_check && !moves.is_empty()),
                CheckStatus::Check(king) => {
                    assert!(in_check && !moves.is_empty());
                    assert_eq!(game.board().king_square(game.turn()), Some(king));
                }
                CheckStatus::Checkmate => assert!(in_check && moves.is_empty()),
                CheckStatus::Stalemate => assert!(!in_check && moves.is_empty()),
            }
        });
    }
}
