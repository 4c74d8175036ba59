//! Board representation.

use chess_core::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PositionError;
use crate::SquareSet;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// Each slot owns the piece standing on it. Moving a piece takes it out of its
/// source slot and puts it into the destination slot, so two pieces can never
/// share a square.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// `squares[rank][file]`, rank 0 at the top.
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Creates a board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard 32-piece starting setup.
    ///
    /// Black occupies ranks 0-1 and White ranks 6-7; both kings stand on file 4.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_rank() as usize;
            for file in 0..8 {
                board.squares[back][file] = Some(Piece::new(BACK_RANK[file], color));
                board.squares[pawns][file] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places a piece on a square, returning whatever stood there before.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].replace(piece)
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].take()
    }

    /// Iterates over every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the set of squares occupied by the given color.
    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.pieces_of(color).map(|(sq, _)| sq).collect()
    }

    /// Returns the square of the given color's king.
    ///
    /// `None` only on boards that break the one-king invariant.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Checks that each color has exactly one king.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::ALL {
            let count = self
                .pieces_of(color)
                .filter(|(_, p)| p.kind == PieceKind::King)
                .count();
            match count {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::MultipleKings { color, count }),
            }
        }
        Ok(())
    }

    /// Checks that no pawn stands on rank 0 or 7, apart from `promoting`,
    /// the pawn waiting for its promotion choice.
    pub fn validate_pawn_ranks(&self, promoting: Option<Square>) -> Result<(), PositionError> {
        let stray = self.pieces().find(|&(sq, p)| {
            p.kind == PieceKind::Pawn && matches!(sq.rank(), 0 | 7) && Some(sq) != promoting
        });
        match stray {
            Some((sq, _)) => Err(PositionError::PawnOnBackRank(sq)),
            None => Ok(()),
        }
    }

    /// Returns a printable diagram using Unicode glyphs or ASCII letters.
    pub fn diagram(&self, unicode: bool) -> String {
        let mut out = String::new();
        for rank in 0..8u8 {
            out.push_str(&format!("{} ", 8 - rank));
            for file in 0..8u8 {
                let cell = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| if unicode { p.symbol() } else { p.to_char() })
                    .unwrap_or('.');
                out.push(cell);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagram(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn standard_setup() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(sq(4, 7)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq(4, 0)),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq(3, 7)),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(board.piece_at(sq(4, 4)), None);
        assert!(board.pieces().all(|(_, p)| p.is_unmoved()));
        assert!(board.validate().is_ok());
    }

    #[test]
    fn occupancy() {
        let board = Board::standard();
        assert_eq!(board.occupied_by(Color::White).len(), 16);
        assert_eq!(board.occupied_by(Color::Black).len(), 16);
    }

    #[test]
    fn put_and_take() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(board.put(sq(2, 2), knight), None);
        assert_eq!(board.piece_at(sq(2, 2)), Some(knight));
        assert_eq!(board.take(sq(2, 2)), Some(knight));
        assert!(board.is_empty(sq(2, 2)));
    }

    #[test]
    fn king_square() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(sq(4, 7)));
        assert_eq!(board.king_square(Color::Black), Some(sq(4, 0)));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn validate_kings() {
        let mut board = Board::empty();
        assert_eq!(
            board.validate(),
            Err(PositionError::MissingKing(Color::White))
        );

        board.put(sq(4, 7), Piece::new(PieceKind::King, Color::White));
        board.put(sq(4, 0), Piece::new(PieceKind::King, Color::Black));
        assert!(board.validate().is_ok());

        board.put(sq(0, 0), Piece::new(PieceKind::King, Color::Black));
        assert_eq!(
            board.validate(),
            Err(PositionError::MultipleKings {
                color: Color::Black,
                count: 2
            })
        );
    }

    #[test]
    fn validate_pawn_ranks() {
        let mut board = Board::standard();
        assert!(board.validate_pawn_ranks(None).is_ok());

        board.put(sq(0, 0), Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(
            board.validate_pawn_ranks(None),
            Err(PositionError::PawnOnBackRank(sq(0, 0)))
        );
        assert!(board.validate_pawn_ranks(Some(sq(0, 0))).is_ok());

        board.put(sq(7, 7), Piece::new(PieceKind::Pawn, Color::Black));
        assert_eq!(
            board.validate_pawn_ranks(Some(sq(0, 0))),
            Err(PositionError::PawnOnBackRank(sq(7, 7)))
        );
    }

    #[test]
    fn diagram() {
        let board = Board::standard();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r ");
        assert_eq!(lines[7], "1 R N B Q K B N R ");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert!(board.diagram(true).starts_with("8 ♜"));
    }
}
