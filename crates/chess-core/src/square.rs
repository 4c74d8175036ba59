//! Board square representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a square name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("invalid square: expected 2 characters, got {0:?}")]
    InvalidLength(String),

    #[error("invalid file '{0}': expected 'a'-'h'")]
    InvalidFile(char),

    #[error("invalid rank '{0}': expected '1'-'8'")]
    InvalidRank(char),

    #[error("square ({file}, {rank}) is off the board")]
    OffBoard { file: u8, rank: u8 },
}

/// A square on the chess board as a (file, rank) pair, each in 0-7.
///
/// Rank 0 is the top row of the diagram (Black's back rank) and rank 7 the
/// bottom row (White's back rank). Squares index row-major:
/// - (0, 0) = 0 = a8, (7, 0) = 7 = h8
/// - (0, 7) = 56 = a1, (7, 7) = 63 = h1
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    file: u8,
    rank: u8,
}

/// Unchecked wire form of a [`Square`].
#[derive(Deserialize)]
struct RawSquare {
    file: u8,
    rank: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = ParseSquareError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.file, raw.rank).ok_or(ParseSquareError::OffBoard {
            file: raw.file,
            rank: raw.rank,
        })
    }
}

impl Square {
    /// Creates a square from file and rank, or `None` if either is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Creates a square from a row-major index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                file: index % 8,
                rank: index / 8,
            })
        } else {
            None
        }
    }

    /// Returns the row-major index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.rank * 8 + self.file
    }

    /// Returns the file (column, 0-7).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank (row, 0-7).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the square displaced by the given file and rank deltas.
    ///
    /// Offsets that leave the board yield `None`.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }

    /// Returns the algebraic name of this square (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file) as char;
        let rank = (b'8' - self.rank) as char;
        format!("{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return Err(ParseSquareError::InvalidLength(s.to_string()));
        }
        let file = match chars[0].to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            c => return Err(ParseSquareError::InvalidFile(c)),
        };
        let rank = match chars[1] {
            c @ '1'..='8' => b'8' - c as u8,
            c => return Err(ParseSquareError::InvalidRank(c)),
        };
        Ok(Square { file, rank })
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.file, self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
