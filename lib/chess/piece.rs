use crate::chess::{Color, Role};
use crate::util::Integer;
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    WhiteKnight,
    BlackKnight,
    WhiteBishop,
    BlackBishop,
    WhiteRook,
    BlackRook,
    WhiteQueen,
    BlackQueen,
    WhiteKing,
    BlackKing,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Color`] and [`Role`].
    #[inline(always)]
    pub fn new(r: Role, c: Color) -> Self {
        <Self as Integer>::new(r.get() * 2 + c.get())
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        Role::new(self.get() / 2)
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        Color::new(self.get() % 2)
    }

    /// Whether this piece is of the given [`Color`] and [`Role`].
    #[inline(always)]
    pub fn is(&self, r: Role, c: Color) -> bool {
        *self == Piece::new(r, c)
    }
}

unsafe impl Integer for Piece {
    type Repr = u8;
    const MIN: Self::Repr = Piece::WhitePawn as _;
    const MAX: Self::Repr = Piece::BlackKing as _;
}

/// Prints the FEN letter of this piece, upper case for white and lower case for black.
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.color() {
            Color::White => f.write_str(&self.role().to_string().to_ascii_uppercase()),
            Color::Black => Display::fmt(&self.role(), f),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role: Role = s.to_ascii_lowercase().parse().map_err(|_| ParsePieceError)?;
        if s.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Piece::new(role, Color::White))
        } else {
            Ok(Piece::new(role, Color::Black))
        }
    }
}
