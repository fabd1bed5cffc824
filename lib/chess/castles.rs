use crate::chess::{Bitboard, Color, Perspective, Piece, Role, Square};
use crate::util::Integer;
use bitflags::bitflags;
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

bitflags! {
    /// The castling rights in a chess [`Position`][`crate::chess::Position`].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Castles: u8 {
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG =  0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG =  0b1000;
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Castles {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;
        (0..=0b1111u8).prop_map(Castles::from_bits_truncate).boxed()
    }
}

/// The side of the board a king castles towards.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum CastlingSide {
    #[display("O-O")]
    KingSide,
    #[display("O-O-O")]
    QueenSide,
}

impl CastlingSide {
    /// Both castling sides.
    pub const ALL: [Self; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// Where the rook stands before castling.
    #[inline(always)]
    pub fn rook_whence(self, side: Color) -> Square {
        match self {
            CastlingSide::KingSide => Square::H1.perspective(side),
            CastlingSide::QueenSide => Square::A1.perspective(side),
        }
    }

    /// Where the rook lands after castling.
    ///
    /// This is also the square the king passes through.
    #[inline(always)]
    pub fn rook_whither(self, side: Color) -> Square {
        match self {
            CastlingSide::KingSide => Square::F1.perspective(side),
            CastlingSide::QueenSide => Square::D1.perspective(side),
        }
    }

    /// Where the king lands after castling.
    #[inline(always)]
    pub fn king_whither(self, side: Color) -> Square {
        match self {
            CastlingSide::KingSide => Square::G1.perspective(side),
            CastlingSide::QueenSide => Square::C1.perspective(side),
        }
    }

    /// The squares strictly between the king and the rook, which must be empty.
    #[inline(always)]
    pub fn path(self, side: Color) -> Bitboard {
        let path = match self {
            CastlingSide::KingSide => Bitboard::from_iter([Square::F1, Square::G1]),
            CastlingSide::QueenSide => Bitboard::from_iter([Square::B1, Square::C1, Square::D1]),
        };

        path.perspective(side)
    }
}

impl Castles {
    /// Whether the given side may castle towards the given [`CastlingSide`].
    #[inline(always)]
    pub fn has(&self, side: Color, cs: CastlingSide) -> bool {
        self.contains(Castles::from(cs.rook_whence(side)))
    }

    /// Whether the given side has kingside castling rights.
    #[inline(always)]
    pub fn has_short(&self, side: Color) -> bool {
        self.has(side, CastlingSide::KingSide)
    }

    /// Whether the given side has queenside castling rights.
    #[inline(always)]
    pub fn has_long(&self, side: Color) -> bool {
        self.has(side, CastlingSide::QueenSide)
    }

    /// Both castling rights of the given side.
    #[inline(always)]
    pub fn of(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_SHORT | Castles::WHITE_LONG,
            Color::Black => Castles::BLACK_SHORT | Castles::BLACK_LONG,
        }
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

/// The castling right tied to the rook that starts on this corner, if any.
impl From<Square> for Castles {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        match sq {
            Square::A1 => Castles::WHITE_LONG,
            Square::H1 => Castles::WHITE_SHORT,
            Square::A8 => Castles::BLACK_LONG,
            Square::H8 => Castles::BLACK_SHORT,
            _ => Castles::empty(),
        }
    }
}

/// Prints castling rights as in FEN, `-` if there are none.
impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for side in Color::iter() {
            if self.has_short(side) {
                fmt::Display::fmt(&Piece::new(Role::King, side), f)?;
            }

            if self.has_long(side) {
                fmt::Display::fmt(&Piece::new(Role::Queen, side), f)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Castles::empty());
        } else if s.is_empty() {
            return Err(ParseCastlesError);
        }

        let mut castles = Castles::empty();

        for c in s.chars() {
            let mut buffer = [0; 4];

            let right = match Piece::from_str(c.encode_utf8(&mut buffer)) {
                Ok(p @ (Piece::WhiteKing | Piece::BlackKing)) => {
                    Castles::from(CastlingSide::KingSide.rook_whence(p.color()))
                }

                Ok(p @ (Piece::WhiteQueen | Piece::BlackQueen)) => {
                    Castles::from(CastlingSide::QueenSide.rook_whence(p.color()))
                }

                _ => return Err(ParseCastlesError),
            };

            if castles.contains(right) {
                return Err(ParseCastlesError);
            }

            castles |= right;
        }

        Ok(castles)
    }
}
