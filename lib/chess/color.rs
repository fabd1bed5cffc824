use crate::util::Integer;
use derive_more::{Display, Error};
use std::{ops::Not, str::FromStr};

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Default, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Color {
    #[default]
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Color {
    /// The direction pawns of this color advance in, as a [`Rank`][`crate::chess::Rank`] delta.
    #[inline(always)]
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

unsafe impl Integer for Color {
    type Repr = u8;
    const MIN: Self::Repr = Color::White as _;
    const MAX: Self::Repr = Color::Black as _;
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The reason why parsing the side to move failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse side to move, expected `w` or `b`")]
pub struct ParseColorError;

/// Parses the side to move field of a FEN record.
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ParseColorError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn color_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Color>>(), size_of::<Color>());
    }

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
        assert_ne!(!c, c);
    }

    #[proptest]
    fn opposite_colors_advance_in_opposite_directions(c: Color) {
        assert_eq!(c.forward(), -(!c).forward());
    }

    #[test]
    fn parsing_side_to_move_accepts_w_and_b() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("b".parse(), Ok(Color::Black));
    }

    #[proptest]
    fn parsing_color_fails_if_not_w_or_b(#[filter(#s != "w" && #s != "b")] s: String) {
        assert_eq!(s.parse::<Color>(), Err(ParseColorError));
    }
}
