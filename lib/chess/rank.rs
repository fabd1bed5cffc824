use crate::chess::Perspective;
use crate::util::Integer;
use derive_more::{Display, Error};
use std::{ops::Sub, str::FromStr};

/// A row on the chess board, from white's back rank to black's.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum Rank {
    #[display("1")]
    First,
    #[display("2")]
    Second,
    #[display("3")]
    Third,
    #[display("4")]
    Fourth,
    #[display("5")]
    Fifth,
    #[display("6")]
    Sixth,
    #[display("7")]
    Seventh,
    #[display("8")]
    Eighth,
}

impl Rank {
    /// The grid row of this rank, counted from the top of the board.
    ///
    /// The eighth rank is row 0 and the first rank is row 7.
    #[inline(always)]
    pub fn row(self) -> usize {
        (Self::MAX - self.get()) as usize
    }
}

unsafe impl Integer for Rank {
    type Repr = i8;
    const MIN: Self::Repr = Rank::First as _;
    const MAX: Self::Repr = Rank::Eighth as _;
}

impl Perspective for Rank {
    /// This rank as seen from the other side of the board.
    #[inline(always)]
    fn flip(&self) -> Self {
        Self::new(self.get() ^ Self::MAX)
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.get() - rhs.get()
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse rank, expected a digit between `{}` and `{}`", Rank::First, Rank::Eighth)]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ '1'..='8'), None) => Ok(Rank::new(c as i8 - '1' as i8)),
            _ => Err(ParseRankError),
        }
    }
}
