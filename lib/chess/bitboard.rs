use crate::chess::{File, Perspective, Rank, Square};
use crate::util::Integer;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Constructor, Not};
use std::fmt::{self, Write};

/// A set of squares on a chess board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::new(file, rank);
                f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// The set of all squares.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(u64::MAX)
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the set is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        !(*self & sq.bitboard()).is_empty()
    }

    /// Adds a [`Square`] to this set.
    #[inline(always)]
    pub fn with(&self, sq: Square) -> Self {
        *self | sq.bitboard()
    }

    /// Removes a [`Square`] from this set.
    #[inline(always)]
    pub fn without(&self, sq: Square) -> Self {
        *self & !sq.bitboard()
    }

    /// An iterator over the [`Square`]s in this set, from a1 to h8.
    #[inline(always)]
    pub fn iter(&self) -> Squares {
        Squares(*self)
    }
}

impl Perspective for Bitboard {
    /// Flips all squares in the set.
    #[inline(always)]
    fn flip(&self) -> Self {
        Self(self.0.swap_bytes())
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        squares.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let sq = <Square as Integer>::new(self.0 .0.trailing_zeros() as i8);
            self.0 ^= sq.bitboard();
            Some(sq)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Squares {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}
