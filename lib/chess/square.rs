use crate::chess::{Bitboard, File, ParseFileError, ParseRankError, Perspective, Rank};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use std::{fmt, iter::successors, str::FromStr};

/// A square on the chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

/// The reason why constructing a [`Square`] from grid coordinates failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display("grid coordinates `({row}, {col})` are off the board")]
pub struct InvalidSquare {
    pub row: usize,
    pub col: usize,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(f: File, r: Rank) -> Self {
        <Self as Integer>::new(f.get() | r.get() << 3)
    }

    /// Constructs [`Square`] from grid coordinates.
    ///
    /// Rows are counted from the top of the board, columns from the a-file.
    pub fn from_coords(row: usize, col: usize) -> Result<Self, InvalidSquare> {
        let invalid = InvalidSquare { row, col };
        let r = 7usize.checked_sub(row).ok_or(invalid)?;
        let f = File::try_new(i8::try_from(col).map_err(|_| invalid)?).ok_or(invalid)?;
        Ok(Square::new(f, Rank::new(r as i8)))
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        File::new(self.get() & 0b111)
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        Rank::new(self.get() >> 3)
    }

    /// This square's grid row, counted from the top of the board.
    #[inline(always)]
    pub fn row(&self) -> usize {
        self.rank().row()
    }

    /// This square's grid column, counted from the a-file.
    #[inline(always)]
    pub fn col(&self) -> usize {
        self.file().col()
    }

    /// The square `df` files and `dr` ranks away, if it's on the board.
    #[inline(always)]
    pub fn step(self, df: i8, dr: i8) -> Option<Self> {
        let f = File::try_new(self.file().get() + df)?;
        let r = Rank::try_new(self.rank().get() + dr)?;
        Some(Square::new(f, r))
    }

    /// The squares visited by repeatedly stepping in a direction, excluding this one.
    #[inline(always)]
    pub fn ray(self, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
        successors(self.step(df, dr), move |sq| sq.step(df, dr))
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self.get())
    }
}

unsafe impl Integer for Square {
    type Repr = i8;
    const MIN: Self::Repr = Square::A1 as _;
    const MAX: Self::Repr = Square::H8 as _;
}

impl Perspective for Square {
    /// Flips this square's [`Rank`].
    #[inline(always)]
    fn flip(&self) -> Self {
        <Self as Integer>::new(self.get() ^ Square::A8.get())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display("failed to parse square")]
    InvalidFile(ParseFileError),
    #[display("failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Square>>(), size_of::<Square>());
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[proptest]
    fn from_coords_is_the_inverse_of_row_and_col(sq: Square) {
        assert_eq!(Square::from_coords(sq.row(), sq.col()), Ok(sq));
    }

    #[test]
    fn grid_origin_is_the_top_left_corner() {
        assert_eq!(Square::from_coords(0, 0), Ok(Square::A8));
        assert_eq!(Square::from_coords(7, 7), Ok(Square::H1));
        assert_eq!(Square::from_coords(6, 4), Ok(Square::E2));
    }

    #[proptest]
    fn from_coords_fails_if_row_off_the_board(#[strategy(8usize..)] row: usize, #[strategy(0usize..8)] col: usize) {
        assert_eq!(Square::from_coords(row, col), Err(InvalidSquare { row, col }));
    }

    #[proptest]
    fn from_coords_fails_if_col_off_the_board(#[strategy(0usize..8)] row: usize, #[strategy(8usize..)] col: usize) {
        assert_eq!(Square::from_coords(row, col), Err(InvalidSquare { row, col }));
    }

    #[proptest]
    fn stepping_by_zero_is_an_identity(sq: Square) {
        assert_eq!(sq.step(0, 0), Some(sq));
    }

    #[proptest]
    fn stepping_is_reversible(sq: Square, #[strategy(-7i8..=7)] df: i8, #[strategy(-7i8..=7)] dr: i8) {
        if let Some(t) = sq.step(df, dr) {
            assert_eq!(t.file() - sq.file(), df);
            assert_eq!(t.rank() - sq.rank(), dr);
            assert_eq!(t.step(-df, -dr), Some(sq));
        }
    }

    #[test]
    fn stepping_off_the_board_fails() {
        assert_eq!(Square::A1.step(-1, 0), None);
        assert_eq!(Square::H8.step(0, 1), None);
        assert_eq!(Square::H4.step(1, 1), None);
    }

    #[test]
    fn ray_stops_at_the_edge_of_the_board() {
        assert_eq!(
            Vec::from_iter(Square::C1.ray((1, 1))),
            vec![Square::D2, Square::E3, Square::F4, Square::G5, Square::H6]
        );

        assert_eq!(Square::A8.ray((0, 1)).count(), 0);
    }

    #[proptest]
    fn square_has_an_equivalent_bitboard(sq: Square) {
        assert_eq!(Vec::from_iter(sq.bitboard()), vec![sq]);
    }

    #[proptest]
    fn flipping_square_preserves_file_and_flips_rank(sq: Square) {
        assert_eq!(sq.flip(), Square::new(sq.file(), sq.rank().flip()));
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.chars().count() != 2)] s: String) {
        assert_eq!(s.parse::<Square>().ok(), None);
    }
}
