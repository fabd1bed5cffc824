use crate::util::Integer;
use derive_more::{Display, Error};
use std::{ops::Sub, str::FromStr};

/// A column on the chess board, from the queen side to the king side.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum File {
    #[display("a")]
    A,
    #[display("b")]
    B,
    #[display("c")]
    C,
    #[display("d")]
    D,
    #[display("e")]
    E,
    #[display("f")]
    F,
    #[display("g")]
    G,
    #[display("h")]
    H,
}

impl File {
    /// The grid column of this file, counted from the a-file.
    #[inline(always)]
    pub fn col(self) -> usize {
        self.get() as usize
    }
}

unsafe impl Integer for File {
    type Repr = i8;
    const MIN: Self::Repr = File::A as _;
    const MAX: Self::Repr = File::H as _;
}

impl Sub for File {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.get() - rhs.get()
    }
}

/// The reason why parsing [`File`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse file, expected a letter between `{}` and `{}`", File::A, File::H)]
pub struct ParseFileError;

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'a'..='h'), None) => Ok(File::new(c as i8 - 'a' as i8)),
            _ => Err(ParseFileError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn file_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<File>>(), size_of::<File>());
    }

    #[proptest]
    fn subtracting_files_returns_distance(a: File, b: File) {
        assert_eq!(a - b, a.get() - b.get());
    }

    #[test]
    fn columns_are_counted_from_the_a_file() {
        assert_eq!(File::A.col(), 0);
        assert_eq!(File::E.col(), 4);
        assert_eq!(File::H.col(), 7);
    }

    #[proptest]
    fn parsing_printed_file_is_an_identity(f: File) {
        assert_eq!(f.to_string().parse(), Ok(f));
    }

    #[proptest]
    fn parsing_file_fails_if_not_lower_case_letter_between_a_and_h(
        #[filter(!('a'..='h').contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<File>(), Err(ParseFileError));
    }

    #[proptest]
    fn parsing_file_fails_if_length_not_one(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<File>(), Err(ParseFileError));
    }
}
