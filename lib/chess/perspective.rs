use crate::chess::Color;

/// Trait for board coordinates that can be seen from either side of the board.
pub trait Perspective: Copy {
    /// Mirrors this value across the horizontal axis of the board.
    fn flip(&self) -> Self;

    /// This value as seen by the given [`Color`], where white sees it unchanged.
    #[inline(always)]
    fn perspective(&self, side: Color) -> Self {
        match side {
            Color::White => *self,
            Color::Black => self.flip(),
        }
    }
}
