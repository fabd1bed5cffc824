use crate::chess::{CastlingSide, Role, Square};
use derive_more::{Debug, Display};

/// What a [`Move`] does besides relocating the moving piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveKind {
    /// A non-capturing move that needs no special handling.
    Quiet,
    /// A pawn advancing two squares from its starting rank.
    DoublePush,
    /// A capture of the piece standing on the destination square.
    Capture(Role),
    /// A pawn capturing [en passant].
    ///
    /// [en passant]: https://www.chessprogramming.org/En_passant
    EnPassant,
    /// The king castling towards one of the rooks.
    Castle(CastlingSide),
    /// A pawn reaching the last rank, possibly capturing.
    Promotion(Option<Role>),
}

/// A chess move tagged with its [`MoveKind`].
///
/// Prints in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Move({self})")]
#[display("{whence}{whither}{}", if matches!(kind, MoveKind::Promotion(_)) { "q" } else { "" })]
pub struct Move {
    whence: Square,
    whither: Square,
    kind: MoveKind,
}

impl Move {
    /// Constructs a [`Move`].
    #[inline(always)]
    pub fn new(whence: Square, whither: Square, kind: MoveKind) -> Self {
        Move {
            whence,
            whither,
            kind,
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The [`MoveKind`].
    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The [`Role`] of the piece captured, if any.
    #[inline(always)]
    pub fn capture(&self) -> Option<Role> {
        match self.kind {
            MoveKind::Capture(r) | MoveKind::Promotion(Some(r)) => Some(r),
            MoveKind::EnPassant => Some(Role::Pawn),
            _ => None,
        }
    }

    /// Whether this move captures a piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.capture().is_some()
    }

    /// Whether this is a promotion move.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// Whether this is a castling move.
    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }
}
