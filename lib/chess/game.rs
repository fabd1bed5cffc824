use crate::chess::{Bitboard, Color, ParseFenError, Position, Square};
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Represents an illegal move in a given [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("moving from `{whence}` to `{whither}` is illegal in this position")]
pub struct IllegalMove {
    pub whence: Square,
    pub whither: Square,
}

/// A game of chess driven one square at a time.
///
/// Besides the [`Position`], keeps track of the selected square and where the selected piece may go.
/// Every transition returns a new [`Game`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    position: Position,
    selection: Option<Square>,
    destinations: Bitboard,
}

impl Game {
    /// Starts a game from a [`Position`], with nothing selected.
    #[inline(always)]
    pub fn new(position: Position) -> Self {
        Game {
            position,
            selection: None,
            destinations: Bitboard::empty(),
        }
    }

    /// A game in the initial position.
    #[inline(always)]
    pub fn reset() -> Self {
        Game::default()
    }

    /// The current [`Position`].
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// The selected [`Square`], if any.
    #[inline(always)]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// Where the selected piece may move to.
    #[inline(always)]
    pub fn destinations(&self) -> Bitboard {
        self.destinations
    }

    /// Whether the piece on `sq`, if any, belongs to the side to move.
    #[inline(always)]
    fn is_own(&self, sq: Square) -> bool {
        self.position.board()[sq].is_some_and(|p| p.color() == self.turn())
    }

    /// Selects the piece on `sq`.
    ///
    /// Clears the selection unless the piece belongs to the side to move.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn select(&self, sq: Square) -> Game {
        if self.is_own(sq) {
            Game {
                selection: Some(sq),
                destinations: self.position.destinations(sq),
                ..*self
            }
        } else {
            self.deselect()
        }
    }

    /// Clears the selection.
    #[inline(always)]
    pub fn deselect(&self) -> Game {
        Game::new(self.position)
    }

    /// Moves the piece on `whence` to `whither`.
    #[instrument(level = "trace", skip(self), err)]
    pub fn play(&self, whence: Square, whither: Square) -> Result<Game, IllegalMove> {
        let Some(m) = self.position.find(whence, whither) else {
            return Err(IllegalMove { whence, whither });
        };

        debug!(side = %self.turn(), %m, kind = ?m.kind(), "playing move");
        Ok(Game::new(self.position.play(m)))
    }

    /// Reacts to the player pointing at `sq`.
    ///
    /// * Pointing at the selected square clears the selection.
    /// * Pointing at one of the destinations plays the move.
    /// * Pointing at a piece of the side to move selects it.
    /// * Anything else clears the selection.
    pub fn click(&self, sq: Square) -> Game {
        match self.selection {
            Some(selected) if selected == sq => self.deselect(),
            Some(selected) if self.destinations.contains(sq) => match self.play(selected, sq) {
                Ok(game) => game,
                Err(e) => {
                    warn!(%e, "destination is out of sync with the position");
                    self.deselect()
                }
            },

            _ if self.is_own(sq) => self.select(sq),
            _ => self.deselect(),
        }
    }
}

impl FromStr for Game {
    type Err = ParseFenError;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Game::new(s.parse()?))
    }
}
