use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error};
use lib::chess::{Game, ParseSquareError, Position, Square};
use std::str::FromStr;
use tracing::{info, instrument};

/// A move in pure coordinate notation, such as `e2e4` or `e7e8q`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
#[display("{whence}{whither}")]
pub struct Coordinates {
    whence: Square,
    whither: Square,
}

/// The reason why parsing [`Coordinates`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseCoordinatesError {
    #[display("failed to parse move, expected two squares optionally followed by `q`")]
    InvalidSyntax,
    #[display("failed to parse move")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('q').unwrap_or(s);
        if !s.is_ascii() || s.len() != 4 {
            return Err(ParseCoordinatesError::InvalidSyntax);
        }

        Ok(Coordinates {
            whence: s[..2].parse().map_err(ParseCoordinatesError::InvalidSquare)?,
            whither: s[2..].parse().map_err(ParseCoordinatesError::InvalidSquare)?,
        })
    }
}

/// Plays a sequence of moves and prints the resulting board.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The starting position in FEN notation, the initial position by default.
    #[clap(short, long)]
    pos: Option<Position>,

    /// The moves to play in pure coordinate notation.
    moves: Vec<Coordinates>,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = self.pos.map_or_else(Game::reset, Game::new);

        for m in self.moves {
            let side = game.turn();
            game = game.play(m.whence, m.whither)?;
            info!(%m, %side);
        }

        println!("{}", game.position());

        Ok(())
    }
}
