use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Game, Position, Square};
use tracing::{info, instrument, warn};

/// Lists where a piece may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The position in FEN notation.
    pos: Position,

    /// The square of the piece to move.
    whence: Square,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let game = Game::new(self.pos).select(self.whence);

        if game.selection().is_none() {
            warn!(whence = %self.whence, side = %game.turn(), "no piece of the side to move on this square");
        }

        let destinations: Vec<_> = game.destinations().iter().map(|sq| sq.to_string()).collect();
        info!(whence = %self.whence, count = destinations.len());
        println!("{}", destinations.join(" "));

        Ok(())
    }
}
