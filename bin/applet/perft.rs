use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Position;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the leaf nodes of the legal move tree.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// The position in FEN notation, the initial position by default.
    #[clap(short, long)]
    pos: Option<Position>,

    /// How many plies deep to count.
    depth: u8,
}

fn perft(pos: &Position, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().count(),
        d => pos
            .moves()
            .par_bridge()
            .map(|m| perft(&pos.play(m), d - 1))
            .sum(),
    }
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let pos = self.pos.unwrap_or_default();
        let timer = Instant::now();

        let nodes: usize = match self.depth {
            0 => 1,
            d => pos
                .moves()
                .map(|m| {
                    let nodes = perft(&pos.play(m), d - 1);
                    info!(%m, nodes);
                    nodes
                })
                .sum(),
        };

        info!(depth = self.depth, nodes, elapsed = ?timer.elapsed());
        println!("{nodes}");

        Ok(())
    }
}
