use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod moves;
mod perft;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Moves(moves::Moves),
    Perft(perft::Perft),
    Play(play::Play),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Moves(a) => a.execute(),
            Applet::Perft(a) => a.execute(),
            Applet::Play(a) => a.execute(),
        }
    }
}
