mod attacks;
mod bitboard;
mod board;
mod castles;
mod color;
mod file;
mod game;
mod r#move;
mod perspective;
mod piece;
mod position;
mod rank;
mod role;
mod square;

pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use game::*;
pub use perspective::*;
pub use piece::*;
pub use position::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use square::*;
