mod integer;

pub use integer::*;
