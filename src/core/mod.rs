pub mod board;
pub mod square;
