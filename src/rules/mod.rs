pub mod attacks;
pub mod disambig;
