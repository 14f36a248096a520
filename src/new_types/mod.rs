// Roel Kluin, 2023, GPL v3

pub mod adjacency;
pub mod frequency;
pub mod twobit;
