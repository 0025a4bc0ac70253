pub mod duplicates;
pub mod match_clock;
pub mod statistics;
