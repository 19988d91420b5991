//! Ranking and sequence helpers shared by the rating models
//!
//! These are pure functions over slices: competition ranking of scores and
//! rank labels, weight normalization, and the sort/restore bookkeeping that
//! lets the models work on rank-ordered teams.

pub mod ranking;
pub mod sequence;

pub use ranking::{count_by_rank, default_ranks, rank};
pub use sequence::{normalize, rewind, unwind};
