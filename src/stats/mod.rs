//! Statistical primitives used by the rating models

pub mod normal;
