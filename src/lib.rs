//! Word-ordering story puzzle: shuffled words per line, rebuilt in order.

pub mod config;
pub mod game;
pub mod puzzle;
