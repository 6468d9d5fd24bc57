//! Trade feed input: line parsing and sample feeds.

pub mod parser;
pub mod sample;
