//! Report rendering: the engine, its configuration and output sinks.

pub mod config;
pub mod engine;
pub mod output;
