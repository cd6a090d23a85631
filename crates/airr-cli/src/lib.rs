//! CLI library components for airr-convert.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod summary;
