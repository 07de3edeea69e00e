//! Command implementations.

pub mod bookmark;
pub mod browse;
pub mod cache;
pub mod completions;
