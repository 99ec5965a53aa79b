//! Command handlers, one per mode of the binary.

pub mod completions;
pub mod config;
pub mod create;
