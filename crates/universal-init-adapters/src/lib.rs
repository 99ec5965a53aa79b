//! Infrastructure adapters for universal-init.
//!
//! This crate implements the ports defined in
//! `universal_init_core::application::ports`. It contains all process
//! spawning and disk I/O.

pub mod filesystem;
pub mod manifest_loader;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest_loader::JsonFileLoader;
pub use process::{RecordingRunner, SystemRunner};
