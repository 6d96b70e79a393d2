//! Application layer - CLI and the snapshot use case

pub mod commands;
pub mod services;

pub use commands::Cli;
pub use services::SnapshotService;
