//! lpsnap - USD price snapshots for pool-quoted tokens
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod math;

// Re-export main types for convenience
pub use application::{Cli, SnapshotService};
pub use domain::pool::{PoolDataSource, ReservePairResolver, ReserveSnapshot};
pub use domain::price::{PriceResult, UsdRateFeed};
pub use domain::snapshot::{Report, SnapshotComposer, SnapshotStore};
pub use shared::config::{ConfigLoader, SnapshotConfig};
pub use shared::errors::{AppError, PriceError};
