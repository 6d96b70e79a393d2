//! Domain layer - core pricing logic and entities

pub mod pool;
pub mod price;
pub mod snapshot;
