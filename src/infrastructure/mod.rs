//! Infrastructure layer - RPC, market data, and snapshot storage

pub mod blockchain;
pub mod market_data;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
