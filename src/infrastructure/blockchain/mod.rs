//! Direct blockchain reading for EVM liquidity pools

pub mod abi;
pub mod rpc_client;

pub use rpc_client::EvmRpcClient;
