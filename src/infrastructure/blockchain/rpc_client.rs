//! EVM JSON-RPC client for direct pool reads

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::abi;
use crate::domain::pool::{PoolDataSource, ReserveSnapshot};
use crate::shared::errors::PriceError;
use crate::shared::types::{Address, PoolLayout};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// EVM JSON-RPC client wrapper
pub struct EvmRpcClient {
    http_client: Client,
    url: String,
    next_id: AtomicU64,
}

impl EvmRpcClient {
    pub fn new(url: String) -> Self {
        Self {
            http_client: Client::new(),
            url,
            next_id: AtomicU64::new(1),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, PriceError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PriceError::RpcFailure(format!("{} request failed: {}", method, e)))?;

        if !response.status().is_success() {
            return Err(PriceError::RpcFailure(format!(
                "{} returned HTTP status {}",
                method,
                response.status()
            )));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            PriceError::RpcFailure(format!("{} returned invalid JSON: {}", method, e))
        })?;

        unwrap_response(method, body)
    }

    /// Latest block number; every read of one pool is pinned to it.
    pub async fn block_number(&self) -> Result<u64, PriceError> {
        let result = self.request("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }

    /// Call an argument-less view method at `block`, returning the raw hex data.
    pub async fn call(
        &self,
        to: &Address,
        signature: &str,
        block: u64,
    ) -> Result<String, PriceError> {
        let params = json!([
            { "to": to.to_string(), "data": abi::call_data(signature) },
            format!("0x{:x}", block),
        ]);

        match self.request("eth_call", params).await? {
            Value::String(data) => Ok(data),
            other => Err(PriceError::RpcFailure(format!(
                "eth_call {} on {} returned non-string result {}",
                signature, to, other
            ))),
        }
    }

    async fn read_tokens(
        &self,
        pool: &Address,
        layout: PoolLayout,
        block: u64,
    ) -> Result<(Address, Address), PriceError> {
        match layout {
            PoolLayout::PairTokens => {
                let data = self.call(pool, abi::TOKENS, block).await?;
                abi::decode_address_pair(&data)
            }
            PoolLayout::SplitTokens => {
                let (token0, token1) = futures::try_join!(
                    self.call(pool, abi::TOKEN0, block),
                    self.call(pool, abi::TOKEN1, block),
                )?;
                Ok((abi::decode_address(&token0)?, abi::decode_address(&token1)?))
            }
        }
    }
}

#[async_trait]
impl PoolDataSource for EvmRpcClient {
    async fn read_pool(
        &self,
        pool: &Address,
        layout: PoolLayout,
    ) -> Result<ReserveSnapshot, PriceError> {
        let block = self.block_number().await?;

        let ((token0, token1), reserves) = futures::try_join!(
            self.read_tokens(pool, layout, block),
            self.call(pool, abi::GET_RESERVES, block),
        )?;
        let (reserve0, reserve1) = abi::decode_reserves(&reserves)?;

        debug!(%pool, block, %token0, %token1, %reserve0, %reserve1, "pool reserves");
        Ok(ReserveSnapshot { token0, token1, reserve0, reserve1 })
    }
}

fn unwrap_response(method: &str, body: RpcResponse) -> Result<Value, PriceError> {
    if let Some(error) = body.error {
        return Err(PriceError::RpcFailure(format!(
            "{} failed with code {}: {}",
            method, error.code, error.message
        )));
    }

    body.result
        .ok_or_else(|| PriceError::RpcFailure(format!("{} returned no result", method)))
}

fn parse_quantity(value: &Value) -> Result<u64, PriceError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PriceError::RpcFailure(format!("expected hex quantity, got {}", value)))?;
    let digits = raw.strip_prefix("0x").unwrap_or(raw);

    u64::from_str_radix(digits, 16)
        .map_err(|e| PriceError::RpcFailure(format!("invalid hex quantity {:?}: {}", raw, e)))
}
