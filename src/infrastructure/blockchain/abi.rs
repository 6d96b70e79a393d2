//! Minimal ABI support for the read-only pool calls

use num_bigint::BigUint;
use tiny_keccak::{Hasher, Keccak};

use crate::shared::errors::PriceError;
use crate::shared::types::Address;

pub const WORD: usize = 32;

pub const TOKENS: &str = "tokens()";
pub const TOKEN0: &str = "token0()";
pub const TOKEN1: &str = "token1()";
pub const GET_RESERVES: &str = "getReserves()";

/// First four bytes of the Keccak-256 hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak::v256();
    let mut digest = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut digest);

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..4]);
    selector
}

/// `0x`-prefixed call data for an argument-less method.
pub fn call_data(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

/// Split `eth_call` return data into 32-byte words, requiring at least `min_words`.
pub fn decode_words(data: &str, min_words: usize) -> Result<Vec<[u8; WORD]>, PriceError> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(digits)
        .map_err(|e| PriceError::RpcFailure(format!("malformed return data: {}", e)))?;

    if bytes.len() % WORD != 0 || bytes.len() / WORD < min_words {
        return Err(PriceError::RpcFailure(format!(
            "expected at least {} ABI words, got {} bytes",
            min_words,
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(WORD)
        .map(|chunk| {
            let mut word = [0u8; WORD];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

pub fn decode_address(data: &str) -> Result<Address, PriceError> {
    let words = decode_words(data, 1)?;
    Ok(Address::from_word(&words[0]))
}

pub fn decode_address_pair(data: &str) -> Result<(Address, Address), PriceError> {
    let words = decode_words(data, 2)?;
    Ok((Address::from_word(&words[0]), Address::from_word(&words[1])))
}

/// Reserves are the first two words; the trailing timestamp is ignored.
pub fn decode_reserves(data: &str) -> Result<(BigUint, BigUint), PriceError> {
    let words = decode_words(data, 2)?;
    Ok((
        BigUint::from_bytes_be(&words[0]),
        BigUint::from_bytes_be(&words[1]),
    ))
}
