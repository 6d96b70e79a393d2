use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::domain::price::UsdRateFeed;
use crate::shared::errors::PriceError;

/// Market-data client for one reference pair on one venue.
///
/// The pair's `priceUsd` is the USD price of its base asset and `priceNative`
/// the same price in the pair's native quote units, so their ratio is USD per
/// native unit.
pub struct PairFeedClient {
    http_client: Client,
    url: String,
}

impl PairFeedClient {
    pub fn new(url: String) -> Self {
        Self {
            http_client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl UsdRateFeed for PairFeedClient {
    async fn fetch_reference_usd_rate(&self) -> Result<f64, PriceError> {
        info!("🔍 Fetching reference pair from: {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PriceError::FeedRequest(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceError::FeedUnavailable(response.status().as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| PriceError::FeedRequest(format!("invalid JSON body: {}", e)))?;

        usd_rate_from_payload(&payload)
    }
}

/// Derive USD per native unit from a feed payload carrying either a `pair`
/// object or a `pairs` list (first entry wins).
pub fn usd_rate_from_payload(payload: &Value) -> Result<f64, PriceError> {
    let pair = payload
        .get("pair")
        .filter(|p| p.is_object())
        .or_else(|| {
            payload
                .get("pairs")
                .and_then(Value::as_array)
                .and_then(|pairs| pairs.first())
                .filter(|p| p.is_object())
        })
        .ok_or(PriceError::NoPairData)?;

    let price_usd = price_field(pair, "priceUsd")?;
    let price_native = price_field(pair, "priceNative")?;

    Ok(price_usd / price_native)
}

/// A positive, finite number given either as a JSON number or a numeric string.
fn price_field(pair: &Value, field: &str) -> Result<f64, PriceError> {
    let parsed = match pair.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(PriceError::MissingFields(format!(
            "{} is absent, zero or not a number",
            field
        ))),
    }
}
