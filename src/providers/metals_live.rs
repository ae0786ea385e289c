use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::price::{MetalPriceProvider, MetalPrices};

/// Spot prices from the public metals.live API, in USD per troy ounce.
pub struct MetalsLiveProvider {
    base_url: String,
}

impl MetalsLiveProvider {
    pub fn new(base_url: &str) -> Self {
        MetalsLiveProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// The endpoint answers with a list of single-entry objects such as
/// `[{"gold": 2031.5}, {"silver": 23.1}, {"timestamp": "..."}]`. Only the
/// gold and silver keys are read; anything else in the list is ignored.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
struct SpotResponse(Vec<HashMap<String, Value>>);

impl SpotResponse {
    /// First numeric quote for `metal`, or zero when missing or not a number.
    fn price_of(&self, metal: &str) -> f64 {
        self.0
            .iter()
            .find_map(|quote| quote.get(metal).and_then(Value::as_f64))
            .unwrap_or(0.0)
    }
}

#[async_trait]
impl MetalPriceProvider for MetalsLiveProvider {
    #[instrument(name = "MetalsLiveFetch", skip(self))]
    async fn fetch_spot(&self) -> Result<MetalPrices> {
        let url = format!("{}/v1/spot", self.base_url);
        debug!("Requesting spot prices from {}", url);

        let client = reqwest::Client::builder().user_agent("zakat/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for spot prices", response.status()));
        }

        let text = response.text().await?;
        let data: SpotResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse spot price response: {}", e))?;

        let mut prices = MetalPrices::new(data.price_of("gold"), data.price_of("silver"), "USD");
        prices.fetched_at = Some(Utc::now());
        debug!(gold = prices.gold, silver = prices.silver, "Received spot prices");
        Ok(prices)
    }
}
