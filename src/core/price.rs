//! Metal pricing abstractions and core types

use crate::core::assets::Category;
use crate::core::country::Country;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message shown next to metal values when the spot price request fails.
pub const PRICE_FETCH_ERROR: &str = "Failed to fetch metal prices. Please try again later.";

/// Spot prices per troy ounce in a single currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPrices {
    pub gold: f64,
    pub silver: f64,
    pub currency: String,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl MetalPrices {
    pub fn new(gold: f64, silver: f64, currency: &str) -> Self {
        MetalPrices {
            gold,
            silver,
            currency: currency.to_string(),
            fetched_at: None,
        }
    }

    /// Prices used before any quote is known.
    pub fn zero(currency: &str) -> Self {
        Self::new(0.0, 0.0, currency)
    }

    pub fn per_ounce(&self, category: Category) -> Option<f64> {
        match category {
            Category::Gold => Some(self.gold),
            Category::Silver => Some(self.silver),
            _ => None,
        }
    }

    /// Scales USD quotes into the country's currency with its fixed rate.
    pub fn in_currency(&self, country: &Country) -> MetalPrices {
        MetalPrices {
            gold: country.from_usd(self.gold),
            silver: country.from_usd(self.silver),
            currency: country.currency.to_string(),
            fetched_at: self.fetched_at,
        }
    }
}

#[async_trait]
pub trait MetalPriceProvider: Send + Sync {
    /// Fetches current spot prices in USD per troy ounce.
    async fn fetch_spot(&self) -> Result<MetalPrices>;
}
