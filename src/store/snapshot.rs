//! Persisted calculator state: the selected country and all asset entries.

use crate::core::assets::AssetGroups;
use crate::core::country::Country;
use crate::core::price::MetalPrices;
use crate::core::store::{KeyValueCollection, Store};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

const SNAPSHOT_COLLECTION: &str = "snapshot";
const PRICES_COLLECTION: &str = "metal_prices";
const COUNTRY_KEY: &[u8] = b"selected_country";
const ASSETS_KEY: &[u8] = b"assets";

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub country: &'static Country,
    pub assets: AssetGroups,
}

impl Snapshot {
    pub fn new(country: &'static Country) -> Self {
        Snapshot {
            country,
            assets: AssetGroups::defaults(),
        }
    }
}

/// Reads and writes the [`Snapshot`] and the last known metal prices.
pub struct SnapshotStore {
    snapshot: Arc<dyn KeyValueCollection>,
    prices: Arc<dyn KeyValueCollection>,
}

impl SnapshotStore {
    pub fn new(store: &dyn Store) -> Result<Self> {
        Ok(Self {
            snapshot: store.get_collection(SNAPSHOT_COLLECTION)?,
            prices: store.get_collection(PRICES_COLLECTION)?,
        })
    }

    /// Restores the saved state. Missing or unreadable entries fall back to
    /// `default_country` and the default asset groups.
    pub async fn load(&self, default_country: &str) -> Snapshot {
        let country = match self.snapshot.get(COUNTRY_KEY).await {
            Some(bytes) => match serde_json::from_slice::<String>(&bytes) {
                Ok(name) => Country::find(&name).unwrap_or_else(|e| {
                    warn!("Ignoring saved country: {e}");
                    Country::find_or_default(default_country)
                }),
                Err(e) => {
                    warn!("Ignoring unreadable saved country: {e}");
                    Country::find_or_default(default_country)
                }
            },
            None => Country::find_or_default(default_country),
        };

        let assets = read_json::<AssetGroups>(self.snapshot.as_ref(), ASSETS_KEY)
            .await
            .unwrap_or_default();

        debug!(country = country.name, "Loaded snapshot");
        Snapshot { country, assets }
    }

    /// Overwrites both snapshot entries.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let country = serde_json::to_vec(snapshot.country.name)?;
        let assets = serde_json::to_vec(&snapshot.assets)?;
        self.snapshot
            .put(COUNTRY_KEY, country)
            .await
            .context("Failed to save selected country")?;
        self.snapshot
            .put(ASSETS_KEY, assets)
            .await
            .context("Failed to save asset entries")?;
        debug!(country = snapshot.country.name, "Saved snapshot");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.snapshot.remove(COUNTRY_KEY).await?;
        self.snapshot.remove(ASSETS_KEY).await?;
        debug!("Cleared snapshot");
        Ok(())
    }

    /// Last prices fetched for `currency`, or zero prices if none are known.
    pub async fn load_prices(&self, currency: &str) -> MetalPrices {
        read_json::<MetalPrices>(self.prices.as_ref(), currency.as_bytes())
            .await
            .unwrap_or_else(|| MetalPrices::zero(currency))
    }

    pub async fn save_prices(&self, prices: &MetalPrices) -> Result<()> {
        self.prices
            .put(prices.currency.as_bytes(), serde_json::to_vec(prices)?)
            .await
            .with_context(|| format!("Failed to save {} metal prices", prices.currency))
    }
}

async fn read_json<T: DeserializeOwned>(
    collection: &dyn KeyValueCollection,
    key: &[u8],
) -> Option<T> {
    let bytes = collection.get(key).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                "Ignoring unreadable entry {}: {e}",
                String::from_utf8_lossy(key)
            );
            None
        }
    }
}
