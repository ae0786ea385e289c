use super::ui;
use crate::core::country::Country;
use crate::core::price::{MetalPriceProvider, MetalPrices, PRICE_FETCH_ERROR};
use crate::store::SnapshotStore;
use anyhow::Result;
use tracing::warn;

/// Prices to value metals with, plus the message to show if the fetch failed.
#[derive(Debug, Clone)]
pub struct PriceStatus {
    pub prices: MetalPrices,
    pub error: Option<&'static str>,
}

/// Fetches spot prices once for `country`. A failed fetch keeps the last
/// prices stored for that currency.
pub async fn refresh(
    provider: &(dyn MetalPriceProvider + Send + Sync),
    snapshots: &SnapshotStore,
    country: &Country,
) -> Result<PriceStatus> {
    let pb = ui::new_spinner("Fetching metal prices...");
    let fetched = provider.fetch_spot().await;
    pb.finish_and_clear();

    match fetched {
        Ok(spot) => {
            let prices = spot.in_currency(country);
            snapshots.save_prices(&prices).await?;
            Ok(PriceStatus {
                prices,
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "Metal price fetch failed, keeping previous prices");
            Ok(PriceStatus {
                prices: snapshots.load_prices(country.currency).await,
                error: Some(PRICE_FETCH_ERROR),
            })
        }
    }
}

/// Prices already known for `country`, without touching the network.
pub async fn cached(snapshots: &SnapshotStore, country: &Country) -> PriceStatus {
    PriceStatus {
        prices: snapshots.load_prices(country.currency).await,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        gold: Option<f64>,
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl MetalPriceProvider for MockProvider {
        async fn fetch_spot(&self) -> Result<MetalPrices> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.gold {
                Some(gold) => Ok(MetalPrices::new(gold, 20.0, "USD")),
                None => Err(anyhow!("connection refused")),
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_scales_and_stores_prices() {
        let store = KeyValueStore::in_memory();
        let snapshots = SnapshotStore::new(&store).unwrap();
        let provider = MockProvider {
            gold: Some(2000.0),
            call_count: AtomicUsize::new(0),
        };
        let gbp = Country::find("GBP").unwrap();

        let status = refresh(&provider, &snapshots, gbp).await.unwrap();
        assert!(status.error.is_none());
        assert_eq!(status.prices.currency, "GBP");
        assert!((status.prices.gold - 1580.0).abs() < 1e-9);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);

        let stored = cached(&snapshots, gbp).await;
        assert_eq!(stored.prices, status.prices);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_prices() {
        let store = KeyValueStore::in_memory();
        let snapshots = SnapshotStore::new(&store).unwrap();
        let usd = Country::find("USD").unwrap();
        let previous = MetalPrices::new(1900.0, 22.0, "USD");
        snapshots.save_prices(&previous).await.unwrap();

        let provider = MockProvider {
            gold: None,
            call_count: AtomicUsize::new(0),
        };
        let status = refresh(&provider, &snapshots, usd).await.unwrap();
        assert_eq!(status.error, Some(PRICE_FETCH_ERROR));
        assert_eq!(status.prices, previous);

        let pkr = Country::find("PKR").unwrap();
        let status = refresh(&provider, &snapshots, pkr).await.unwrap();
        assert_eq!(status.prices, MetalPrices::zero("PKR"));
    }
}
