//! Key-value persistence abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A named set of byte keys and values.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    /// Returns `None` when the key is missing or cannot be read.
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    async fn put(&self, key: &[u8], value: Vec<u8>) -> Result<()>;
    async fn remove(&self, key: &[u8]) -> Result<()>;
}

pub trait Store: Send + Sync {
    /// Opens the named collection, creating it on first use.
    fn get_collection(&self, name: &str) -> Result<Arc<dyn KeyValueCollection>>;
}
