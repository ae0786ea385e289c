use crate::core::store::KeyValueCollection;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory collection, used when nothing should touch the disk.
#[derive(Default)]
pub struct MemoryCollection {
    inner: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let map = self.inner.lock().await;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {}", String::from_utf8_lossy(key));
        } else {
            debug!("Store MISS for key: {}", String::from_utf8_lossy(key));
        }
        value
    }

    async fn put(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        let mut map = self.inner.lock().await;
        debug!("Store PUT for key: {}", String::from_utf8_lossy(key));
        map.insert(key.to_vec(), value);
        Ok(())
    }

    async fn remove(&self, key: &[u8]) -> Result<()> {
        let mut map = self.inner.lock().await;
        map.remove(key);
        debug!("Store REMOVE for key: {}", String::from_utf8_lossy(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_collection_get_put() {
        let collection = MemoryCollection::new();

        // Initially, collection is empty
        assert!(collection.get(b"key1").await.is_none());

        collection.put(b"key1", b"123".to_vec()).await.unwrap();
        assert_eq!(collection.get(b"key1").await, Some(b"123".to_vec()));

        // Get a non-existent key
        assert!(collection.get(b"key2").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_collection_remove() {
        let collection = MemoryCollection::new();

        collection.put(b"key1", b"123".to_vec()).await.unwrap();
        collection.remove(b"key1").await.unwrap();
        assert!(collection.get(b"key1").await.is_none());

        // Removing a missing key is not an error
        collection.remove(b"key2").await.unwrap();
    }
}
