//! Local lyrics cache keyed by song id
//!
//! All entries live in one JSON object under a single store key. Anything
//! that fails to parse is treated as absent rather than as an error.

use super::LyricsResult;
use crate::store::KeyValueStore;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const CACHE_KEY: &str = "lyrics_cache";

pub struct LyricsCache {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LyricsCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, LyricsResult>> {
        let Some(raw) = self.store.get(CACHE_KEY).await? else {
            return Ok(BTreeMap::new());
        };

        let object: Map<String, Value> = match serde_json::from_str(&raw) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!("Ignoring unreadable lyrics cache: {}", e);
                return Ok(BTreeMap::new());
            }
        };

        let mut entries = BTreeMap::new();
        for (song_id, value) in object {
            match serde_json::from_value::<LyricsResult>(value) {
                Ok(result) => {
                    entries.insert(song_id, result);
                }
                Err(e) => tracing::warn!("Dropping unreadable cache entry {}: {}", song_id, e),
            }
        }
        Ok(entries)
    }

    async fn save(&self, entries: &BTreeMap<String, LyricsResult>) -> Result<()> {
        let raw = serde_json::to_string(entries).context("Failed to serialize lyrics cache")?;
        self.store.put(CACHE_KEY, &raw).await
    }

    pub async fn get(&self, song_id: &str) -> Result<Option<LyricsResult>> {
        Ok(self.load().await?.remove(song_id))
    }

    /// Store under the result's own song id, replacing any previous entry
    pub async fn put(&self, result: &LyricsResult) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(result.song_id.clone(), result.clone());
        self.save(&entries).await?;

        tracing::debug!("Cached lyrics for {} from {}", result.song_id, result.source);
        Ok(())
    }

    pub async fn remove(&self, song_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(song_id).is_none() {
            return Ok(false);
        }
        self.save(&entries).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.delete(CACHE_KEY).await?;
        Ok(())
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.load().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cache_with_store() -> (LyricsCache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (LyricsCache::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let (cache, _) = cache_with_store();
        let result = LyricsResult::new("adele_hello", "LRCLIB", "", Some("[00:18.00]Hello".to_string()));

        assert!(cache.get("adele_hello").await.unwrap().is_none());
        cache.put(&result).await.unwrap();
        assert_eq!(cache.get("adele_hello").await.unwrap(), Some(result));
        assert_eq!(cache.len().await.unwrap(), 1);

        assert!(cache.remove("adele_hello").await.unwrap());
        assert!(!cache.remove("adele_hello").await.unwrap());
        assert!(cache.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let (cache, _) = cache_with_store();
        cache.put(&LyricsResult::new("sia_chandelier", "Lyrist", "old", None)).await.unwrap();
        cache.put(&LyricsResult::new("sia_chandelier", "LRCLIB", "new", None)).await.unwrap();

        let cached = cache.get("sia_chandelier").await.unwrap().unwrap();
        assert_eq!(cached.plain_lyrics, "new");
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_single_store_key_layout() {
        let (cache, store) = cache_with_store();
        cache.put(&LyricsResult::new("a_b", "Textyl", "x", None)).await.unwrap();

        let raw = store.get(CACHE_KEY).await.unwrap().unwrap();
        let json: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["a_b"]["source"], "Textyl");
        assert_eq!(json["a_b"]["plainLyrics"], "x");
    }

    #[tokio::test]
    async fn test_corrupt_cache_treated_as_empty() {
        let (cache, store) = cache_with_store();
        store.put(CACHE_KEY, "not json at all").await.unwrap();
        assert!(cache.get("a_b").await.unwrap().is_none());

        cache.put(&LyricsResult::new("a_b", "Textyl", "x", None)).await.unwrap();
        assert!(cache.get("a_b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_entry_dropped() {
        let (cache, store) = cache_with_store();
        let good = LyricsResult::new("good", "LRCLIB", "words", None);
        let raw = serde_json::json!({
            "good": good,
            "bad": {"unexpected": true},
        });
        store.put(CACHE_KEY, &raw.to_string()).await.unwrap();

        assert!(cache.get("bad").await.unwrap().is_none());
        assert_eq!(cache.get("good").await.unwrap(), Some(good));
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let (cache, _) = cache_with_store();
        cache.put(&LyricsResult::new("a_b", "Textyl", "x", None)).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.is_empty().await.unwrap());
    }
}
