// src/api/cache.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use serde_json::Value;
use tokio::sync::RwLock;

// Names of the cache groups that mutations invalidate.
pub mod tags {
    pub const CATEGORIES: &str = "categories";
    pub const MEALS: &str = "meals";
    pub const PROVIDERS: &str = "providers";
    pub const ORDERS: &str = "orders";
    pub const REVIEWS: &str = "reviews";
    pub const USERS: &str = "users";
}

struct CacheEntry {
    value: Value,
    tags: Vec<&'static str>,
    stored_at: Instant,
    revalidate: Option<Duration>,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.revalidate
            .is_none_or(|window| self.stored_at.elapsed() < window)
    }
}

/// Backend reads keyed by request URL, grouped under tags.
///
/// An entry is served until its freshness window runs out or one of its tags is
/// revalidated, whichever comes first.
#[derive(Clone, Default)]
pub struct TagCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stale entry is removed on the way out.
    pub async fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.is_fresh() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_fresh()) {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(
        &self,
        key: String,
        value: Value,
        tags: &[&'static str],
        revalidate: Option<Duration>,
    ) {
        let entry = CacheEntry {
            value,
            tags: tags.to_vec(),
            stored_at: Instant::now(),
            revalidate,
        };
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_fresh());
        entries.insert(key, entry);
    }

    /// Drops every entry carrying `tag`. Returns how many were dropped.
    pub async fn revalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.contains(&tag));
        let removed = before - entries.len();
        tracing::debug!(tag, removed, "cache tag revalidated");
        removed
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
