//! Observation cache with recency-based eviction and write-based expiry

use crate::cache::{
    config::CacheConfig,
    entry::CacheEntry,
    types::{CacheStats, RemovalCause, RemovalListener},
};
use crate::model::Observation;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Bounded, TTL-expiring store of city name → observation
///
/// This implementation provides:
/// - Thread-safe async access via RwLock
/// - Write-based TTL expiration, enforced on every read
/// - Recency-based eviction before an insertion can exceed capacity
/// - Hit/miss/eviction statistics
/// - An optional removal observer for logging
///
/// Cloning the handle is cheap and shares the underlying store; request
/// handlers and the refresh poller operate on clones concurrently without
/// external locking.
#[derive(Clone)]
pub struct ObservationCache {
    /// Cache configuration
    config: CacheConfig,

    /// Internal storage
    store: Arc<RwLock<CacheStore>>,

    /// Removal observer, logging only
    listener: Option<RemovalListener>,
}

/// Internal cache storage
struct CacheStore {
    /// Main storage: city -> entry
    entries: HashMap<String, CacheEntry>,

    /// Recency order, least recently used at the front
    recency: VecDeque<String>,

    /// Current cache statistics
    stats: CacheStats,
}

impl ObservationCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a cache whose removals are reported to `listener`
    pub fn with_removal_listener(config: CacheConfig, listener: RemovalListener) -> Self {
        Self::build(config, Some(listener))
    }

    fn build(config: CacheConfig, listener: Option<RemovalListener>) -> Self {
        debug!("Initializing observation cache with config: {:?}", config);

        let store = CacheStore {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            stats: CacheStats::default(),
        };

        Self {
            config,
            store: Arc::new(RwLock::new(store)),
            listener,
        }
    }

    /// Look up a city, treating entries past their TTL as absent.
    ///
    /// An expired entry is purged on access and counted as a miss.
    pub async fn get(&self, city: &str) -> Option<Observation> {
        let mut store = self.store.write().await;

        let cached = store
            .entries
            .get(city)
            .map(|entry| (entry.is_expired(), entry.observation.clone()));

        match cached {
            Some((false, observation)) => {
                debug!("Cache hit: {}", city);
                store.stats.hits += 1;
                Self::touch(&mut store, city);
                Some(observation)
            }
            Some((true, _)) => {
                debug!("Cache entry expired: {}", city);
                store.stats.misses += 1;
                store.stats.evictions_ttl += 1;
                Self::remove_entry(&mut store, city);
                drop(store);
                self.notify(city, RemovalCause::Expired);
                None
            }
            None => {
                debug!("Cache miss: {}", city);
                store.stats.misses += 1;
                None
            }
        }
    }

    /// Insert or replace the observation for a city.
    ///
    /// When the cache is at capacity, least recently used entries are
    /// evicted first so the insertion can never overflow it.
    pub async fn insert(&self, city: String, observation: Observation) {
        let mut removals: Vec<(String, RemovalCause)> = Vec::new();

        {
            let mut store = self.store.write().await;
            let entry = CacheEntry::new(observation, self.config.ttl);

            if store.entries.contains_key(&city) {
                debug!("Updating cache entry: {}", city);
                store.entries.insert(city.clone(), entry);
                Self::touch(&mut store, &city);
                removals.push((city, RemovalCause::Replaced));
            } else {
                while store.entries.len() >= self.config.max_entries {
                    let Some(victim) = store.recency.pop_front() else {
                        break;
                    };
                    debug!("Evicting cache entry at capacity: {}", victim);
                    store.entries.remove(&victim);
                    store.stats.evictions_capacity += 1;
                    removals.push((victim, RemovalCause::Capacity));
                }

                debug!("Inserting cache entry: {}", city);
                store.entries.insert(city.clone(), entry);
                store.recency.push_back(city);
            }

            store.stats.insertions += 1;
        }

        for (key, cause) in removals {
            self.notify(&key, cause);
        }
    }

    /// Snapshot of the city names currently stored, least recent first.
    ///
    /// No expiry filter is applied here; only `get` enforces TTL. This
    /// keeps a city eligible for a poller refresh even when a firing lands
    /// just after its entry lapsed.
    pub async fn keys(&self) -> Vec<String> {
        let store = self.store.read().await;
        store.recency.iter().cloned().collect()
    }

    /// Remove every entry.
    pub async fn invalidate_all(&self) {
        let keys: Vec<String> = {
            let mut store = self.store.write().await;
            store.entries.clear();
            let keys: Vec<String> = store.recency.drain(..).collect();
            store.stats.invalidations += keys.len() as u64;
            keys
        };

        debug!("Invalidated {} cache entries", keys.len());
        for key in &keys {
            self.notify(key, RemovalCause::Invalidated);
        }
    }

    /// Number of entries physically present.
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.entries.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        let store = self.store.read().await;
        store.entries.is_empty()
    }

    /// Current cache statistics
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        store.stats.clone()
    }

    /// Internal: move a city to the most-recent end of the recency queue
    fn touch(store: &mut CacheStore, city: &str) {
        store.recency.retain(|k| k != city);
        store.recency.push_back(city.to_string());
    }

    /// Internal: remove an entry and its recency slot
    fn remove_entry(store: &mut CacheStore, city: &str) {
        store.entries.remove(city);
        store.recency.retain(|k| k != city);
    }

    /// Internal: report a removal to the listener, if any
    fn notify(&self, city: &str, cause: RemovalCause) {
        if let Some(listener) = &self.listener {
            listener(city, cause);
        }
    }
}
