//! In-memory memoization of computed responses, keyed by request fingerprint.
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Configuration for response caching
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Entry lifetime, e.g. "5m" or "90s"
    pub ttl: String,
    /// Expired entries are swept once the cache holds more than this many.
    pub sweep_threshold: usize,
    /// Hard limit; the oldest entry is evicted to make room.
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: "5m".to_string(),
            sweep_threshold: 100,
            capacity: 1_000,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Result<Duration> {
        let ttl = humantime::parse_duration(self.ttl.trim())
            .with_context(|| format!("Invalid cache ttl '{}'", self.ttl))?;
        Duration::from_std(ttl).with_context(|| format!("Cache ttl '{}' is out of range", self.ttl))
    }
}

struct Entry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// Bounded key -> value store with time-based expiry.
///
/// Expired entries are dropped lazily when read, and in bulk whenever the
/// entry count passes the sweep threshold. Safe to share across threads.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
    sweep_threshold: usize,
    capacity: usize,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration, sweep_threshold: usize, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            sweep_threshold,
            capacity: capacity.max(1),
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        Ok(Self::new(settings.ttl()?, settings.sweep_threshold, settings.capacity))
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_at(key.into(), value, Utc::now());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.lock();
        if entries.len() > self.sweep_threshold {
            self.sweep(&mut entries, now);
        }

        let expired = match entries.get(key) {
            Some(entry) if !self.is_expired(entry, now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    fn insert_at(&self, key: String, value: V, now: DateTime<Utc>) {
        let mut entries = self.lock();
        if entries.len() > self.sweep_threshold {
            self.sweep(&mut entries, now);
        }
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!(key = %oldest, "cache full, evicting oldest entry");
                entries.remove(&oldest);
            }
        }
        entries.insert(key, Entry { value, inserted_at: now });
    }

    fn sweep(&self, entries: &mut HashMap<String, Entry<V>>, now: DateTime<Utc>) {
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        debug!(removed = before - entries.len(), remaining = entries.len(), "swept expired cache entries");
    }

    fn is_expired(&self, entry: &Entry<V>, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at > self.ttl
    }

    // A panic while holding the lock cannot leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cache key for one request to one operation: the operation name followed
/// by the request's JSON form.
pub fn fingerprint<T: Serialize>(operation: &str, request: &T) -> serde_json::Result<String> {
    Ok(format!("{}:{}", operation, serde_json::to_string(request)?))
}
