// scour-core/src/infrastructure/config/cache.rs

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::domain::config::LoadedConfig;

/// Lifetime of a cached configuration: 5 minutes.
pub const CONFIG_CACHE_TTL_SECS: i64 = 5 * 60;

/// Stands in for the global config path in cache keys when none is given.
const NO_GLOBAL_CONFIG: &str = "none";
const KEY_DELIMITER: &str = "::";

/// Wall-clock time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    config: LoadedConfig,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub entries: Vec<String>,
}

/// Time-bounded store of loaded configurations keyed by
/// `(project root, global config path)`.
///
/// Constructed explicitly and handed to the loader; there is no process-wide
/// instance. Concurrent loads for the same key are not coalesced: the last
/// `set` wins.
pub struct ConfigCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl: Duration::seconds(CONFIG_CACHE_TTL_SECS),
        }
    }

    pub fn key(project_root: &Path, global_config_path: Option<&Path>) -> String {
        let global = global_config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| NO_GLOBAL_CONFIG.to_string());
        format!("{}{KEY_DELIMITER}{global}", project_root.display())
    }

    /// Returns the live entry for the key, evicting it if it has expired.
    pub fn get(
        &self,
        project_root: &Path,
        global_config_path: Option<&Path>,
    ) -> Option<LoadedConfig> {
        let key = Self::key(project_root, global_config_path);
        let now = self.clock.now();
        let mut entries = self.lock();

        let entry = entries.get(&key)?;
        if self.is_expired(entry, now) {
            debug!(%key, "Config cache entry expired");
            entries.remove(&key);
            return None;
        }
        Some(entry.config.clone())
    }

    pub fn set(
        &self,
        project_root: &Path,
        config: LoadedConfig,
        global_config_path: Option<&Path>,
    ) {
        let key = Self::key(project_root, global_config_path);
        let entry = CacheEntry {
            config,
            created_at: self.clock.now(),
        };
        self.lock().insert(key, entry);
    }

    /// Removes one key. Returns whether it was present.
    pub fn invalidate(&self, project_root: &Path, global_config_path: Option<&Path>) -> bool {
        let key = Self::key(project_root, global_config_path);
        self.lock().remove(&key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        before - entries.len()
    }

    /// Counts live entries only.
    pub fn stats(&self) -> CacheStats {
        self.cleanup();
        let entries = self.lock();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: keys.len(),
            entries: keys,
        }
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.created_at >= self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Aucune invariante n'est cassée par un panic en cours d'écriture
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
