//! Analysis result caching
//!
//! Reports are cached per path and keyed by a hash of the script content, so
//! unchanged scripts are not re-analyzed.

use crate::ScriptReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Bump when the scoring output changes so stale reports are discarded
const CACHE_VERSION: u32 = 1;
const CACHE_FILENAME: &str = ".scriptgrade-cache.json";

/// Cache entry for a single script
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// SHA256 hash of the script content
    content_hash: String,
    report: ScriptReport,
    /// Seconds since the epoch
    cached_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    /// Script path -> entry
    entries: HashMap<String, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache manager for script reports
pub struct AnalysisCache {
    cache_path: PathBuf,
    data: CacheData,
    /// Whether the cache has been modified since load
    dirty: bool,
    enabled: bool,
}

impl AnalysisCache {
    /// Open (or start) the cache stored in `project_root`
    pub fn new(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_FILENAME);
        let data = Self::load_cache(&cache_path).unwrap_or_default();

        Self {
            cache_path,
            data,
            dirty: false,
            enabled: true,
        }
    }

    /// Create a disabled cache (no-op)
    pub fn disabled() -> Self {
        Self {
            cache_path: PathBuf::new(),
            data: CacheData::default(),
            dirty: false,
            enabled: false,
        }
    }

    fn load_cache(path: &Path) -> Option<CacheData> {
        let content = fs::read_to_string(path).ok()?;
        let data: CacheData = match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Discarding unreadable cache {}: {}", path.display(), e);
                return None;
            }
        };

        if data.version != CACHE_VERSION {
            log::debug!(
                "Discarding cache version {} (expected {})",
                data.version,
                CACHE_VERSION
            );
            return None;
        }

        Some(data)
    }

    /// Save cache to disk if anything changed
    pub fn save(&self) -> Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache to {}", self.cache_path.display()))?;

        Ok(())
    }

    fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Get cached report if the content is unchanged
    pub fn get(&self, script_path: &Path, content: &str) -> Option<ScriptReport> {
        if !self.enabled {
            return None;
        }

        let key = script_path.to_string_lossy().to_string();
        let entry = self.data.entries.get(&key)?;

        if entry.content_hash != Self::hash_content(content) {
            return None;
        }

        Some(entry.report.clone())
    }

    /// Store a report in the cache
    pub fn set(&mut self, script_path: &Path, content: &str, report: ScriptReport) {
        if !self.enabled {
            return;
        }

        let key = script_path.to_string_lossy().to_string();
        let entry = CacheEntry {
            content_hash: Self::hash_content(content),
            report,
            cached_at: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        self.data.entries.insert(key, entry);
        self.dirty = true;
    }

    /// Remove entries for scripts that no longer exist on disk
    pub fn prune_missing(&mut self) {
        if !self.enabled {
            return;
        }

        let before = self.data.entries.len();
        self.data.entries.retain(|k, _| Path::new(k).exists());
        if self.data.entries.len() != before {
            log::debug!("Pruned {} stale cache entries", before - self.data.entries.len());
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.data.entries.len(),
            enabled: self.enabled,
        }
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.data.entries.clear();
        self.dirty = true;
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub enabled: bool,
}
