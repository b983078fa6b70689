//! On-disk memoization of completions.
//!
//! Entries live in `<dir>/<first 8 hex chars of key>.json`, each shard a
//! pretty-printed map from full key to completion text. Shards are
//! read-modify-written without locking, so concurrent writers to the same
//! shard can lose an update. The cache is an optimization only: storage and
//! parse errors are logged and treated as misses.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SHARD_PREFIX_LEN: usize = 8;

type Shard = BTreeMap<String, String>;

/// Derive the cache key for a completion request.
///
/// Every field is length-prefixed before hashing, so no two distinct
/// `(prompt, model, max_tokens)` triples feed the same bytes to SHA-256.
pub fn cache_key(prompt: &str, model: &str, max_tokens: u32) -> String {
    let mut hasher = Sha256::new();
    for field in [prompt.as_bytes(), model.as_bytes()] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    hasher.update(max_tokens.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub shards: usize,
    pub entries: usize,
}

/// Sharded JSON-file completion cache.
#[derive(Debug, Clone)]
pub struct CompletionCache {
    dir: PathBuf,
}

impl CompletionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn shard_path(&self, key: &str) -> PathBuf {
        let prefix = key.get(..SHARD_PREFIX_LEN).unwrap_or(key);
        self.dir.join(format!("{prefix}.json"))
    }

    /// Look up a stored completion.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.shard_path(key);
        let mut shard = read_shard(&path)?;
        let hit = shard.remove(key);
        debug!(
            key = key.get(..SHARD_PREFIX_LEN).unwrap_or(key),
            hit = hit.is_some(),
            "completion cache lookup"
        );
        hit
    }

    /// Store a completion, merging into the key's shard file.
    pub fn put(&self, key: &str, value: &str) {
        let path = self.shard_path(key);
        let mut shard = match load_shard(&path) {
            Ok(shard) => shard,
            Err(ShardError::Json(e)) => {
                warn!("Replacing corrupt cache shard {}: {}", path.display(), e);
                Shard::new()
            }
            Err(ShardError::Io(e)) => {
                warn!("Skipping cache write, shard {} unreadable: {}", path.display(), e);
                return;
            }
        };
        shard.insert(key.to_string(), value.to_string());

        if let Err(e) = write_shard(&self.dir, &path, &shard) {
            warn!("Failed to write cache shard {}: {}", path.display(), e);
        }
    }

    /// Count shard files and entries.
    pub fn stats(&self) -> std::io::Result<CacheStats> {
        let mut stats = CacheStats::default();
        for path in self.shard_files()? {
            stats.shards += 1;
            stats.entries += read_shard(&path).map(|s| s.len()).unwrap_or(0);
        }
        Ok(stats)
    }

    /// Remove every shard file. Returns how many were deleted.
    pub fn clear(&self) -> std::io::Result<usize> {
        let files = self.shard_files()?;
        for path in &files {
            std::fs::remove_file(path)?;
        }
        Ok(files.len())
    }

    fn shard_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[derive(Debug, thiserror::Error)]
enum ShardError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// A missing shard loads as empty.
fn load_shard(path: &Path) -> Result<Shard, ShardError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Shard::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

fn read_shard(path: &Path) -> Option<Shard> {
    match load_shard(path) {
        Ok(shard) => Some(shard),
        Err(e) => {
            warn!("Ignoring unusable cache shard {}: {}", path.display(), e);
            None
        }
    }
}

fn write_shard(dir: &Path, path: &Path, shard: &Shard) -> Result<(), ShardError> {
    std::fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(shard)?;
    std::fs::write(path, content)?;
    Ok(())
}
