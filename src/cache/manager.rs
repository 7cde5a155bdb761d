//! Cache manager for persisting search responses to disk
//!
//! Provides a `CacheManager` that stores raw API response bodies as JSON files
//! named after the query that produced them. Entries never expire and are never
//! evicted; a second write to the same key replaces the first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::data::{Season, SortMode};

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "result";

/// Deterministic identifier for one season query
///
/// Formatted as `{year}-Q{quarter}-{tags}-{sort}`, where `tags` is the sorted
/// tag list joined by `_` (or `all` when empty). Hyphens inside tags become
/// underscores so the key stays splittable on `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(year: i32, season: Season, tags: &[String], sort: SortMode) -> Self {
        let mut sorted: Vec<&str> = tags.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let joined = sorted.join("_").replace('-', "_");
        let tag_part = if joined.is_empty() { "all" } else { joined.as_str() };

        Self(format!(
            "{}-Q{}-{}-{}",
            year,
            season.quarter(),
            tag_part,
            sort.as_str()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the entry is stored under
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Manages reading and writing cached responses on disk
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheManager {
    /// Creates a CacheManager rooted at `result/` in the working directory
    pub fn new() -> Self {
        Self::with_dir(PathBuf::from(DEFAULT_CACHE_DIR))
    }

    /// Creates a CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given key
    pub fn cache_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads the stored document for `key`
    ///
    /// # Returns
    /// * `Ok(Some(String))` with the file content if the entry exists
    /// * `Ok(None)` if no entry exists for the key
    /// * `Err` for any other I/O failure
    pub fn lookup(&self, key: &CacheKey) -> io::Result<Option<String>> {
        match fs::read_to_string(self.cache_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes `document` verbatim under `key`, replacing any existing entry
    ///
    /// Returns the path that was written.
    pub fn store(&self, key: &CacheKey, document: &str) -> io::Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.cache_path(key);
        fs::write(&path, document)?;
        Ok(path)
    }
}
