//! Current-level counter over a key-value store
//!
//! The counter lives under a single key. It is created at level 1 on first
//! use and wraps back to 1 after the last level.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::configuration::LEVEL_KEY;
use crate::io::error::{PipeflowError, Result, file_system};
use crate::math::interpolation::{MAX_RATING, MIN_RATING};

/// Minimal persistence interface
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Whether `key` holds a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.load(key)?.is_some())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store of `key=value` lines
///
/// A missing file reads as an empty store. Every save rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(file_system(&self.path, "read store", error)),
        };
        Ok(content
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect())
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let content: String = values
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        fs::write(&self.path, content).map_err(|error| file_system(&self.path, "write store", error))
    }
}

/// Level counter for a campaign of `level_count` levels
#[derive(Debug, Clone)]
pub struct LevelProgress<S> {
    store: S,
    level_count: u32,
}

impl<S: KeyValueStore> LevelProgress<S> {
    /// Counter over `store`; a zero level count is treated as one level
    pub fn new(store: S, level_count: u32) -> Self {
        Self {
            store,
            level_count: level_count.max(1),
        }
    }

    /// Number of levels before wrapping
    pub const fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current level, saving level 1 if none is stored yet
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds a value that is not a
    /// positive integer
    pub fn current(&mut self) -> Result<u32> {
        if !self.store.exists(LEVEL_KEY)? {
            self.store.save(LEVEL_KEY, "1")?;
            return Ok(1);
        }
        let raw = self.store.load(LEVEL_KEY)?.unwrap_or_default();
        match raw.trim().parse::<u32>() {
            Ok(level) if level >= 1 => Ok(level),
            _ => Err(PipeflowError::Persistence {
                key: LEVEL_KEY.to_string(),
                reason: format!("'{raw}' is not a positive level number"),
            }),
        }
    }

    /// Move to the next level, wrapping to 1 after the last
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds an unusable value
    pub fn advance(&mut self) -> Result<u32> {
        let current = self.current()?;
        let next = if current >= self.level_count { 1 } else { current + 1 };
        self.store.save(LEVEL_KEY, &next.to_string())?;
        Ok(next)
    }
}

/// Difficulty rating for a level, spread evenly from 1 to 10 over the campaign
pub fn difficulty_for_level(level: u32, level_count: u32) -> u8 {
    if level_count <= 1 {
        return MIN_RATING;
    }
    let level = level.clamp(1, level_count);
    let span = u32::from(MAX_RATING - MIN_RATING);
    let rating = u32::from(MIN_RATING) + (level - 1) * span / (level_count - 1);
    rating as u8
}
