//! Configuration for Shelfmark
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a catalog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding one JSON record per line.
    /// Parent directories are created on first write.
    pub data_file: PathBuf,

    /// Sync strategy: whether writes are fsynced before returning
    pub sync_strategy: SyncStrategy,
}

/// File sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append and rewrite (safest, slowest)
    EveryWrite,

    /// Leave flushing to the OS page cache
    OsManaged,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("library_storage.json"),
            sync_strategy: SyncStrategy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
