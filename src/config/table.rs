//! Fractal table configuration.

use super::{parse_env_var, Config};
use crate::error::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest accepted `block_bits`.
pub const MIN_BLOCK_BITS: u32 = 2;
/// Largest accepted `block_bits`.
pub const MAX_BLOCK_BITS: u32 = 16;

/// Structural constants of a [`FractalTable`](crate::FractalTable).
///
/// A fresh table starts as a single leaf of `min_leaf_capacity` slots. Leaves
/// double until they hold `1 << block_bits` slots; past that point the whole
/// structure is nested under a new branch level whose fan-out is also bounded
/// by `1 << block_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Initial leaf capacity, a power of two
    pub min_leaf_capacity: usize,
    /// Log2 of the maximum block capacity and branch fan-out
    pub block_bits: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_leaf_capacity: 16,
            block_bits: 10,
        }
    }
}

impl TableConfig {
    /// Create a new configuration builder.
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::new()
    }

    /// Maximum number of slots in one block.
    #[inline]
    pub fn max_block_capacity(&self) -> usize {
        1 << self.block_bits
    }
}

impl Config for TableConfig {
    fn validate(&self) -> Result<()> {
        if self.min_leaf_capacity < 2 || !self.min_leaf_capacity.is_power_of_two() {
            return Err(CollectionError::configuration(format!(
                "min_leaf_capacity must be a power of two >= 2, got {}",
                self.min_leaf_capacity
            )));
        }
        if !(MIN_BLOCK_BITS..=MAX_BLOCK_BITS).contains(&self.block_bits) {
            return Err(CollectionError::configuration(format!(
                "block_bits must be within {}..={}, got {}",
                MIN_BLOCK_BITS, MAX_BLOCK_BITS, self.block_bits
            )));
        }
        if self.min_leaf_capacity > self.max_block_capacity() {
            return Err(CollectionError::configuration(format!(
                "min_leaf_capacity {} exceeds the maximum block capacity {}",
                self.min_leaf_capacity,
                self.max_block_capacity()
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.min_leaf_capacity = parse_env_var(
            &format!("{}TABLE_MIN_LEAF_CAPACITY", prefix),
            config.min_leaf_capacity,
        );
        config.block_bits = parse_env_var(&format!("{}TABLE_BLOCK_BITS", prefix), config.block_bits);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self { min_leaf_capacity: 64, block_bits: 12 }
    }

    fn memory_preset() -> Self {
        Self { min_leaf_capacity: 4, block_bits: 8 }
    }

    fn realtime_preset() -> Self {
        Self { min_leaf_capacity: 16, block_bits: 10 }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| CollectionError::configuration(format!("Failed to serialize table config: {}", e)))?;
        std::fs::write(path, serialized)
            .map_err(|e| CollectionError::configuration(format!("Failed to write table config file: {}", e)))?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CollectionError::configuration(format!("Failed to read table config file: {}", e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| CollectionError::configuration(format!("Failed to parse table config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`TableConfig`].
#[derive(Debug, Clone, Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial leaf capacity (power of two).
    pub fn min_leaf_capacity(mut self, capacity: usize) -> Self {
        self.config.min_leaf_capacity = capacity;
        self
    }

    /// Set log2 of the maximum block capacity.
    pub fn block_bits(mut self, bits: u32) -> Self {
        self.config.block_bits = bits;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TableConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
