//! Configuration APIs for radix-collections
//!
//! Collections work out of the box with their defaults; configuration only
//! tunes structural constants such as the fractal table block sizes.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides common functionality for all configuration types,
//! including validation, environment initialization, and preset management.
//!
//! # Builder Patterns
//!
//! ```rust
//! use radix_collections::config::TableConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TableConfig::builder()
//!     .min_leaf_capacity(8)
//!     .block_bits(6)
//!     .build()?;
//! assert_eq!(config.max_block_capacity(), 64);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use radix_collections::config::{Config, TableConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads RADIX_TABLE_MIN_LEAF_CAPACITY and RADIX_TABLE_BLOCK_BITS
//! let config = TableConfig::from_env()?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod table;


pub use table::{TableConfig, TableConfigBuilder};

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `RADIX_{COMPONENT}_{FIELD}`, for
    /// example `RADIX_TABLE_BLOCK_BITS=8`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("RADIX_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Get a performance-optimized preset configuration.
    fn performance_preset() -> Self;

    /// Get a memory-optimized preset configuration.
    fn memory_preset() -> Self;

    /// Get a real-time preset configuration.
    fn realtime_preset() -> Self;

    /// Get a balanced preset configuration (the default).
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Utility function to parse environment variable with fallback to default.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
