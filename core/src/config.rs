//! Grid and search settings.

use thiserror::Error;

use crate::sim::{LifeRule, LIFE};

/// Side length of the grid searched by default.
pub const DEFAULT_SIDE: usize = 7;
/// Largest supported side length. Every pattern id, and the exclusive upper
/// bound of the id space, must fit in a `u64`.
pub const MAX_SIDE: usize = 7;
/// Number of generations simulated before a pattern is given up on.
pub const DEFAULT_MAX_GENERATION: usize = 15;
/// Highest pattern id covered by previous searches of the 7x7 grid.
pub const MAX_CHECKED_VALUE: u64 = 132_000_000;

/// Number of ids classified per batch when streaming results.
const DEFAULT_BATCH_SIZE: u64 = 1 << 20;

/// Result type returned by configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid grid or search setting.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid side must be between 1 and {max}; got {got}")]
    SideOutOfRange { got: usize, max: usize },
    #[error("max generation must be at least 1")]
    ZeroGenerations,
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    #[error("thread count must be at least 1")]
    ZeroThreads,
}

/// Settings shared by every classification: the grid and the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of cells along each edge of the grid.
    pub side: usize,
    /// Maximum number of generations simulated per pattern.
    pub max_generation: usize,
    /// Birth/survival rule.
    pub rule: LifeRule,
}
impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            max_generation: DEFAULT_MAX_GENERATION,
            rule: LIFE,
        }
    }
}
impl GridConfig {
    /// Checks that the settings describe a searchable grid.
    pub fn validate(&self) -> ConfigResult<()> {
        check_side(self.side)?;
        if self.max_generation == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        Ok(())
    }

    /// Returns the number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }
}

/// Settings for a multithreaded search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of worker threads, or `None` to use one per core.
    pub threads: Option<usize>,
    /// Number of ids classified between two deliveries of results.
    pub batch_size: u64,
}
impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}
impl SearchConfig {
    /// Checks that the settings describe a runnable search.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

pub(crate) fn check_side(side: usize) -> ConfigResult<()> {
    if side == 0 || side > MAX_SIDE {
        Err(ConfigError::SideOutOfRange {
            got: side,
            max: MAX_SIDE,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GridConfig::default();
        assert_eq!(Ok(()), config.validate());
        assert_eq!(49, config.cell_count());
        assert_eq!("B3/S23", config.rule.to_string());
        assert_eq!(Ok(()), SearchConfig::default().validate());
    }

    #[test]
    fn test_invalid_config() {
        for &side in &[0, 8, 64] {
            let config = GridConfig {
                side,
                ..Default::default()
            };
            assert_eq!(
                Err(ConfigError::SideOutOfRange { got: side, max: 7 }),
                config.validate()
            );
        }
        let config = GridConfig {
            max_generation: 0,
            ..Default::default()
        };
        assert_eq!(Err(ConfigError::ZeroGenerations), config.validate());

        let search = SearchConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert_eq!(Err(ConfigError::ZeroBatchSize), search.validate());
        let search = SearchConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert_eq!(Err(ConfigError::ZeroThreads), search.validate());
    }
}
