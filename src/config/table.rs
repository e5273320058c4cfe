//! Hash table configuration.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};

/// Load factor above which a growing table doubles before inserting
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Whether and when a table rebuilds itself larger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Capacity never changes; inserts fail once no slot is reachable
    Fixed,
    /// Rehash to `2 * capacity` when the load factor exceeds the ceiling
    Grow {
        /// Ceiling in (0, 1)
        max_load_factor: f64,
    },
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::Grow {
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl ResizePolicy {
    /// True when the table may grow
    pub fn is_enabled(&self) -> bool {
        matches!(self, ResizePolicy::Grow { .. })
    }

    /// True when a table at `load_factor` must grow before the next insert
    #[inline]
    pub fn should_grow(&self, load_factor: f64) -> bool {
        match self {
            ResizePolicy::Fixed => false,
            ResizePolicy::Grow { max_load_factor } => load_factor > *max_load_factor,
        }
    }
}

/// Construction parameters for [`OpenAddressingTable`](crate::OpenAddressingTable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Requested slot count, rounded up to the next prime
    pub initial_capacity: usize,
    /// Resize behaviour
    pub resize: ResizePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 17,
            resize: ResizePolicy::default(),
        }
    }
}

impl TableConfig {
    /// Growing table with the default load factor ceiling
    pub fn growing(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            resize: ResizePolicy::default(),
        }
    }

    /// Table that never resizes
    pub fn fixed(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            resize: ResizePolicy::Fixed,
        }
    }

    /// Replace the resize policy
    pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
        self.resize = resize;
        self
    }
}

impl Config for TableConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ProbeError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        if let ResizePolicy::Grow { max_load_factor } = self.resize {
            if !max_load_factor.is_finite() || max_load_factor <= 0.0 || max_load_factor >= 1.0 {
                return Err(ProbeError::configuration(format!(
                    "max_load_factor must be in (0, 1), got {}",
                    max_load_factor
                )));
            }
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity =
            parse_env_var(&format!("{}TABLE_CAPACITY", prefix), config.initial_capacity);
        let resize = parse_env_bool(&format!("{}TABLE_RESIZE", prefix), true);
        config.resize = if resize {
            ResizePolicy::Grow {
                max_load_factor: parse_env_var(
                    &format!("{}TABLE_MAX_LOAD_FACTOR", prefix),
                    DEFAULT_MAX_LOAD_FACTOR,
                ),
            }
        } else {
            ResizePolicy::Fixed
        };
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1021,
            resize: ResizePolicy::Grow { max_load_factor: 0.5 },
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 17,
            resize: ResizePolicy::Grow { max_load_factor: 0.9 },
        }
    }

    fn realtime_preset() -> Self {
        // no rehash pauses once sized
        Self {
            initial_capacity: 4099,
            resize: ResizePolicy::Fixed,
        }
    }
}
