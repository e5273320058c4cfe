//! Error handling for the openprobe library
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`ProbeError`]. Misses on search and erase are normal outcomes and are never
//! reported through this type.

use thiserror::Error;

/// Main error type for the openprobe library
#[derive(Error, Debug)]
pub enum ProbeError {
    /// I/O related errors (CSV export, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every slot of the table is occupied and resizing is disabled
    #[error("Table full: all {capacity} slots are occupied")]
    TableFull {
        /// Capacity of the table at the time of the failure
        capacity: usize,
    },

    /// Free slots exist, but none lie on the key's probe sequence
    #[error("Probe sequence exhausted after {probes} probes in a table of capacity {capacity}")]
    ProbeExhausted {
        /// Number of slots examined before giving up
        probes: usize,
        /// Capacity of the table at the time of the failure
        capacity: usize,
    },

    /// A live entry could not be re-placed while rebuilding the table
    #[error("Rehash lost entries: expected {expected} live entries, placed {placed}")]
    RehashLostEntry {
        /// Live entries before the rehash
        expected: usize,
        /// Entries successfully placed in the new slot array
        placed: usize,
    },

    /// Requested capacity cannot hold the current contents
    #[error("Invalid capacity: requested {requested}, at least {required} required")]
    InvalidCapacity {
        /// Requested size hint
        requested: usize,
        /// Minimum acceptable size
        required: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Serialization or deserialization failures
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message from the serializer
        message: String,
    },
}

impl ProbeError {
    /// Create a table full error
    pub fn table_full(capacity: usize) -> Self {
        Self::TableFull { capacity }
    }

    /// Create a probe exhausted error
    pub fn probe_exhausted(probes: usize, capacity: usize) -> Self {
        Self::ProbeExhausted { probes, capacity }
    }

    /// Create a rehash lost entry error
    pub fn rehash_lost_entry(expected: usize, placed: usize) -> Self {
        Self::RehashLostEntry { expected, placed }
    }

    /// Create an invalid capacity error
    pub fn invalid_capacity(requested: usize, required: usize) -> Self {
        Self::InvalidCapacity { requested, required }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error from a message
    pub fn io_error<S: Into<String>>(message: S) -> Self {
        Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message.into()))
    }

    /// True for the two insert failures, which a caller can cure with a larger table
    pub fn is_insert_failure(&self) -> bool {
        matches!(self, Self::TableFull { .. } | Self::ProbeExhausted { .. })
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::TableFull { .. } => true,
            Self::ProbeExhausted { .. } => true,
            Self::InvalidCapacity { .. } => true,
            Self::RehashLostEntry { .. } => false,
            Self::Configuration { .. } => false,
            Self::Serialization { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::TableFull { .. } => "capacity",
            Self::ProbeExhausted { .. } => "coverage",
            Self::RehashLostEntry { .. } => "rehash",
            Self::InvalidCapacity { .. } => "capacity",
            Self::Configuration { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ProbeError>;
