//! Core types for the telemetry generator library
//!
//! This module defines all the fundamental types the generator produces when
//! synthesizing a telemetry file. The generator is stateless per file and only
//! outputs an in-memory dataset - persisting it to a container format is the
//! job of an external writer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during dataset generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The requested generation cannot be satisfied by the configuration
    /// (e.g. the catalog is smaller than the minimum selection bound).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violation (a signal in two frequency groups, or a
    /// series whose length does not match its group's time base). Fatal for
    /// the current file; sibling files are unaffected.
    #[error("Internal consistency error: {0}")]
    Consistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Physical storage encoding for a generated value series
///
/// The encoding is deliberately decoupled from the numeric range: a signal
/// keeps its [min, max] semantics whether it is stored as a float, an
/// integer, or a legacy fixed-width byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueEncoding {
    /// 64-bit floating point
    Float,
    /// Signed integer (values truncated toward zero)
    Signed,
    /// Unsigned integer (values truncated toward zero)
    Unsigned,
    /// Fixed-width byte string (numeric rendered as text, NUL-padded)
    FixedString { width: usize },
}

impl fmt::Display for ValueEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueEncoding::Float => write!(f, "float"),
            ValueEncoding::Signed => write!(f, "signed"),
            ValueEncoding::Unsigned => write!(f, "unsigned"),
            ValueEncoding::FixedString { width } => write!(f, "fixed_string({})", width),
        }
    }
}

/// Default properties for a numeric signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalProperties {
    /// Engineering unit (e.g., "km/h", "°C", "V")
    pub unit: Option<String>,
    /// Minimum physical value
    pub min: f64,
    /// Maximum physical value
    pub max: f64,
    /// Storage encoding used when the signal is not coerced to a string
    pub encoding: ValueEncoding,
}

impl SignalProperties {
    /// Convenience constructor for catalog entries
    pub fn new(unit: Option<&str>, min: f64, max: f64, encoding: ValueEncoding) -> Self {
        Self {
            unit: unit.map(|u| u.to_string()),
            min,
            max,
            encoding,
        }
    }
}

/// A numeric signal definition from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDefinition {
    /// Signal name (unique within the catalog, up to intentional aliases)
    pub name: String,
    /// Category the signal belongs to (e.g., "battery", "chassis")
    pub category: String,
    /// Default unit/range/encoding metadata
    pub properties: SignalProperties,
}

/// A two-state switch signal definition
///
/// Switch values are restricted to the domain {"ON", "OFF"}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchSignalDefinition {
    /// Signal name
    pub name: String,
}

/// A generated value series, tagged with its storage encoding
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValues {
    /// Floating-point samples
    Float(Vec<f64>),
    /// Signed integer samples
    Signed(Vec<i64>),
    /// Unsigned integer samples
    Unsigned(Vec<u64>),
    /// Fixed-width byte-string samples (each entry exactly `width` bytes)
    FixedString { width: usize, values: Vec<Vec<u8>> },
}

impl SeriesValues {
    /// Number of samples in the series
    pub fn len(&self) -> usize {
        match self {
            SeriesValues::Float(v) => v.len(),
            SeriesValues::Signed(v) => v.len(),
            SeriesValues::Unsigned(v) => v.len(),
            SeriesValues::FixedString { values, .. } => values.len(),
        }
    }

    /// True if the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The storage encoding of this series
    pub fn encoding(&self) -> ValueEncoding {
        match self {
            SeriesValues::Float(_) => ValueEncoding::Float,
            SeriesValues::Signed(_) => ValueEncoding::Signed,
            SeriesValues::Unsigned(_) => ValueEncoding::Unsigned,
            SeriesValues::FixedString { width, .. } => ValueEncoding::FixedString { width: *width },
        }
    }
}

/// One named channel bound to a frequency group
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSignal {
    /// Channel name as it will appear in the file
    pub name: String,
    /// Engineering unit, if any
    pub unit: Option<String>,
    /// Sampling frequency in Hz (same as the owning group's)
    pub frequency_hz: f64,
    /// The synthesized samples; length equals the group's time-base length
    pub values: SeriesValues,
}

/// A set of channels sharing one sampling frequency and time base
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGroup {
    /// Sampling frequency in Hz
    pub frequency_hz: f64,
    /// Timestamps 0, 1/f, 2/f, ... of length floor(duration * f)
    pub time_base: Vec<f64>,
    /// All channels bound to this time base
    pub signals: Vec<GeneratedSignal>,
}

impl FrequencyGroup {
    /// Number of samples per channel in this group
    pub fn sample_count(&self) -> usize {
        self.time_base.len()
    }
}

/// Identity and parameters of one file to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Vehicle model identifier (e.g., "A")
    pub model: String,
    /// Model-prefixed vehicle identifier (e.g., "A-7F3K9Q2")
    pub vehicle_id: String,
    /// Zero-based file index within the vehicle
    pub file_index: u32,
    /// Recording duration in seconds
    pub duration_secs: f64,
    /// True for the one file per vehicle that covers the entire catalog
    pub full_coverage: bool,
}

impl FileSpec {
    /// File name stem following the `<model>_<vehicle-id>_file_<index>` convention
    pub fn file_stem(&self) -> String {
        format!("{}_{}_file_{}", self.model, self.vehicle_id, self.file_index)
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// The assembled output of one pipeline run: frequency groups plus metadata
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Identity of the file this dataset belongs to
    pub spec: FileSpec,
    /// Frequency groups in ascending frequency order
    pub groups: Vec<FrequencyGroup>,
}

impl Dataset {
    /// Total number of channels across all groups
    pub fn channel_count(&self) -> usize {
        self.groups.iter().map(|g| g.signals.len()).sum()
    }

    /// Iterate over all channels across all groups
    pub fn channels(&self) -> impl Iterator<Item = &GeneratedSignal> {
        self.groups.iter().flat_map(|g| g.signals.iter())
    }
}
