//! Generator configuration types
//!
//! This module defines the minimal configuration needed by the generator
//! library. Output paths, file formats and batch orchestration are handled by
//! the application layer.

use crate::frequency::FrequencyKey;
use crate::types::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the generator library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Recording duration per file in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: f64,

    /// Number of files generated per vehicle
    #[serde(default = "default_num_files")]
    pub num_files: u32,

    /// Candidate sampling frequencies in Hz; each signal draws one
    ///
    /// Frequencies are bucketed at millihertz resolution, so every entry
    /// must be an exact multiple of 0.001 Hz; `validate` rejects the rest.
    #[serde(default = "default_possible_freq")]
    pub possible_freq_hz: Vec<f64>,

    /// Vehicle model identifiers
    #[serde(default = "default_models")]
    pub vehicle_models: Vec<String>,

    /// Number of vehicles generated per model
    #[serde(default = "default_vehicles_per_model")]
    pub vehicles_per_model: u32,

    /// Lower bound of the random per-file channel subset size
    #[serde(default = "default_min_signals")]
    pub min_signals: usize,

    /// Upper bound of the random per-file channel subset size
    #[serde(default = "default_max_signals")]
    pub max_signals: usize,

    /// Fraction of numeric signals coerced into fixed-width string storage
    #[serde(default = "default_stringified_fraction")]
    pub stringified_fraction: f64,

    /// Byte width used for stringified numeric signals
    #[serde(default = "default_string_width")]
    pub string_width: usize,

    /// Batch seed; None draws one from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_duration() -> f64 {
    600.0
}

fn default_num_files() -> u32 {
    12
}

fn default_possible_freq() -> Vec<f64> {
    vec![0.1, 1.0, 10.0, 100.0]
}

fn default_models() -> Vec<String> {
    vec!["A".to_string(), "B".to_string(), "C".to_string()]
}

fn default_vehicles_per_model() -> u32 {
    3
}

fn default_min_signals() -> usize {
    300
}

fn default_max_signals() -> usize {
    1200
}

fn default_stringified_fraction() -> f64 {
    0.1
}

fn default_string_width() -> usize {
    32
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            num_files: default_num_files(),
            possible_freq_hz: default_possible_freq(),
            vehicle_models: default_models(),
            vehicles_per_model: default_vehicles_per_model(),
            min_signals: default_min_signals(),
            max_signals: default_max_signals(),
            stringified_fraction: default_stringified_fraction(),
            string_width: default_string_width(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the per-file duration in seconds
    pub fn with_duration_secs(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Builder method: set the number of files per vehicle
    pub fn with_num_files(mut self, num_files: u32) -> Self {
        self.num_files = num_files;
        self
    }

    /// Builder method: set the candidate sampling frequencies
    pub fn with_possible_freq_hz(mut self, freqs: Vec<f64>) -> Self {
        self.possible_freq_hz = freqs;
        self
    }

    /// Builder method: set the vehicle models
    pub fn with_vehicle_models(mut self, models: Vec<String>) -> Self {
        self.vehicle_models = models;
        self
    }

    /// Builder method: set the number of vehicles per model
    pub fn with_vehicles_per_model(mut self, count: u32) -> Self {
        self.vehicles_per_model = count;
        self
    }

    /// Builder method: set the random subset size bounds
    pub fn with_signal_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_signals = min;
        self.max_signals = max;
        self
    }

    /// Builder method: set the fraction of stringified numeric signals
    pub fn with_stringified_fraction(mut self, fraction: f64) -> Self {
        self.stringified_fraction = fraction;
        self
    }

    /// Builder method: set the byte width of stringified signals
    pub fn with_string_width(mut self, width: usize) -> Self {
        self.string_width = width;
        self
    }

    /// Builder method: set the batch seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration before any generation starts
    pub fn validate(&self) -> Result<()> {
        if !(self.duration_secs > 0.0) {
            return Err(GeneratorError::Config(format!(
                "duration must be positive, got {}",
                self.duration_secs
            )));
        }
        if self.possible_freq_hz.is_empty() {
            return Err(GeneratorError::Config(
                "possible_freq_hz must not be empty".to_string(),
            ));
        }
        if let Some(f) = self.possible_freq_hz.iter().find(|f| !(**f > 0.0)) {
            return Err(GeneratorError::Config(format!(
                "sampling frequencies must be positive, got {}",
                f
            )));
        }
        if let Some(f) = self
            .possible_freq_hz
            .iter()
            .find(|f| FrequencyKey::from_hz(**f).hz() != **f)
        {
            return Err(GeneratorError::Config(format!(
                "sampling frequency {} is not representable at millihertz resolution",
                f
            )));
        }
        if self.min_signals == 0 || self.min_signals > self.max_signals {
            return Err(GeneratorError::Config(format!(
                "invalid signal bounds [{}, {}]",
                self.min_signals, self.max_signals
            )));
        }
        if !(0.0..=1.0).contains(&self.stringified_fraction) {
            return Err(GeneratorError::Config(format!(
                "stringified_fraction must be within [0, 1], got {}",
                self.stringified_fraction
            )));
        }
        if self.string_width == 0 {
            return Err(GeneratorError::Config(
                "string_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new();
        assert_eq!(config.duration_secs, 600.0);
        assert_eq!(config.num_files, 12);
        assert_eq!(config.possible_freq_hz, vec![0.1, 1.0, 10.0, 100.0]);
        assert_eq!(config.vehicle_models, vec!["A", "B", "C"]);
        assert_eq!(config.min_signals, 300);
        assert_eq!(config.max_signals, 1200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_duration_secs(60.0)
            .with_num_files(2)
            .with_signal_bounds(10, 20)
            .with_stringified_fraction(0.5)
            .with_seed(42);

        assert_eq!(config.duration_secs, 60.0);
        assert_eq!(config.num_files, 2);
        assert_eq!(config.min_signals, 10);
        assert_eq!(config.max_signals, 20);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GeneratorConfig::new()
            .with_duration_secs(0.0)
            .validate()
            .is_err());
        assert!(GeneratorConfig::new()
            .with_possible_freq_hz(vec![])
            .validate()
            .is_err());
        assert!(GeneratorConfig::new()
            .with_possible_freq_hz(vec![1.0, -10.0])
            .validate()
            .is_err());
        assert!(GeneratorConfig::new()
            .with_signal_bounds(500, 100)
            .validate()
            .is_err());
        assert!(GeneratorConfig::new()
            .with_stringified_fraction(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validation_rejects_sub_millihertz_frequencies() {
        // Below the key resolution the bucket key would collapse to 0.
        assert!(GeneratorConfig::new()
            .with_possible_freq_hz(vec![0.0001])
            .validate()
            .is_err());
        // Off-grid frequencies would silently merge into a neighboring key.
        assert!(GeneratorConfig::new()
            .with_possible_freq_hz(vec![1.0, 0.0015])
            .validate()
            .is_err());
        // Exact millihertz multiples pass.
        assert!(GeneratorConfig::new()
            .with_possible_freq_hz(vec![0.1, 0.25, 2.5, 100.0])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"duration_secs": 120.0}"#).unwrap();
        assert_eq!(config.duration_secs, 120.0);
        assert_eq!(config.num_files, 12);
        assert_eq!(config.string_width, 32);
        assert_eq!(config.seed, None);
    }
}
