//! Telemetry Generator Library
//!
//! Synthesizes realistic-looking automotive time-series telemetry datasets
//! for testing downstream ingestion, cleaning and analytics pipelines. The
//! output is *deliberately imperfect*: duplicated/aliased channel names,
//! multiple sampling frequencies per file, mixed numeric encodings (including
//! legacy fixed-width byte strings) and randomized channel subsets - so
//! consumers must build robust cleaning logic rather than assume a clean
//! schema.
//!
//! # Architecture
//!
//! Per file, the pipeline runs selection → frequency assignment → grouped
//! synthesis → assembly, with no shared mutable state beyond the read-only
//! catalog:
//! - [`SignalCatalog`]: static registry of numeric + switch definitions
//! - [`select::SignalSelector`]: randomized, alias-augmented channel subset
//! - [`frequency::FrequencyAssigner`]: one sampling frequency per channel
//! - [`synth::DataSynthesizer`]: typed value series (the grouper supplies the
//!   required length)
//! - [`group::ChannelGrouper`]: frequency buckets sharing one time base each
//! - [`assemble::FileAssembler`]: invariant re-check and handoff to a
//!   [`DatasetWriter`]
//!
//! The library does NOT write container files, name output paths or schedule
//! batches; all of that lives in the application layer (telemetry-gen-cli).
//!
//! # Example Usage
//!
//! ```
//! use telemetry_gen::{Generator, GeneratorConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = GeneratorConfig::new().with_duration_secs(10.0);
//! let generator = Generator::new(config).unwrap();
//!
//! let spec = generator.file_spec("A", "A-7F3K9Q2", 1);
//! let mut rng = StdRng::seed_from_u64(42);
//! let dataset = generator.generate(&spec, &mut rng).unwrap();
//!
//! for group in &dataset.groups {
//!     println!("{} Hz: {} channels", group.frequency_hz, group.signals.len());
//! }
//! ```

// Public modules
pub mod assemble;
pub mod catalog;
pub mod config;
pub mod frequency;
pub mod generator;
pub mod group;
pub mod select;
pub mod synth;
pub mod types;

// Re-export main types for convenience
pub use assemble::{DatasetWriter, FileAssembler};
pub use catalog::{SignalCatalog, ALIAS_SIGNALS};
pub use config::GeneratorConfig;
pub use generator::Generator;
pub use types::{
    Dataset, FileSpec, FrequencyGroup, GeneratedSignal, GeneratorError, Result, SeriesValues,
    SignalDefinition, SignalProperties, SwitchSignalDefinition, ValueEncoding,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: the builtin catalog is ready for selection.
        let catalog = SignalCatalog::builtin();
        assert!(catalog.len() > 0);
        assert_eq!(ALIAS_SIGNALS.len(), 4);
    }
}
