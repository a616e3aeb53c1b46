//! Per-signal sampling frequency assignment
//!
//! Every selected channel independently draws one frequency from the
//! configured candidate set, with replacement across channels. No correlation
//! between a signal's category and its frequency is enforced; uncontrolled
//! real-world instrumentation does not have one either.

use crate::select::Selection;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A sampling frequency keyed as integer millihertz
///
/// `f64` is not `Ord`, so frequencies are carried as exact millihertz values
/// wherever they are used as bucket keys. 0.1 Hz is `FrequencyKey(100)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrequencyKey(u64);

impl FrequencyKey {
    /// Build a key from a frequency in Hz
    ///
    /// Inputs are expected on the millihertz grid;
    /// [`GeneratorConfig::validate`](crate::config::GeneratorConfig::validate)
    /// rejects candidate frequencies that do not round-trip through a key.
    pub fn from_hz(hz: f64) -> Self {
        Self((hz * 1000.0).round() as u64)
    }

    /// The frequency in Hz
    pub fn hz(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// The frequency in millihertz
    pub fn millihertz(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrequencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// One channel name paired with its drawn frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyAssignment {
    /// Channel name
    pub name: String,
    /// Drawn sampling frequency
    pub frequency: FrequencyKey,
}

/// Assigns sampling frequencies to a selection
pub struct FrequencyAssigner;

impl FrequencyAssigner {
    /// Draw one frequency per selected channel, uniformly with replacement
    ///
    /// The candidate set is validated as non-empty by
    /// [`GeneratorConfig::validate`](crate::config::GeneratorConfig::validate)
    /// before any pipeline run, so an empty slice here is unreachable in
    /// practice; it would produce an empty assignment list.
    pub fn assign<R: Rng>(
        selection: &Selection,
        possible_freq_hz: &[f64],
        rng: &mut R,
    ) -> Vec<FrequencyAssignment> {
        selection
            .names
            .iter()
            .filter_map(|name| {
                possible_freq_hz.choose(rng).map(|hz| FrequencyAssignment {
                    name: name.clone(),
                    frequency: FrequencyKey::from_hz(*hz),
                })
            })
            .collect()
    }
}
