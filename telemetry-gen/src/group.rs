//! Frequency grouping and time-base construction
//!
//! Partitions the assigned channels into frequency buckets, builds one shared
//! time base per bucket and drives the synthesizer with exactly that bucket's
//! sample count. Bucket order is ascending frequency, which keeps group order
//! stable for reproducible runs.

use crate::catalog::SignalCatalog;
use crate::frequency::{FrequencyAssignment, FrequencyKey};
use crate::synth::DataSynthesizer;
use crate::types::{FrequencyGroup, GeneratedSignal, GeneratorError, Result};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

/// Builds frequency-homogeneous channel groups
pub struct ChannelGrouper;

impl ChannelGrouper {
    /// Number of samples for a duration and frequency: floor(duration × f)
    ///
    /// Always floored, never rounded or ceiled.
    pub fn sample_count(duration_secs: f64, frequency: FrequencyKey) -> usize {
        (duration_secs * frequency.hz()).floor() as usize
    }

    /// Partition the assignments, build time bases and synthesize all series
    ///
    /// # Errors
    /// `GeneratorError::Consistency` when a channel name lands in more than
    /// one bucket or a synthesized series does not match its group's
    /// time-base length. Both indicate an internal defect and abort the
    /// current file.
    pub fn build_groups<R: Rng>(
        catalog: &SignalCatalog,
        synthesizer: &DataSynthesizer,
        assignments: &[FrequencyAssignment],
        duration_secs: f64,
        rng: &mut R,
    ) -> Result<Vec<FrequencyGroup>> {
        let mut buckets: BTreeMap<FrequencyKey, Vec<&str>> = BTreeMap::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for assignment in assignments {
            if !seen.insert(assignment.name.as_str()) {
                return Err(GeneratorError::Consistency(format!(
                    "channel '{}' assigned to more than one frequency group",
                    assignment.name
                )));
            }
            buckets
                .entry(assignment.frequency)
                .or_default()
                .push(assignment.name.as_str());
        }

        let mut groups = Vec::with_capacity(buckets.len());
        for (frequency, names) in buckets {
            let n = Self::sample_count(duration_secs, frequency);
            let period = 1.0 / frequency.hz();
            let time_base: Vec<f64> = (0..n).map(|i| i as f64 * period).collect();

            let mut signals = Vec::with_capacity(names.len());
            for name in names {
                let (values, unit) = if catalog.is_switch(name) {
                    (synthesizer.switch_series(n, rng), None)
                } else {
                    let properties = catalog.properties(name);
                    let unit = properties.unit.clone();
                    (synthesizer.numeric_series(&properties, n, rng), unit)
                };

                if values.len() != n {
                    return Err(GeneratorError::Consistency(format!(
                        "channel '{}' produced {} samples, group at {} expects {}",
                        name,
                        values.len(),
                        frequency,
                        n
                    )));
                }

                signals.push(GeneratedSignal {
                    name: name.to_string(),
                    unit,
                    frequency_hz: frequency.hz(),
                    values,
                });
            }

            log::debug!(
                "group at {}: {} channels x {} samples",
                frequency,
                signals.len(),
                n
            );
            groups.push(FrequencyGroup {
                frequency_hz: frequency.hz(),
                time_base,
                signals,
            });
        }

        Ok(groups)
    }
}
