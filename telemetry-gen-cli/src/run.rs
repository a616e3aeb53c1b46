//! Batch orchestration
//!
//! Expands the (model × vehicle × file index) space into FileSpecs and runs
//! them across rayon workers. Files are independent: each gets its own random
//! stream derived from the batch seed and the file's identity, so results are
//! reproducible regardless of worker scheduling, and one failed file never
//! aborts its siblings.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use telemetry_gen::{DatasetWriter, FileSpec, Generator};

/// Outcome counts for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files generated and published
    pub written: usize,
    /// Files skipped after a generation or write failure
    pub failed: usize,
    /// The batch seed actually used (drawn from entropy when unset)
    pub seed: u64,
}

/// Derive the per-file random seed from the batch seed and file identity
pub fn file_seed(batch_seed: u64, spec: &FileSpec) -> u64 {
    let mut hasher = DefaultHasher::new();
    batch_seed.hash(&mut hasher);
    spec.model.hash(&mut hasher);
    spec.vehicle_id.hash(&mut hasher);
    spec.file_index.hash(&mut hasher);
    hasher.finish()
}

/// Enumerate every FileSpec of the batch
///
/// Vehicle identifiers are drawn from the batch rng before the parallel
/// fan-out, so they are stable for a given seed.
pub fn enumerate_specs(generator: &Generator, rng: &mut StdRng) -> Vec<FileSpec> {
    let config = generator.config();
    let mut specs = Vec::new();
    for model in &config.vehicle_models {
        for _ in 0..config.vehicles_per_model {
            let vehicle_id = vehicle_id(model, rng);
            for file_index in 0..config.num_files {
                specs.push(generator.file_spec(model, &vehicle_id, file_index));
            }
        }
    }
    specs
}

/// Model-prefixed alphanumeric vehicle token, e.g. "A-X7K3QF9"
fn vehicle_id<R: Rng>(model: &str, rng: &mut R) -> String {
    let token: String = rng
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    format!("{}-{}", model, token.to_ascii_uppercase())
}

/// Generate and publish all files of the batch
///
/// Each worker seeds its own rng from the file identity; a failed file is
/// logged and skipped while the rest of the batch continues.
pub fn run_batch<W>(generator: &Generator, writer: &W) -> BatchSummary
where
    W: DatasetWriter + Sync,
{
    let seed = generator
        .config()
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("batch seed: {}", seed);

    let mut batch_rng = StdRng::seed_from_u64(seed);
    let specs = enumerate_specs(generator, &mut batch_rng);
    log::info!("generating {} files", specs.len());

    let results: Vec<bool> = specs
        .par_iter()
        .map(|spec| {
            let mut rng = StdRng::seed_from_u64(file_seed(seed, spec));
            match generator
                .generate(spec, &mut rng)
                .and_then(|dataset| writer.write(&dataset))
            {
                Ok(()) => true,
                Err(e) => {
                    log::error!("skipping {}: {}", spec, e);
                    false
                }
            }
        })
        .collect();

    let written = results.iter().filter(|ok| **ok).count();
    BatchSummary {
        written,
        failed: results.len() - written,
        seed,
    }
}
