//! Per-file signal selection
//!
//! Chooses the randomized channel subset for one file and unions in the fixed
//! alias signals. Exactly one file per vehicle (the first) bypasses random
//! sizing and selects the entire catalog instead.

use crate::catalog::{SignalCatalog, ALIAS_SIGNALS};
use crate::config::GeneratorConfig;
use crate::types::{GeneratorError, Result};
use rand::seq::index;
use rand::Rng;

/// The realized channel selection for one file
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected names in draw order, alias signals appended last
    pub names: Vec<String>,
    /// The randomly drawn target count k (catalog names only, aliases excluded);
    /// equals the catalog size for the full-coverage file
    pub requested: usize,
}

/// Chooses the per-file channel subset
pub struct SignalSelector;

impl SignalSelector {
    /// Select channels for one file
    ///
    /// Draws k uniformly from [min_signals, min(max_signals, catalog size)],
    /// samples k names without replacement from the catalog union, then
    /// unions in the four alias names (no repeats when the catalog already
    /// carries an alias spelling). With `full_coverage` the whole union is
    /// taken instead of a random subset.
    ///
    /// # Errors
    /// `GeneratorError::Config` when the catalog holds fewer distinct names
    /// than `min_signals`, checked before any synthesis work starts.
    pub fn select<R: Rng>(
        catalog: &SignalCatalog,
        config: &GeneratorConfig,
        full_coverage: bool,
        rng: &mut R,
    ) -> Result<Selection> {
        let total = catalog.len();
        if total < config.min_signals {
            return Err(GeneratorError::Config(format!(
                "catalog holds {} signals, fewer than the minimum selection bound {}",
                total, config.min_signals
            )));
        }

        let all_names = catalog.all_names();
        let (mut names, requested) = if full_coverage {
            (all_names.to_vec(), total)
        } else {
            let upper = config.max_signals.min(total);
            let k = rng.gen_range(config.min_signals..=upper);
            let picked = index::sample(rng, total, k)
                .into_iter()
                .map(|i| all_names[i].clone())
                .collect();
            (picked, k)
        };

        // The alias set is present in every file, whatever the subset drew.
        // A catalog that itself carries an alias spelling contributes the
        // name only once.
        for alias in ALIAS_SIGNALS {
            if !names.iter().any(|n| n == alias) {
                names.push(alias.to_string());
            }
        }

        log::debug!(
            "selected {} channels (target {}, full_coverage={})",
            names.len(),
            requested,
            full_coverage
        );
        Ok(Selection { names, requested })
    }
}
