//! Dataset assembly and the writer seam
//!
//! The assembler packages the frequency groups for one file and re-checks the
//! grouper's no-duplicate invariant before anything crosses the writer
//! boundary. The writer itself is an external collaborator; its container
//! format is opaque to this crate.

use crate::types::{Dataset, FileSpec, FrequencyGroup, GeneratorError, Result};
use std::collections::HashSet;

/// External writer collaborator
///
/// Receives one assembled dataset per call and persists it to the target
/// container format. Implementations own path handling and are responsible
/// for atomic publish (e.g. write-then-rename) so an aborted file never
/// becomes visible to downstream consumers.
pub trait DatasetWriter {
    /// Persist one dataset
    fn write(&self, dataset: &Dataset) -> Result<()>;
}

/// Packages frequency groups plus file metadata for the writer
pub struct FileAssembler;

impl FileAssembler {
    /// Assemble a dataset, verifying no channel name spans two groups
    ///
    /// Performs no data generation; the duplicate scan is the last line of
    /// defense before handoff.
    pub fn assemble(spec: FileSpec, groups: Vec<FrequencyGroup>) -> Result<Dataset> {
        let mut seen = HashSet::new();
        for group in &groups {
            for signal in &group.signals {
                if !seen.insert(signal.name.as_str()) {
                    return Err(GeneratorError::Consistency(format!(
                        "channel '{}' appears in more than one frequency group",
                        signal.name
                    )));
                }
            }
        }
        Ok(Dataset { spec, groups })
    }
}
