//! JSON dataset writer
//!
//! Concrete writer collaborator for the generator core. Maps an assembled
//! dataset onto a JSON container under the
//! `<base>/<model>/<vehicle-id>/<model>_<vehicle-id>_file_<index>.json`
//! convention. Publishing is atomic: the document is written to a temporary
//! sibling and renamed into place, so a failed file never becomes visible to
//! downstream consumers.

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use telemetry_gen::{Dataset, DatasetWriter, GeneratorError, Result, SeriesValues};

/// Writes datasets as JSON files under a base directory
pub struct JsonDatasetWriter {
    base_dir: PathBuf,
}

#[derive(Serialize)]
struct FileDocument<'a> {
    model: &'a str,
    vehicle_id: &'a str,
    file_index: u32,
    duration_secs: f64,
    generated_at: String,
    groups: Vec<GroupDocument<'a>>,
}

#[derive(Serialize)]
struct GroupDocument<'a> {
    frequency_hz: f64,
    sample_count: usize,
    time_base: &'a [f64],
    channels: Vec<ChannelDocument<'a>>,
}

#[derive(Serialize)]
struct ChannelDocument<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    encoding: String,
    values: serde_json::Value,
}

impl JsonDatasetWriter {
    /// Create a writer rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The output path for a dataset, following the naming convention
    pub fn output_path(&self, dataset: &Dataset) -> PathBuf {
        self.base_dir
            .join(&dataset.spec.model)
            .join(&dataset.spec.vehicle_id)
            .join(format!("{}.json", dataset.spec.file_stem()))
    }

    fn document<'a>(dataset: &'a Dataset) -> FileDocument<'a> {
        FileDocument {
            model: &dataset.spec.model,
            vehicle_id: &dataset.spec.vehicle_id,
            file_index: dataset.spec.file_index,
            duration_secs: dataset.spec.duration_secs,
            generated_at: Utc::now().to_rfc3339(),
            groups: dataset
                .groups
                .iter()
                .map(|group| GroupDocument {
                    frequency_hz: group.frequency_hz,
                    sample_count: group.sample_count(),
                    time_base: &group.time_base,
                    channels: group
                        .signals
                        .iter()
                        .map(|signal| ChannelDocument {
                            name: &signal.name,
                            unit: signal.unit.as_deref(),
                            encoding: signal.values.encoding().to_string(),
                            values: series_to_json(&signal.values),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl DatasetWriter for JsonDatasetWriter {
    fn write(&self, dataset: &Dataset) -> Result<()> {
        let path = self.output_path(dataset);
        let parent = path
            .parent()
            .ok_or_else(|| GeneratorError::Config(format!("no parent directory for {:?}", path)))?;
        fs::create_dir_all(parent)?;

        // Write-then-rename keeps partially written files invisible.
        let tmp_path = path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        serde_json::to_writer(BufWriter::new(file), &Self::document(dataset))
            .map_err(|e| GeneratorError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        fs::rename(&tmp_path, &path)?;

        log::info!("wrote {:?}", path);
        Ok(())
    }
}

/// Map a value series onto JSON values
///
/// Fixed-width byte strings are emitted with their NUL padding trimmed; the
/// channel's `encoding` field records the physical width.
fn series_to_json(values: &SeriesValues) -> serde_json::Value {
    match values {
        SeriesValues::Float(v) => serde_json::json!(v),
        SeriesValues::Signed(v) => serde_json::json!(v),
        SeriesValues::Unsigned(v) => serde_json::json!(v),
        SeriesValues::FixedString { values, .. } => serde_json::json!(values
            .iter()
            .map(|bytes| trim_padding(bytes))
            .collect::<Vec<String>>()),
    }
}

fn trim_padding(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// List leftover temporary files under a directory (diagnostic aid for
/// cleanup after crashes)
pub fn find_stale_temp_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    if !dir.exists() {
        return Ok(stale);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            stale.extend(find_stale_temp_files(&path)?);
        } else if path.extension().and_then(|e| e.to_str()) == Some("tmp") {
            stale.push(path);
        }
    }
    Ok(stale)
}
