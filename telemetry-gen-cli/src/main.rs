//! Telemetry Generator CLI Application
//!
//! Command-line front end for the telemetry-gen library. It adds:
//! - TOML configuration loading with flag overrides
//! - Optional external signal catalogs (JSON)
//! - Parallel batch generation across vehicles and files
//! - The concrete JSON writer with atomic publish

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use telemetry_gen::{Generator, SignalCatalog, SignalDefinition, SwitchSignalDefinition};

mod config;
mod run;
mod writer;

use writer::JsonDatasetWriter;

/// Telemetry Generator - synthesize imperfect automotive telemetry files
#[derive(Parser, Debug)]
#[command(name = "telemetry-gen-cli")]
#[command(about = "Generate randomized multi-frequency telemetry test files", long_about = None)]
#[command(version)]
struct Args {
    /// Base output directory for generated files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to an external signal catalog (JSON) replacing the builtin one
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Batch seed for reproducible output
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Recording duration per file in seconds
    #[arg(short, long, value_name = "SECS")]
    duration: Option<f64>,

    /// Number of files per vehicle
    #[arg(short, long, value_name = "COUNT")]
    num_files: Option<u32>,

    /// Vehicle model identifier (can be repeated)
    #[arg(short, long = "model", value_name = "MODEL")]
    models: Vec<String>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Telemetry Generator CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using generator library v{}", telemetry_gen::VERSION);

    // Load the config file, then let flags override it
    let mut app_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };
    if let Some(duration) = args.duration {
        app_config.generator.duration_secs = duration;
    }
    if let Some(num_files) = args.num_files {
        app_config.generator.num_files = num_files;
    }
    if !args.models.is_empty() {
        app_config.generator.vehicle_models = args.models.clone();
    }
    if let Some(seed) = args.seed {
        app_config.generator.seed = Some(seed);
    }
    if let Some(output_dir) = &args.output_dir {
        app_config.output.base_dir = output_dir.clone();
    }

    // Build the generator over the builtin or an external catalog
    let generator = match &args.catalog {
        Some(path) => {
            let catalog = load_catalog(path)?;
            Generator::with_catalog(app_config.generator.clone(), catalog)?
        }
        None => Generator::new(app_config.generator.clone())?,
    };

    let writer = JsonDatasetWriter::new(&app_config.output.base_dir);
    let summary = run::run_batch(&generator, &writer);

    println!(
        "Generated {} files under {:?} (seed {}), {} failed",
        summary.written, app_config.output.base_dir, summary.seed, summary.failed
    );
    if summary.failed > 0 {
        // Aborted files publish atomically, so any leftover temp file points
        // at a crashed worker rather than a normal failure.
        for stale in writer::find_stale_temp_files(&app_config.output.base_dir)? {
            log::warn!("stale temporary file left behind: {:?}", stale);
        }
        anyhow::bail!("{} files failed; see log output", summary.failed);
    }
    Ok(())
}

/// External catalog document: numeric and switch definition lists
#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    #[serde(default)]
    signals: Vec<SignalDefinition>,
    #[serde(default)]
    switches: Vec<SwitchSignalDefinition>,
}

/// Load a signal catalog from a JSON file
fn load_catalog(path: &Path) -> Result<SignalCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    let parsed: CatalogFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;
    Ok(SignalCatalog::from_definitions(
        parsed.signals,
        parsed.switches,
    ))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_file_parsing() {
        let json = r#"{
            "signals": [
                {
                    "name": "coolant_temp",
                    "category": "powertrain",
                    "properties": {
                        "unit": "°C",
                        "min": -40.0,
                        "max": 130.0,
                        "encoding": "float"
                    }
                }
            ],
            "switches": [
                { "name": "ignition_on" }
            ]
        }"#;
        let parsed: CatalogFile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.signals.len(), 1);
        assert_eq!(parsed.switches.len(), 1);

        let catalog = SignalCatalog::from_definitions(parsed.signals, parsed.switches);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_switch("ignition_on"));
    }
}
