//! End-to-end pipeline properties
//!
//! Runs the whole selection → assignment → synthesis → grouping → assembly
//! pipeline and checks the cross-component guarantees that no single module
//! test can see.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use telemetry_gen::{
    Generator, GeneratorConfig, GeneratorError, SeriesValues, SignalCatalog, SignalDefinition,
    SignalProperties, ValueEncoding, ALIAS_SIGNALS,
};

fn generator(config: GeneratorConfig) -> Generator {
    Generator::new(config).unwrap()
}

fn decode(bytes: &[u8]) -> &str {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).unwrap()
}

#[test]
fn aliases_present_in_every_file() {
    let generator = generator(GeneratorConfig::new().with_duration_secs(2.0));
    let mut rng = StdRng::seed_from_u64(1);

    for file_index in 0..4 {
        let spec = generator.file_spec("A", "A-0000001", file_index);
        let dataset = generator.generate(&spec, &mut rng).unwrap();
        let names: HashSet<&str> = dataset.channels().map(|c| c.name.as_str()).collect();
        for alias in ALIAS_SIGNALS {
            assert!(names.contains(alias), "missing alias {}", alias);
        }
    }
}

#[test]
fn random_files_stay_within_subset_bounds() {
    let generator = generator(GeneratorConfig::new().with_duration_secs(1.0));
    let mut rng = StdRng::seed_from_u64(2);

    for file_index in 1..6 {
        let spec = generator.file_spec("B", "B-0000001", file_index);
        let dataset = generator.generate(&spec, &mut rng).unwrap();
        let catalog_channels = dataset.channel_count() - ALIAS_SIGNALS.len();
        assert!(
            (300..=1200).contains(&catalog_channels),
            "subset size {}",
            catalog_channels
        );
    }
}

#[test]
fn full_coverage_file_selects_entire_catalog() {
    let generator = generator(GeneratorConfig::new().with_duration_secs(1.0));
    let mut rng = StdRng::seed_from_u64(3);

    let spec = generator.file_spec("C", "C-0000001", 0);
    assert!(spec.full_coverage);
    let dataset = generator.generate(&spec, &mut rng).unwrap();

    let names: HashSet<&str> = dataset.channels().map(|c| c.name.as_str()).collect();
    for name in generator.catalog().all_names() {
        assert!(names.contains(name.as_str()), "missing {}", name);
    }
    assert_eq!(
        names.len(),
        generator.catalog().len() + ALIAS_SIGNALS.len()
    );
}

#[test]
fn group_lengths_follow_floor_of_duration_times_frequency() {
    // Scenario: duration 600 s, 0.1 Hz → 60 samples, 100 Hz → 60000 samples.
    let generator = generator(GeneratorConfig::new().with_duration_secs(600.0));
    let mut rng = StdRng::seed_from_u64(4);

    let spec = generator.file_spec("A", "A-0000002", 2);
    let dataset = generator.generate(&spec, &mut rng).unwrap();

    for group in &dataset.groups {
        let expected = (600.0 * group.frequency_hz).floor() as usize;
        assert_eq!(group.time_base.len(), expected);
        for signal in &group.signals {
            assert_eq!(signal.values.len(), expected, "channel {}", signal.name);
        }
        if group.frequency_hz == 0.1 {
            assert_eq!(group.time_base.len(), 60);
        }
        if group.frequency_hz == 100.0 {
            assert_eq!(group.time_base.len(), 60000);
        }
    }
}

#[test]
fn no_channel_spans_two_groups() {
    let generator = generator(GeneratorConfig::new().with_duration_secs(1.0));
    let mut rng = StdRng::seed_from_u64(5);

    let spec = generator.file_spec("A", "A-0000003", 1);
    let dataset = generator.generate(&spec, &mut rng).unwrap();

    let mut seen = HashSet::new();
    for group in &dataset.groups {
        for signal in &group.signals {
            assert!(seen.insert(signal.name.clone()), "duplicate {}", signal.name);
        }
    }
}

#[test]
fn switch_channels_only_emit_on_and_off() {
    let generator = generator(GeneratorConfig::new().with_duration_secs(5.0));
    let mut rng = StdRng::seed_from_u64(6);

    let spec = generator.file_spec("A", "A-0000004", 0);
    let dataset = generator.generate(&spec, &mut rng).unwrap();

    let mut switch_channels = 0;
    for signal in dataset.channels() {
        if !generator.catalog().is_switch(&signal.name) {
            continue;
        }
        switch_channels += 1;
        match &signal.values {
            SeriesValues::FixedString { values, .. } => {
                for bytes in values {
                    let symbol = decode(bytes);
                    assert!(
                        symbol == "ON" || symbol == "OFF",
                        "channel {} emitted {:?}",
                        signal.name,
                        symbol
                    );
                }
            }
            other => panic!(
                "switch channel {} stored as {:?}",
                signal.name,
                other.encoding()
            ),
        }
    }
    // Full coverage guarantees the switch catalog is present.
    assert!(switch_channels > 0);
}

#[test]
fn numeric_values_respect_configured_ranges_under_every_encoding() {
    let generator = generator(
        GeneratorConfig::new()
            .with_duration_secs(2.0)
            .with_stringified_fraction(0.5),
    );
    let mut rng = StdRng::seed_from_u64(7);

    let spec = generator.file_spec("B", "B-0000002", 1);
    let dataset = generator.generate(&spec, &mut rng).unwrap();

    for signal in dataset.channels() {
        if generator.catalog().is_switch(&signal.name) {
            continue;
        }
        let props = generator.catalog().properties(&signal.name);
        match &signal.values {
            SeriesValues::Float(values) => {
                assert!(values.iter().all(|v| *v >= props.min && *v <= props.max));
            }
            SeriesValues::Signed(values) => {
                assert!(values
                    .iter()
                    .all(|v| *v as f64 >= props.min && *v as f64 <= props.max));
            }
            SeriesValues::Unsigned(values) => {
                assert!(values
                    .iter()
                    .all(|v| *v as f64 >= props.min && *v as f64 <= props.max));
            }
            SeriesValues::FixedString { values, .. } => {
                for bytes in values {
                    let parsed: f64 = decode(bytes).parse().unwrap();
                    assert!(parsed >= props.min && parsed <= props.max);
                }
            }
        }
    }
}

#[test]
fn same_seed_reproduces_identical_datasets() {
    let config = GeneratorConfig::new().with_duration_secs(3.0);
    let generator = generator(config);
    let spec = generator.file_spec("C", "C-0000002", 4);

    let mut rng_a = StdRng::seed_from_u64(1234);
    let mut rng_b = StdRng::seed_from_u64(1234);
    let a = generator.generate(&spec, &mut rng_a).unwrap();
    let b = generator.generate(&spec, &mut rng_b).unwrap();

    assert_eq!(a.groups, b.groups);
}

#[test]
fn catalog_with_alias_spelling_generates_cleanly() {
    // A loaded catalog that defines "speed" itself must not trip the
    // cross-group duplicate check when the alias set is unioned in.
    let mut numeric: Vec<SignalDefinition> = (0..400)
        .map(|i| SignalDefinition {
            name: format!("sig_{:04}", i),
            category: "test".to_string(),
            properties: SignalProperties::new(None, 0.0, 1.0, ValueEncoding::Float),
        })
        .collect();
    numeric.push(SignalDefinition {
        name: "speed".to_string(),
        category: "test".to_string(),
        properties: SignalProperties::new(Some("km/h"), 0.0, 250.0, ValueEncoding::Float),
    });
    let catalog = SignalCatalog::from_definitions(numeric, vec![]);
    let generator = Generator::with_catalog(
        GeneratorConfig::new().with_duration_secs(1.0),
        catalog,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    let full = generator.file_spec("A", "A-0000006", 0);
    let dataset = generator.generate(&full, &mut rng).unwrap();
    let names: HashSet<&str> = dataset.channels().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), dataset.channel_count());
    assert_eq!(dataset.channel_count(), 401 + ALIAS_SIGNALS.len() - 1);

    let random = generator.file_spec("A", "A-0000006", 1);
    generator.generate(&random, &mut rng).unwrap();
}

#[test]
fn undersized_catalog_fails_before_synthesis() {
    let numeric = (0..100)
        .map(|i| SignalDefinition {
            name: format!("sig_{:03}", i),
            category: "test".to_string(),
            properties: SignalProperties::new(None, 0.0, 1.0, ValueEncoding::Float),
        })
        .collect();
    let catalog = SignalCatalog::from_definitions(numeric, vec![]);
    let generator = Generator::with_catalog(GeneratorConfig::new(), catalog).unwrap();

    let spec = generator.file_spec("A", "A-0000005", 1);
    let mut rng = StdRng::seed_from_u64(8);
    let err = generator.generate(&spec, &mut rng).unwrap_err();
    assert!(matches!(err, GeneratorError::Config(_)));
}
