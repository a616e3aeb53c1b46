//! Value series synthesis
//!
//! Generates the per-channel sample series: uniform draws within the signal's
//! configured range, stored under the encoding the signal calls for. A
//! configurable fraction of numeric channels is instead coerced into a
//! fixed-width byte-string representation to simulate legacy logging encodings
//! that cannot carry arbitrary numeric or Unicode types. The coercion changes
//! only the physical storage; the numeric range semantics stay intact.

use crate::config::GeneratorConfig;
use crate::types::{SeriesValues, SignalProperties, ValueEncoding};
use rand::Rng;

/// The two-symbol switch domain
pub const SWITCH_STATES: [&str; 2] = ["ON", "OFF"];

/// Byte width of stored switch symbols; the smallest that fits both states
pub const SWITCH_STRING_WIDTH: usize = 3;

/// Synthesizes value series for selected channels
pub struct DataSynthesizer {
    stringified_fraction: f64,
    string_width: usize,
}

impl DataSynthesizer {
    /// Create a synthesizer from the generator configuration
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            stringified_fraction: config.stringified_fraction,
            string_width: config.string_width,
        }
    }

    /// Generate `n` samples for a numeric channel
    ///
    /// Values are drawn uniformly from [min, max]. With probability
    /// `stringified_fraction` the whole channel is stored as fixed-width byte
    /// strings instead of its native encoding; the rendered values still obey
    /// the same range.
    pub fn numeric_series<R: Rng>(
        &self,
        properties: &SignalProperties,
        n: usize,
        rng: &mut R,
    ) -> SeriesValues {
        let stringify = self.stringified_fraction > 0.0 && rng.gen_bool(self.stringified_fraction);

        match (stringify, properties.encoding) {
            (false, ValueEncoding::Float) => {
                SeriesValues::Float((0..n).map(|_| draw(properties, rng)).collect())
            }
            (false, ValueEncoding::Signed) => {
                SeriesValues::Signed((0..n).map(|_| draw(properties, rng) as i64).collect())
            }
            (false, ValueEncoding::Unsigned) => {
                SeriesValues::Unsigned((0..n).map(|_| draw(properties, rng) as u64).collect())
            }
            // Catalog entries can also demand string storage outright.
            (false, ValueEncoding::FixedString { width }) => {
                self.stringified(properties, width, n, rng)
            }
            (true, _) => self.stringified(properties, self.string_width, n, rng),
        }
    }

    /// Generate `n` switch samples, each "ON" or "OFF" with equal probability
    pub fn switch_series<R: Rng>(&self, n: usize, rng: &mut R) -> SeriesValues {
        let values = (0..n)
            .map(|_| {
                let state = SWITCH_STATES[rng.gen_range(0..SWITCH_STATES.len())];
                encode_fixed(state, SWITCH_STRING_WIDTH)
            })
            .collect();
        SeriesValues::FixedString {
            width: SWITCH_STRING_WIDTH,
            values,
        }
    }

    fn stringified<R: Rng>(
        &self,
        properties: &SignalProperties,
        width: usize,
        n: usize,
        rng: &mut R,
    ) -> SeriesValues {
        let values = (0..n)
            .map(|_| {
                let value = draw(properties, rng);
                let text = match properties.encoding {
                    ValueEncoding::Signed => format!("{}", value as i64),
                    ValueEncoding::Unsigned => format!("{}", value as u64),
                    _ => format!("{:.6}", value),
                };
                encode_fixed(&text, width)
            })
            .collect();
        SeriesValues::FixedString { width, values }
    }
}

/// One uniform draw from the channel's [min, max] range
fn draw<R: Rng>(properties: &SignalProperties, rng: &mut R) -> f64 {
    if properties.min < properties.max {
        rng.gen_range(properties.min..=properties.max)
    } else {
        // Degenerate range: a constant channel.
        properties.min
    }
}

/// Render text into an exactly-`width` byte string, NUL-padded, truncating
/// anything longer
fn encode_fixed(text: &str, width: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; width];
    let take = text.len().min(width);
    bytes[..take].copy_from_slice(&text.as_bytes()[..take]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalProperties;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synth(fraction: f64, width: usize) -> DataSynthesizer {
        DataSynthesizer::new(
            &GeneratorConfig::new()
                .with_stringified_fraction(fraction)
                .with_string_width(width),
        )
    }

    fn decode(bytes: &[u8]) -> &str {
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        std::str::from_utf8(&bytes[..end]).unwrap()
    }

    #[test]
    fn test_float_values_stay_in_range() {
        let props = SignalProperties::new(Some("°C"), -40.0, 130.0, ValueEncoding::Float);
        let mut rng = StdRng::seed_from_u64(1);
        match synth(0.0, 32).numeric_series(&props, 500, &mut rng) {
            SeriesValues::Float(values) => {
                assert_eq!(values.len(), 500);
                assert!(values.iter().all(|v| (-40.0..=130.0).contains(v)));
            }
            other => panic!("expected float series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_signed_values_stay_in_range() {
        let props = SignalProperties::new(Some("Nm"), -200.0, 600.0, ValueEncoding::Signed);
        let mut rng = StdRng::seed_from_u64(2);
        match synth(0.0, 32).numeric_series(&props, 500, &mut rng) {
            SeriesValues::Signed(values) => {
                assert!(values.iter().all(|v| (-200..=600).contains(v)));
            }
            other => panic!("expected signed series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_unsigned_values_stay_in_range() {
        let props = SignalProperties::new(Some("rpm"), 0.0, 8000.0, ValueEncoding::Unsigned);
        let mut rng = StdRng::seed_from_u64(3);
        match synth(0.0, 32).numeric_series(&props, 500, &mut rng) {
            SeriesValues::Unsigned(values) => {
                assert!(values.iter().all(|v| *v <= 8000));
            }
            other => panic!("expected unsigned series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_stringified_channel_keeps_range_semantics() {
        let props = SignalProperties::new(Some("V"), 3.0, 4.25, ValueEncoding::Float);
        let mut rng = StdRng::seed_from_u64(4);
        // Fraction 1.0 forces every channel into string storage.
        match synth(1.0, 32).numeric_series(&props, 200, &mut rng) {
            SeriesValues::FixedString { width, values } => {
                assert_eq!(width, 32);
                for bytes in &values {
                    assert_eq!(bytes.len(), 32);
                    let parsed: f64 = decode(bytes).parse().unwrap();
                    assert!((3.0..=4.25).contains(&parsed));
                }
            }
            other => panic!("expected string series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_stringified_integer_channel_renders_integers() {
        let props = SignalProperties::new(None, 0.0, 255.0, ValueEncoding::Unsigned);
        let mut rng = StdRng::seed_from_u64(5);
        match synth(1.0, 16).numeric_series(&props, 50, &mut rng) {
            SeriesValues::FixedString { values, .. } => {
                for bytes in &values {
                    let parsed: u64 = decode(bytes).parse().unwrap();
                    assert!(parsed <= 255);
                }
            }
            other => panic!("expected string series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_switch_domain() {
        let mut rng = StdRng::seed_from_u64(6);
        match synth(0.0, 32).switch_series(1000, &mut rng) {
            SeriesValues::FixedString { width, values } => {
                assert_eq!(width, SWITCH_STRING_WIDTH);
                let mut seen_on = false;
                let mut seen_off = false;
                for bytes in &values {
                    assert_eq!(bytes.len(), SWITCH_STRING_WIDTH);
                    match decode(bytes) {
                        "ON" => seen_on = true,
                        "OFF" => seen_off = true,
                        other => panic!("unexpected switch symbol {:?}", other),
                    }
                }
                assert!(seen_on && seen_off);
            }
            other => panic!("expected string series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_degenerate_range_yields_constant_series() {
        let props = SignalProperties::new(None, 42.0, 42.0, ValueEncoding::Float);
        let mut rng = StdRng::seed_from_u64(7);
        match synth(0.0, 32).numeric_series(&props, 10, &mut rng) {
            SeriesValues::Float(values) => assert!(values.iter().all(|v| *v == 42.0)),
            other => panic!("expected float series, got {:?}", other.encoding()),
        }
    }

    #[test]
    fn test_encode_fixed_pads_and_truncates() {
        assert_eq!(encode_fixed("ON", 3), b"ON\0".to_vec());
        assert_eq!(encode_fixed("OFF", 3), b"OFF".to_vec());
        assert_eq!(encode_fixed("123456", 4), b"1234".to_vec());
    }
}
