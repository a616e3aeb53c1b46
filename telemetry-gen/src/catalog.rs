//! Static signal catalog
//!
//! Combines numeric signal definitions (grouped by category) and two-state
//! switch definitions into a single immutable registry. Traversal order is
//! fixed at load time so selection and grouping stay reproducible for a given
//! seed; nothing here iterates a hash map to produce output.

use crate::types::{SignalDefinition, SignalProperties, SwitchSignalDefinition, ValueEncoding};
use std::collections::{HashMap, HashSet};

/// The four alias spellings of the base "speed" concept
///
/// These names are forced into every file's selection and generated as
/// independent signals (not copies) to simulate real-world naming
/// inconsistency across logger configurations.
pub const ALIAS_SIGNALS: [&str; 4] = ["speed", "SPEED", "Speed_1", "speed_001"];

/// The immutable signal registry
///
/// Built once (either from the builtin definitions or from an external
/// definition list) and shared read-only across all file generations.
pub struct SignalCatalog {
    /// Numeric definitions in load order (first occurrence wins on duplicates)
    definitions: Vec<SignalDefinition>,
    /// Switch definitions in load order
    switches: Vec<SwitchSignalDefinition>,
    /// Category names in first-seen order, with indices into `definitions`
    categories: Vec<(String, Vec<usize>)>,
    /// Explicit per-name properties (first occurrence wins)
    properties: HashMap<String, SignalProperties>,
    /// Names registered as switch signals
    switch_names: HashSet<String>,
    /// Distinct union of numeric + switch names, load order
    ordered_names: Vec<String>,
    /// Number of duplicate names found during the load scan
    duplicate_count: usize,
}

impl SignalCatalog {
    /// Build a catalog from explicit definition lists
    ///
    /// Name collisions (within or across categories, or between numeric and
    /// switch lists) are reported as non-fatal warnings; the first-encountered
    /// entry is kept and generation proceeds unaffected.
    pub fn from_definitions(
        numeric: Vec<SignalDefinition>,
        switches: Vec<SwitchSignalDefinition>,
    ) -> Self {
        let mut categories: Vec<(String, Vec<usize>)> = Vec::new();
        let mut properties = HashMap::new();
        let mut ordered_names = Vec::new();
        let mut switch_names = HashSet::new();
        let mut duplicate_count = 0;

        for (idx, def) in numeric.iter().enumerate() {
            match categories.iter_mut().find(|(cat, _)| *cat == def.category) {
                Some((_, indices)) => indices.push(idx),
                None => categories.push((def.category.clone(), vec![idx])),
            }

            if properties.contains_key(&def.name) {
                log::warn!(
                    "duplicate catalog entry '{}' in category '{}' ignored",
                    def.name,
                    def.category
                );
                duplicate_count += 1;
                continue;
            }
            properties.insert(def.name.clone(), def.properties.clone());
            ordered_names.push(def.name.clone());
        }

        for switch in &switches {
            if properties.contains_key(&switch.name) || switch_names.contains(&switch.name) {
                log::warn!("duplicate switch entry '{}' ignored", switch.name);
                duplicate_count += 1;
                continue;
            }
            switch_names.insert(switch.name.clone());
            ordered_names.push(switch.name.clone());
        }

        if duplicate_count > 0 {
            log::warn!(
                "catalog loaded with {} duplicate names; first occurrences kept",
                duplicate_count
            );
        }

        Self {
            definitions: numeric,
            switches,
            categories,
            properties,
            switch_names,
            ordered_names,
            duplicate_count,
        }
    }

    /// The builtin automotive catalog shipped with the library
    pub fn builtin() -> Self {
        Self::from_definitions(builtin_numeric(), builtin_switches())
    }

    /// Category names in load order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(cat, _)| cat.as_str())
    }

    /// All numeric definitions in a category, in load order
    pub fn signals_in(&self, category: &str) -> Vec<&SignalDefinition> {
        self.categories
            .iter()
            .find(|(cat, _)| cat == category)
            .map(|(_, indices)| indices.iter().map(|&i| &self.definitions[i]).collect())
            .unwrap_or_default()
    }

    /// All switch definitions in load order
    pub fn switch_signals(&self) -> &[SwitchSignalDefinition] {
        &self.switches
    }

    /// True if the name is registered as a two-state switch signal
    pub fn is_switch(&self, name: &str) -> bool {
        self.switch_names.contains(name)
    }

    /// Distinct union of numeric + switch names, in load order
    pub fn all_names(&self) -> &[String] {
        &self.ordered_names
    }

    /// Number of distinct signal names in the catalog
    pub fn len(&self) -> usize {
        self.ordered_names.len()
    }

    /// True if the catalog holds no signals
    pub fn is_empty(&self) -> bool {
        self.ordered_names.is_empty()
    }

    /// Resolve the properties used to synthesize a numeric signal
    ///
    /// Lookup rule: an explicit catalog entry wins; a temperature-like name
    /// (contains "temp", case-insensitive) with no entry falls back to
    /// {unit "°C", 20..100, float}; any other unknown name (this covers the
    /// forced alias signals) falls back to speed-like defaults
    /// {unit "km/h", 0..250, float}.
    pub fn properties(&self, name: &str) -> SignalProperties {
        if let Some(props) = self.properties.get(name) {
            return props.clone();
        }
        if is_temperature_like(name) {
            SignalProperties::new(Some("°C"), 20.0, 100.0, ValueEncoding::Float)
        } else {
            SignalProperties::new(Some("km/h"), 0.0, 250.0, ValueEncoding::Float)
        }
    }

    /// Catalog statistics
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            num_numeric: self.definitions.len(),
            num_switches: self.switches.len(),
            num_categories: self.categories.len(),
            num_duplicates: self.duplicate_count,
        }
    }
}

/// Catalog statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Numeric definitions as loaded (duplicates included)
    pub num_numeric: usize,
    /// Switch definitions as loaded
    pub num_switches: usize,
    /// Distinct categories
    pub num_categories: usize,
    /// Duplicate names detected during the load scan
    pub num_duplicates: usize,
}

fn is_temperature_like(name: &str) -> bool {
    name.to_ascii_lowercase().contains("temp")
}

fn push(
    defs: &mut Vec<SignalDefinition>,
    category: &str,
    name: String,
    unit: Option<&str>,
    min: f64,
    max: f64,
    encoding: ValueEncoding,
) {
    defs.push(SignalDefinition {
        name,
        category: category.to_string(),
        properties: SignalProperties::new(unit, min, max, encoding),
    });
}

/// Builtin numeric definitions
///
/// Large indexed families (battery cells, ECU rails, test-rig probes) are
/// expanded programmatically so the catalog stays above the maximum random
/// subset size and every selection bound in [min_signals, max_signals] is
/// reachable.
fn builtin_numeric() -> Vec<SignalDefinition> {
    use ValueEncoding::{Float, Signed, Unsigned};
    let mut defs = Vec::new();
    let d = &mut defs;

    // Powertrain
    for (name, unit, min, max, enc) in [
        ("engine_rpm", "rpm", 0.0, 8000.0, Unsigned),
        ("engine_load_pct", "%", 0.0, 100.0, Float),
        ("throttle_position_pct", "%", 0.0, 100.0, Float),
        ("accelerator_pedal_pct", "%", 0.0, 100.0, Float),
        ("manifold_pressure_kpa", "kPa", 10.0, 300.0, Float),
        ("fuel_rate_lph", "l/h", 0.0, 80.0, Float),
        ("fuel_level_pct", "%", 0.0, 100.0, Float),
        ("fuel_pressure_kpa", "kPa", 200.0, 600.0, Float),
        ("oil_pressure_kpa", "kPa", 0.0, 1000.0, Float),
        ("oil_temp", "°C", -40.0, 150.0, Float),
        ("coolant_temp", "°C", -40.0, 130.0, Float),
        ("intake_air_temp", "°C", -40.0, 80.0, Float),
        ("ambient_air_temp", "°C", -40.0, 60.0, Float),
        ("exhaust_back_pressure_kpa", "kPa", 0.0, 60.0, Float),
        ("turbo_boost_kpa", "kPa", 0.0, 250.0, Float),
        ("turbo_speed_rpm", "rpm", 0.0, 250000.0, Unsigned),
        ("engine_torque_nm", "Nm", -200.0, 600.0, Signed),
        ("ignition_advance_deg", "°", -10.0, 60.0, Float),
        ("lambda_ratio", "", 0.7, 1.3, Float),
        ("pcv_valve_duty_pct", "%", 0.0, 100.0, Float),
    ] {
        push(d, "powertrain", name.to_string(), Some(unit), min, max, enc);
    }
    for i in 1..=8 {
        push(
            d,
            "powertrain",
            format!("cylinder_{:02}_misfire_count", i),
            None,
            0.0,
            255.0,
            Unsigned,
        );
    }
    for i in 1..=12 {
        push(
            d,
            "powertrain",
            format!("egt_probe_{:02}", i),
            Some("°C"),
            0.0,
            950.0,
            Float,
        );
    }
    for i in 1..=4 {
        push(
            d,
            "powertrain",
            format!("knock_sensor_{:02}_level", i),
            Some("V"),
            0.0,
            5.0,
            Float,
        );
    }

    // High-voltage battery
    for (name, unit, min, max, enc) in [
        ("pack_voltage_v", "V", 250.0, 450.0, Float),
        ("pack_current_a", "A", -400.0, 400.0, Signed),
        ("state_of_charge_pct", "%", 0.0, 100.0, Float),
        ("state_of_health_pct", "%", 0.0, 100.0, Float),
        ("insulation_resistance_kohm", "kΩ", 0.0, 10000.0, Unsigned),
        ("pack_coolant_inlet_temp", "°C", -20.0, 70.0, Float),
        ("pack_coolant_outlet_temp", "°C", -20.0, 80.0, Float),
        ("hv_fuse_temp", "°C", -20.0, 120.0, Float),
        ("dcdc_output_current_a", "A", 0.0, 200.0, Float),
        ("obc_output_power_kw", "kW", 0.0, 22.0, Float),
    ] {
        push(d, "battery", name.to_string(), Some(unit), min, max, enc);
    }
    for i in 1..=216 {
        push(
            d,
            "battery",
            format!("cell_{:03}_voltage_v", i),
            Some("V"),
            3.0,
            4.25,
            Float,
        );
        push(
            d,
            "battery",
            format!("cell_{:03}_temp", i),
            Some("°C"),
            -20.0,
            60.0,
            Float,
        );
    }
    for i in 1..=12 {
        push(
            d,
            "battery",
            format!("module_{:02}_voltage_v", i),
            Some("V"),
            40.0,
            76.0,
            Float,
        );
        push(
            d,
            "battery",
            format!("module_{:02}_balancing_current_ma", i),
            Some("mA"),
            -500.0,
            500.0,
            Signed,
        );
    }

    // Chassis and dynamics
    for (name, unit, min, max, enc) in [
        ("vehicle_speed", "km/h", 0.0, 250.0, Float),
        ("longitudinal_accel_mps2", "m/s²", -15.0, 15.0, Float),
        ("lateral_accel_mps2", "m/s²", -15.0, 15.0, Float),
        ("vertical_accel_mps2", "m/s²", -20.0, 20.0, Float),
        ("yaw_rate_degs", "°/s", -120.0, 120.0, Float),
        ("pitch_angle_deg", "°", -20.0, 20.0, Float),
        ("roll_angle_deg", "°", -20.0, 20.0, Float),
        ("steering_angle_deg", "°", -720.0, 720.0, Signed),
        ("steering_torque_nm", "Nm", -15.0, 15.0, Float),
        ("steering_rack_position_mm", "mm", -80.0, 80.0, Signed),
    ] {
        push(d, "chassis", name.to_string(), Some(unit), min, max, enc);
    }
    for corner in ["fl", "fr", "rl", "rr"] {
        push(
            d,
            "chassis",
            format!("wheel_speed_{}_kmh", corner),
            Some("km/h"),
            0.0,
            280.0,
            Float,
        );
        push(
            d,
            "chassis",
            format!("suspension_travel_{}_mm", corner),
            Some("mm"),
            0.0,
            250.0,
            Unsigned,
        );
        push(
            d,
            "chassis",
            format!("ride_height_{}_mm", corner),
            Some("mm"),
            80.0,
            220.0,
            Unsigned,
        );
    }

    // Brakes
    for corner in ["fl", "fr", "rl", "rr"] {
        push(
            d,
            "brakes",
            format!("brake_pressure_{}_bar", corner),
            Some("bar"),
            0.0,
            180.0,
            Float,
        );
        push(
            d,
            "brakes",
            format!("brake_pad_wear_{}_pct", corner),
            Some("%"),
            0.0,
            100.0,
            Float,
        );
        push(
            d,
            "brakes",
            format!("brake_disc_temp_{}", corner),
            Some("°C"),
            -20.0,
            800.0,
            Float,
        );
    }
    for (name, unit, min, max) in [
        ("master_cylinder_pressure_bar", "bar", 0.0, 200.0),
        ("brake_pedal_force_n", "N", 0.0, 500.0),
        ("abs_pump_current_a", "A", 0.0, 40.0),
    ] {
        push(d, "brakes", name.to_string(), Some(unit), min, max, Float);
    }

    // Tires
    for corner in ["fl", "fr", "rl", "rr"] {
        push(
            d,
            "tires",
            format!("tire_pressure_{}_kpa", corner),
            Some("kPa"),
            150.0,
            350.0,
            Float,
        );
        for zone in ["inner", "center", "outer"] {
            push(
                d,
                "tires",
                format!("tire_temp_{}_{}", corner, zone),
                Some("°C"),
                -20.0,
                120.0,
                Float,
            );
        }
    }

    // HVAC
    for (name, unit, min, max, enc) in [
        ("cabin_temp", "°C", -20.0, 60.0, Float),
        ("cabin_humidity_pct", "%", 0.0, 100.0, Float),
        ("evaporator_temp", "°C", -10.0, 30.0, Float),
        ("compressor_speed_rpm", "rpm", 0.0, 9000.0, Unsigned),
        ("blower_duty_pct", "%", 0.0, 100.0, Float),
        ("refrigerant_pressure_kpa", "kPa", 100.0, 3000.0, Float),
    ] {
        push(d, "hvac", name.to_string(), Some(unit), min, max, enc);
    }
    for i in 1..=12 {
        push(
            d,
            "hvac",
            format!("vent_{:02}_temp", i),
            Some("°C"),
            -10.0,
            70.0,
            Float,
        );
    }

    // ADAS sensing
    for i in 1..=32 {
        push(
            d,
            "adas",
            format!("radar_target_{:02}_distance_m", i),
            Some("m"),
            0.0,
            250.0,
            Float,
        );
        push(
            d,
            "adas",
            format!("radar_target_{:02}_rel_speed_mps", i),
            Some("m/s"),
            -70.0,
            70.0,
            Signed,
        );
        push(
            d,
            "adas",
            format!("radar_target_{:02}_azimuth_deg", i),
            Some("°"),
            -60.0,
            60.0,
            Float,
        );
    }
    for (name, unit, min, max, enc) in [
        ("camera_exposure_us", "µs", 10.0, 30000.0, Unsigned),
        ("lane_offset_m", "m", -3.0, 3.0, Float),
        ("lane_curvature_1pm", "1/m", -0.1, 0.1, Float),
        ("time_to_collision_s", "s", 0.0, 30.0, Float),
        ("following_distance_m", "m", 0.0, 200.0, Float),
    ] {
        push(d, "adas", name.to_string(), Some(unit), min, max, enc);
    }

    // Body
    for corner in ["fl", "fr", "rl", "rr"] {
        push(
            d,
            "body",
            format!("window_position_{}_pct", corner),
            Some("%"),
            0.0,
            100.0,
            Float,
        );
    }
    for i in 1..=4 {
        push(
            d,
            "body",
            format!("seat_position_{:02}_mm", i),
            Some("mm"),
            0.0,
            300.0,
            Unsigned,
        );
    }
    for (name, unit, min, max, enc) in [
        ("wiper_speed_rpm", "rpm", 0.0, 90.0, Unsigned),
        ("washer_fluid_level_pct", "%", 0.0, 100.0, Float),
        ("sunroof_position_pct", "%", 0.0, 100.0, Float),
        ("mirror_heater_current_a", "A", 0.0, 5.0, Float),
    ] {
        push(d, "body", name.to_string(), Some(unit), min, max, enc);
    }

    // Diagnostics
    for i in 1..=32 {
        push(
            d,
            "diagnostics",
            format!("ecu_{:02}_supply_voltage_v", i),
            Some("V"),
            6.0,
            16.0,
            Float,
        );
        push(
            d,
            "diagnostics",
            format!("ecu_{:02}_board_temp", i),
            Some("°C"),
            -40.0,
            110.0,
            Float,
        );
        push(
            d,
            "diagnostics",
            format!("ecu_{:02}_cpu_load_pct", i),
            Some("%"),
            0.0,
            100.0,
            Unsigned,
        );
    }
    for i in 1..=4 {
        push(
            d,
            "diagnostics",
            format!("bus_load_can_{:02}_pct", i),
            Some("%"),
            0.0,
            100.0,
            Float,
        );
    }
    for (name, unit, min, max, enc) in [
        ("dtc_count", "", 0.0, 255.0, Unsigned),
        ("odometer_km", "km", 0.0, 500000.0, Unsigned),
        ("aux_battery_voltage_v", "V", 9.0, 15.0, Float),
    ] {
        push(d, "diagnostics", name.to_string(), Some(unit), min, max, enc);
    }

    // GNSS
    for (name, unit, min, max, enc) in [
        ("gps_latitude_deg", "°", -90.0, 90.0, Float),
        ("gps_longitude_deg", "°", -180.0, 180.0, Float),
        ("gps_altitude_m", "m", -100.0, 4000.0, Float),
        ("gps_heading_deg", "°", 0.0, 360.0, Float),
        ("gps_speed_kmh", "km/h", 0.0, 250.0, Float),
        ("gps_hdop", "", 0.0, 20.0, Float),
        ("gps_satellite_count", "", 0.0, 32.0, Unsigned),
    ] {
        push(d, "gnss", name.to_string(), Some(unit), min, max, enc);
    }

    // Test-rig instrumentation
    for i in 1..=128 {
        push(
            d,
            "instrumentation",
            format!("temp_probe_{:03}", i),
            Some("°C"),
            -40.0,
            200.0,
            Float,
        );
    }
    for i in 1..=160 {
        push(
            d,
            "instrumentation",
            format!("aux_analog_{:03}_v", i),
            Some("V"),
            0.0,
            10.0,
            Float,
        );
    }
    for i in 1..=32 {
        push(
            d,
            "instrumentation",
            format!("strain_gauge_{:02}_ue", i),
            Some("µε"),
            -2000.0,
            2000.0,
            Signed,
        );
    }
    for i in 1..=16 {
        for axis in ["x", "y", "z"] {
            push(
                d,
                "instrumentation",
                format!("accel_mount_{:02}_{}_g", i, axis),
                Some("g"),
                -50.0,
                50.0,
                Float,
            );
        }
    }

    defs
}

/// Builtin two-state switch definitions
fn builtin_switches() -> Vec<SwitchSignalDefinition> {
    let mut names: Vec<String> = [
        "ignition_on",
        "engine_running",
        "headlight_low_on",
        "headlight_high_on",
        "fog_front_on",
        "fog_rear_on",
        "drl_on",
        "hazard_on",
        "turn_left_on",
        "turn_right_on",
        "brake_light_on",
        "reverse_light_on",
        "horn_on",
        "wiper_front_on",
        "wiper_rear_on",
        "washer_pump_on",
        "parking_brake_on",
        "cruise_active",
        "lane_assist_active",
        "traction_control_on",
        "esp_active",
        "abs_active",
        "airbag_fault",
        "hv_contactor_closed",
        "precharge_active",
        "dcdc_enabled",
        "obc_enabled",
        "battery_heater_on",
        "ac_compressor_on",
        "defrost_front_on",
        "defrost_rear_on",
        "mirror_heater_on",
        "trunk_open",
        "hood_open",
        "fuel_flap_open",
        "charge_port_open",
        "sunroof_open",
        "interior_light_on",
        "key_present",
        "eco_mode_on",
        "sport_mode_on",
        "tow_mode_on",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for corner in ["fl", "fr", "rl", "rr"] {
        names.push(format!("door_{}_ajar", corner));
        names.push(format!("seatbelt_{}_latched", corner));
        names.push(format!("seat_heater_{}_on", corner));
    }

    names
        .into_iter()
        .map(|name| SwitchSignalDefinition { name })
        .collect()
}
