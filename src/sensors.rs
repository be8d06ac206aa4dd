//! Sensor inputs: named integer readings supplied before a run starts.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::DEFAULT_SENSORS;

/// Sensor name -> reading. The VM only ever reads from it.
pub type SensorMap = HashMap<String, i64>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SensorSpecError {
    #[error("Invalid sensor format '{0}'. Use NAME=VALUE")]
    MissingSeparator(String),
    #[error("Sensor value must be an integer: {0}")]
    InvalidValue(String),
}

/// Parses a `NAME=VALUE` command line sensor spec
pub fn parse_sensor_spec(spec: &str) -> Result<(String, i64), SensorSpecError> {
    let (name, value) = spec
        .split_once('=')
        .ok_or_else(|| SensorSpecError::MissingSeparator(spec.to_string()))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| SensorSpecError::InvalidValue(value.to_string()))?;
    Ok((name.to_string(), value))
}

/// The readings used when the caller supplies none
pub fn default_sensors() -> SensorMap {
    DEFAULT_SENSORS
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Builds the sensor map from parsed specs, falling back to the defaults
/// when no spec was given. Later specs for the same name win.
pub fn sensors_from_specs(specs: impl IntoIterator<Item = (String, i64)>) -> SensorMap {
    let mut sensors = SensorMap::new();
    for (name, value) in specs {
        log::debug!(target: "sensors", "Set sensor {} = {}", name, value);
        sensors.insert(name, value);
    }
    if sensors.is_empty() {
        sensors = default_sensors();
        log::debug!(target: "sensors", "No sensors given, using defaults: {:?}", sensors);
    }
    sensors
}

/// Sorted sensor names, for error messages
pub fn sensor_names(sensors: &SensorMap) -> Vec<String> {
    let mut names: Vec<String> = sensors.keys().cloned().collect();
    names.sort();
    names
}
