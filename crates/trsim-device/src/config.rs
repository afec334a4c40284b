//! Device configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Power-on temperature setpoint of a factory-fresh unit (degrees Celsius).
pub const DEFAULT_SETPOINT: f64 = 13.0;

/// Base reading reported for the internal sensor.
pub const INTERNAL_SENSOR_READING: f64 = 42.43;

/// Configuration for the emulated thermostat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Temperature setpoint at power-on (degrees Celsius).
    pub initial_setpoint: f64,

    /// Base reading reported for the internal sensor.
    pub internal_sensor: f64,

    /// Uniform jitter applied to internal sensor readings, in degrees
    /// either side of the base reading. Zero disables jitter.
    pub sensor_jitter: f64,

    /// Drop data frames whose checksum does not verify instead of
    /// processing them. Field units process them regardless.
    pub strict_checksum: bool,

    /// Delay inserted after each handled record, in milliseconds.
    /// Hardware takes roughly a second per request; zero disables pacing.
    pub pace_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            initial_setpoint: DEFAULT_SETPOINT,
            internal_sensor: INTERNAL_SENSOR_READING,
            sensor_jitter: 0.0,
            strict_checksum: false,
            pace_ms: 0,
        }
    }
}

impl DeviceConfig {
    /// Set the power-on setpoint.
    pub fn with_setpoint(mut self, setpoint: f64) -> Self {
        self.initial_setpoint = setpoint;
        self
    }

    /// Enable strict checksum handling.
    pub fn with_strict_checksum(mut self) -> Self {
        self.strict_checksum = true;
        self
    }

    /// Set the pacing delay in milliseconds.
    pub fn with_pace_ms(mut self, pace_ms: u64) -> Self {
        self.pace_ms = pace_ms;
        self
    }

    /// Pacing delay as a duration, if pacing is enabled.
    pub fn pace(&self) -> Option<Duration> {
        (self.pace_ms > 0).then(|| Duration::from_millis(self.pace_ms))
    }
}
