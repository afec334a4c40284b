//! Protocol constants
//!
//! These constants define the control bytes, command codes, and frame
//! geometry used on the TR-series thermostat serial link.

// ============================================================================
// Control Bytes
// ============================================================================

/// Start of header. Part of the device family's vocabulary, never used on
/// this link.
pub const CTRL_SOH: u8 = 0x01;
/// Start of a data frame.
pub const CTRL_STX: u8 = 0x02;
/// End of the data portion of a data frame.
pub const CTRL_ETX: u8 = 0x03;
/// Start of a query frame.
pub const CTRL_ENQ: u8 = 0x05;
/// Acknowledgement frame.
pub const CTRL_ACK: u8 = 0x06;
/// Record terminator (carriage return).
pub const CTRL_CR: u8 = 0x0D;

// ============================================================================
// Command Codes (ASCII digits on the wire)
// ============================================================================

/// Write the temperature setpoint; also tags every data reply.
pub const CMD_SET_TEMPERATURE: u8 = 0x31;
/// Read the internal temperature sensor.
pub const CMD_READ_INTERNAL_SENSOR: u8 = 0x32;
/// Read the external temperature sensor.
pub const CMD_READ_EXTERNAL_SENSOR: u8 = 0x33;
/// Read the alarm status.
pub const CMD_READ_ALARM_STATUS: u8 = 0x34;
/// Write the calibration offset.
pub const CMD_SET_OFFSET: u8 = 0x36;
/// Write the temperature setpoint to FRAM.
pub const CMD_SET_TEMPERATURE_FRAM: u8 = 0x37;
/// Write the calibration offset to FRAM.
pub const CMD_SET_OFFSET_FRAM: u8 = 0x38;

// ============================================================================
// Frame Geometry
// ============================================================================

/// Number of ASCII digits in the temperature payload field.
pub const PAYLOAD_DIGITS: usize = 4;
/// Length of a terminator-stripped data record
/// (STX + command + digits + ETX + two checksum characters).
pub const DATA_RECORD_LEN: usize = 9;
/// Minimum length of a terminator-stripped query record (ENQ + command).
pub const QUERY_RECORD_LEN: usize = 2;
/// Number of trailing buffer bytes the checksum never reaches.
pub const CHECKSUM_TRAILER: usize = 4;
/// Offset added to each checksum nibble to form its wire character.
pub const CHECKSUM_CHAR_BASE: u8 = 0x30;
