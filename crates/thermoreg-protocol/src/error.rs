//! Protocol error types.

use thiserror::Error;

use crate::constants::PAYLOAD_DIGITS;

/// Errors that can occur when working with the thermostat line protocol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Record is too short for its frame kind.
    #[error("record too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Leading byte cannot open a frame.
    #[error("unrecognized control byte: 0x{0:02X}")]
    UnrecognizedControl(u8),

    /// Data frame without the end marker at its fixed position.
    #[error("data frame missing end marker: found 0x{found:02X}")]
    MissingEndMarker {
        /// Byte found where the end marker belongs.
        found: u8,
    },

    /// Unknown command code.
    #[error("unknown command code: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Claimed checksum characters do not match the computed sum.
    #[error("checksum mismatch: computed 0x{computed:02X}, claimed 0x{claimed:02X}")]
    ChecksumMismatch {
        /// Sum computed over the record.
        computed: u8,
        /// Sum claimed by the trailing characters.
        claimed: u8,
    },

    /// Temperature cannot be represented in the four-digit field.
    #[error("temperature out of range: {value} (field spans 0.00 to 99.99)")]
    TemperatureOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Payload field contains bytes that are not ASCII digits.
    #[error("invalid payload digits: {digits:02X?}")]
    InvalidPayload {
        /// The rejected payload field.
        digits: [u8; PAYLOAD_DIGITS],
    },
}

/// Convenience result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
