//! Frame model for the thermostat line protocol.
//!
//! Three frame shapes travel on the link:
//!
//! - **Query** (`ENQ command CR`): asks the device for an immediate reply.
//! - **Data** (`STX command d1 d2 d3 d4 ETX c1 c2 CR`): carries a
//!   temperature in either direction; `c1 c2` are checksum characters.
//! - **Ack** (`ACK CR`): emitted by the device after accepting a setpoint.
//!
//! `encode` produces complete records ready to write, terminator included.
//! `decode` consumes records whose terminator the transport has already
//! stripped. The claimed checksum characters are not part of the decoded
//! frame; verification runs separately over the raw record through
//! [`crate::checksum::verify`].

use crate::checksum;
use crate::codes::{CommandByte, ControlByte};
use crate::constants::*;
use crate::error::{ProtocolError, ProtocolResult};
use crate::temperature::encode_temperature;

/// A single protocol frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Request for an immediate reply; no payload, no checksum.
    Query {
        /// What is being asked for.
        command: CommandByte,
    },
    /// Temperature-bearing frame, sent as a setpoint or a reading reply.
    Data {
        /// Setpoint write, or the reading being reported.
        command: CommandByte,
        /// Four ASCII digits, integer part then fraction.
        digits: [u8; PAYLOAD_DIGITS],
    },
    /// Bare acknowledgement.
    Ack,
}

impl Frame {
    /// Build a query frame.
    pub fn query(command: CommandByte) -> Self {
        Frame::Query { command }
    }

    /// Build a data frame carrying `value`.
    pub fn data(command: CommandByte, value: f64) -> ProtocolResult<Self> {
        Ok(Frame::Data {
            command,
            digits: encode_temperature(value)?,
        })
    }

    /// Encode the frame as a complete record, terminator included.
    ///
    /// Data frames compute their checksum over the buffer built so far
    /// (control byte through end marker), exactly as the device firmware
    /// does; the sum consequently covers the command byte and the first
    /// two payload digits only.
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Frame::Query { command } => vec![CTRL_ENQ, command.code(), CTRL_CR],
            Frame::Data { command, digits } => {
                let mut buf = Vec::with_capacity(DATA_RECORD_LEN + 1);
                buf.push(CTRL_STX);
                buf.push(command.code());
                buf.extend_from_slice(&digits);
                buf.push(CTRL_ETX);
                let sum = checksum::compute(&buf);
                buf.extend_from_slice(&checksum::render(sum));
                buf.push(CTRL_CR);
                buf
            }
            Frame::Ack => vec![CTRL_ACK, CTRL_CR],
        }
    }

    /// Decode a terminator-stripped record.
    pub fn decode(record: &[u8]) -> ProtocolResult<Frame> {
        let first = *record.first().ok_or(ProtocolError::FrameTooShort {
            expected: 1,
            actual: 0,
        })?;
        match ControlByte::try_from(first)? {
            ControlByte::Enq => {
                // trailing bytes after the command are tolerated; deployed
                // controllers append checksum characters to queries
                let code = *record.get(1).ok_or(ProtocolError::FrameTooShort {
                    expected: QUERY_RECORD_LEN,
                    actual: record.len(),
                })?;
                Ok(Frame::Query {
                    command: CommandByte::try_from(code)?,
                })
            }
            ControlByte::Stx => {
                if record.len() < DATA_RECORD_LEN {
                    return Err(ProtocolError::FrameTooShort {
                        expected: DATA_RECORD_LEN,
                        actual: record.len(),
                    });
                }
                if record[6] != CTRL_ETX {
                    return Err(ProtocolError::MissingEndMarker { found: record[6] });
                }
                Ok(Frame::Data {
                    command: CommandByte::try_from(record[1])?,
                    digits: [record[2], record[3], record[4], record[5]],
                })
            }
            ControlByte::Ack => Ok(Frame::Ack),
            other => Err(ProtocolError::UnrecognizedControl(other.code())),
        }
    }
}
