//! TR-series thermostat line protocol.
//!
//! This crate provides types and utilities for the checksum-protected
//! serial line protocol spoken by TR-series immersion thermostats. Every
//! record on the link is terminated by a carriage return and opens with a
//! control byte:
//!
//! - **Query** (`ENQ`): controller → device request for an immediate reply
//! - **Data** (`STX` .. `ETX`): temperature setpoint or reading, followed
//!   by two checksum characters
//! - **Ack** (`ACK`): device → controller acknowledgement of a setpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use thermoreg_protocol::{CommandByte, Frame, RecordCodec};
//!
//! // Ask the device for its current setpoint
//! let request = Frame::query(CommandByte::SetTemperature).encode();
//!
//! // Split received bytes into records and decode them
//! let mut codec = RecordCodec::new();
//! codec.push(&received);
//! while let Some(record) = codec.next_record() {
//!     let frame = Frame::decode(&record)?;
//! }
//! ```

pub mod checksum;
mod codec;
mod codes;
mod constants;
mod error;
mod frame;
mod temperature;

pub use codec::*;
pub use codes::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use temperature::*;
