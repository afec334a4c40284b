//! Emulated thermostat device.
//!
//! The emulator mirrors the observable behavior of the field units: it
//! stores a setpoint written by data frames, answers setpoint queries from
//! that state, reports the internal sensor, and acknowledges accepted
//! setpoints. The rest of the command table is recognized vocabulary with
//! no implemented response; such frames produce silence, not errors.

use std::io;
use std::thread;

use rand::Rng;
use tracing::{debug, trace, warn};

use thermoreg_protocol::{checksum, decode_temperature, CommandByte, Frame, ProtocolResult};

use crate::config::DeviceConfig;
use crate::transport::Transport;

// ============================================================================
// Device State
// ============================================================================

/// Mutable state of the emulated device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    /// Temperature setpoint last written by the controller (degrees Celsius).
    pub setpoint: f64,
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters describing the traffic a device has handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Records received, whether or not they decoded.
    pub records_received: u32,
    /// Records that failed to decode.
    pub malformed_records: u32,
    /// Data frames whose checksum characters did not verify.
    pub checksum_mismatches: u32,
    /// Records dropped by strict checksum handling.
    pub records_dropped: u32,
    /// Frames that dispatched to the no-reply outcome.
    pub unimplemented_commands: u32,
    /// Replies written back to the controller.
    pub replies_sent: u32,
}

// ============================================================================
// Emulated Device
// ============================================================================

/// An emulated TR-series thermostat.
///
/// The device is a strictly sequential responder: one record in, at most
/// one record out. State lives for as long as the device value does, so a
/// single device can serve any number of consecutive sessions.
pub struct EmulatedDevice {
    config: DeviceConfig,
    state: DeviceState,
    stats: DeviceStats,
}

impl EmulatedDevice {
    /// Create a device with the given configuration.
    pub fn new(config: DeviceConfig) -> Self {
        let state = DeviceState {
            setpoint: config.initial_setpoint,
        };
        EmulatedDevice {
            config,
            state,
            stats: DeviceStats::default(),
        }
    }

    /// Current device state.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Traffic counters.
    pub fn stats(&self) -> &DeviceStats {
        &self.stats
    }

    /// The configuration the device was built with.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn internal_sensor_reading(&self) -> f64 {
        if self.config.sensor_jitter > 0.0 {
            let jitter = self.config.sensor_jitter;
            let offset = rand::thread_rng().gen_range(-jitter..=jitter);
            (self.config.internal_sensor + offset).clamp(0.0, 99.99)
        } else {
            self.config.internal_sensor
        }
    }

    /// Dispatch one decoded frame, producing a reply frame if the command
    /// has an implemented response.
    pub fn respond(&mut self, frame: &Frame) -> ProtocolResult<Option<Frame>> {
        match *frame {
            Frame::Data {
                command: CommandByte::SetTemperature,
                digits,
            } => {
                let value = decode_temperature(&digits)?;
                self.state.setpoint = value;
                debug!("setpoint stored: {:.2}", value);
                Ok(Some(Frame::Ack))
            }
            Frame::Query {
                command: CommandByte::SetTemperature,
            } => Ok(Some(Frame::data(
                CommandByte::SetTemperature,
                self.state.setpoint,
            )?)),
            Frame::Query {
                command: CommandByte::ReadInternalSensor,
            } => {
                // replies carry the set-temperature command no matter which
                // query they answer, as the firmware's reply builder does
                let reading = self.internal_sensor_reading();
                Ok(Some(Frame::data(CommandByte::SetTemperature, reading)?))
            }
            Frame::Query { command } => {
                self.stats.unimplemented_commands += 1;
                trace!("query {:?} has no implemented response", command);
                Ok(None)
            }
            Frame::Data { command, .. } => {
                self.stats.unimplemented_commands += 1;
                trace!("data frame {:?} has no implemented response", command);
                Ok(None)
            }
            Frame::Ack => Ok(None),
        }
    }

    /// Handle one terminator-stripped record, returning the encoded reply
    /// record to write back, if the frame warrants one.
    pub fn handle_record(&mut self, record: &[u8]) -> Option<Vec<u8>> {
        self.stats.records_received += 1;
        trace!("rx {}", hex::encode(record));

        let frame = match Frame::decode(record) {
            Ok(frame) => frame,
            Err(err) => {
                self.stats.malformed_records += 1;
                warn!("ignoring malformed record {}: {}", hex::encode(record), err);
                return None;
            }
        };

        if let Frame::Data { .. } = frame {
            match checksum::verify(record) {
                Ok(report) if !report.matches() => {
                    self.stats.checksum_mismatches += 1;
                    warn!(
                        "checksum mismatch: computed 0x{:02X}, claimed 0x{:02X}",
                        report.computed, report.claimed
                    );
                    if self.config.strict_checksum {
                        self.stats.records_dropped += 1;
                        return None;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    // decode already enforced the data record length
                    warn!("checksum verification failed: {}", err);
                    return None;
                }
            }
        }

        let reply = match self.respond(&frame) {
            Ok(reply) => reply,
            Err(err) => {
                warn!("dispatch failed: {}", err);
                return None;
            }
        };

        reply.map(|frame| {
            self.stats.replies_sent += 1;
            let encoded = frame.encode();
            trace!("tx {}", hex::encode(&encoded));
            encoded
        })
    }

    /// Serve records from `transport` until the peer hangs up.
    ///
    /// Decode failures, checksum mismatches, and unimplemented commands are
    /// logged and skipped; only transport errors end the loop early.
    pub fn serve<T: Transport>(&mut self, transport: &mut T) -> io::Result<()> {
        while let Some(record) = transport.read_record()? {
            if let Some(reply) = self.handle_record(&record) {
                transport.write_record(&reply)?;
            }
            if let Some(pace) = self.config.pace() {
                thread::sleep(pace);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> EmulatedDevice {
        EmulatedDevice::new(DeviceConfig::default())
    }

    #[test]
    fn test_fresh_device_reports_default_setpoint() {
        let mut device = device();
        let reply = device.handle_record(&[0x05, 0x31]).unwrap();
        assert_eq!(
            reply,
            vec![0x02, 0x31, 0x31, 0x33, 0x30, 0x30, 0x03, 0x39, 0x35, 0x0D]
        );
    }

    #[test]
    fn test_setpoint_stored_and_acked() {
        let mut device = device();
        let reply = device
            .handle_record(&[0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x3F, 0x34])
            .unwrap();
        assert_eq!(reply, vec![0x06, 0x0D]);
        assert_eq!(device.state().setpoint, 30.0);

        // the next setpoint query reports the stored value
        let reply = device.handle_record(&[0x05, 0x31]).unwrap();
        assert_eq!(
            reply,
            vec![0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x39, 0x34, 0x0D]
        );
    }

    #[test]
    fn test_internal_sensor_fixed_reading() {
        let mut device = device();
        device
            .handle_record(&[0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x3F, 0x34])
            .unwrap();
        // the sensor reading is independent of the stored setpoint
        let reply = device.handle_record(&[0x05, 0x32]).unwrap();
        assert_eq!(
            reply,
            vec![0x02, 0x31, 0x34, 0x32, 0x34, 0x33, 0x03, 0x39, 0x37, 0x0D]
        );
    }

    #[test]
    fn test_mismatched_checksum_processed_and_counted() {
        let mut device = device();
        // controller-encoded setpoint: its sender-span sum 0x94 differs
        // from the full-record sum 0xF4
        let reply = device
            .handle_record(&[0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x39, 0x34])
            .unwrap();
        assert_eq!(reply, vec![0x06, 0x0D]);
        assert_eq!(device.state().setpoint, 30.0);
        assert_eq!(device.stats().checksum_mismatches, 1);
        assert_eq!(device.stats().records_dropped, 0);
    }

    #[test]
    fn test_strict_mode_drops_mismatched_setpoints() {
        let mut device = EmulatedDevice::new(DeviceConfig::default().with_strict_checksum());
        let reply = device.handle_record(&[0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x39, 0x34]);
        assert_eq!(reply, None);
        assert_eq!(device.state().setpoint, 13.0);
        assert_eq!(device.stats().checksum_mismatches, 1);
        assert_eq!(device.stats().records_dropped, 1);
    }

    #[test]
    fn test_strict_mode_accepts_clean_setpoints() {
        let mut device = EmulatedDevice::new(DeviceConfig::default().with_strict_checksum());
        let reply = device
            .handle_record(&[0x02, 0x31, 0x33, 0x30, 0x30, 0x30, 0x03, 0x3F, 0x34])
            .unwrap();
        assert_eq!(reply, vec![0x06, 0x0D]);
        assert_eq!(device.state().setpoint, 30.0);
    }

    #[test]
    fn test_unimplemented_queries_no_reply() {
        let mut device = device();
        assert_eq!(device.handle_record(&[0x05, 0x33]), None);
        assert_eq!(device.handle_record(&[0x05, 0x34]), None);
        assert_eq!(device.handle_record(&[0x05, 0x37]), None);
        assert_eq!(device.stats().unimplemented_commands, 3);
    }

    #[test]
    fn test_other_command_data_frames_no_reply() {
        let mut device = device();
        // offset write: well formed, verifiable, still unimplemented
        let mut record = Frame::data(CommandByte::SetOffset, 1.5).unwrap().encode();
        record.pop();
        assert_eq!(device.handle_record(&record), None);
        assert_eq!(device.state().setpoint, 13.0);
        assert_eq!(device.stats().unimplemented_commands, 1);
    }

    #[test]
    fn test_malformed_records_ignored() {
        let mut device = device();
        assert_eq!(device.handle_record(&[0x99]), None);
        assert_eq!(device.handle_record(&[]), None);
        assert_eq!(device.handle_record(&[0x02, 0x31]), None);
        assert_eq!(device.stats().malformed_records, 3);
        // the device keeps serving afterwards
        assert!(device.handle_record(&[0x05, 0x31]).is_some());
    }

    #[test]
    fn test_query_trailing_bytes_answered() {
        // deployed controllers send ENQ '1' '3' '1'
        let mut device = device();
        let reply = device.handle_record(&[0x05, 0x31, 0x33, 0x31]).unwrap();
        assert_eq!(
            reply,
            vec![0x02, 0x31, 0x31, 0x33, 0x30, 0x30, 0x03, 0x39, 0x35, 0x0D]
        );
    }

    #[test]
    fn test_bad_payload_digits_not_stored() {
        let mut device = device();
        let reply = device.handle_record(&[0x02, 0x31, 0x33, 0x41, 0x30, 0x30, 0x03, 0x3F, 0x34]);
        assert_eq!(reply, None);
        assert_eq!(device.state().setpoint, 13.0);
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let config = DeviceConfig {
            sensor_jitter: 0.5,
            ..DeviceConfig::default()
        };
        let mut device = EmulatedDevice::new(config);
        for _ in 0..50 {
            let reply = device.handle_record(&[0x05, 0x32]).unwrap();
            let frame = Frame::decode(&reply[..reply.len() - 1]).unwrap();
            let reading = match frame {
                Frame::Data { digits, .. } => decode_temperature(&digits).unwrap(),
                other => panic!("expected a data frame, got {:?}", other),
            };
            assert!((41.93..=42.93).contains(&reading));
        }
    }
}
