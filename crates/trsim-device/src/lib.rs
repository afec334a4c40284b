//! Emulated TR-series thermostat.
//!
//! This crate hosts the device half of TRSim: a configurable emulator that
//! speaks the thermostat line protocol over any [`Transport`]. The emulator
//! owns its state, answers one record at a time, and reproduces the quirks
//! of the field units, including their permissive checksum handling.
//!
//! ```rust,ignore
//! use trsim_device::{channel_pair, DeviceConfig, EmulatedDevice, Transport};
//!
//! let (mut device_end, mut controller_end) = channel_pair();
//! let mut device = EmulatedDevice::new(DeviceConfig::default());
//! std::thread::spawn(move || device.serve(&mut device_end));
//!
//! controller_end.write_record(&[0x05, 0x31, 0x0D])?;
//! let reply = controller_end.read_record()?;
//! ```

mod config;
mod device;
mod transport;

pub use config::*;
pub use device::*;
pub use transport::*;
