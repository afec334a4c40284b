//! TRSim runner: the TCP surface and scripted controller for the
//! thermostat emulator.
//!
//! The `trsim` binary wraps two entry points:
//!
//! - [`tcp::serve_device`] runs an [`trsim_device::EmulatedDevice`] behind
//!   a sequential TCP listener
//! - [`client::run_script`] drives a serving device through the fixed
//!   maintenance script and reports what came back

pub mod client;
pub mod error;
pub mod tcp;
