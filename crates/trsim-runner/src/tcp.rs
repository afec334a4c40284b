//! Blocking TCP transport and the device server loop.
//!
//! Field installations talk to the thermostat over a serial line; the
//! emulator exposes the same byte stream on a TCP socket so anything that
//! can open a connection can drive it. The protocol is one strictly
//! sequential conversation, so the listener accepts one connection at a
//! time; device state persists across connections.

use std::io;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

use tracing::{debug, info, warn};

use thermoreg_protocol::RecordCodec;
use trsim_device::{EmulatedDevice, Transport};

use crate::error::RunnerResult;

/// Record transport over a blocking TCP stream.
pub struct TcpTransport {
    stream: TcpStream,
    codec: RecordCodec,
    read_buf: [u8; 1024],
}

impl TcpTransport {
    /// Wrap an established stream.
    pub fn new(stream: TcpStream) -> Self {
        TcpTransport {
            stream,
            codec: RecordCodec::new(),
            read_buf: [0u8; 1024],
        }
    }

    /// Connect to a serving device.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Ok(TcpTransport::new(TcpStream::connect(addr)?))
    }
}

impl Transport for TcpTransport {
    fn read_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(record) = self.codec.next_record() {
                return Ok(Some(record));
            }
            let n = self.stream.read(&mut self.read_buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.codec.push(&self.read_buf[..n]);
        }
    }

    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.stream.write_all(record)?;
        self.stream.flush()
    }
}

/// Serve one emulated device on `listener`, accepting connections
/// sequentially until the listener fails.
///
/// The device value outlives every session, so setpoints written in one
/// connection are visible to the next.
pub fn serve_device(listener: TcpListener, device: &mut EmulatedDevice) -> RunnerResult<()> {
    let local = listener.local_addr()?;
    info!("device listening on {}", local);

    loop {
        let (stream, peer) = listener.accept()?;
        info!("controller connected from {}", peer);
        let mut transport = TcpTransport::new(stream);
        match device.serve(&mut transport) {
            Ok(()) => debug!("controller at {} disconnected", peer),
            Err(err) => warn!("session with {} ended: {}", peer, err),
        }
        let stats = device.stats();
        info!(
            "session closed: {} records in, {} replies out, {} checksum mismatches",
            stats.records_received, stats.replies_sent, stats.checksum_mismatches
        );
    }
}
