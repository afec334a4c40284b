//! Transport abstraction and the in-memory channel transport.
//!
//! The protocol core never opens, configures, or closes links; it reads
//! and writes whole records through [`Transport`]. The channel transport
//! pairs two endpoints over crossbeam channels and carries the tests.

use std::io;

use crossbeam_channel::{unbounded, Receiver, Sender};

use thermoreg_protocol::RecordCodec;

/// A bidirectional record transport.
pub trait Transport {
    /// Block until one terminated record is available, returning it with
    /// the terminator stripped, or `None` once the peer hangs up.
    fn read_record(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Write one encoded record (terminator already included).
    fn write_record(&mut self, record: &[u8]) -> io::Result<()>;
}

/// One endpoint of an in-memory transport pair.
///
/// Bytes written on one endpoint arrive at the other in order, in
/// whatever chunks the sender used; the codec reassembles records.
pub struct ChannelTransport {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    codec: RecordCodec,
}

/// Create a connected pair of in-memory transports.
pub fn channel_pair() -> (ChannelTransport, ChannelTransport) {
    let (left_tx, left_rx) = unbounded();
    let (right_tx, right_rx) = unbounded();
    (
        ChannelTransport {
            tx: left_tx,
            rx: right_rx,
            codec: RecordCodec::new(),
        },
        ChannelTransport {
            tx: right_tx,
            rx: left_rx,
            codec: RecordCodec::new(),
        },
    )
}

impl Transport for ChannelTransport {
    fn read_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(record) = self.codec.next_record() {
                return Ok(Some(record));
            }
            match self.rx.recv() {
                Ok(chunk) => self.codec.push(&chunk),
                Err(_) => return Ok(None),
            }
        }
    }

    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.tx
            .send(record.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "peer disconnected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_bidirectional() {
        let (mut left, mut right) = channel_pair();
        left.write_record(b"\x05\x31\r").unwrap();
        assert_eq!(right.read_record().unwrap(), Some(b"\x05\x31".to_vec()));
        right.write_record(b"\x06\r").unwrap();
        assert_eq!(left.read_record().unwrap(), Some(b"\x06".to_vec()));
    }

    #[test]
    fn test_records_in_order() {
        let (mut left, mut right) = channel_pair();
        left.write_record(b"\x05\x31\r").unwrap();
        left.write_record(b"\x05\x32\r").unwrap();
        assert_eq!(right.read_record().unwrap(), Some(b"\x05\x31".to_vec()));
        assert_eq!(right.read_record().unwrap(), Some(b"\x05\x32".to_vec()));
    }

    #[test]
    fn test_hangup_returns_none() {
        let (left, mut right) = channel_pair();
        drop(left);
        assert_eq!(right.read_record().unwrap(), None);
    }

    #[test]
    fn test_buffered_records_drain_before_hangup() {
        let (mut left, mut right) = channel_pair();
        left.write_record(b"\x06\r").unwrap();
        drop(left);
        assert_eq!(right.read_record().unwrap(), Some(b"\x06".to_vec()));
        assert_eq!(right.read_record().unwrap(), None);
    }

    #[test]
    fn test_write_after_hangup_fails() {
        let (mut left, right) = channel_pair();
        drop(right);
        assert!(left.write_record(b"\x06\r").is_err());
    }
}
