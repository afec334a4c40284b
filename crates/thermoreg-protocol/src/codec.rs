//! Record accumulation and splitting.
//!
//! Every record on the link ends with a carriage return. Readers feed
//! whatever the transport hands them into the codec and drain complete,
//! terminator-stripped records off the front.

use bytes::{Buf, BytesMut};

use crate::constants::CTRL_CR;

/// Generous capacity bound for the receive buffer.
pub const MAX_RECORD_LENGTH: usize = 64;

/// A codec for splitting a byte stream into protocol records.
#[derive(Debug, Default)]
pub struct RecordCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl RecordCodec {
    /// Create a new record codec.
    pub fn new() -> Self {
        RecordCodec {
            buffer: BytesMut::with_capacity(MAX_RECORD_LENGTH * 2),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the next complete record off the buffer, without its terminator.
    ///
    /// Returns `None` until a terminator arrives.
    pub fn next_record(&mut self) -> Option<Vec<u8>> {
        let end = self.buffer.iter().position(|&b| b == CTRL_CR)?;
        let record = self.buffer.split_to(end).to_vec();
        self.buffer.advance(1);
        Some(record)
    }

    /// Number of buffered bytes not yet formed into a record.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
