//! Running-sum checksum used by the thermostat line protocol.
//!
//! The sum starts at the byte after the leading control byte and stops at
//! the earlier of the data end marker or the last [`CHECKSUM_TRAILER`]
//! bytes of the buffer, truncating to eight bits after every addition. The
//! two wire characters offset each nibble from 0x30 rather than rendering
//! hex, so a sum of 0xF4 becomes `?4`, not `F4`.
//!
//! The stop boundary is relative to whatever buffer the caller passes.
//! Device firmware computes the sum over the partially built frame
//! (control byte through end marker), which ends the span right after the
//! second payload digit; a receiver handed the complete record sums
//! through all four digits. Frames built by the device therefore never
//! verify against a full-record computation. Both sides of that asymmetry
//! ship in the installed base and are reproduced here unchanged.

use crate::constants::{CHECKSUM_CHAR_BASE, CHECKSUM_TRAILER, CTRL_ETX};
use crate::error::{ProtocolError, ProtocolResult};

/// Result of checking a record's trailing checksum characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumReport {
    /// Sum computed over the record.
    pub computed: u8,
    /// Sum claimed by the record's trailing characters.
    pub claimed: u8,
}

impl ChecksumReport {
    /// Whether the claimed sum matches the computed sum.
    pub fn matches(&self) -> bool {
        self.computed == self.claimed
    }

    /// Convert a mismatch into an error, for strict callers.
    pub fn into_result(self) -> ProtocolResult<()> {
        if self.matches() {
            Ok(())
        } else {
            Err(ProtocolError::ChecksumMismatch {
                computed: self.computed,
                claimed: self.claimed,
            })
        }
    }
}

/// Compute the running sum over `buffer`.
///
/// Starts at index 1 and stops at the first end marker byte or at the
/// index `CHECKSUM_TRAILER` bytes before the end, whichever comes first.
pub fn compute(buffer: &[u8]) -> u8 {
    let mut sum: u8 = 0;
    for (i, &byte) in buffer.iter().enumerate().skip(1) {
        if byte == CTRL_ETX || i + CHECKSUM_TRAILER > buffer.len() {
            break;
        }
        sum = sum.wrapping_add(byte);
    }
    sum
}

/// Render a sum as its two wire characters, high nibble first.
pub fn render(sum: u8) -> [u8; 2] {
    [
        CHECKSUM_CHAR_BASE + (sum >> 4),
        CHECKSUM_CHAR_BASE + (sum & 0x0F),
    ]
}

/// Recover the claimed sum from two checksum characters.
pub fn parse_chars(chars: [u8; 2]) -> u8 {
    ((chars[0] & 0x0F) << 4) | (chars[1] & 0x0F)
}

/// Check the trailing checksum characters of a terminator-stripped record.
///
/// The claimed sum comes from the last two bytes; the computed sum runs
/// over the whole record. Callers decide what a mismatch means.
pub fn verify(record: &[u8]) -> ProtocolResult<ChecksumReport> {
    if record.len() < 2 {
        return Err(ProtocolError::FrameTooShort {
            expected: 2,
            actual: record.len(),
        });
    }
    let claimed = parse_chars([record[record.len() - 2], record[record.len() - 1]]);
    Ok(ChecksumReport {
        computed: compute(record),
        claimed,
    })
}
