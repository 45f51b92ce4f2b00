//! Record log framing
//!
//! Each change to the collection is one framed record:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record incl. this field)
//! +------------------+
//! | Record ID        | (12 bytes)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Body Length      | (u32 LE)
//! +------------------+
//! | Body             | (document JSON, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use crc32fast::Hasher;

use crate::entity::FahrradId;

/// Smallest possible record: header, id, flag, empty body, checksum
pub const MIN_RECORD_SIZE: usize = 4 + 12 + 1 + 4 + 4;

/// A decoding failure, relative to the start of the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameError(pub String);

/// One record of the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub id: FahrradId,
    pub is_tombstone: bool,
    pub body: Vec<u8>,
}

impl LogRecord {
    /// A live document
    pub fn live(id: FahrradId, body: Vec<u8>) -> Self {
        Self {
            id,
            is_tombstone: false,
            body,
        }
    }

    /// A deletion marker
    pub fn tombstone(id: FahrradId) -> Self {
        Self {
            id,
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    /// Encode to the on-disk frame
    pub fn serialize(&self) -> Vec<u8> {
        let total = MIN_RECORD_SIZE + self.body.len();
        let mut buf = Vec::with_capacity(total);

        buf.extend_from_slice(&(total as u32).to_le_bytes());
        buf.extend_from_slice(self.id.as_bytes());
        buf.push(u8::from(self.is_tombstone));
        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        let checksum = checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Decode one frame from the front of `data`
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> Result<(Self, usize), FrameError> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(FrameError(format!(
                "truncated record: {} bytes remaining, minimum is {}",
                data.len(),
                MIN_RECORD_SIZE
            )));
        }

        let record_length = read_u32(data, 0) as usize;
        if record_length < MIN_RECORD_SIZE {
            return Err(FrameError(format!("invalid record length: {}", record_length)));
        }
        if record_length > data.len() {
            return Err(FrameError(format!(
                "record length {} exceeds remaining {} bytes",
                record_length,
                data.len()
            )));
        }

        let checksum_offset = record_length - 4;
        let stored = read_u32(data, checksum_offset);
        let computed = checksum(&data[..checksum_offset]);
        if stored != computed {
            return Err(FrameError(format!(
                "checksum mismatch: computed {:08x}, stored {:08x}",
                computed, stored
            )));
        }

        let mut id = [0u8; 12];
        id.copy_from_slice(&data[4..16]);
        let is_tombstone = match data[16] {
            0 => false,
            1 => true,
            other => return Err(FrameError(format!("invalid tombstone flag: {}", other))),
        };

        let body_length = read_u32(data, 17) as usize;
        if 21 + body_length != checksum_offset {
            return Err(FrameError(format!(
                "body length {} does not match record length {}",
                body_length, record_length
            )));
        }

        Ok((
            Self {
                id: FahrradId::from_bytes(id),
                is_tombstone,
                body: data[21..checksum_offset].to_vec(),
            },
            record_length,
        ))
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
