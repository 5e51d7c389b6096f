//! FileRequest message
//!
//! Header + UTF-8 filename payload. Built once per request; read-only after
//! construction.

use crate::error::{FtError, Result};
use crate::packet::{BitBuffer, BYTE_BITS};
use crate::wire::{to_host_order, Field, HeaderValues, Schema};

use super::{MAGIC_NO, MAX_FILENAME_LEN, REQUEST_TYPE};

/// Request header layout: MagicNo(16), Type(8), FilenameLen(16)
pub static REQUEST_SCHEMA: Schema = Schema::new(&[
    Field { name: "MagicNo", bits: 16 },
    Field { name: "Type", bits: 8 },
    Field { name: "FilenameLen", bits: 16 },
]);

/// A request for a single file by name
#[derive(Debug, Clone)]
pub struct FileRequest {
    /// Requested filename
    file_name: String,

    /// Full wire image: header + filename bytes
    packet: BitBuffer,
}

impl FileRequest {
    /// Build a request for `file_name`
    ///
    /// # Errors
    /// `FtError::Validation` if the filename encodes to 0 bytes or more than
    /// 1024 bytes.
    pub fn new(file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        let name_bytes = file_name.as_bytes();

        if name_bytes.is_empty() || name_bytes.len() > MAX_FILENAME_LEN {
            return Err(FtError::Validation(format!(
                "filename length {} outside 1..={} bytes",
                name_bytes.len(),
                MAX_FILENAME_LEN
            )));
        }

        let mut values = HeaderValues::new(REQUEST_SCHEMA);
        values.set("MagicNo", MAGIC_NO)?;
        values.set("Type", REQUEST_TYPE)?;
        values.set("FilenameLen", name_bytes.len() as u64)?;
        let header = values.encode()?;

        let total_bits = REQUEST_SCHEMA.total_bits() + name_bytes.len() * BYTE_BITS;
        let mut packet = BitBuffer::with_bytes(total_bits, header.as_bytes())?;
        for &byte in name_bytes {
            packet.append(u64::from(byte), BYTE_BITS)?;
        }

        Ok(Self { file_name, packet })
    }

    /// The requested filename
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Header + payload bytes, ready for transmission
    pub fn to_bytes(&self) -> &[u8] {
        self.packet.as_bytes()
    }

    /// Header length in bytes (constant: 5)
    pub fn header_byte_len() -> usize {
        REQUEST_SCHEMA.byte_len()
    }

    /// Reinterpret a received header into host-ordered field values
    pub fn to_host_order(wire: &[u8]) -> Result<BitBuffer> {
        to_host_order(REQUEST_SCHEMA, wire)
    }

    /// Check a host-ordered header: MagicNo, Type, and FilenameLen in range
    pub fn is_valid_header(header: &BitBuffer) -> bool {
        let magic = REQUEST_SCHEMA.read_field(header, "MagicNo");
        let msg_type = REQUEST_SCHEMA.read_field(header, "Type");
        let name_len = REQUEST_SCHEMA.read_field(header, "FilenameLen");

        matches!(magic, Ok(m) if m == MAGIC_NO)
            && matches!(msg_type, Ok(t) if t == REQUEST_TYPE)
            && matches!(name_len, Ok(n) if (1..=MAX_FILENAME_LEN as u64).contains(&n))
    }

    /// Extract FilenameLen from a host-ordered header
    ///
    /// # Errors
    /// `FtError::MalformedHeader` if the buffer is shorter than the header.
    pub fn filename_len(header: &BitBuffer) -> Result<usize> {
        let value = REQUEST_SCHEMA.read_field(header, "FilenameLen")?;
        Ok(value as usize)
    }
}
