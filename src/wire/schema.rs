//! Header field schemas
//!
//! An ordered sequence of named, fixed-width fields. Field order defines the
//! wire layout; names must be unique within a schema.

use crate::error::{FtError, Result};
use crate::packet::{BitBuffer, BYTE_BITS};

/// A single named header field with a fixed bit width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name, unique within its schema
    pub name: &'static str,

    /// Width on the wire in bits (1..=32)
    pub bits: usize,
}

/// Immutable ordered header layout
///
/// Schemas are declared once as statics; message instances carry their own
/// value slots (see `HeaderValues`).
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    /// Create a schema over a static field list
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// The ordered field list
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Total header width in bits
    pub fn total_bits(&self) -> usize {
        self.fields.iter().map(|f| f.bits).sum()
    }

    /// Header length in whole bytes, `ceil(total_bits / 8)`
    pub fn byte_len(&self) -> usize {
        self.total_bits().div_ceil(BYTE_BITS)
    }

    /// Bit offset of the named field from the start of the header
    pub fn bit_offset(&self, name: &str) -> Result<usize> {
        let mut offset = 0;
        for field in self.fields {
            if field.name == name {
                return Ok(offset);
            }
            offset += field.bits;
        }
        Err(FtError::Schema(format!("unknown field: {}", name)))
    }

    /// Bit width of the named field
    pub fn width(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.bits)
            .ok_or_else(|| FtError::Schema(format!("unknown field: {}", name)))
    }

    /// Read the named field's value out of a decoded header buffer
    pub fn read_field(&self, buffer: &BitBuffer, name: &str) -> Result<u64> {
        let offset = self.bit_offset(name)?;
        let width = self.width(name)?;
        buffer.read_bits(offset, offset + width)
    }
}
