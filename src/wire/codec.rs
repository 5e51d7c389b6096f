//! Header encode/decode
//!
//! Serializes a schema's field values into a `BitBuffer` in network byte
//! order, and reinterprets a header received off the wire back into
//! host-ordered field values.

use crate::error::{FtError, Result};
use crate::packet::{BitBuffer, BYTE_BITS};

use super::schema::Schema;

/// Widest field the codec converts to/from network order
const MAX_FIELD_BITS: usize = 32;

/// Per-message header value slots, parallel to a schema's field list
///
/// Freshly allocated for every message instance. A field stays unset until
/// `set` is called; `encode` rejects schemas with any unset slot.
#[derive(Debug, Clone)]
pub struct HeaderValues {
    schema: Schema,
    values: Vec<Option<u64>>,
}

impl HeaderValues {
    /// Create an all-unset value mapping for `schema`
    pub fn new(schema: Schema) -> Self {
        let values = vec![None; schema.fields().len()];
        Self { schema, values }
    }

    /// Set the named field's value
    ///
    /// # Errors
    /// `FtError::Schema` if the field name is not in the schema or the value
    /// does not fit the field's bit width.
    pub fn set(&mut self, name: &str, value: u64) -> Result<()> {
        let index = self
            .schema
            .fields()
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| FtError::Schema(format!("unknown field: {}", name)))?;

        let bits = self.schema.fields()[index].bits;
        if bits < 64 && value >> bits != 0 {
            return Err(FtError::Schema(format!(
                "value {} does not fit in {} bits for field {}",
                value, bits, name
            )));
        }

        self.values[index] = Some(value);
        Ok(())
    }

    /// Get the named field's value, if set
    pub fn get(&self, name: &str) -> Option<u64> {
        let index = self.schema.fields().iter().position(|f| f.name == name)?;
        self.values[index]
    }

    /// The schema this mapping belongs to
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Serialize all fields into a network-order header buffer
    ///
    /// The MSB-first bit packer lays multi-byte fields out big-endian, which
    /// is exactly network order; 8-bit and smaller fields have no byte order.
    ///
    /// # Errors
    /// `FtError::Schema` if any field is unset or wider than 32 bits.
    pub fn encode(&self) -> Result<BitBuffer> {
        let mut buffer = BitBuffer::new(self.schema.total_bits());

        for (field, slot) in self.schema.fields().iter().zip(&self.values) {
            if field.bits == 0 || field.bits > MAX_FIELD_BITS {
                return Err(FtError::Schema(format!(
                    "field {} has unsupported width of {} bits",
                    field.name, field.bits
                )));
            }
            let value = slot.ok_or_else(|| {
                FtError::Schema(format!("field {} has no value at encode time", field.name))
            })?;
            buffer.append(value, field.bits)?;
        }

        Ok(buffer)
    }
}

/// Reinterpret a received network-order header as host-ordered field values
///
/// Extracts each field as a big-endian unsigned integer and repacks it into a
/// fresh buffer, preserving field boundaries. Applying this to an
/// already-host-order buffer is idempotent; there is no double swap.
///
/// # Errors
/// `FtError::MalformedHeader` if `wire` is shorter than the schema's header.
pub fn to_host_order(schema: Schema, wire: &[u8]) -> Result<BitBuffer> {
    let header_bytes = schema.byte_len();
    if wire.len() < header_bytes {
        return Err(FtError::MalformedHeader(format!(
            "header needs {} bytes, received {}",
            header_bytes,
            wire.len()
        )));
    }

    let net = BitBuffer::with_bytes(header_bytes * BYTE_BITS, &wire[..header_bytes])?;
    let mut host = BitBuffer::new(schema.total_bits());

    let mut offset = 0;
    for field in schema.fields() {
        let value = net.read_bits(offset, offset + field.bits)?;
        host.append(value, field.bits)?;
        offset += field.bits;
    }

    Ok(host)
}
