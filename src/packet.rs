//! Bit-addressable packet buffer
//!
//! A fixed-capacity byte buffer that supports sequential bit-granularity
//! writes and arbitrary-range bit reads. Bits are packed MSB-first, so an
//! integer appended with a multi-byte width lands on the wire in big-endian
//! (network) order.
//!
//! Writes advance an internal cursor and may split across byte boundaries;
//! reads address absolute bit ranges and never touch the cursor.

use crate::error::{FtError, Result};

/// Bits per byte
pub const BYTE_BITS: usize = 8;

/// Widest value accepted by a single append or read
pub const MAX_VALUE_BITS: usize = 64;

/// Fixed-capacity, bit-addressable byte buffer
///
/// ## Invariants
/// - `bytes.len() == ceil(bit_len / 8)`
/// - `next_bit <= bit_len` at all times
/// - bits past `next_bit` are zero
#[derive(Debug, Clone)]
pub struct BitBuffer {
    /// Backing storage, zero-initialized
    bytes: Vec<u8>,

    /// Declared capacity in bits
    bit_len: usize,

    /// Cursor: index of the next bit to be written
    next_bit: usize,
}

impl BitBuffer {
    /// Create a zeroed buffer with capacity for `bit_len` bits
    pub fn new(bit_len: usize) -> Self {
        let total_bytes = bit_len.div_ceil(BYTE_BITS);
        Self {
            bytes: vec![0u8; total_bytes],
            bit_len,
            next_bit: 0,
        }
    }

    /// Create a buffer of `bit_len` bits seeded with received bytes
    ///
    /// Each seed byte is appended in order, so the cursor ends up at
    /// `seed.len() * 8`. Fails if the seed does not fit the declared capacity.
    pub fn with_bytes(bit_len: usize, seed: &[u8]) -> Result<Self> {
        if seed.len() * BYTE_BITS > bit_len {
            return Err(FtError::Capacity(format!(
                "seed of {} bytes exceeds capacity of {} bits",
                seed.len(),
                bit_len
            )));
        }

        let mut buffer = Self::new(bit_len);
        for &byte in seed {
            buffer.append(u64::from(byte), BYTE_BITS)?;
        }
        Ok(buffer)
    }

    /// Append the low `width` bits of `value` at the cursor
    ///
    /// Bits are written MSB-first and carry into the next byte when they span
    /// a byte boundary. Advances the cursor by `width`.
    ///
    /// # Errors
    /// Returns `FtError::Capacity` if `width` exceeds 64 bits or the write
    /// would run past the declared capacity.
    pub fn append(&mut self, value: u64, width: usize) -> Result<()> {
        if width > MAX_VALUE_BITS {
            return Err(FtError::Capacity(format!(
                "bit width {} exceeds maximum of {}",
                width, MAX_VALUE_BITS
            )));
        }
        if self.next_bit + width > self.bit_len {
            return Err(FtError::Capacity(format!(
                "write of {} bits at bit {} exceeds capacity of {} bits",
                width, self.next_bit, self.bit_len
            )));
        }

        let mut remaining = width;
        while remaining > 0 {
            let byte_idx = self.next_bit / BYTE_BITS;
            let bit_offset = self.next_bit % BYTE_BITS;

            // Room left in the current byte, and how much of the value fits
            let room = BYTE_BITS - bit_offset;
            let take = remaining.min(room);

            // Extract the top `take` bits of what remains of the value
            let shift = remaining - take;
            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bytes[byte_idx] |= bits << (room - take);

            self.next_bit += take;
            remaining -= take;
        }

        Ok(())
    }

    /// Read the unsigned integer formed by bits `[start, end)`
    ///
    /// `end` is exclusive and both indices are absolute. Bits are assembled
    /// MSB-first (big-endian). Side-effect free.
    ///
    /// # Errors
    /// Returns `FtError::MalformedHeader` if the range is inverted, wider
    /// than 64 bits, or runs past the declared capacity.
    pub fn read_bits(&self, start: usize, end: usize) -> Result<u64> {
        if start > end {
            return Err(FtError::MalformedHeader(format!(
                "inverted bit range {}..{}",
                start, end
            )));
        }
        if end - start > MAX_VALUE_BITS {
            return Err(FtError::MalformedHeader(format!(
                "bit range {}..{} wider than {} bits",
                start, end, MAX_VALUE_BITS
            )));
        }
        if end > self.bit_len {
            return Err(FtError::MalformedHeader(format!(
                "bit range {}..{} exceeds buffer of {} bits",
                start, end, self.bit_len
            )));
        }

        let mut result = 0u64;
        let mut position = start;
        while position < end {
            let byte_idx = position / BYTE_BITS;
            let bit_offset = position % BYTE_BITS;

            let available = BYTE_BITS - bit_offset;
            let take = (end - position).min(available);

            let byte = self.bytes[byte_idx];
            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (available - take)) & mask;

            result = (result << take) | u64::from(bits);
            position += take;
        }

        Ok(result)
    }

    /// Byte-addressed read: the big-endian integer in bytes `[start, end)`
    ///
    /// Equivalent to `read_bits(start * 8, end * 8)`.
    pub fn read_byte_range(&self, start_byte: usize, end_byte: usize) -> Result<u64> {
        self.read_bits(start_byte * BYTE_BITS, end_byte * BYTE_BITS)
    }

    /// Backing bytes, including any unwritten zero bits
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer and return the backing bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Declared capacity in bits
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Allocated length in bytes
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of bits written so far (cursor position)
    pub fn bits_written(&self) -> usize {
        self.next_bit
    }
}
