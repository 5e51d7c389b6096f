//! FileResponse message
//!
//! Header + file payload. The response holds a reference to the source file
//! path, never its contents; payload bytes only exist one block at a time
//! while streaming.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{FtError, Result};
use crate::packet::BitBuffer;
use crate::wire::{to_host_order, Field, HeaderValues, Schema};

use super::{MAGIC_NO, RESPONSE_TYPE};

/// Response header layout: MagicNo(16), Type(8), StatusCode(8), DataLen(32)
pub static RESPONSE_SCHEMA: Schema = Schema::new(&[
    Field { name: "MagicNo", bits: 16 },
    Field { name: "Type", bits: 8 },
    Field { name: "StatusCode", bits: 8 },
    Field { name: "DataLen", bits: 32 },
]);

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// The requested file does not exist or is not readable
    NotFound = 0,

    /// The requested file exists; DataLen bytes of payload follow the header
    Found = 1,
}

impl Status {
    /// Parse a wire status value; anything outside {0, 1} is invalid
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Status::NotFound),
            1 => Some(Status::Found),
            _ => None,
        }
    }
}

/// A response carrying a file (or the news that there is none)
#[derive(Debug, Clone)]
pub struct FileResponse {
    /// Source file path; contents are read only when streaming
    path: PathBuf,

    status: Status,

    /// Payload byte length reported in the header
    data_len: u64,

    /// Encoded network-order header
    header: BitBuffer,
}

impl FileResponse {
    /// Build a response for `path` with the given status
    ///
    /// DataLen is taken from file metadata when the status is `Found`; a
    /// missing or unreadable file reports 0. File contents are not read here.
    ///
    /// # Errors
    /// `FtError::FileIo` if the file is larger than a 32-bit DataLen can
    /// describe.
    pub fn new(path: impl Into<PathBuf>, status: Status) -> Result<Self> {
        let path = path.into();

        let data_len = match status {
            Status::Found => fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            Status::NotFound => 0,
        };
        if data_len > u64::from(u32::MAX) {
            return Err(FtError::FileIo(format!(
                "{} is {} bytes, too large for a 32-bit DataLen",
                path.display(),
                data_len
            )));
        }

        let mut values = HeaderValues::new(RESPONSE_SCHEMA);
        values.set("MagicNo", MAGIC_NO)?;
        values.set("Type", RESPONSE_TYPE)?;
        values.set("StatusCode", u64::from(status as u8))?;
        values.set("DataLen", data_len)?;
        let header = values.encode()?;

        Ok(Self {
            path,
            status,
            data_len,
            header,
        })
    }

    /// The response status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Payload length reported in the header
    pub fn data_len(&self) -> u64 {
        self.data_len
    }

    /// Source file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header length in bytes (constant: 8)
    pub fn header_byte_len() -> usize {
        RESPONSE_SCHEMA.byte_len()
    }

    /// Eager whole-buffer form: header + entire file contents
    ///
    /// Reads the whole file into memory; only suitable for small payloads
    /// and tests. Use [`stream_blocks`](Self::stream_blocks) otherwise.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = self.header.as_bytes().to_vec();

        if self.status == Status::Found && self.data_len > 0 {
            let mut file = File::open(&self.path)
                .map_err(|e| FtError::FileIo(format!("{}: {}", self.path.display(), e)))?;
            file.read_to_end(&mut out)?;

            let expected = Self::header_byte_len() as u64 + self.data_len;
            if out.len() as u64 != expected {
                return Err(FtError::FileIo(format!(
                    "{} changed size during read: header promised {} payload bytes, read {}",
                    self.path.display(),
                    self.data_len,
                    out.len() - Self::header_byte_len()
                )));
            }
        }

        Ok(out)
    }

    /// Stream the response as a finite sequence of byte blocks
    ///
    /// The first block carries the header, folded together with file data up
    /// to `block_size` bytes; later blocks carry file data only. The file is
    /// opened lazily on the first pull that needs it and released as soon as
    /// the stream is exhausted or dropped. The sequence yields exactly
    /// `header_byte_len() + DataLen` bytes in total; a filesystem EOF before
    /// that is reported as an error, never as silent truncation.
    pub fn stream_blocks(&self, block_size: usize) -> BlockStream {
        let remaining = match self.status {
            Status::Found => self.data_len,
            Status::NotFound => 0,
        };

        BlockStream {
            path: self.path.clone(),
            header: self.header.as_bytes().to_vec(),
            header_sent: 0,
            remaining,
            block_size: block_size.max(1),
            file: None,
            failed: false,
        }
    }

    /// Reinterpret a received header into host-ordered field values
    pub fn to_host_order(wire: &[u8]) -> Result<BitBuffer> {
        to_host_order(RESPONSE_SCHEMA, wire)
    }

    /// Check a host-ordered header: MagicNo, Type, and StatusCode in {0, 1}
    pub fn is_valid_header(header: &BitBuffer) -> bool {
        let magic = RESPONSE_SCHEMA.read_field(header, "MagicNo");
        let msg_type = RESPONSE_SCHEMA.read_field(header, "Type");
        let status = RESPONSE_SCHEMA.read_field(header, "StatusCode");

        matches!(magic, Ok(m) if m == MAGIC_NO)
            && matches!(msg_type, Ok(t) if t == RESPONSE_TYPE)
            && matches!(status, Ok(s) if Status::from_u64(s).is_some())
    }

    /// Extract (StatusCode, DataLen) from a host-ordered header
    ///
    /// # Errors
    /// `FtError::MalformedHeader` if the buffer is shorter than the header;
    /// `FtError::Validation` if the status value is outside {0, 1}.
    pub fn status_and_data_len(header: &BitBuffer) -> Result<(Status, u64)> {
        let status_value = RESPONSE_SCHEMA.read_field(header, "StatusCode")?;
        let data_len = RESPONSE_SCHEMA.read_field(header, "DataLen")?;

        let status = Status::from_u64(status_value).ok_or_else(|| {
            FtError::Validation(format!("status code {} outside 0..=1", status_value))
        })?;

        Ok((status, data_len))
    }
}

/// Lazy, finite, non-restartable block sequence for one response
///
/// Owns the file handle; `Drop` closes it on every exit path, including
/// early abandonment.
#[derive(Debug)]
pub struct BlockStream {
    path: PathBuf,
    header: Vec<u8>,
    header_sent: usize,
    remaining: u64,
    block_size: usize,
    file: Option<File>,
    failed: bool,
}

impl BlockStream {
    /// File bytes still to be yielded
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Fill `buf` completely from the file, treating EOF as an error
    ///
    /// The header's DataLen is authoritative; the filesystem may legally
    /// return short reads before the true end of file, so reads are retried
    /// until `buf` is full.
    fn read_file_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.file.is_none() {
            let file = File::open(&self.path)
                .map_err(|e| FtError::FileIo(format!("{}: {}", self.path.display(), e)))?;
            self.file = Some(file);
        }
        let file = self.file.as_mut().ok_or_else(|| {
            FtError::FileIo(format!("{}: no open handle", self.path.display()))
        })?;

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(FtError::FileIo(format!(
                        "{} ended {} bytes short of its declared length",
                        self.path.display(),
                        self.remaining - filled as u64
                    )));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Iterator for BlockStream {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.header_sent >= self.header.len() && self.remaining == 0 {
            return None;
        }

        let mut block = Vec::with_capacity(self.block_size);

        // Header first, folded into the leading block(s)
        if self.header_sent < self.header.len() {
            let take = self.block_size.min(self.header.len() - self.header_sent);
            block.extend_from_slice(&self.header[self.header_sent..self.header_sent + take]);
            self.header_sent += take;
        }

        // Top the block up with file data
        if self.remaining > 0 && block.len() < self.block_size {
            let want = ((self.block_size - block.len()) as u64).min(self.remaining) as usize;
            let start = block.len();
            block.resize(start + want, 0);

            if let Err(e) = self.read_file_exact(&mut block[start..]) {
                self.failed = true;
                self.file = None;
                return Some(Err(e));
            }

            self.remaining -= want as u64;
            if self.remaining == 0 {
                // Release the handle as soon as the last byte is out
                self.file = None;
            }
        }

        Some(Ok(block))
    }
}
