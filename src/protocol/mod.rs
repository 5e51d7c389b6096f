//! Protocol Module
//!
//! The two concrete message formats of the file-transfer protocol. All
//! multi-byte fields are big-endian (network byte order) on the wire.
//!
//! ### FileRequest Format
//! ```text
//! ┌─────────────┬──────────┬─────────────────┬──────────────────────┐
//! │ MagicNo (16)│ Type (8) │ FilenameLen (16)│ Filename (UTF-8)     │
//! │   0x497E    │    1     │    1..=1024     │ FilenameLen bytes    │
//! └─────────────┴──────────┴─────────────────┴──────────────────────┘
//! ```
//!
//! ### FileResponse Format
//! ```text
//! ┌─────────────┬──────────┬────────────────┬──────────────┬─────────────────┐
//! │ MagicNo (16)│ Type (8) │ StatusCode (8) │ DataLen (32) │ Payload         │
//! │   0x497E    │    2     │    0 or 1      │ file size    │ DataLen bytes   │
//! └─────────────┴──────────┴────────────────┴──────────────┴─────────────────┘
//! ```
//!
//! Payload bytes are present only when StatusCode is 1 (file found); a
//! StatusCode of 0 always carries DataLen 0 and no payload.

mod request;
mod response;

pub use request::{FileRequest, REQUEST_SCHEMA};
pub use response::{BlockStream, FileResponse, Status, RESPONSE_SCHEMA};

/// Magic number validating message identity before any further parsing
pub const MAGIC_NO: u64 = 0x497E;

/// Type field value for a FileRequest
pub const REQUEST_TYPE: u64 = 1;

/// Type field value for a FileResponse
pub const RESPONSE_TYPE: u64 = 2;

/// Maximum filename length in bytes
pub const MAX_FILENAME_LEN: usize = 1024;
