//! Wire Module
//!
//! Maps named header fields to fixed bit widths in network byte order.
//!
//! A [`Schema`] is an immutable, ordered description of a header layout.
//! Per-message values live in a separate [`HeaderValues`] so that two
//! in-flight messages can never corrupt each other's encode.
//!
//! Multi-byte fields are endianness-sensitive while 8-bit fields are not;
//! [`to_host_order`] therefore reinterprets a received header field by field
//! rather than treating the buffer as one integer.

mod schema;
mod codec;

pub use schema::{Field, Schema};
pub use codec::{to_host_order, HeaderValues};
