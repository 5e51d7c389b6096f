//! Transfer Module
//!
//! The request/response exchange over a connected byte stream: send-all and
//! receive-exact helpers that retry partial I/O, the client fetch sequence,
//! and the one-connection-at-a-time server loop.

mod io;
mod client;
mod server;

pub use io::{recv_exact, send_all};
pub use client::{fetch, Outcome};
pub use server::Server;
