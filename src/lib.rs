//! # filewire
//!
//! A minimal file-transfer protocol over a reliable byte stream:
//! - Bit-addressable packet buffer with network-order field layout
//! - Fixed header schemas for request and response messages
//! - Block-streamed payload transfer that never buffers a whole file
//! - Single-connection, blocking TCP client and server
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐    FileRequest     ┌──────────────┐
//! │    Client    │ ─────────────────► │    Server    │
//! │  (transfer)  │                    │  (transfer)  │
//! │              │    FileResponse    │              │
//! │              │ ◄───────────────── │              │
//! └──────┬───────┘   (header+blocks)  └──────┬───────┘
//!        │                                   │
//!        ▼                                   ▼
//! ┌──────────────┐                    ┌──────────────┐
//! │   protocol   │   header schemas   │   protocol   │
//! └──────┬───────┘                    └──────┬───────┘
//!        │                                   │
//!        ▼                                   ▼
//! ┌──────────────┐                    ┌──────────────┐
//! │ wire + packet│  bit-level layout  │ wire + packet│
//! └──────────────┘                    └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod packet;
pub mod wire;
pub mod protocol;
pub mod transfer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FtError, Result};
pub use config::Config;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filewire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
