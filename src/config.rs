//! Configuration for filewire
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default payload block size in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Default socket timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Lowest port number accepted on the command line
pub const MIN_PORT: u16 = 1024;

/// Highest port number accepted on the command line
pub const MAX_PORT: u16 = 64000;

/// Main configuration for a filewire endpoint
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Filesystem Configuration
    // -------------------------------------------------------------------------
    /// Directory the server resolves requested filenames against
    pub serve_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (server) or peer address (client)
    pub addr: String,

    /// Payload block size for streamed transfers (bytes)
    pub block_size: usize,

    /// Socket read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serve_dir: PathBuf::from("."),
            addr: "127.0.0.1:2049".to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            read_timeout_ms: DEFAULT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the directory served files are resolved against
    pub fn serve_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.serve_dir = path.into();
        self
    }

    /// Set the socket address (listen address for the server, peer for the client)
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the payload block size (in bytes)
    pub fn block_size(mut self, size: usize) -> Self {
        self.config.block_size = size;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
