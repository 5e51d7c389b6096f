//! Server role
//!
//! Accepts one connection at a time, reads and validates a FileRequest, and
//! streams back a FileResponse in bounded blocks.

use std::fs::{self, File};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::{FtError, Result};
use crate::protocol::{FileRequest, FileResponse, Status};

use super::io::{recv_exact, send_all};

/// Single-connection file server
///
/// Processes each accepted connection fully (request through response)
/// before accepting the next. A failed connection is logged and dropped; the
/// accept loop keeps going.
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a server with the given config
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind the listen address and serve connections forever
    pub fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.addr)?;
        tracing::info!(
            "Listening on {}, serving {}",
            self.config.addr,
            self.config.serve_dir.display()
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.handle_connection(stream) {
                        tracing::warn!("Connection failed: {}", e);
                    }
                }
                Err(e) => tracing::warn!("Accept failed: {}", e),
            }
        }

        Ok(())
    }

    /// Serve one accepted connection: request in, response out
    ///
    /// An invalid or malformed request closes the connection without sending
    /// any response bytes. A file that does not exist is not an error; it is
    /// answered with StatusCode 0.
    pub fn handle_connection(&self, mut stream: TcpStream) -> Result<()> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        tracing::debug!("Connection established from {}", peer_addr);

        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        stream.set_write_timeout(Some(Duration::from_millis(self.config.write_timeout_ms)))?;

        // Request header, then exactly FilenameLen bytes of filename
        let header_wire = recv_exact(&mut stream, FileRequest::header_byte_len())?;
        let header = FileRequest::to_host_order(&header_wire)?;

        if !FileRequest::is_valid_header(&header) {
            tracing::warn!("Invalid FileRequest header from {}, closing", peer_addr);
            return Err(FtError::Validation(
                "invalid FileRequest header".to_string(),
            ));
        }

        let name_len = FileRequest::filename_len(&header)?;
        let name_bytes = recv_exact(&mut stream, name_len)?;
        let file_name = String::from_utf8(name_bytes)
            .map_err(|_| FtError::Validation("filename is not valid UTF-8".to_string()))?;

        let path = self.resolve(&file_name)?;
        let status = if file_readable(&path) {
            Status::Found
        } else {
            Status::NotFound
        };

        let response = FileResponse::new(&path, status)?;
        let mut bytes_sent: u64 = 0;
        for block in response.stream_blocks(self.config.block_size) {
            let block = block?;
            bytes_sent += send_all(&mut stream, &block)? as u64;
        }

        stream.shutdown(Shutdown::Write)?;

        match status {
            Status::Found => tracing::info!(
                "Sent \"{}\" to {}, {} bytes sent",
                file_name,
                peer_addr,
                bytes_sent
            ),
            Status::NotFound => tracing::info!(
                "\"{}\" does not exist, not-found response sent to {} ({} bytes)",
                file_name,
                peer_addr,
                bytes_sent
            ),
        }

        Ok(())
    }

    /// Resolve a requested filename inside the serve directory
    ///
    /// Absolute paths and parent-directory components are rejected so a
    /// request cannot escape the configured directory.
    fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        let rel = Path::new(file_name);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(FtError::Validation(format!(
                "filename \"{}\" escapes the serve directory",
                file_name
            )));
        }
        Ok(self.config.serve_dir.join(rel))
    }
}

/// True if `path` is a regular file that can actually be opened
///
/// Existence alone is not enough; permissions can make a present file
/// unservable.
fn file_readable(path: &Path) -> bool {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && File::open(path).is_ok()
}
