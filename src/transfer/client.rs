//! Client role
//!
//! Connects, sends a FileRequest, validates the response header, and
//! downloads the payload in bounded blocks to a local file.

use std::fs::File;
use std::io::Write;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::{FtError, Result};
use crate::protocol::{FileRequest, FileResponse, Status};

use super::io::{recv_exact, send_all};

/// Result of one fetch: what the server said and what landed on disk
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Status reported by the server
    pub status: Status,

    /// Payload bytes received and written
    pub bytes_received: u64,

    /// Destination file, present only when the payload was written
    pub dest: Option<PathBuf>,
}

/// Fetch `file_name` from the server at `config.addr` into `dest`
///
/// A server-side "not found" is a normal outcome with zero bytes
/// transferred, not an error. The destination file is only created once the
/// response header has been validated and reports the file as found.
///
/// # Errors
/// - `FtError::FileIo` if `dest` already exists (no silent overwrite)
/// - `FtError::Validation` if the response header fails validation
/// - `FtError::ConnectionClosed` if the peer closes before DataLen bytes
/// - `FtError::Timeout` / `FtError::Io` on socket failures
pub fn fetch(config: &Config, file_name: &str, dest: &Path) -> Result<Outcome> {
    if dest.exists() {
        return Err(FtError::FileIo(format!(
            "{} already exists locally",
            dest.display()
        )));
    }

    let request = FileRequest::new(file_name)?;

    let mut stream = TcpStream::connect(&config.addr)?;
    stream.set_nodelay(true)?;
    stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
    stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;

    tracing::debug!("Connected to {}", config.addr);

    let sent = send_all(&mut stream, request.to_bytes())?;
    tracing::debug!("Sent FileRequest for \"{}\" ({} bytes)", file_name, sent);

    let header_wire = recv_exact(&mut stream, FileResponse::header_byte_len())?;
    let header = FileResponse::to_host_order(&header_wire)?;

    if !FileResponse::is_valid_header(&header) {
        return Err(FtError::Validation(
            "invalid FileResponse header".to_string(),
        ));
    }

    let (status, data_len) = FileResponse::status_and_data_len(&header)?;

    if status == Status::NotFound {
        tracing::info!("\"{}\" is not on the server", file_name);
        return Ok(Outcome {
            status,
            bytes_received: 0,
            dest: None,
        });
    }

    let bytes_received = download(&mut stream, dest, data_len, config.block_size)?;
    tracing::info!(
        "Received \"{}\" from server, {} bytes written to {}",
        file_name,
        bytes_received,
        dest.display()
    );

    Ok(Outcome {
        status,
        bytes_received,
        dest: Some(dest.to_path_buf()),
    })
}

/// Download exactly `data_len` payload bytes into `dest` in bounded blocks
///
/// DataLen is authoritative: the loop stops when the cumulative count
/// reaches it, and a zero-length read before that point is a fatal
/// connection-closed error, not end of payload.
fn download(stream: &mut TcpStream, dest: &Path, data_len: u64, block_size: usize) -> Result<u64> {
    let mut outfile = File::create(dest)
        .map_err(|e| FtError::FileIo(format!("{}: {}", dest.display(), e)))?;

    let mut received: u64 = 0;
    while received < data_len {
        let chunk = (data_len - received).min(block_size as u64) as usize;
        let block = recv_exact(stream, chunk)?;

        outfile
            .write_all(&block)
            .map_err(|e| FtError::FileIo(format!("{}: {}", dest.display(), e)))?;
        received += chunk as u64;
    }

    outfile
        .flush()
        .map_err(|e| FtError::FileIo(format!("{}: {}", dest.display(), e)))?;
    Ok(received)
}
