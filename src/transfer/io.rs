//! Stream I/O helpers
//!
//! A byte-oriented transport may accept or deliver fewer bytes than asked
//! per call. These helpers retry until the full count is moved, and surface
//! a closed connection or a timeout as typed errors instead of short data.

use std::io::{ErrorKind, Read, Write};

use crate::error::{FtError, Result};

/// Map a socket error to a typed failure
///
/// Timeouts show up as `WouldBlock` on Unix and `TimedOut` on Windows.
pub(crate) fn map_io(e: std::io::Error) -> FtError {
    match e.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => FtError::Timeout(e.to_string()),
        _ => FtError::Io(e),
    }
}

/// Write all of `data`, retrying partial writes; returns the byte count
///
/// # Errors
/// `FtError::ConnectionClosed` if the peer stops accepting bytes,
/// `FtError::Timeout` on a write deadline, `FtError::Io` otherwise.
pub fn send_all<W: Write + ?Sized>(writer: &mut W, data: &[u8]) -> Result<usize> {
    let mut sent = 0;
    while sent < data.len() {
        match writer.write(&data[sent..]) {
            Ok(0) => {
                return Err(FtError::ConnectionClosed {
                    expected: data.len(),
                    received: sent,
                })
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_io(e)),
        }
    }
    writer.flush().map_err(map_io)?;
    Ok(sent)
}

/// Read exactly `count` bytes, retrying partial reads
///
/// A zero-length read before `count` bytes have arrived means the peer
/// closed the connection; that is never treated as completion.
///
/// # Errors
/// `FtError::ConnectionClosed` on early close, `FtError::Timeout` on a read
/// deadline, `FtError::Io` otherwise.
pub fn recv_exact<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<Vec<u8>> {
    let mut data = vec![0u8; count];
    let mut received = 0;
    while received < count {
        match reader.read(&mut data[received..]) {
            Ok(0) => {
                return Err(FtError::ConnectionClosed {
                    expected: count,
                    received,
                })
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_io(e)),
        }
    }
    Ok(data)
}
