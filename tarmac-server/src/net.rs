//! Line-oriented stream I/O and listener setup.

use std::io;
use std::net::SocketAddr;

use bytes::{Buf, BytesMut};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Initial read-buffer allocation; grows on demand up to the line limit.
const READ_BUF_BYTES: usize = 256;

/// Reads newline-delimited lines from an async stream.
///
/// Lines longer than the configured limit abort the stream with an error
/// rather than buffering without bound. A final line without a trailing
/// newline is still delivered when the peer closes the connection.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buf: BytesMut,
    max_line_bytes: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wraps `reader` with a per-line size limit.
    pub fn new(reader: R, max_line_bytes: u32) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(READ_BUF_BYTES),
            max_line_bytes: max_line_bytes as usize,
        }
    }

    /// Returns the next line without its terminator, or `None` at clean EOF.
    ///
    /// # Errors
    /// Propagates read failures, and returns `InvalidData` when a line
    /// exceeds the size limit.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                // The limit applies to the line's content, no matter how the
                // bytes were chunked across reads.
                if pos >= self.max_line_bytes {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "request line exceeds size limit",
                    ));
                }
                let line = decode(&self.buf[..pos]);
                self.buf.advance(pos + 1);
                return Ok(Some(line));
            }
            if self.buf.len() >= self.max_line_bytes {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "request line exceeds size limit",
                ));
            }
            let read = self.reader.read_buf(&mut self.buf).await?;
            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                // Peer closed mid-line; deliver what arrived.
                let line = decode(&self.buf);
                self.buf.clear();
                return Ok(Some(line));
            }
        }
    }
}

/// Decodes a line's bytes, trimming a trailing carriage return.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Writes one response line with its newline terminator and flushes.
///
/// # Errors
/// Propagates write failures.
pub async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Creates a TCP listener with `SO_REUSEADDR` enabled.
///
/// Restarted nodes rebind their well-known ports immediately instead of
/// waiting out `TIME_WAIT` from the previous run.
///
/// # Errors
/// Returns socket creation, bind, or listen failures.
pub fn create_reusable_listener(addr: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(i32::try_from(backlog).unwrap_or(i32::MAX))?;
    TcpListener::from_std(socket.into())
}
