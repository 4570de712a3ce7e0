//! The controller: the network's routing front door.
//!
//! Owns no schedule state. For each request line it extracts the embedded
//! airport id, opens a fresh connection to that airport node, forwards the
//! line verbatim, and relays the response back. The request shape tells it
//! exactly how many response lines a successful answer carries; upstream
//! failures are converted into single `Error:` lines so the client-facing
//! connection always stays healthy.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWrite;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use tarmac_core::Limits;
use tarmac_wire::{is_error_line, RawRequest, Request};

use crate::net::{write_line, LineReader};
use crate::work_queue::WorkQueue;

/// Configuration for the controller node.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Address of each airport node, indexed by airport id.
    pub airports: Vec<SocketAddr>,
    /// Runtime limits.
    pub limits: Limits,
}

/// The controller node.
#[derive(Debug)]
pub struct Controller {
    airports: Arc<Vec<SocketAddr>>,
    limits: Limits,
    shutdown: Arc<Notify>,
}

impl Controller {
    /// Creates a controller routing to the given airport address table.
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            airports: Arc::new(config.airports),
            limits: config.limits,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Handle that stops [`Controller::run`] when notified.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Serves client connections from `listener` until shutdown.
    pub async fn run(&self, listener: TcpListener) {
        let queue = Arc::new(WorkQueue::new(self.limits.queue_capacity));

        let mut workers = Vec::new();
        for worker_id in 0..self.limits.worker_pool_size {
            let queue = Arc::clone(&queue);
            let airports = Arc::clone(&self.airports);
            let limits = self.limits;
            workers.push(tokio::spawn(async move {
                loop {
                    let stream: TcpStream = queue.pop().await;
                    if let Err(error) = serve_connection(stream, &airports, &limits).await {
                        debug!(worker_id, %error, "client connection closed with error");
                    }
                }
            }));
        }

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!(%peer, "accepted client connection");
                        queue.push(stream).await;
                    }
                    Err(error) => warn!(%error, "accept failed"),
                },
                () = self.shutdown.notified() => {
                    info!("controller shutting down");
                    break;
                }
            }
        }

        for worker in workers {
            worker.abort();
        }
    }
}

/// Relays every request line on one client connection, in arrival order.
async fn serve_connection(
    stream: TcpStream,
    airports: &[SocketAddr],
    limits: &Limits,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = LineReader::new(read_half, limits.max_line_bytes);

    while let Some(line) = lines.next_line().await? {
        relay_request(&line, airports, limits, &mut write_half).await?;
    }
    Ok(())
}

/// Routes one request line and relays the full response to the client.
///
/// Only client-side I/O failures propagate; every routing or upstream
/// failure becomes a single error line on the healthy client connection.
async fn relay_request<W: AsyncWrite + Unpin>(
    line: &str,
    airports: &[SocketAddr],
    limits: &Limits,
    client: &mut W,
) -> std::io::Result<()> {
    // Shape before routing: a malformed line is rejected here even when its
    // airport id would also have been out of range.
    let raw = match RawRequest::parse(line) {
        Ok(raw) => raw,
        Err(err) => return write_line(client, &err.to_line()).await,
    };
    let expected_lines = match Request::probe(&raw) {
        Ok(expected) => expected,
        Err(err) => return write_line(client, &err.to_line()).await,
    };

    let Some(addr) = usize::try_from(raw.airport)
        .ok()
        .and_then(|idx| airports.get(idx))
        .copied()
    else {
        debug!(airport = raw.airport, "request for unknown airport");
        return write_line(client, &tarmac_wire::unknown_airport(raw.airport)).await;
    };

    let upstream = match connect(addr, limits).await {
        Ok(stream) => stream,
        Err(error) => {
            warn!(airport = raw.airport, %addr, %error, "cannot reach airport node");
            return write_line(client, &tarmac_wire::cannot_connect(raw.airport)).await;
        }
    };

    let (up_read, mut up_write) = upstream.into_split();
    if write_line(&mut up_write, line).await.is_err() {
        return write_line(client, &tarmac_wire::no_response(raw.airport)).await;
    }

    let mut responses = LineReader::new(up_read, limits.max_line_bytes);

    // The first line decides: an error marker means the response is complete
    // regardless of how many lines the request promised.
    let first = match responses.next_line().await {
        Ok(Some(first)) => first,
        Ok(None) | Err(_) => {
            warn!(airport = raw.airport, "airport sent no response");
            return write_line(client, &tarmac_wire::no_response(raw.airport)).await;
        }
    };
    write_line(client, &first).await?;
    if is_error_line(&first) {
        return Ok(());
    }

    for _ in 1..expected_lines {
        match responses.next_line().await {
            Ok(Some(next)) => write_line(client, &next).await?,
            Ok(None) | Err(_) => {
                warn!(airport = raw.airport, expected_lines, "truncated response");
                return write_line(client, &tarmac_wire::incomplete_response(raw.airport)).await;
            }
        }
    }
    Ok(())
}

/// Opens a fresh connection to an airport node, bounded by the connect
/// timeout. Nagle is disabled; exchanges are single small lines.
async fn connect(addr: SocketAddr, limits: &Limits) -> std::io::Result<TcpStream> {
    let stream = timeout(
        Duration::from_millis(limits.connect_timeout_ms),
        TcpStream::connect(addr),
    )
    .await
    .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out"))??;
    stream.set_nodelay(true)?;
    Ok(stream)
}
