//! The airport node runtime.
//!
//! One listening socket, a bounded connection queue, and a fixed pool of
//! worker tasks. Each worker owns one connection at a time and serves
//! requests on it to completion; gate arbitration happens inside the shared
//! [`Airport`] store, so workers never coordinate with each other directly.

use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use tarmac_core::{AirportId, Limits};
use tarmac_schedule::Airport;

use crate::handler;
use crate::net::{write_line, LineReader};
use crate::work_queue::WorkQueue;

/// Configuration for one airport node.
#[derive(Debug, Clone)]
pub struct AirportNodeConfig {
    /// This node's identifier; requests must name it to be served.
    pub airport_id: AirportId,
    /// Number of gates at this airport.
    pub num_gates: u32,
    /// Runtime limits.
    pub limits: Limits,
}

impl AirportNodeConfig {
    /// Creates a config with default limits.
    #[must_use]
    pub fn new(airport_id: AirportId, num_gates: u32) -> Self {
        Self {
            airport_id,
            num_gates,
            limits: Limits::new(),
        }
    }
}

/// A single airport node: the gate store plus its serving loop.
#[derive(Debug)]
pub struct AirportNode {
    airport: Arc<Airport>,
    limits: Limits,
    shutdown: Arc<Notify>,
}

impl AirportNode {
    /// Creates a node with an empty schedule.
    #[must_use]
    pub fn new(config: &AirportNodeConfig) -> Self {
        Self {
            airport: Arc::new(Airport::new(config.airport_id, config.num_gates)),
            limits: config.limits,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Handle that stops [`AirportNode::run`] when notified.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Serves connections from `listener` until shutdown is signalled.
    ///
    /// Accepted connections are queued; when the queue is full the accept
    /// loop stalls, which pushes backpressure into the kernel backlog.
    pub async fn run(&self, listener: TcpListener) {
        let queue = Arc::new(WorkQueue::new(self.limits.queue_capacity));

        let mut workers = Vec::new();
        for worker_id in 0..self.limits.worker_pool_size {
            let queue = Arc::clone(&queue);
            let airport = Arc::clone(&self.airport);
            let limits = self.limits;
            workers.push(tokio::spawn(async move {
                loop {
                    let stream: TcpStream = queue.pop().await;
                    if let Err(error) = serve_connection(stream, &airport, &limits).await {
                        debug!(worker_id, %error, "connection closed with error");
                    }
                }
            }));
        }

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!(airport = %self.airport.id(), %peer, "accepted connection");
                        queue.push(stream).await;
                    }
                    Err(error) => {
                        warn!(airport = %self.airport.id(), %error, "accept failed");
                    }
                },
                () = self.shutdown.notified() => {
                    info!(airport = %self.airport.id(), "airport node shutting down");
                    break;
                }
            }
        }

        for worker in workers {
            worker.abort();
        }
    }
}

/// Serves every request line on one connection, in arrival order.
async fn serve_connection(
    stream: TcpStream,
    airport: &Airport,
    limits: &Limits,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = LineReader::new(read_half, limits.max_line_bytes);

    while let Some(line) = lines.next_line().await? {
        debug!(airport = %airport.id(), request = %line, "serving request");
        for response in handler::dispatch(airport, &line) {
            write_line(&mut write_half, &response).await?;
        }
    }
    Ok(())
}
