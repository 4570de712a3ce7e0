//! Network bootstrap: airport nodes plus the controller, in one process.
//!
//! Airports get sequential ports above the controller's: airport `id`
//! listens on `controller_port + 1 + id`. Port 0 switches the whole network
//! to ephemeral ports, which is how tests run many networks side by side.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::info;

use tarmac_core::{AirportId, Error, Limits};

use crate::airport::{AirportNode, AirportNodeConfig};
use crate::controller::{Controller, ControllerConfig};
use crate::net::create_reusable_listener;
use crate::{ServerError, ServerResult};

/// Loopback address every node binds to.
const LISTEN_HOST: [u8; 4] = [127, 0, 0, 1];

/// Shape of a full Tarmac network.
#[derive(Debug, Clone)]
pub struct TopologyConfig {
    /// Controller port; 0 makes every node bind an ephemeral port.
    pub controller_port: u16,
    /// Gate count per airport; the vector length is the airport count and
    /// each index is that airport's id.
    pub gate_counts: Vec<u32>,
    /// Limits applied to every node.
    pub limits: Limits,
}

impl TopologyConfig {
    /// Creates a topology with default limits.
    #[must_use]
    pub fn new(controller_port: u16, gate_counts: Vec<u32>) -> Self {
        Self {
            controller_port,
            gate_counts,
            limits: Limits::new(),
        }
    }
}

/// A running network and the handles to stop it.
#[derive(Debug)]
pub struct Network {
    /// Where clients connect.
    pub controller_addr: SocketAddr,
    /// Airport node addresses, indexed by airport id.
    pub airport_addrs: Vec<SocketAddr>,
    shutdowns: Vec<Arc<Notify>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Network {
    /// Signals every node to stop and waits for their tasks to finish.
    pub async fn shutdown(self) {
        for shutdown in &self.shutdowns {
            shutdown.notify_one();
        }
        for task in self.tasks {
            let _ = task.await;
        }
    }
}

/// Binds and launches every node described by `config`.
///
/// All listeners are bound before any node starts serving, so the
/// controller's address table is complete from its first request.
///
/// # Errors
/// Invalid limits, a port range overflowing 65535, or a bind failure.
pub async fn launch(config: TopologyConfig) -> ServerResult<Network> {
    config.limits.validate()?;
    if config.gate_counts.is_empty() {
        return Err(ServerError::Config(Error::InvalidArgument {
            name: "gate_counts",
            reason: "at least one airport is required",
        }));
    }
    if config.controller_port != 0
        && usize::from(config.controller_port) + config.gate_counts.len() > usize::from(u16::MAX)
    {
        return Err(ServerError::Config(Error::InvalidArgument {
            name: "controller_port",
            reason: "airport port range exceeds 65535",
        }));
    }

    let mut airport_addrs = Vec::with_capacity(config.gate_counts.len());
    let mut shutdowns = Vec::new();
    let mut tasks = Vec::new();

    for (id, &num_gates) in config.gate_counts.iter().enumerate() {
        let port = airport_port(config.controller_port, id);
        let listener = bind(port, config.limits.accept_backlog)?;
        let addr = listener.local_addr()?;

        let node = AirportNode::new(&AirportNodeConfig {
            airport_id: AirportId::new(id as u64),
            num_gates,
            limits: config.limits,
        });
        info!(airport = id, %addr, gates = num_gates, "airport node listening");

        shutdowns.push(node.shutdown_handle());
        tasks.push(tokio::spawn(async move { node.run(listener).await }));
        airport_addrs.push(addr);
    }

    let controller = Controller::new(ControllerConfig {
        airports: airport_addrs.clone(),
        limits: config.limits,
    });
    let listener = bind(config.controller_port, config.limits.accept_backlog)?;
    let controller_addr = listener.local_addr()?;
    info!(addr = %controller_addr, airports = airport_addrs.len(), "controller listening");

    shutdowns.push(controller.shutdown_handle());
    tasks.push(tokio::spawn(
        async move { controller.run(listener).await },
    ));

    Ok(Network {
        controller_addr,
        airport_addrs,
        shutdowns,
        tasks,
    })
}

/// Port for airport `id`, or 0 when the whole network is ephemeral.
#[allow(clippy::cast_possible_truncation)]
fn airport_port(controller_port: u16, id: usize) -> u16 {
    if controller_port == 0 {
        0
    } else {
        // Range-checked in `launch` before any bind.
        controller_port + 1 + id as u16
    }
}

fn bind(port: u16, backlog: u32) -> ServerResult<tokio::net::TcpListener> {
    let addr = SocketAddr::from((LISTEN_HOST, port));
    create_reusable_listener(addr, backlog).map_err(|source| ServerError::BindFailed { addr, source })
}
