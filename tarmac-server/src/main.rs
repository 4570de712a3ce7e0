//! Tarmac server binary.
//!
//! Launches a full ATC network in one process: one controller plus `N`
//! airport nodes, each on its own port.
//!
//! ```text
//! tarmac-server --airports 2 --port 5000 3 4
//! ```
//!
//! starts the controller on port 5000, airport 0 (3 gates) on 5001, and
//! airport 1 (4 gates) on 5002.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use clap::Parser;
use tracing::info;

use tarmac_server::topology::{self, TopologyConfig};

/// Lowest non-privileged port the server accepts.
const MIN_PORT: u16 = 1024;

#[derive(Parser, Debug)]
#[command(name = "tarmac-server", version, about = "Simulated ATC network")]
struct Args {
    /// Number of airport nodes to launch.
    #[arg(short = 'n', long)]
    airports: u32,

    /// Controller port; airport <id> listens on port + 1 + <id>. Port 0
    /// assigns ephemeral ports to every node.
    #[arg(short = 'p', long, default_value_t = 5000, value_parser = parse_port)]
    port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Gate count for each airport, one value per airport.
    #[arg(required = true, value_parser = parse_gate_count)]
    gate_counts: Vec<u32>,
}

fn parse_port(value: &str) -> Result<u16, String> {
    let port: u16 = value
        .parse()
        .map_err(|_| format!("invalid port: {value}"))?;
    if port != 0 && port < MIN_PORT {
        return Err(format!("port must be 0 or at least {MIN_PORT}"));
    }
    Ok(port)
}

fn parse_gate_count(value: &str) -> Result<u32, String> {
    let gates: u32 = value
        .parse()
        .map_err(|_| format!("invalid gate count: {value}"))?;
    if gates == 0 {
        return Err("gate count must be positive".to_string());
    }
    Ok(gates)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.airports == 0 {
        eprintln!("error: --airports must be positive");
        std::process::exit(2);
    }
    if args.gate_counts.len() != args.airports as usize {
        eprintln!(
            "error: expected {} gate counts, got {}",
            args.airports,
            args.gate_counts.len()
        );
        std::process::exit(2);
    }

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    info!(
        airports = args.airports,
        port = args.port,
        "starting tarmac network"
    );
    let network = topology::launch(TopologyConfig::new(args.port, args.gate_counts)).await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    network.shutdown().await;
    Ok(())
}
