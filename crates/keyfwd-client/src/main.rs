//! keyfwd client entry point.
//!
//! Listens for key events from a keyfwd server and replays them on this
//! machine.
//!
//! # Usage
//!
//! ```text
//! keyfwd-client --ip <IP> --port <PORT> [OPTIONS]
//!
//! Options:
//!   --ip <IP>          Local listen address   [env: KEYFWD_IP]
//!   --port <PORT>      Local UDP port         [env: KEYFWD_PORT]
//!   -v, --verbose      Debug logging          [env: KEYFWD_VERBOSE]
//!   --config <PATH>    TOML config file       [env: KEYFWD_CONFIG]
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyfwd_client::application::replay_input::ReplayInputUseCase;
use keyfwd_client::infrastructure::input_emulation::enigo_backend::EnigoKeyInjector;
use keyfwd_client::infrastructure::network::UdpKeyReceiver;
use keyfwd_client::infrastructure::storage::config::{self, ClientConfig};

/// keyfwd client.
///
/// Values given here override the config file.
#[derive(Debug, Parser)]
#[command(
    name = "keyfwd-client",
    about = "Receive redirected keystrokes from a keyfwd server and type them locally",
    version
)]
struct Cli {
    /// Local address to listen on.
    #[arg(long, env = "KEYFWD_IP")]
    ip: Option<IpAddr>,

    /// Local UDP port to listen on.
    #[arg(long, env = "KEYFWD_PORT")]
    port: Option<u16>,

    /// Log at debug level.
    #[arg(short, long, env = "KEYFWD_VERBOSE")]
    verbose: bool,

    /// Path to a TOML config file. Defaults to the platform config directory.
    #[arg(long, env = "KEYFWD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => config::load_config().context("failed to load config")?,
    };

    init_logging(&cli, &cfg);

    let listen = resolve_listen_addr(&cli, &cfg)?;
    info!(%listen, "keyfwd client starting");

    let injector = EnigoKeyInjector::new().context("failed to initialise key injection")?;
    let mut use_case = ReplayInputUseCase::new(Box::new(injector));
    let receiver = UdpKeyReceiver::bind(listen)
        .await
        .context("failed to open UDP socket")?;

    tokio::select! {
        result = receiver.run(&mut use_case) => {
            result.context("receive loop failed")?;
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            info!("shutdown signal received");
        }
    }

    info!("keyfwd client stopped");
    Ok(())
}

/// Initialises `tracing`: `RUST_LOG` wins, then `--verbose`, then the
/// config file's `log_level`.
fn init_logging(cli: &Cli, cfg: &ClientConfig) {
    let default_level = if cli.verbose {
        "debug"
    } else {
        cfg.log_level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn resolve_listen_addr(cli: &Cli, cfg: &ClientConfig) -> anyhow::Result<SocketAddr> {
    let ip = cli
        .ip
        .or(cfg.ip)
        .context("listen IP not set; pass --ip or set ip in the config file")?;
    let port = cli
        .port
        .or(cfg.port)
        .context("listen port not set; pass --port or set port in the config file")?;
    Ok(SocketAddr::new(ip, port))
}
