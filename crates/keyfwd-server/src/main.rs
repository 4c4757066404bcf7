//! keyfwd server entry point.
//!
//! Captures local keystrokes and, while redirection is on, sends them to the
//! client instead of local applications. Releasing the activation key (F13,
//! or Scroll Lock on Linux) toggles redirection.
//!
//! # Usage
//!
//! ```text
//! keyfwd-server --client-ip <IP> --client-port <PORT> [OPTIONS]
//!
//! Options:
//!   --client-ip <IP>            Client address            [env: KEYFWD_CLIENT_IP]
//!   --client-port <PORT>        Client UDP port           [env: KEYFWD_CLIENT_PORT]
//!   -v, --verbose               Debug logging             [env: KEYFWD_VERBOSE]
//!   --correct-invalid-layout    Auto-switch wrong layout  [env: KEYFWD_CORRECT_INVALID_LAYOUT]
//!   --config <PATH>             TOML config file          [env: KEYFWD_CONFIG]
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ CaptureService        (std thread "keyfwd-capture")
//!       ├─ RdevInputSource  (hook thread "keyfwd-hook")
//!       ├─ RedirectInputUseCase → UdpTransmitter
//!       └─ RdevKeyInjector  (layout switch shortcut)
//!  └─ ctrl_c().await
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use keyfwd_core::layout_switch_shortcut;
use keyfwd_server::application::capture_loop::CaptureService;
use keyfwd_server::application::redirect_input::{
    default_activation_key, KeyTransmitter, RedirectInputUseCase,
};
use keyfwd_server::application::switch_layout::RecoveryTiming;
use keyfwd_server::infrastructure::input_capture::rdev_hook::RdevInputSource;
use keyfwd_server::infrastructure::input_capture::InputSource;
use keyfwd_server::infrastructure::input_injection::RdevKeyInjector;
use keyfwd_server::infrastructure::keymap::grab_delivers;
use keyfwd_server::infrastructure::network::UdpTransmitter;
use keyfwd_server::infrastructure::storage::config::{self, ServerConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// keyfwd server.
///
/// Values given here override the config file.
#[derive(Debug, Parser)]
#[command(
    name = "keyfwd-server",
    about = "Capture keystrokes and redirect them to a keyfwd client",
    version
)]
struct Cli {
    /// IP address of the client.
    #[arg(long, env = "KEYFWD_CLIENT_IP")]
    client_ip: Option<IpAddr>,

    /// UDP port the client listens on.
    #[arg(long, env = "KEYFWD_CLIENT_PORT")]
    client_port: Option<u16>,

    /// Log at debug level.
    #[arg(short, long, env = "KEYFWD_VERBOSE")]
    verbose: bool,

    /// Switch the local keyboard layout back when a key arrives in the
    /// wrong alphabet while redirecting.
    #[arg(long, env = "KEYFWD_CORRECT_INVALID_LAYOUT")]
    correct_invalid_layout: bool,

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

    let destination = resolve_destination(&cli, &cfg)?;
    let correct_invalid_layout = cli.correct_invalid_layout || cfg.correct_invalid_layout;

    info!(
        %destination,
        correct_invalid_layout,
        "keyfwd server starting"
    );

    let transmitter: Arc<dyn KeyTransmitter> = Arc::new(
        UdpTransmitter::bind(destination).context("failed to open UDP socket")?,
    );
    let activation = default_activation_key();
    if let Some(named) = activation.vk().and_then(|vk| vk.named()) {
        if !grab_delivers(named) {
            warn!(key = %activation, "the keyboard hook cannot see the activation key");
        }
    }
    let use_case = RedirectInputUseCase::new(transmitter, correct_invalid_layout)
        .with_activation_key(activation);
    let source: Arc<dyn InputSource> = Arc::new(RdevInputSource::new());
    let mut service = CaptureService::new(
        source,
        use_case,
        Box::new(RdevKeyInjector::new()),
        layout_switch_shortcut(),
        RecoveryTiming::default(),
    );

    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    thread::Builder::new()
        .name("keyfwd-capture".to_string())
        .spawn(move || {
            let result = service.run();
            let _ = done_tx.send(result);
        })
        .context("failed to spawn capture thread")?;

    info!(key = %activation, "keyfwd server ready. Release the activation key to toggle redirect, Ctrl-C to exit.");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            info!("shutdown signal received");
        }
        finished = done_rx => {
            match finished {
                Ok(Ok(())) => info!("capture loop ended"),
                Ok(Err(e)) => {
                    error!("capture loop failed: {e}");
                    return Err(e.into());
                }
                Err(_) => anyhow::bail!("capture thread exited unexpectedly"),
            }
        }
    }

    info!("keyfwd server stopped");
    Ok(())
}

/// Initialises `tracing`: `RUST_LOG` wins, then `--verbose`, then the
/// config file's `log_level`.
fn init_logging(cli: &Cli, cfg: &ServerConfig) {
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

fn resolve_destination(cli: &Cli, cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let ip = cli
        .client_ip
        .or(cfg.client_ip)
        .context("client IP not set; pass --client-ip or set client_ip in the config file")?;
    let port = cli
        .client_port
        .or(cfg.client_port)
        .context("client port not set; pass --client-port or set client_port in the config file")?;
    Ok(SocketAddr::new(ip, port))
}
