use anyhow::Result;
use clap::Parser;
use proxmox_zfs_exporter::{config::Config, server};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Proxmox VE host (overrides config)
    #[arg(long, env = "PROX_HOST")]
    prox_host: Option<String>,

    /// Proxmox VE API port (overrides config)
    #[arg(long, env = "PROX_PORT")]
    prox_port: Option<u16>,

    /// Proxmox VE user (overrides config)
    #[arg(long, env = "PROX_USER")]
    prox_user: Option<String>,

    /// Proxmox VE password (overrides config)
    #[arg(long, env = "PROX_PASS")]
    prox_pass: Option<String>,

    /// Port to listen on for metrics
    #[arg(short, long, env = "PORT", default_value = "9000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "EXPORTER_ADDR", default_value = "0.0.0.0")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Proxmox ZFS Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(host) = args.prox_host {
        config.proxmox.host = host;
    }
    if let Some(port) = args.prox_port {
        config.proxmox.port = port;
    }
    if let Some(user) = args.prox_user {
        config.proxmox.user = user;
    }
    if let Some(pass) = args.prox_pass {
        config.proxmox.password = secrecy::SecretString::new(pass.into());
    }
    config.server.port = args.port;
    config.server.addr = args.addr;

    for warning in config.proxmox.default_credential_warnings() {
        warn!("{}", warning);
    }

    info!("Configuration loaded successfully");
    info!("Proxmox host: {}:{}", config.proxmox.host, config.proxmox.port);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
