//! BCR API server
//!
//! ```sh
//! # Run with default config (~/.config/bcr-api/config.toml)
//! bcr-api
//!
//! # Custom config path and port
//! bcr-api --config /etc/bcr-api/config.toml --port 8080
//!
//! # Validate config without starting
//! bcr-api --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use bcr_api::config::AppConfig;
use bcr_api::server::{init_tracing, ServerHandle, ServerOptions};

/// BCR car-rental REST API.
#[derive(Parser, Debug)]
#[command(
    name = "bcr-api",
    version,
    about = "Car rental REST API",
    long_about = "BCR API: cars, rentals, tasks and JWT authentication over REST.\n\n\
                  Default config: ~/.config/bcr-api/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BCR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(bcr_api::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    if cli.check {
        return match load_error {
            Some(e) => {
                eprintln!("Configuration is invalid: {}", e);
                Err(e.into())
            }
            None => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   Address     : {}", config.server.address());
                println!("   Database    : {}", config.database.url);
                println!("   Log level   : {}", config.logging.level);
                println!("   Rentals     : {}", config.rental.conflict_check.as_str());
                Ok(())
            }
        };
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
