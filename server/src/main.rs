//! Phonebook Server
//!
//! Contact directory served over HTTP
use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use phonebook_core::core::{config, factory::create_app_state};
use phonebook_core::log_info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("phonebook-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Contact directory HTTP service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("Address to bind, e.g. 0.0.0.0:3001"),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .value_name("BACKEND")
                .help("Record store backend: memory or document"),
        )
        .arg(
            Arg::new("id-policy")
                .long("id-policy")
                .value_name("POLICY")
                .help("Identity policy: random or store_assigned"),
        )
        .arg(
            Arg::new("unique-names")
                .long("unique-names")
                .value_name("BOOL")
                .value_parser(clap::value_parser!(bool))
                .help("Reject creating a second person with an existing name"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Load the sample contacts at startup"),
        )
        .arg(
            Arg::new("static-dir")
                .long("static-dir")
                .value_name("DIR")
                .help("Directory of built client assets to serve"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level when RUST_LOG is unset"),
        )
        .get_matches();

    // Load configuration: file, then environment, then command line
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut config = config::load_config_or_default(config_path);
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;

    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr.parse().context("Invalid --http-addr")?;
    }
    if let Some(backend) = matches.get_one::<String>("storage") {
        config.storage.backend = backend.parse().context("Invalid --storage")?;
    }
    if let Some(policy) = matches.get_one::<String>("id-policy") {
        config.identity.policy = policy.parse().context("Invalid --id-policy")?;
    }
    if let Some(unique) = matches.get_one::<bool>("unique-names") {
        config.validation.unique_names = *unique;
    }
    if matches.get_flag("seed") {
        config.storage.seed_sample_data = true;
    }
    if let Some(dir) = matches.get_one::<String>("static-dir") {
        config.server.static_dir = Some(dir.into());
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    config.validate().context("Invalid configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    log_info!("Starting phonebook server");
    if let Some(path) = config_path {
        log_info!("Configuration file: {}", path);
    }

    // Create AppState using factory pattern
    let configured_app_state = create_app_state(config).context("Failed to create AppState")?;
    log_info!("AppState created successfully");

    phonebook_server::api::start_api_server(configured_app_state)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))?;

    log_info!("Shutdown complete");
    Ok(())
}
