use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use lncm_gateway::bitcoind::BitcoindClient;
use lncm_gateway::config::{expand_path, AppConfig, AuthScheme, DEFAULT_CONFIG_FILE};
use lncm_gateway::lnd::LndClient;
use lncm_gateway::router::{create_api_router, Backends};
use lncm_gateway::sensors::Sensors;
use lncm_gateway::signing::JwtAuth;
use lncm_gateway::transport::pricefeed::PriceFeed;

/// REST gateway for bitcoind, lnd and PinePhone sensors
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a config file in TOML format
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_path(&cli.config);
    let config = AppConfig::load(&config_path)?;

    init_tracing(config.log_path().as_deref()).context("initialize tracing subscriber")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %config.log_file,
        conf_file = %config_path.display(),
        "server started"
    );

    if let Err(err) = run(config).await {
        tracing::error!(error = ?err, "fatal gateway error");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<()> {
    // Every enabled backend must come up before any route is registered.
    let bitcoind = if config.bitcoin_client {
        let client = BitcoindClient::connect(&config.bitcoind)
            .await
            .context("connect to bitcoind")?;
        info!(endpoint = %client.endpoint(), "bitcoin client enabled");
        Some(Arc::new(client))
    } else {
        info!("bitcoin client not enabled");
        None
    };

    let lnd = if config.lnd_client {
        let client = LndClient::connect(&config.lnd)
            .await
            .context("connect to lnd")?;
        info!(endpoint = %client.endpoint(), "lnd client enabled");
        Some(client)
    } else {
        info!("lnd client not enabled");
        None
    };
    let probe = lnd.as_ref().map(|client| {
        let every = Duration::from_secs(config.lnd.probe_interval_secs.max(1));
        client.start_probe(every)
    });

    let price_feed = match &config.btc_price_api {
        Some(url) => {
            let feed = PriceFeed::new(url.clone()).context("initialize price feed client")?;
            info!(endpoint = %feed.endpoint(), "price feed enabled");
            Some(Arc::new(feed))
        }
        None => {
            warn!("btc-price-api not set; price feed disabled");
            None
        }
    };

    let sensors = if config.disable_pinephone_binding {
        None
    } else {
        Some(Arc::new(Sensors::new(&config.sensors)))
    };

    let auth = match config.auth_scheme {
        AuthScheme::Jwt => Some(Arc::new(
            JwtAuth::from_config(&config.jwt).context("load jwt signing key")?,
        )),
        AuthScheme::None => None,
    };

    let static_index = config.static_index();
    let app = create_api_router(Backends {
        bitcoind,
        lnd,
        price_feed,
        sensors,
        auth,
        static_index: static_index.clone(),
    });

    let port = config.listen_port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("bind API server port {port}"))?;
    info!(
        port,
        static_file = ?static_index,
        "HTTP API server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    if let Some(probe) = probe {
        probe.stop().await;
    }
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl_c listener error");
    }
    info!("Shutdown signal received, exiting");
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn,tonic=warn".to_string());
    let installed = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(EnvFilter::new(env_filter))
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(env_filter))
            .with_target(false)
            .try_init(),
    };
    installed.map_err(|err| anyhow!("tracing subscriber init: {err}"))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
