// Configuration management module
// This file handles loading and parsing of the TOML configuration file,
// layered under HTTPD__* environment variables, plus path expansion
//
// Numan Thabit 2025 Nov

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use url::Url;

pub const DEFAULT_CONFIG_DIR: &str = "~/.lncm/";
pub const DEFAULT_CONFIG_FILE: &str = "~/.lncm/httpd.conf";
pub const DEFAULT_LOG_FILE: &str = "~/.lncm/httpd.log";
pub const DEFAULT_HTTP_PORT: u16 = 8080;

const ENV_PREFIX: &str = "HTTPD";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    /// Port the HTTP API listens on (0 falls back to 8080)
    pub port: u16,
    /// Directory holding index.html, served at `/`
    pub static_dir: Option<String>,
    /// JSON log destination; "none" logs plain text to stdout
    pub log_file: String,
    /// Skip the PinePhone sysfs sensor routes
    pub disable_pinephone_binding: bool,
    /// Connect to bitcoind and expose the chain routes
    pub bitcoin_client: bool,
    /// Connect to lnd and expose the lightning routes
    pub lnd_client: bool,
    pub auth_scheme: AuthScheme,
    /// Upstream price feed, enables /api/btcprice when set
    pub btc_price_api: Option<Url>,
    pub bitcoind: BitcoindConfig,
    pub lnd: LndConfig,
    pub jwt: JwtConfig,
    pub sensors: SensorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            static_dir: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            disable_pinephone_binding: false,
            bitcoin_client: true,
            lnd_client: false,
            auth_scheme: AuthScheme::None,
            btc_price_api: None,
            bitcoind: BitcoindConfig::default(),
            lnd: LndConfig::default(),
            jwt: JwtConfig::default(),
            sensors: SensorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, std::env::vars())
    }

    /// Load `path` with `HTTPD__*` entries from `vars` layered on top,
    /// `__` separating sections: `HTTPD__BITCOIND__PORT=18443`.
    pub fn load_with_env<I>(path: &Path, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides: config::Map<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| kebab_env_key(&key).map(|key| (key, value)))
            .collect();
        let cfg = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .source(Some(overrides)),
            )
            .build()
            .with_context(|| format!("unable to load {}", path.display()))?;
        cfg.try_deserialize()
            .with_context(|| format!("unable to process {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn listen_port(&self) -> u16 {
        if self.port == 0 {
            DEFAULT_HTTP_PORT
        } else {
            self.port
        }
    }

    /// Log file path, or None when logging to stdout.
    pub fn log_path(&self) -> Option<PathBuf> {
        match self.log_file.as_str() {
            "none" => None,
            "" => Some(expand_path(DEFAULT_LOG_FILE)),
            other => Some(expand_path(other)),
        }
    }

    pub fn static_index(&self) -> Option<PathBuf> {
        self.static_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(|dir| expand_path(dir).join("index.html"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    None,
    Jwt,
}

/// `[bitcoind]` section.
/// NOTE: credentials are stored in the clear, keep the node local.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BitcoindConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl Default for BitcoindConfig {
    fn default() -> Self {
        Self {
            host: crate::bitcoind::DEFAULT_HOST.to_string(),
            port: crate::bitcoind::DEFAULT_PORT,
            user: crate::bitcoind::DEFAULT_USER.to_string(),
            pass: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LndConfig {
    pub host: String,
    pub port: u16,
    pub tls_file: String,
    pub macaroon_file: String,
    pub probe_interval_secs: u64,
}

impl Default for LndConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 10009,
            tls_file: "~/.lnd/tls.cert".to_string(),
            macaroon_file: "~/.lnd/data/chain/bitcoin/mainnet/readonly.macaroon".to_string(),
            probe_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JwtConfig {
    pub key_file: String,
    pub username: String,
    pub password: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key_file: format!("{DEFAULT_CONFIG_DIR}jwt.key"),
            username: crate::bitcoind::DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SensorConfig {
    pub battery_dir: PathBuf,
    pub thermal_dir: PathBuf,
    pub magnetometer_dir: PathBuf,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            battery_dir: PathBuf::from("/sys/class/power_supply/axp20x-battery"),
            thermal_dir: PathBuf::from("/sys/class/thermal"),
            magnetometer_dir: PathBuf::from("/sys/bus/iio/devices/iio:device3"),
        }
    }
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references, then drop `.`
/// segments. An unset variable leaves the reference in place.
pub fn expand_path(path: &str) -> PathBuf {
    if path.is_empty() {
        return PathBuf::new();
    }
    let expanded = shellexpand::full(path).unwrap_or_else(|_| shellexpand::tilde(path));
    Path::new(expanded.as_ref())
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

/// Map `HTTPD__LND__TLS_FILE` to `HTTPD__LND__TLS-FILE` so the
/// environment layer lands on the kebab-case keys of the file.
fn kebab_env_key(var: &str) -> Option<String> {
    let rest = var.strip_prefix(ENV_PREFIX)?.strip_prefix(ENV_SEPARATOR)?;
    let fields: Vec<String> = rest
        .split(ENV_SEPARATOR)
        .map(|field| field.replace('_', "-"))
        .collect();
    Some(format!("{ENV_PREFIX}{ENV_SEPARATOR}{}", fields.join(ENV_SEPARATOR)))
}
