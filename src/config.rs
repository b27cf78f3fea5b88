use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "password";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub proxmox: ProxmoxConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProxmoxConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: SecretString,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Seconds between session ticket renewals.
    #[serde(default = "default_renewal_interval")]
    pub renewal_interval_seconds: u64,
    /// Per-request timeout so a stalled Proxmox node cannot hang a scrape.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_listen_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    /// Probe each pool individually for scan/error/leaf details. Off by
    /// default: it adds one API call per pool per scrape.
    #[serde(default)]
    pub collect_pool_detail: bool,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_api_port() -> u16 {
    8006
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_password() -> SecretString {
    SecretString::from(DEFAULT_PASSWORD)
}

fn default_verify_tls() -> bool {
    true
}

fn default_renewal_interval() -> u64 {
    3600
}

fn default_request_timeout() -> u64 {
    10
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    9000
}

impl Default for ProxmoxConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_api_port(),
            user: default_user(),
            password: default_password(),
            verify_tls: default_verify_tls(),
            renewal_interval_seconds: default_renewal_interval(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_listen_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            collect_pool_detail: false,
        }
    }
}

impl ProxmoxConfig {
    /// Base URL of the Proxmox JSON API.
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/api2/json", self.host, self.port)
    }

    /// Warnings for credentials left at their insecure placeholder defaults.
    ///
    /// The exporter still runs with these, but the operator should know.
    pub fn default_credential_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.host == DEFAULT_HOST {
            warnings.push(format!("Using the default Proxmox host ({DEFAULT_HOST})"));
        }
        if self.user == DEFAULT_USER {
            warnings.push(format!("Using the default Proxmox user ({DEFAULT_USER})"));
        }
        if self.password.expose_secret() == DEFAULT_PASSWORD {
            warnings.push(format!(
                "Using the default Proxmox password ({DEFAULT_PASSWORD})"
            ));
        }
        warnings
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("PROXMOX_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
