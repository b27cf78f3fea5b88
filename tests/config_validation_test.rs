//! Configuration validation tests
//!
//! Tests that verify configuration defaults and the default-credential
//! warnings.

use proxmox_zfs_exporter::config::{MetricsConfig, ProxmoxConfig, ServerConfig};
use secrecy::SecretString;

#[test]
fn test_default_proxmox_config() {
    let config = ProxmoxConfig::default();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8006);
    assert_eq!(config.user, "root");
    assert!(config.verify_tls, "TLS verification must default to on");
    assert_eq!(config.renewal_interval_seconds, 3600);
    assert_eq!(config.request_timeout_seconds, 10);
}

#[test]
fn test_default_server_config() {
    let config = ServerConfig::default();

    assert_eq!(config.addr, "0.0.0.0");
    assert_eq!(config.port, 9000);
}

#[test]
fn test_default_metrics_config() {
    let config = MetricsConfig::default();

    assert!(
        !config.collect_pool_detail,
        "per-pool detail probe must default to off"
    );
}

#[test]
fn test_base_url_format() {
    let config = ProxmoxConfig {
        host: "pve.example.com".to_string(),
        port: 8006,
        ..ProxmoxConfig::default()
    };

    assert_eq!(config.base_url(), "https://pve.example.com:8006/api2/json");
}

#[test]
fn test_default_credentials_trigger_warnings() {
    // Given: a config left entirely at the insecure placeholder defaults
    let config = ProxmoxConfig::default();

    // Then: host, user and password each produce a warning
    let warnings = config.default_credential_warnings();
    assert_eq!(warnings.len(), 3, "expected warnings, got: {warnings:?}");
    assert!(warnings.iter().any(|w| w.contains("host")));
    assert!(warnings.iter().any(|w| w.contains("user")));
    assert!(warnings.iter().any(|w| w.contains("password")));
}

#[test]
fn test_custom_credentials_produce_no_warnings() {
    let config = ProxmoxConfig {
        host: "pve.example.com".to_string(),
        user: "monitoring@pve".to_string(),
        password: SecretString::from("not-the-default"),
        ..ProxmoxConfig::default()
    };

    assert!(config.default_credential_warnings().is_empty());
}

#[test]
fn test_partial_defaults_warn_per_field() {
    // Only the password is still the placeholder
    let config = ProxmoxConfig {
        host: "pve.example.com".to_string(),
        user: "monitoring@pve".to_string(),
        ..ProxmoxConfig::default()
    };

    let warnings = config.default_credential_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("password"));
}
