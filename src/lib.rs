//! Proxmox VE ZFS Pool Prometheus Exporter
//!
//! A Prometheus metrics exporter for ZFS storage pools across a Proxmox VE cluster.
//!
//! # Overview
//!
//! This exporter authenticates against the Proxmox VE REST API, keeps the session
//! ticket fresh with a background renewal task, and on every scrape walks all
//! cluster nodes and their ZFS pools to expose capacity, fragmentation, dedup and
//! health metrics in Prometheus format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      HTTPS           ┌──────────────┐
//! │  Proxmox VE │ ◄─────────────────►  │   Exporter   │
//! │   cluster   │   /api2/json         │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Client │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Session │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! The session ticket lives in a [`proxmox::CredentialStore`] shared between the
//! renewal task and the per-scrape collection pipeline; the store is the only
//! mutable state in the process and every access goes through its synchronized
//! getter and setter, never held across network I/O.
//!
//! # Modules
//!
//! - [`proxmox`] - REST client, session management and API type definitions
//! - [`collector`] - per-scrape fan-out over nodes and pools
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server and startup sequencing
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use proxmox_zfs_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod metrics;
pub mod proxmox;
pub mod server;
