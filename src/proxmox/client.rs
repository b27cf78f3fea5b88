//! Proxmox VE REST API Client
//!
//! Stateless request functions against the Proxmox JSON API at
//! `https://{host}:{port}/api2/json`. Each call is independent: it reads the
//! current session ticket once via the [`CredentialStore`] getter, attaches it
//! as a `PVEAuthCookie` cookie, and decodes the `{"data": ...}` envelope into
//! a typed result. Transport failures, non-2xx statuses and malformed JSON
//! surface as distinct [`ExporterError`] variants.
//!
//! Concurrent invocation from multiple tasks is safe; the underlying
//! `reqwest::Client` pools connections internally and the ticket handoff is
//! synchronized by the store.
//!
//! # Example
//!
//! ```no_run
//! use proxmox_zfs_exporter::config::ProxmoxConfig;
//! use proxmox_zfs_exporter::proxmox::{CredentialStore, ProxmoxClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ProxmoxConfig::default();
//! let store = Arc::new(CredentialStore::new());
//! let client = ProxmoxClient::new(&config, store.clone())?;
//!
//! store.set(client.authenticate().await?);
//! let nodes = client.list_nodes().await?;
//! # Ok(())
//! # }
//! ```

use crate::collector::PoolSource;
use crate::config::ProxmoxConfig;
use crate::error::{ExporterError, Result};
use crate::proxmox::credentials::CredentialStore;
use crate::proxmox::types::{ApiResponse, Node, TicketData, ZpoolDetail, ZpoolSummary};
use reqwest::{header, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Proxmox VE JSON API
pub struct ProxmoxClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    password: SecretString,
    store: Arc<CredentialStore>,
}

impl ProxmoxClient {
    /// Build a client from the configuration.
    ///
    /// Certificate validation follows `verify_tls` (on by default; Proxmox
    /// ships a self-signed certificate, so operators can opt out). Every
    /// request carries the configured timeout.
    pub fn new(config: &ProxmoxConfig, store: Arc<CredentialStore>) -> Result<Self> {
        Self::with_base_url(config.base_url(), config, store)
    }

    /// Build a client against an explicit base URL instead of the one derived
    /// from the config.
    pub fn with_base_url(
        base_url: String,
        config: &ProxmoxConfig,
        store: Arc<CredentialStore>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            http,
            base_url,
            user: config.user.clone(),
            password: config.password.clone(),
            store,
        })
    }

    /// Request a fresh session ticket from `POST /access/ticket`.
    ///
    /// Unauthenticated; credentials travel in the form-encoded request body,
    /// keeping them out of URLs and access logs. Anything but HTTP 200 is an
    /// authentication error carrying the status line.
    pub async fn authenticate(&self) -> Result<String> {
        let url = format!("{}/access/ticket", self.base_url);
        debug!("Requesting session ticket from {}", url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("username", self.user.as_str()),
                ("password", self.password.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExporterError::Auth(format!(
                "Expected status 200, got {}; check your credentials",
                status
            )));
        }

        let body = response.text().await?;
        let ticket: ApiResponse<TicketData> = serde_json::from_str(&body)?;
        Ok(ticket.data.ticket)
    }

    /// List the cluster members from `GET /nodes`.
    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        let response: ApiResponse<Vec<Node>> = self.get_json("/nodes").await?;
        Ok(response.data)
    }

    /// List the ZFS pools on one node from `GET /nodes/{node}/disks/zfs`.
    pub async fn list_pools(&self, node: &str) -> Result<Vec<ZpoolSummary>> {
        let response: ApiResponse<Vec<ZpoolSummary>> =
            self.get_json(&format!("/nodes/{}/disks/zfs", node)).await?;
        Ok(response.data)
    }

    /// Fetch the detail view of one pool from `GET /nodes/{node}/disks/zfs/{name}`.
    pub async fn get_pool(&self, node: &str, name: &str) -> Result<ZpoolDetail> {
        let response: ApiResponse<ZpoolDetail> = self
            .get_json(&format!("/nodes/{}/disks/zfs/{}", node, name))
            .await?;
        Ok(response.data)
    }

    /// Authenticated GET returning the decoded JSON body.
    ///
    /// The ticket is read once per call; the store's lock is released before
    /// any network I/O happens.
    async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let ticket = self
            .store
            .get()
            .ok_or_else(|| ExporterError::Auth("No session ticket available".to_string()))?;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", path);

        let response = self
            .http
            .get(&url)
            .header(header::COOKIE, format!("PVEAuthCookie={}", ticket))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::Api(format!(
                "GET {} returned {}",
                path, status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl PoolSource for ProxmoxClient {
    async fn list_nodes(&self) -> Result<Vec<Node>> {
        ProxmoxClient::list_nodes(self).await
    }

    async fn list_pools(&self, node: &str) -> Result<Vec<ZpoolSummary>> {
        ProxmoxClient::list_pools(self, node).await
    }

    async fn get_pool(&self, node: &str, name: &str) -> Result<ZpoolDetail> {
        ProxmoxClient::get_pool(self, node, name).await
    }
}
