//! Proxmox VE API Type Definitions
//!
//! Rust struct definitions for the Proxmox JSON API responses the exporter
//! consumes. Every payload arrives wrapped in a `{"data": ...}` envelope,
//! modeled by [`ApiResponse`].
//!
//! # Design Notes
//!
//! - **Wire names**: field names follow the API (`alloc`, `frag`, ...) with
//!   serde renames where the Rust name differs.
//! - **Serde Defaults**: `#[serde(default)]` handles fields the API omits on
//!   older Proxmox releases.
//!
//! # API Endpoints Covered
//!
//! - `POST /access/ticket` → [`TicketData`]
//! - `GET /nodes` → `Vec<`[`Node`]`>`
//! - `GET /nodes/{node}/disks/zfs` → `Vec<`[`ZpoolSummary`]`>`
//! - `GET /nodes/{node}/disks/zfs/{name}` → [`ZpoolDetail`]

use serde::Deserialize;

/// Envelope wrapping every Proxmox API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Session ticket issued by `POST /access/ticket`
#[derive(Debug, Deserialize)]
pub struct TicketData {
    pub ticket: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "CSRFPreventionToken", default)]
    pub csrf_prevention_token: Option<String>,
}

/// Cluster member from `GET /nodes`
#[derive(Debug, Deserialize, Clone)]
pub struct Node {
    pub node: String,
    #[serde(default)]
    pub status: String,
}

/// Pool summary from `GET /nodes/{node}/disks/zfs`
#[derive(Debug, Deserialize, Clone)]
pub struct ZpoolSummary {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "alloc", default)]
    pub allocated: u64,
    #[serde(default)]
    pub free: u64,
    #[serde(default)]
    pub health: String,
    #[serde(rename = "frag", default)]
    pub fragmentation: f64,
    #[serde(default)]
    pub dedup: f64,
}

/// Deeper pool probe from `GET /nodes/{node}/disks/zfs/{name}`
#[derive(Debug, Deserialize, Clone)]
pub struct ZpoolDetail {
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub scan: String,
    #[serde(default)]
    pub errors: String,
    #[serde(default)]
    pub leaf: i64,
    #[serde(default)]
    pub action: Option<String>,
}
