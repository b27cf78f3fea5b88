//! Prometheus Metrics Definitions
//!
//! This module defines the metric families produced by one scrape of the
//! Proxmox cluster.
//!
//! # Metric Categories
//!
//! ## Pool Metrics
//! - Capacity: size, allocated and free bytes per pool
//! - Fragmentation percentage and dedup ratio
//! - Health as a labeled state gauge
//!
//! ## Pool Detail (optional deeper probe)
//! - Leaf vdev count
//! - State, scan and error status as an info metric
//!
//! ## Cluster
//! - Node status info
//! - `proxmox_up`: whether node enumeration succeeded for this scrape
//!
//! # Scrape Model
//!
//! Unlike exporters that mutate a long-lived registry from a background loop,
//! this exporter builds a fresh [`PoolMetrics`] per scrape: samples never
//! outlive the scrape that produced them, and concurrent scrapes cannot
//! observe each other's partial updates.
//!
//! All metrics use the `proxmox` namespace prefix.

use prometheus::{Encoder, Gauge, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Metric families for a single scrape
pub struct PoolMetrics {
    registry: Registry,

    /// 1 when node enumeration succeeded, 0 when the scrape came back empty
    pub up: Gauge,

    // Cluster metrics
    pub node_info: IntGaugeVec,

    // Pool metrics
    pub zpool_size_bytes: GaugeVec,
    pub zpool_allocated_bytes: GaugeVec,
    pub zpool_free_bytes: GaugeVec,
    pub zpool_fragmentation_percent: GaugeVec,
    pub zpool_dedup_ratio: GaugeVec,
    pub zpool_health: GaugeVec,

    // Pool detail metrics
    pub zpool_leaf_count: GaugeVec,
    pub zpool_status_info: IntGaugeVec,
}

impl PoolMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let up = Gauge::new(
            "proxmox_up",
            "Whether the Proxmox node list could be fetched (1=up, 0=down)",
        )?;

        let node_info = IntGaugeVec::new(
            Opts::new("node_info", "Cluster node information (value is always 1)")
                .namespace("proxmox"),
            &["node", "status"],
        )?;

        let zpool_size_bytes = GaugeVec::new(
            Opts::new("zpool_size_bytes", "Total size of the ZFS pool in bytes")
                .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_allocated_bytes = GaugeVec::new(
            Opts::new(
                "zpool_allocated_bytes",
                "Allocated space in the ZFS pool in bytes",
            )
            .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_free_bytes = GaugeVec::new(
            Opts::new("zpool_free_bytes", "Free space in the ZFS pool in bytes")
                .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_fragmentation_percent = GaugeVec::new(
            Opts::new(
                "zpool_fragmentation_percent",
                "Fragmentation of the ZFS pool as a percentage",
            )
            .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_dedup_ratio = GaugeVec::new(
            Opts::new("zpool_dedup_ratio", "Deduplication ratio of the ZFS pool")
                .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_health = GaugeVec::new(
            Opts::new(
                "zpool_health",
                "ZFS pool health (1=ONLINE, 0=anything else)",
            )
            .namespace("proxmox"),
            &["node", "pool", "health"],
        )?;

        let zpool_leaf_count = GaugeVec::new(
            Opts::new("zpool_leaf_count", "Number of leaf vdevs in the ZFS pool")
                .namespace("proxmox"),
            &["node", "pool"],
        )?;

        let zpool_status_info = IntGaugeVec::new(
            Opts::new(
                "zpool_status_info",
                "ZFS pool status detail (value is always 1)",
            )
            .namespace("proxmox"),
            &["node", "pool", "state", "scan", "errors"],
        )?;

        // Register all metrics
        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(node_info.clone()))?;
        registry.register(Box::new(zpool_size_bytes.clone()))?;
        registry.register(Box::new(zpool_allocated_bytes.clone()))?;
        registry.register(Box::new(zpool_free_bytes.clone()))?;
        registry.register(Box::new(zpool_fragmentation_percent.clone()))?;
        registry.register(Box::new(zpool_dedup_ratio.clone()))?;
        registry.register(Box::new(zpool_health.clone()))?;
        registry.register(Box::new(zpool_leaf_count.clone()))?;
        registry.register(Box::new(zpool_status_info.clone()))?;

        Ok(Self {
            registry,
            up,
            node_info,
            zpool_size_bytes,
            zpool_allocated_bytes,
            zpool_free_bytes,
            zpool_fragmentation_percent,
            zpool_dedup_ratio,
            zpool_health,
            zpool_leaf_count,
            zpool_status_info,
        })
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
