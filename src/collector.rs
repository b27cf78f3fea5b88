//! Scrape-Time Collection Pipeline
//!
//! One scrape fans out across the cluster: list the nodes, list the ZFS pools
//! on each node, and emit one sample set per pool. Nothing is cached between
//! scrapes; every `/metrics` request performs fresh API calls.
//!
//! # Error Handling
//!
//! Collection is best-effort and isolated per node:
//! - Node enumeration failure yields an empty sample set with `proxmox_up` 0;
//!   the scrape itself still succeeds.
//! - A failing pool list on one node skips that node with a warning while the
//!   other nodes still contribute samples.
//! - A failing per-pool detail probe skips just that pool's detail metrics.

use crate::config::MetricsConfig;
use crate::error::Result;
use crate::metrics::PoolMetrics;
use crate::proxmox::types::{Node, ZpoolDetail, ZpoolSummary};
use std::future::Future;
use tracing::{error, info, warn};

/// The slice of the Proxmox API the collector consumes.
///
/// Implemented by [`ProxmoxClient`](crate::proxmox::ProxmoxClient); tests
/// substitute stub sources to exercise the fan-out without a cluster.
pub trait PoolSource {
    fn list_nodes(&self) -> impl Future<Output = Result<Vec<Node>>> + Send;
    fn list_pools(&self, node: &str) -> impl Future<Output = Result<Vec<ZpoolSummary>>> + Send;
    fn get_pool(&self, node: &str, name: &str)
        -> impl Future<Output = Result<ZpoolDetail>> + Send;
}

/// Produce the full metric sample set for one scrape.
pub async fn collect_pool_metrics<S: PoolSource>(
    source: &S,
    config: &MetricsConfig,
) -> anyhow::Result<PoolMetrics> {
    let metrics = PoolMetrics::new()?;

    let nodes = match source.list_nodes().await {
        Ok(nodes) => nodes,
        Err(e) => {
            error!("Failed to list cluster nodes, emitting empty sample set: {}", e);
            metrics.up.set(0.0);
            return Ok(metrics);
        }
    };
    metrics.up.set(1.0);

    for node in &nodes {
        metrics
            .node_info
            .with_label_values(&[&node.node, &node.status])
            .set(1);

        let pools = match source.list_pools(&node.node).await {
            Ok(pools) => pools,
            Err(e) => {
                warn!("Failed to list ZFS pools on node {}: {}", node.node, e);
                continue;
            }
        };

        for pool in &pools {
            record_pool(&metrics, &node.node, pool);

            if config.collect_pool_detail {
                match source.get_pool(&node.node, &pool.name).await {
                    Ok(detail) => record_pool_detail(&metrics, &node.node, &detail),
                    Err(e) => {
                        warn!(
                            "Failed to fetch detail for pool {} on node {}: {}",
                            pool.name, node.node, e
                        );
                    }
                }
            }
        }

        info!(
            "Collected {} ZFS pools on node {}",
            pools.len(),
            node.node
        );
    }

    Ok(metrics)
}

fn record_pool(metrics: &PoolMetrics, node: &str, pool: &ZpoolSummary) {
    metrics
        .zpool_size_bytes
        .with_label_values(&[node, &pool.name])
        .set(pool.size as f64);

    metrics
        .zpool_allocated_bytes
        .with_label_values(&[node, &pool.name])
        .set(pool.allocated as f64);

    metrics
        .zpool_free_bytes
        .with_label_values(&[node, &pool.name])
        .set(pool.free as f64);

    metrics
        .zpool_fragmentation_percent
        .with_label_values(&[node, &pool.name])
        .set(pool.fragmentation);

    metrics
        .zpool_dedup_ratio
        .with_label_values(&[node, &pool.name])
        .set(pool.dedup);

    let health_value = if pool.health == "ONLINE" { 1.0 } else { 0.0 };
    metrics
        .zpool_health
        .with_label_values(&[node, &pool.name, &pool.health])
        .set(health_value);
}

fn record_pool_detail(metrics: &PoolMetrics, node: &str, detail: &ZpoolDetail) {
    metrics
        .zpool_leaf_count
        .with_label_values(&[node, &detail.name])
        .set(detail.leaf as f64);

    metrics
        .zpool_status_info
        .with_label_values(&[node, &detail.name, &detail.state, &detail.scan, &detail.errors])
        .set(1);
}
