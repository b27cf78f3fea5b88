//! Session Ticket Renewal
//!
//! Proxmox tickets expire server-side (two hours by default), so a background
//! task re-authenticates on a fixed interval and hands the fresh ticket to the
//! [`CredentialStore`]. Renewal failures are logged and the prior ticket stays
//! in place: a stale-but-valid ticket beats none at all, and the remote side
//! enforces actual expiry.

use crate::proxmox::client::ProxmoxClient;
use crate::proxmox::credentials::CredentialStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

/// Owns the background renewal loop for the session ticket
#[derive(Clone)]
pub struct SessionManager {
    client: Arc<ProxmoxClient>,
    store: Arc<CredentialStore>,
    renewal_interval: Duration,
}

impl SessionManager {
    pub fn new(
        client: Arc<ProxmoxClient>,
        store: Arc<CredentialStore>,
        renewal_interval: Duration,
    ) -> Self {
        Self {
            client,
            store,
            renewal_interval,
        }
    }

    /// Renewal loop, cooperative with the process lifetime (never returns).
    ///
    /// Authenticates immediately on the first iteration, then once per
    /// interval regardless of success or failure. No backoff.
    pub async fn run(self) {
        let mut ticker = interval(self.renewal_interval);
        loop {
            ticker.tick().await;
            match self.client.authenticate().await {
                Ok(ticket) => {
                    self.store.set(ticket);
                    info!("Refreshed Proxmox session ticket");
                }
                Err(e) => {
                    warn!("Ticket renewal failed, keeping previous ticket: {}", e);
                }
            }
        }
    }

    /// Resolves once the first authentication has stored a ticket.
    ///
    /// Used at startup so the metrics server does not serve scrapes before a
    /// session exists. Blocks indefinitely if authentication never succeeds.
    pub async fn ready(&self) {
        self.store.ready().await;
    }
}
