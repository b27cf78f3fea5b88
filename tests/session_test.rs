//! Session manager tests
//!
//! Runs the renewal loop against in-process axum servers to verify the
//! ticket lifecycle: first acquisition unblocks the ready gate, renewals
//! replace the value, failures keep the prior ticket.

use axum::routing::post;
use axum::{Json, Router};
use proxmox_zfs_exporter::config::ProxmoxConfig;
use proxmox_zfs_exporter::proxmox::{CredentialStore, ProxmoxClient, SessionManager};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

async fn spawn_api(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server died");
    });
    format!("http://{addr}/api2/json")
}

fn session(base_url: String, store: Arc<CredentialStore>, interval: Duration) -> SessionManager {
    let client = ProxmoxClient::with_base_url(base_url, &ProxmoxConfig::default(), store.clone())
        .expect("Failed to build client");
    SessionManager::new(Arc::new(client), store, interval)
}

#[tokio::test]
async fn test_first_authentication_unblocks_ready_gate() {
    let app = Router::new().route(
        "/api2/json/access/ticket",
        post(|| async { Json(json!({"data": {"ticket": "PVE:first"}})) }),
    );
    let base_url = spawn_api(app).await;

    let store = Arc::new(CredentialStore::new());
    let session = session(base_url, store.clone(), Duration::from_secs(3600));
    tokio::spawn(session.clone().run());

    timeout(Duration::from_secs(2), session.ready())
        .await
        .expect("ready() did not resolve after the first authentication");
    assert_eq!(store.get().as_deref(), Some("PVE:first"));
}

#[tokio::test]
async fn test_renewal_replaces_ticket_value() {
    // Ticket value changes on every authentication
    let counter = Arc::new(AtomicU64::new(0));
    let app = Router::new().route(
        "/api2/json/access/ticket",
        post({
            let counter = counter.clone();
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move { Json(json!({"data": {"ticket": format!("PVE:renewal-{n}")}})) }
            }
        }),
    );
    let base_url = spawn_api(app).await;

    let store = Arc::new(CredentialStore::new());
    let session = session(base_url, store.clone(), Duration::from_millis(50));
    tokio::spawn(session.clone().run());

    timeout(Duration::from_secs(2), session.ready())
        .await
        .expect("ready() did not resolve");

    // After a few renewal intervals the stored value has moved on
    tokio::time::sleep(Duration::from_millis(300)).await;
    let ticket = store.get().expect("ticket missing after renewals");
    assert_ne!(ticket, "PVE:renewal-0", "renewals never replaced the ticket");
}

#[tokio::test]
async fn test_failed_renewal_keeps_prior_ticket() {
    // Given: a store holding a valid ticket and a renewal target that is
    // unreachable (nothing listens on the discard port)
    let store = Arc::new(CredentialStore::new());
    store.set("PVE:still-valid".to_string());

    let session = session(
        "http://127.0.0.1:9/api2/json".to_string(),
        store.clone(),
        Duration::from_millis(50),
    );
    tokio::spawn(session.run());

    // When: several renewal attempts have failed
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Then: the prior ticket is untouched
    assert_eq!(store.get().as_deref(), Some("PVE:still-valid"));
}
