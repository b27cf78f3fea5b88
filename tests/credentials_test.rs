//! Credential store tests
//!
//! Tests for the shared ticket store: atomic handoff between writers and
//! readers, and the one-shot startup gate.

use proxmox_zfs_exporter::proxmox::CredentialStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_ready_does_not_resolve_while_empty() {
    let store = CredentialStore::new();

    let gate = timeout(Duration::from_millis(100), store.ready()).await;
    assert!(gate.is_err(), "ready() resolved without any ticket set");
}

#[tokio::test]
async fn test_ready_does_not_resolve_on_empty_ticket() {
    let store = CredentialStore::new();
    store.set(String::new());

    let gate = timeout(Duration::from_millis(100), store.ready()).await;
    assert!(gate.is_err(), "ready() resolved on an empty ticket value");
}

#[tokio::test]
async fn test_ready_resolves_after_first_nonempty_set() {
    let store = Arc::new(CredentialStore::new());

    let setter = {
        let store = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.set("PVE:root@pam:ticket".to_string());
        })
    };

    let gate = timeout(Duration::from_secs(1), store.ready()).await;
    assert!(gate.is_ok(), "ready() did not resolve after set()");
    setter.await.unwrap();

    // Gate is satisfied permanently once a ticket exists
    let gate = timeout(Duration::from_millis(100), store.ready()).await;
    assert!(gate.is_ok(), "ready() must stay resolved after first ticket");
}

#[tokio::test]
async fn test_has_ticket_requires_nonempty_value() {
    // The health endpoint and the ready gate agree on what "has a ticket"
    // means: an empty string does not count
    let store = CredentialStore::new();
    assert!(!store.has_ticket(), "fresh store must not report a ticket");

    store.set(String::new());
    assert!(!store.has_ticket(), "empty ticket must not count as held");

    store.set("PVE:root@pam:ticket".to_string());
    assert!(store.has_ticket());
}

#[tokio::test]
async fn test_concurrent_get_set_never_observes_torn_value() {
    let store = Arc::new(CredentialStore::new());
    store.set("ticket-seed".to_string());

    let mut writers = Vec::new();
    for task in 0..8 {
        let store = store.clone();
        writers.push(tokio::spawn(async move {
            for i in 0..200 {
                store.set(format!("ticket-{task}-{i}"));
            }
        }));
    }

    // Readers run concurrently with the writers; every observed value must be
    // one that some writer explicitly set
    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                let value = store.get().expect("ticket vanished");
                assert!(
                    value == "ticket-seed" || value.starts_with("ticket-"),
                    "observed a value that was never set: {value}"
                );
            }
        }));
    }

    for handle in writers.into_iter().chain(readers) {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_failed_renewal_leaves_prior_ticket() {
    // A renewal failure never calls set(); the previously stored ticket must
    // remain readable unchanged
    let store = CredentialStore::new();
    store.set("PVE:ticket-before-failure".to_string());

    // Simulated failed renewal cycle: no write happens
    assert_eq!(store.get().as_deref(), Some("PVE:ticket-before-failure"));
}
