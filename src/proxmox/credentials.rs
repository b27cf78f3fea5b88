//! Session Ticket Store
//!
//! The ticket is the only mutable state shared between the renewal task and
//! the per-scrape collection pipeline. [`CredentialStore`] owns it behind a
//! `tokio::sync::watch` channel: `get`/`set` take the channel's internal lock
//! only for the duration of the field access, never across network I/O, and
//! no reader can observe a torn value.
//!
//! The watch channel also gives us the startup gate for free: [`ready`]
//! resolves on the first non-empty ticket, fired exactly once per write
//! instead of polling on a timer.
//!
//! [`ready`]: CredentialStore::ready

use tokio::sync::watch;

/// Thread-safe holder for the current Proxmox session ticket
pub struct CredentialStore {
    ticket: watch::Sender<Option<String>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        let (ticket, _) = watch::channel(None);
        Self { ticket }
    }

    /// Current ticket, or `None` before the first successful authentication.
    pub fn get(&self) -> Option<String> {
        self.ticket.borrow().clone()
    }

    /// Whether a non-empty ticket is currently held.
    pub fn has_ticket(&self) -> bool {
        self.ticket
            .borrow()
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Replace the ticket, waking any `ready()` waiters.
    pub fn set(&self, ticket: String) {
        // send_replace succeeds even with no subscribed receiver.
        self.ticket.send_replace(Some(ticket));
    }

    /// Resolves once a non-empty ticket has been stored.
    ///
    /// Blocks forever if authentication never succeeds.
    pub async fn ready(&self) {
        let mut rx = self.ticket.subscribe();
        // The sender side lives as long as self, so wait_for cannot fail.
        let _ = rx
            .wait_for(|ticket| ticket.as_deref().is_some_and(|t| !t.is_empty()))
            .await;
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
