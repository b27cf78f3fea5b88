pub mod client;
pub mod credentials;
pub mod session;
pub mod types;

pub use client::ProxmoxClient;
pub use credentials::CredentialStore;
pub use session::SessionManager;
