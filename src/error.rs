use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Proxmox API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
