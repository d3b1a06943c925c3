use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhorlError {
    #[error("WHOIS server not found for TLD: {0}")]
    ServerNotFound(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("WHOIS connection failed: {0}")]
    Connection(String),

    #[error("WHOIS I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("WHOIS response exceeded {0} bytes")]
    ResponseTooLarge(usize),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WhorlError>;
