use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding a parsed
/// JSON body. The poll cycle treats all variants the same ("fetch failed");
/// the split only exists so logs say which one it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error on {endpoint}: {reason}")]
    Network { endpoint: String, reason: String },

    #[error("HTTP error! status: {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Network { endpoint, .. } => endpoint,
            FetchError::Status { endpoint, .. } => endpoint,
            FetchError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid hazard report: {reason}")]
    InvalidReport { reason: String },

    #[error("Payload field `{field}` is missing or has the wrong type")]
    MissingField { field: String },

    #[error("Unparseable timestamp: {raw}")]
    InvalidTimestamp { raw: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to report hazard. Please check the logs for details.")]
    ReportFailed,

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type FetchResult<T> = Result<T, FetchError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
