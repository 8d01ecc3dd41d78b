use thiserror::Error;

/// Errors that can occur while loading the form graph from the API.
///
/// Lookups of nodes, fields or form definitions never produce an error;
/// a miss simply yields an empty result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Graph request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse graph JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl FetchError {
    /// Returns the HTTP status code for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
