use thiserror::Error;

/// Errors produced while talking to the status platform.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Platform returned {status} for '{url}': {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Status not found: {id}")]
    NotFound { id: String },
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors that abort a sweep run.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Failed to list tagged statuses: {0}")]
    List(#[source] StoreError),
    #[error("Failed to fetch status {id}: {source}")]
    Fetch {
        id: String,
        #[source]
        source: StoreError,
    },
    #[error("Failed to delete status {id}: {source}")]
    Delete {
        id: String,
        #[source]
        source: StoreError,
    },
}
