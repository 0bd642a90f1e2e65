use thiserror::Error;

/// Failures surfaced by the API client layer. Everything here is scoped to
/// the user action that triggered the request; nothing is fatal.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("malformed response from {url}: {detail}")]
    BadResponse { url: String, detail: String },

    #[error("no valid URLs remain after cleaning")]
    EmptyBatch,

    #[error("no endpoint candidates configured")]
    NoEndpoints,
}
