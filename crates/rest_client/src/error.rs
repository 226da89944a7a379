use thiserror::Error;

/// Failures of a remote call.
///
/// Every variant aborts the paginated fetch it happened in; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("server still reports more items after {0} pages")]
    PageLimit(u32),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
