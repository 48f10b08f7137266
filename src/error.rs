use thiserror::Error;

/// Failures of the outbound GET proxy. All of these are caught inside the
/// tool handler and reported as text; none crosses the protocol boundary.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("invalid header name: {name}")]
    HeaderName { name: String },

    #[error("invalid header value for {name}")]
    HeaderValue { name: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response has no 'data' field: {body}")]
    MissingData { body: String },
}

pub type Result<T> = std::result::Result<T, ProxyError>;
