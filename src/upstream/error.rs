use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream API error: Status={status}, Message={message}")]
    Status { status: u16, message: String },

    #[error("Unexpected upstream response: {0}")]
    UnexpectedShape(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Http(e)
        }
    }
}
