use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("invalid selector \"{selector}\" for source {source_name}: {reason}")]
    InvalidSelector {
        source_name: String,
        selector: String,
        reason: String,
    },

    #[error("missing query")]
    EmptyQuery,
}
