use nbdepots_core::LocateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<ScraperError> for LocateError {
    fn from(err: ScraperError) -> Self {
        match err {
            ScraperError::Deserialize { context, source } => LocateError::Parse {
                context,
                reason: source.to_string(),
            },
            other @ (ScraperError::Http(_)
            | ScraperError::UnexpectedStatus { .. }
            | ScraperError::InvalidUrl { .. }) => {
                LocateError::UpstreamUnavailable(other.to_string())
            }
        }
    }
}
