use thiserror::Error;

/// Failure taxonomy for location resolution and depot aggregation.
///
/// Every variant collapses to the same `{ok: false}` envelope at the request
/// boundary; the distinction exists for logging and for tests.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Neither the geocoder nor the postal-prefix cache produced coordinates,
    /// or an upstream returned nothing usable.
    #[error("no coordinates found for \"{0}\"")]
    NotFound(String),

    /// Network failure, timeout, or non-success status from an upstream.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// An upstream responded with a body that could not be decoded.
    #[error("malformed response from {context}: {reason}")]
    Parse { context: String, reason: String },

    /// A cache or store operation failed or exceeded its time budget.
    #[error("storage error: {0}")]
    Storage(String),
}

impl LocateError {
    /// Stable label for structured log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LocateError::NotFound(_) => "not_found",
            LocateError::UpstreamUnavailable(_) => "upstream_unavailable",
            LocateError::Parse { .. } => "parse_error",
            LocateError::Storage(_) => "storage_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
