//! Shared HTTP plumbing for the upstream adapters.

use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::ScraperError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds a `reqwest::Client` with a request timeout and `User-Agent`.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs.max(1))))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Validates `base_url` and joins `path` onto it.
///
/// `path` is appended verbatim after stripping a trailing slash from the base,
/// so a base with its own path prefix (`http://host/proxy`) keeps it.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the result does not parse.
pub fn endpoint(base_url: &str, path: &str) -> Result<String, ScraperError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(joined)
}

/// Rejects any non-2xx response.
///
/// # Errors
///
/// Returns [`ScraperError::UnexpectedStatus`] carrying the status and URL.
pub fn ensure_success(response: Response) -> Result<Response, ScraperError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ScraperError::UnexpectedStatus {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        assert_eq!(
            endpoint("https://geo.test/", "/search").unwrap(),
            "https://geo.test/search"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        assert_eq!(
            endpoint("http://localhost:9000/proxy", "/search").unwrap(),
            "http://localhost:9000/proxy/search"
        );
    }

    #[test]
    fn endpoint_rejects_relative_base() {
        let err = endpoint("not a url", "/search").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }
}
