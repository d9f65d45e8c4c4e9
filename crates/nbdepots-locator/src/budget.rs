//! Time budgets around port calls.

use std::future::Future;
use std::time::Duration;

use nbdepots_core::LocateError;

/// Runs an upstream call, reporting an overrun as `UpstreamUnavailable`.
pub(crate) async fn upstream<T, F>(limit: Duration, what: &str, fut: F) -> Result<T, LocateError>
where
    F: Future<Output = Result<T, LocateError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(LocateError::UpstreamUnavailable(format!(
            "{what} timed out after {}s",
            limit.as_secs_f32()
        ))),
    }
}

/// Runs a store call, reporting an overrun as `Storage`.
pub(crate) async fn store<T, F>(limit: Duration, what: &str, fut: F) -> Result<T, LocateError>
where
    F: Future<Output = Result<T, LocateError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(LocateError::Storage(format!(
            "{what} timed out after {}s",
            limit.as_secs_f32()
        ))),
    }
}
