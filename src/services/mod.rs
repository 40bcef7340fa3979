pub mod leaderboard;
pub mod quiz_service;
pub mod result_service;
pub mod scoring;
pub mod session;
pub mod submission_service;

use std::{future::Future, time::Duration};

use crate::errors::{AppError, AppResult};

/// Runs a store call under a deadline. Expiry surfaces as `AppError::Timeout`.
pub async fn bounded<T, F>(timeout: Duration, operation: &str, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AppError::Timeout(format!(
            "{} did not finish within {} ms",
            operation,
            timeout.as_millis()
        ))),
    }
}
