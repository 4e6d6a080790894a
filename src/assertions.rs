//! Asynchronous rejection assertions
//!
//! Inverts the outcome of an async operation: the assertion passes when the
//! operation fails. A panic inside the operation counts as a failure of the
//! operation.

use crate::error::HelperError;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::debug;

/// Value returned by a passing rejection assertion
pub const EVERYTHING_IS_FINE: &str = "everything is fine";

/// Passes if `operation` returns an error (or panics)
///
/// # Returns
///
/// * `Ok(EVERYTHING_IS_FINE)` - The operation rejected
/// * `Err(HelperError::MissingRejection)` - The operation succeeded ("Missing rejection")
pub async fn assert_throws_asynchronously<F, Fut, T, E>(
    operation: F,
) -> Result<&'static str, HelperError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await
    {
        Ok(Ok(_)) => Err(HelperError::MissingRejection { expected: None }),
        Ok(Err(_)) => Ok(EVERYTHING_IS_FINE),
        Err(_) => {
            debug!("Operation panicked; treating as rejection");
            Ok(EVERYTHING_IS_FINE)
        }
    }
}

/// Passes only if `operation` fails with an error of kind `K`
///
/// Any other outcome (success, a different error kind, a panic) fails with
/// "Missing rejection with <K>". The original error is not carried over.
pub async fn assert_throws_asynchronously_with<K, F, Fut, T>(
    operation: F,
) -> Result<&'static str, HelperError>
where
    K: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let outcome = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(Err(error)) if error.is::<K>() => Ok(EVERYTHING_IS_FINE),
        Ok(Err(error)) => {
            debug!(error = %error, "Operation rejected with an unexpected error kind");
            Err(missing_rejection_with::<K>())
        }
        Ok(Ok(_)) | Err(_) => Err(missing_rejection_with::<K>()),
    }
}

fn missing_rejection_with<K>() -> HelperError {
    HelperError::MissingRejection {
        expected: Some(short_type_name::<K>()),
    }
}

/// Type name without its module path ("my_crate::errors::RangeError" -> "RangeError")
fn short_type_name<K>() -> String {
    let full = std::any::type_name::<K>();
    let (path, generics) = full.split_at(full.find('<').unwrap_or(full.len()));
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{}{}", base, generics)
}
