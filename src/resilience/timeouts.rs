//! Bounded waiting.

use std::future::Future;
use std::time::Duration;

/// Await `fut` for at most `limit`.
///
/// Returns `None` if the deadline passed first; the future is dropped.
pub async fn within<F: Future>(limit: Duration, fut: F) -> Option<F::Output> {
    tokio::time::timeout(limit, fut).await.ok()
}
