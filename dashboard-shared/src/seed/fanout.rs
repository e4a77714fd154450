/// Fan-out / fan-in barrier
///
/// Issues every operation before waiting on any of them, then joins on all.
/// The first failure resolves the barrier with that error and drops the
/// operations still in flight. Results come back in input order.
///
/// # Example
///
/// ```
/// use dashboard_shared::seed::fan_out;
///
/// # async fn example() {
/// let results: Result<Vec<u64>, String> =
///     fan_out((1..=3u64).map(|n| async move { Ok(n * 10) })).await;
/// assert_eq!(results, Ok(vec![10, 20, 30]));
/// # }
/// ```

use futures::future::try_join_all;
use std::future::Future;
use tracing::debug;

/// Runs all operations concurrently and propagates the first failure
pub async fn fan_out<I, F, T, E>(operations: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let operations: Vec<F> = operations.into_iter().collect();
    debug!(operations = operations.len(), "Fanning out batch");

    try_join_all(operations).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_batch() {
        let ops: Vec<futures::future::Ready<Result<(), String>>> = Vec::new();
        let results = fan_out(ops).await;
        assert_eq!(results, Ok(vec![]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_run_concurrently() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let ops = (0..5).map(|i| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10 * (5 - i))).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(i)
            }
        });

        let results = fan_out(ops).await.unwrap();

        // Input order is kept even though later operations finish first
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
        assert_eq!(peak.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_aborts_batch() {
        let completed = Arc::new(AtomicUsize::new(0));

        let ops = (0..4).map(|i| {
            let completed = completed.clone();
            async move {
                if i == 1 {
                    return Err(format!("operation {} failed", i));
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(i)
            }
        });

        let result = fan_out(ops).await;

        assert_eq!(result, Err("operation 1 failed".to_string()));
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }
}
