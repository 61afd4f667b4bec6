//! Detached background work.
//!
//! `spawn_detached` is the only way request handlers start work they do not
//! wait for. The task runs on the tokio runtime, its error is logged and
//! dropped, and a panic inside it stays inside the task.
//!
//! Known gap: a paid checkout whose analysis fails here is never reconciled.
//! The client simply keeps polling "processing".

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{error, info};

/// Spawns `fut` and logs its failure under `name`. Nothing is propagated.
///
/// The handle is returned for tests; handlers drop it.
pub fn spawn_detached<F, T, E>(name: String, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(_) => info!("Detached task '{name}' finished"),
            Err(e) => error!("Detached task '{name}' failed: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_is_contained() {
        let handle = spawn_detached("failing".to_string(), async {
            Err::<(), _>("upstream unavailable")
        });
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_success_runs_to_completion() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = spawn_detached("sending".to_string(), async move {
            tx.send(7).map_err(|_| "receiver dropped")
        });
        handle.await.unwrap();
        assert_eq!(rx.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_panic_stays_inside_task() {
        let handle = spawn_detached("panicking".to_string(), async {
            if true {
                panic!("boom");
            }
            Ok::<(), String>(())
        });
        let joined = handle.await;
        assert!(joined.unwrap_err().is_panic());
    }
}
