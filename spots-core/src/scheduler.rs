//! Deferred event delivery with explicit cancellation
//!
//! Selection events are not resolved synchronously: a short settle delay
//! lets the surface finish its own index bookkeeping before item state is
//! read. The scheduler owns a cancellation token per key, so teardown is
//! an explicit cancel rather than a weak-reference accident. A cancelled
//! deferral delivers nothing.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Delivers events over an unbounded channel after a delay, keyed so a
/// newer deferral replaces a pending one.
pub struct Scheduler<E> {
    tx: mpsc::UnboundedSender<E>,
    pending: HashMap<String, CancellationToken>,
}

impl<E> std::fmt::Debug for Scheduler<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<E: Send + 'static> Scheduler<E> {
    /// Create a scheduler delivering into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            tx,
            pending: HashMap::new(),
        }
    }

    /// Defer `event` by `delay`. A pending deferral under the same key is
    /// cancelled first. Must be called within a tokio runtime.
    pub fn defer(&mut self, key: impl Into<String>, delay: Duration, event: E) {
        let key = key.into();
        self.cancel(&key);

        let token = CancellationToken::new();
        let tx = self.tx.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(event);
                }
            }
        });
        self.pending.insert(key, token);
    }

    /// Cancel a pending deferral; no-op for unknown keys.
    pub fn cancel(&mut self, key: &str) {
        if let Some(token) = self.pending.remove(key) {
            token.cancel();
        }
    }

    /// Cancel everything; called on teardown.
    pub fn cancel_all(&mut self) {
        for (_, token) in self.pending.drain() {
            token.cancel();
        }
    }

    /// Whether a deferral is pending under `key`. Settled deferrals are
    /// only cleared lazily, so this reports scheduled-and-not-cancelled.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        for (_, token) in self.pending.drain() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defer_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer("select", Duration::from_millis(20), 7usize);

        let value = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_cancel_suppresses_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer("select", Duration::from_millis(30), 1usize);
        scheduler.cancel("select");

        let result = tokio::time::timeout(Duration::from_millis(80), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_key_replaces_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer("select", Duration::from_millis(50), 1usize);
        scheduler.defer("select", Duration::from_millis(10), 2usize);

        let value = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(value, 2);

        // The replaced deferral never fires.
        let result = tokio::time::timeout(Duration::from_millis(80), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_drop_cancels_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut scheduler = Scheduler::new(tx);
            scheduler.defer("select", Duration::from_millis(30), 1usize);
        }

        let result = tokio::time::timeout(Duration::from_millis(80), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }
}
