//! Input debouncing
//!
//! Collapses a burst of values into the last one, released after the input
//! has been quiet for the configured delay. A new value restarts the timer.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Default quiet period for search input
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces values pushed through its sender
pub struct Debouncer<T> {
    tx: UnboundedSender<T>,
    rx: UnboundedReceiver<T>,
    delay: Duration,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sender for pushing values from other tasks
    pub fn sender(&self) -> UnboundedSender<T> {
        self.tx.clone()
    }

    /// Push a value, superseding any pending one
    pub fn push(&self, value: T) {
        // The receiver lives in `self`, so the channel is never closed here
        let _ = self.tx.send(value);
    }

    /// Whether a value is waiting for its quiet period
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the next settled value
    ///
    /// Cancel-safe: if this future is dropped (e.g. in `tokio::select!`),
    /// the latest value is kept and the quiet period restarts on the next
    /// call.
    pub async fn settled(&mut self) -> Option<T> {
        loop {
            if self.pending.is_none() {
                self.pending = Some(self.rx.recv().await?);
            }

            match tokio::time::timeout(self.delay, self.rx.recv()).await {
                Ok(Some(value)) => self.pending = Some(value),
                Ok(None) | Err(_) => return self.pending.take(),
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_burst_collapses_to_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let tx = debouncer.sender();

        tokio::spawn(async move {
            for q in ["t", "ta", "tax"] {
                tx.send(q.to_string()).unwrap();
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            tokio::time::sleep(Duration::from_millis(400)).await;
            tx.send("rates".to_string()).unwrap();
        });

        assert_eq!(debouncer.settled().await.as_deref(), Some("tax"));
        assert_eq!(debouncer.settled().await.as_deref(), Some("rates"));
    }

    #[tokio::test]
    async fn test_waits_for_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(60));
        let start = Instant::now();
        debouncer.push(1);

        assert_eq!(debouncer.settled().await, Some(1));
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert!(!debouncer.has_pending());
    }

    #[tokio::test]
    async fn test_dropped_wait_keeps_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.push("budget");

        // Cancel the wait before the quiet period ends
        let timed_out = tokio::time::timeout(Duration::from_millis(20), debouncer.settled()).await;
        assert!(timed_out.is_err());
        assert!(debouncer.has_pending());

        assert_eq!(debouncer.settled().await, Some("budget"));
    }

    #[test]
    fn test_default_delay() {
        let debouncer: Debouncer<String> = Debouncer::default();
        assert_eq!(debouncer.delay(), Duration::from_millis(300));
    }
}
