use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

/// A single cancellable deadline.
///
/// Each schedule gets a new generation. The sleeping task reports its
/// generation when it wakes, and [`fired`](Self::fired) drops reports that
/// no longer match the pending deadline, so a wake-up that races a
/// cancellation is never seen.
pub struct DeadlineTimer {
    pending: Option<Pending>,
    generation: u64,
    tx: mpsc::UnboundedSender<u64>,
    rx: mpsc::UnboundedReceiver<u64>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            pending: None,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Start a deadline at `at`, replacing any pending one.
    pub fn schedule(&mut self, at: Instant) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(at).await;
            let _ = tx.send(generation);
        });
        self.pending = Some(Pending { generation, handle });
        debug!(generation, "deadline scheduled");
        generation
    }

    /// Abort the pending deadline. Returns `false` if none was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.handle.abort();
                debug!(generation = pending.generation, "deadline cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending deadline to pass and return its generation.
    ///
    /// Never resolves while nothing is pending. Cancel-safe.
    pub async fn fired(&mut self) -> u64 {
        loop {
            let Some(current) = self.pending.as_ref().map(|p| p.generation) else {
                return std::future::pending().await;
            };
            match self.rx.recv().await {
                Some(generation) if generation == current => {
                    self.pending = None;
                    return generation;
                }
                Some(stale) => debug!(stale, current, "ignoring stale deadline"),
                None => return std::future::pending().await,
            }
        }
    }
}

impl Default for DeadlineTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for DeadlineTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineTimer")
            .field("generation", &self.generation)
            .field("pending", &self.pending.as_ref().map(|p| p.generation))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn fires_once_for_pending_deadline() {
        let mut timer = DeadlineTimer::new();
        let generation = timer.schedule(Instant::now() + Duration::from_millis(10));
        assert_eq!(timer.fired().await, generation);
        assert!(!timer.is_pending());
    }

    #[tokio::test]
    async fn cancelled_deadline_never_fires() {
        let mut timer = DeadlineTimer::new();
        timer.schedule(Instant::now() + Duration::from_millis(10));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        let waited = tokio::time::timeout(Duration::from_millis(60), timer.fired()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn rescheduling_ignores_the_old_generation() {
        let mut timer = DeadlineTimer::new();
        let first = timer.schedule(Instant::now());
        // Let the first sleeper report before it is replaced.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = timer.schedule(Instant::now() + Duration::from_millis(20));
        assert_ne!(first, second);
        assert_eq!(timer.fired().await, second);
    }
}
