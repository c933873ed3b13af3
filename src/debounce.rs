use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::model::AppEvent;

/// Single pending-timer handle. Arming cancels whatever was pending, and each
/// arm gets a new generation so a timer that fired just before being
/// cancelled is still recognised as stale.
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn arm(&mut self, tx: &UnboundedSender<AppEvent>, password: String) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let deadline = Instant::now() + self.delay;
        let tx2 = tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx2.send(AppEvent::DebounceElapsed {
                generation,
                password,
            });
        }));
        debug!("debounce armed (generation {})", generation);
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Claims a fired timer. Returns false when it was superseded or cancelled.
    pub fn take_fired(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.pending.is_some() {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_rearm_cancels_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        debouncer.arm(&tx, "a".into());
        tokio::time::advance(Duration::from_millis(300)).await;
        let second = debouncer.arm(&tx, "ab".into());
        tokio::time::advance(Duration::from_millis(399)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        match rx.recv().await {
            Some(AppEvent::DebounceElapsed { generation, password }) => {
                assert_eq!(generation, second);
                assert_eq!(password, "ab");
                assert!(debouncer.take_fired(generation));
                assert!(!debouncer.take_fired(generation));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_counts_from_arm_time() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        // the timer task has not been polled yet when the clock moves
        let generation = debouncer.arm(&tx, "abc".into());
        tokio::time::advance(Duration::from_millis(400)).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        match rx.try_recv() {
            Ok(AppEvent::DebounceElapsed { generation: fired, password }) => {
                assert_eq!(fired, generation);
                assert_eq!(password, "abc");
            }
            other => panic!("timer did not fire at its deadline: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_generation_is_not_claimed() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));
        let generation = debouncer.arm(&tx, "secret".into());
        debouncer.cancel();
        assert!(!debouncer.take_fired(generation));

        let older = generation;
        let newer = debouncer.arm(&tx, "secret2".into());
        assert!(!debouncer.take_fired(older));
        assert!(debouncer.take_fired(newer));
    }
}
