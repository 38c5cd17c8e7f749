use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Callback invoked on every timer tick
pub type TickFn = Box<dyn Fn() + Send + Sync + 'static>;

/// Schedules repeating progress callbacks
pub trait ProgressScheduler: Send + Sync {
    /// Start calling `tick` every `every` until the returned timer is cancelled or dropped.
    /// The first call happens one full interval after scheduling.
    fn schedule(&self, every: Duration, tick: TickFn) -> ProgressTimer;
}

/// Handle to a repeating progress callback.
///
/// Cancelled on `cancel()` or when dropped, whichever comes first.
#[derive(Debug)]
pub struct ProgressTimer {
    token: CancellationToken,
}

impl ProgressTimer {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Stop the timer. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs progress ticks as tasks on the current tokio runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl ProgressScheduler for TokioScheduler {
    fn schedule(&self, every: Duration, tick: TickFn) -> ProgressTimer {
        let token = CancellationToken::new();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("[PROGRESS_TIMER] No tokio runtime available, progress ticks disabled");
                return ProgressTimer::new(token);
            }
        };

        let cancelled = token.clone();
        handle.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await; // skip first immediate tick

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => tick(),
                }
            }
        });

        ProgressTimer::new(token)
    }
}
