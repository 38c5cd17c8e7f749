use crate::execution::ProgressTimer;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::Instant;

/// One outstanding unit of work handed to a subagent
#[derive(Debug)]
pub struct DelegatedTask {
    /// Id assigned by the runtime at dispatch; joins later events back to this task
    pub correlation_id: String,
    /// Subagent role or tool name, fixed at dispatch
    pub label: String,
    /// Short description from the dispatch, if any
    pub context: Option<String>,
    /// Wall-clock dispatch time
    pub started_at: DateTime<Utc>,
    started: Instant,
    timer: ProgressTimer,
}

impl DelegatedTask {
    pub fn new(
        correlation_id: String,
        label: String,
        context: Option<String>,
        started: Instant,
        timer: ProgressTimer,
    ) -> Self {
        Self {
            correlation_id,
            label,
            context,
            started_at: Utc::now(),
            started,
            timer,
        }
    }

    /// Time since dispatch
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stop progress ticks and consume the task
    pub fn finish(self) -> Duration {
        self.timer.cancel();
        self.elapsed()
    }
}
