//! Delegation tracking module
//!
//! Keeps a registry of subagent tasks that are in flight during an
//! orchestration run, runs a "still working" timer per task, and turns the
//! runtime's event stream into status lines.

mod progress_timer;
mod tracker;

pub use progress_timer::{ProgressScheduler, ProgressTimer, TickFn, TokioScheduler};
pub use tracker::DelegationTracker;
