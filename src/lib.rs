//! Delegation tracking for multi-agent orchestration runs.
//!
//! Consumes the event stream an orchestrating agent runtime produces while it
//! hands work to subagents, correlates progress and results back to the task
//! that was dispatched, and renders live status lines.

pub mod channels;
pub mod config;
pub mod execution;
pub mod models;
pub mod replay;

pub use channels::{ChannelSink, ConsoleSink, LogSink, MemorySink, StatusSink};
pub use config::TrackerConfig;
pub use execution::{DelegationTracker, ProgressScheduler, ProgressTimer, TokioScheduler};
pub use models::{Content, ContentItem, OrchestrationEvent, RunStatistics, StatusUpdate};
