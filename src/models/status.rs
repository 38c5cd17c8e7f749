use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Aggregate statistics reported once when a run completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub duration_ms: u64,
    pub total_cost_usd: f64,
    /// Tasks still outstanding when the run ended (no result was observed)
    pub abandoned_tasks: usize,
}

/// One status line emitted by the tracker
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    AssistantText {
        text: String,
    },
    Dispatched {
        correlation_id: String,
        label: String,
        context: Option<String>,
    },
    /// Periodic "still working" tick for an outstanding task
    Working {
        correlation_id: String,
        label: String,
        elapsed: Duration,
    },
    Progress {
        correlation_id: Option<String>,
        label: String,
        text: String,
    },
    /// A tracked task returned its result
    Returned {
        correlation_id: String,
        label: String,
        elapsed: Duration,
        result: String,
    },
    /// Result for a task that is not (or no longer) tracked
    Result {
        correlation_id: Option<String>,
        label: String,
        text: String,
    },
    RunSummary(RunStatistics),
}

impl StatusUpdate {
    /// Label of the task the line refers to, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            StatusUpdate::Dispatched { label, .. }
            | StatusUpdate::Working { label, .. }
            | StatusUpdate::Progress { label, .. }
            | StatusUpdate::Returned { label, .. }
            | StatusUpdate::Result { label, .. } => Some(label),
            StatusUpdate::AssistantText { .. } | StatusUpdate::RunSummary(_) => None,
        }
    }

    /// Elapsed time carried by the line, if any
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            StatusUpdate::Working { elapsed, .. } | StatusUpdate::Returned { elapsed, .. } => {
                Some(*elapsed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run complete in {}ms ({:.2}s) | cost ${:.4}",
            self.duration_ms,
            self.duration_ms as f64 / 1000.0,
            self.total_cost_usd
        )
    }
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusUpdate::AssistantText { text } => write!(f, "💬 {}", text),
            StatusUpdate::Dispatched { label, context, .. } => match context {
                Some(context) => write!(f, "🚀 [{}] dispatched: {}", label, context),
                None => write!(f, "🚀 [{}] dispatched", label),
            },
            StatusUpdate::Working { label, elapsed, .. } => write!(
                f,
                "⏳ [{}] still working, {}s elapsed",
                label,
                elapsed.as_secs()
            ),
            StatusUpdate::Progress { label, text, .. } => write!(f, "📨 [{}] {}", label, text),
            StatusUpdate::Returned {
                label,
                elapsed,
                result,
                ..
            } => {
                write!(
                    f,
                    "✅ [{}] returned after {:.1}s",
                    label,
                    elapsed.as_secs_f64()
                )?;
                if !result.is_empty() {
                    write!(f, ": {}", result)?;
                }
                Ok(())
            }
            StatusUpdate::Result { label, text, .. } => write!(f, "📄 [{}] {}", label, text),
            StatusUpdate::RunSummary(stats) => write!(f, "🏁 {}", stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_formatting() {
        let line = StatusUpdate::RunSummary(RunStatistics {
            duration_ms: 1200,
            total_cost_usd: 0.0341,
            abandoned_tasks: 0,
        })
        .to_string();
        assert!(line.contains("1200ms"));
        assert!(line.contains("1.20s"));
        assert!(line.contains("$0.0341"));
    }

    #[test]
    fn test_cost_rounds_to_four_decimals() {
        let stats = RunStatistics {
            duration_ms: 0,
            total_cost_usd: 0.123456,
            abandoned_tasks: 0,
        };
        assert!(stats.to_string().ends_with("$0.1235"));
    }

    #[test]
    fn test_returned_line() {
        let update = StatusUpdate::Returned {
            correlation_id: "t1".to_string(),
            label: "coder".to_string(),
            elapsed: Duration::from_millis(12_340),
            result: "build finished".to_string(),
        };
        assert_eq!(
            update.to_string(),
            "✅ [coder] returned after 12.3s: build finished"
        );
        assert_eq!(update.label(), Some("coder"));
        assert_eq!(update.elapsed(), Some(Duration::from_millis(12_340)));
    }

    #[test]
    fn test_working_line_uses_whole_seconds() {
        let update = StatusUpdate::Working {
            correlation_id: "t1".to_string(),
            label: "researcher".to_string(),
            elapsed: Duration::from_millis(10_900),
        };
        assert_eq!(update.to_string(), "⏳ [researcher] still working, 10s elapsed");
    }
}
