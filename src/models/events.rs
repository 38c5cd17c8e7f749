use super::content::Content;
use serde::{Deserialize, Serialize};

/// Events produced by the orchestrating agent runtime while it delegates work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrchestrationEvent {
    /// Plain text produced by the orchestrator itself
    AssistantText { text: String },
    /// A unit of work handed to a subagent
    Dispatch {
        correlation_id: String,
        /// Role of the delegated worker, e.g. "researcher"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subagent_type: Option<String>,
        /// Name of the tool/action that performed the delegation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Intermediate update from a delegated worker
    Progress {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
        #[serde(default)]
        delta: Content,
    },
    /// Final result of a delegated worker
    Completion {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
        #[serde(default)]
        result: Content,
    },
    /// End of the whole run
    RunComplete { duration_ms: u64, total_cost_usd: f64 },
}

impl OrchestrationEvent {
    pub fn dispatch(correlation_id: impl Into<String>, subagent_type: impl Into<String>) -> Self {
        OrchestrationEvent::Dispatch {
            correlation_id: correlation_id.into(),
            subagent_type: Some(subagent_type.into()),
            tool_name: None,
            description: None,
        }
    }

    pub fn progress(correlation_id: impl Into<String>, delta: impl Into<Content>) -> Self {
        OrchestrationEvent::Progress {
            correlation_id: Some(correlation_id.into()),
            delta: delta.into(),
        }
    }

    pub fn completion(correlation_id: impl Into<String>, result: impl Into<Content>) -> Self {
        OrchestrationEvent::Completion {
            correlation_id: Some(correlation_id.into()),
            result: result.into(),
        }
    }

    /// Correlation id carried by the event, if any
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            OrchestrationEvent::Dispatch { correlation_id, .. } => Some(correlation_id),
            OrchestrationEvent::Progress { correlation_id, .. }
            | OrchestrationEvent::Completion { correlation_id, .. } => correlation_id.as_deref(),
            OrchestrationEvent::AssistantText { .. } | OrchestrationEvent::RunComplete { .. } => {
                None
            }
        }
    }
}

/// Pick the label for a dispatch: explicit role first, then the tool name.
pub fn resolve_label(
    subagent_type: Option<&str>,
    tool_name: Option<&str>,
    fallback: &str,
) -> String {
    subagent_type
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| tool_name.map(str::trim).filter(|s| !s.is_empty()))
        .unwrap_or(fallback)
        .to_string()
}
