//! Event scripts: recorded orchestration runs stored as JSON Lines.
//!
//! One event per line, e.g.
//!
//! ```text
//! # two workers, one finishes
//! {"type": "dispatch", "correlation_id": "t1", "subagent_type": "coder"}
//! {"type": "completion", "correlation_id": "t1", "result": "build finished"}
//! {"type": "run_complete", "duration_ms": 1200, "total_cost_usd": 0.0341}
//! ```

use crate::models::OrchestrationEvent;
use std::path::Path;

/// Parse a JSON Lines event script. Blank lines and `#` comments are skipped.
pub fn parse_event_script(script: &str) -> Result<Vec<OrchestrationEvent>, String> {
    let mut events = Vec::new();

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = serde_json::from_str::<OrchestrationEvent>(line)
            .map_err(|e| format!("Invalid event on line {}: {}", index + 1, e))?;
        events.push(event);
    }

    Ok(events)
}

/// Read and parse an event script from disk
pub fn load_event_script(path: impl AsRef<Path>) -> Result<Vec<OrchestrationEvent>, String> {
    let path = path.as_ref();
    let script = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read event script {}: {}", path.display(), e))?;
    parse_event_script(&script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = r#"
# coder run
{"type": "assistant_text", "text": "Delegating the build."}
{"type": "dispatch", "correlation_id": "t1", "subagent_type": "coder", "description": "Build the project"}

{"type": "progress", "correlation_id": "t1", "delta": {"text": "50% done"}}
{"type": "completion", "correlation_id": "t1", "result": "build finished"}
{"type": "run_complete", "duration_ms": 1200, "total_cost_usd": 0.0341}
"#;

    #[test]
    fn test_parse_script() {
        let events = parse_event_script(SCRIPT).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[1].correlation_id(), Some("t1"));
        assert!(matches!(events[4], OrchestrationEvent::RunComplete { duration_ms: 1200, .. }));
    }

    #[test]
    fn test_parse_error_names_line() {
        let err = parse_event_script("\n{\"type\": \"dispatch\"}\n").unwrap_err();
        assert!(err.contains("line 2"), "unexpected error: {}", err);

        let err = parse_event_script("{\"type\": \"teleport\"}").unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let events = load_event_script(file.path()).unwrap();
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_event_script(dir.path().join("missing.jsonl")).unwrap_err();
        assert!(err.starts_with("Failed to read event script"));
    }
}
