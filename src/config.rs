use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default seconds between "still working" lines
const DEFAULT_PROGRESS_INTERVAL_SECS: u64 = 5;
/// Default number of characters of dispatch context shown
const DEFAULT_CONTEXT_PREVIEW_CHARS: usize = 80;

/// Configuration for the delegation tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between periodic progress lines for an outstanding task
    pub progress_interval_secs: u64,
    /// Label used when no subagent name or tool name is known
    pub fallback_label: String,
    /// Max characters of the dispatch description shown in the dispatch line
    pub context_preview_chars: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            progress_interval_secs: DEFAULT_PROGRESS_INTERVAL_SECS,
            fallback_label: "subagent".to_string(),
            context_preview_chars: DEFAULT_CONTEXT_PREVIEW_CHARS,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from the process environment (after `.env`)
    ///
    /// Environment variables:
    ///   DELEGATION_PROGRESS_INTERVAL_SECS - seconds between progress lines (default: 5)
    ///   DELEGATION_FALLBACK_LABEL         - label for unnamed tasks (default: subagent)
    ///   DELEGATION_CONTEXT_PREVIEW_CHARS  - dispatch context preview length (default: 80)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    /// Unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DELEGATION_PROGRESS_INTERVAL_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.progress_interval_secs = secs,
                Err(e) => log::warn!(
                    "[CONFIG] Invalid DELEGATION_PROGRESS_INTERVAL_SECS '{}': {}, using {}",
                    raw,
                    e,
                    config.progress_interval_secs
                ),
            }
        }

        if let Some(label) = lookup("DELEGATION_FALLBACK_LABEL") {
            let label = label.trim();
            if !label.is_empty() {
                config.fallback_label = label.to_string();
            }
        }

        if let Some(raw) = lookup("DELEGATION_CONTEXT_PREVIEW_CHARS") {
            match raw.trim().parse::<usize>() {
                Ok(chars) => config.context_preview_chars = chars,
                Err(e) => log::warn!(
                    "[CONFIG] Invalid DELEGATION_CONTEXT_PREVIEW_CHARS '{}': {}, using {}",
                    raw,
                    e,
                    config.context_preview_chars
                ),
            }
        }

        config
    }

    /// Progress tick interval, never shorter than one second
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.progress_interval_secs, 5);
        assert_eq!(config.fallback_label, "subagent");
        assert_eq!(config.context_preview_chars, 80);
        assert_eq!(config.progress_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("DELEGATION_PROGRESS_INTERVAL_SECS", "2"),
            ("DELEGATION_FALLBACK_LABEL", "worker"),
            ("DELEGATION_CONTEXT_PREVIEW_CHARS", "40"),
        ]));
        assert_eq!(config.progress_interval_secs, 2);
        assert_eq!(config.fallback_label, "worker");
        assert_eq!(config.context_preview_chars, 40);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("DELEGATION_PROGRESS_INTERVAL_SECS", "soon"),
            ("DELEGATION_FALLBACK_LABEL", "   "),
        ]));
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = TrackerConfig {
            progress_interval_secs: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(config.progress_interval(), Duration::from_secs(1));
    }
}
