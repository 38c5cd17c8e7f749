use crate::channels::StatusSink;
use crate::channels::util::preview;
use crate::config::TrackerConfig;
use crate::execution::progress_timer::ProgressScheduler;
use crate::models::{
    Content, DelegatedTask, OrchestrationEvent, RunStatistics, StatusUpdate, resolve_label,
};
use dashmap::DashMap;
use futures_util::{Stream, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::time::Instant;
use uuid::Uuid;

/// Tracks subagent tasks delegated during one orchestration run
///
/// Every entry point is non-blocking and never fails: unknown ids, repeated
/// completions and malformed payloads degrade to best-effort output.
pub struct DelegationTracker {
    config: TrackerConfig,
    /// Where status lines go
    sink: Arc<dyn StatusSink>,
    /// Creates the per-task progress timers
    scheduler: Arc<dyn ProgressScheduler>,
    /// Outstanding tasks indexed by correlation id
    tasks: DashMap<String, DelegatedTask>,
    /// Id of the current run, for log correlation
    run_id: RwLock<String>,
}

impl DelegationTracker {
    /// Create a new DelegationTracker
    pub fn new(
        config: TrackerConfig,
        sink: Arc<dyn StatusSink>,
        scheduler: Arc<dyn ProgressScheduler>,
    ) -> Self {
        Self {
            config,
            sink,
            scheduler,
            tasks: DashMap::new(),
            run_id: RwLock::new(Uuid::new_v4().to_string()),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn run_id(&self) -> String {
        self.run_id.read().clone()
    }

    /// Number of tasks still outstanding
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_tracking(&self, correlation_id: &str) -> bool {
        self.tasks.contains_key(correlation_id)
    }

    /// Label a tracked task was dispatched with
    pub fn label_of(&self, correlation_id: &str) -> Option<String> {
        self.tasks.get(correlation_id).map(|t| t.label.clone())
    }

    /// Route one runtime event to the matching handler.
    ///
    /// Returns `true` once the run-complete event has been handled.
    pub fn handle_event(&self, event: OrchestrationEvent) -> bool {
        log::debug!(
            "[DELEGATION] run={} event={} id={:?}",
            self.run_id.read(),
            event.as_ref(),
            event.correlation_id()
        );

        match event {
            OrchestrationEvent::AssistantText { text } => self.on_assistant_text(&text),
            OrchestrationEvent::Dispatch {
                correlation_id,
                subagent_type,
                tool_name,
                description,
            } => {
                let label = resolve_label(
                    subagent_type.as_deref(),
                    tool_name.as_deref(),
                    &self.config.fallback_label,
                );
                self.on_dispatch(&correlation_id, &label, description.as_deref());
            }
            OrchestrationEvent::Progress {
                correlation_id,
                delta,
            } => self.on_progress(correlation_id.as_deref(), &delta),
            OrchestrationEvent::Completion {
                correlation_id,
                result,
            } => self.on_complete(correlation_id.as_deref(), &result),
            OrchestrationEvent::RunComplete {
                duration_ms,
                total_cost_usd,
            } => {
                self.on_run_complete(duration_ms, total_cost_usd);
                return true;
            }
        }

        false
    }

    /// Consume an event stream until it ends or reports run completion.
    ///
    /// If the stream ends without a run-complete event, outstanding tasks are
    /// still released so no timer outlives the drain.
    pub async fn drain<S>(&self, events: S)
    where
        S: Stream<Item = OrchestrationEvent>,
    {
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            if self.handle_event(event) {
                return;
            }
        }

        log::warn!(
            "[DELEGATION] Event stream for run {} ended without run completion",
            self.run_id.read()
        );
        self.shutdown();
    }

    /// Orchestrator text outside any delegated task
    pub fn on_assistant_text(&self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.sink.emit(StatusUpdate::AssistantText {
                text: text.to_string(),
            });
        }
    }

    /// A new task was handed to a subagent
    pub fn on_dispatch(&self, correlation_id: &str, label: &str, context: Option<&str>) {
        let label = if label.trim().is_empty() {
            self.config.fallback_label.clone()
        } else {
            label.trim().to_string()
        };
        let context = context
            .map(|c| preview(c, self.config.context_preview_chars))
            .filter(|c| !c.is_empty());

        let started = Instant::now();
        let timer = {
            let sink = Arc::clone(&self.sink);
            let correlation_id = correlation_id.to_string();
            let label = label.clone();
            self.scheduler.schedule(
                self.config.progress_interval(),
                Box::new(move || {
                    sink.emit(StatusUpdate::Working {
                        correlation_id: correlation_id.clone(),
                        label: label.clone(),
                        elapsed: started.elapsed(),
                    })
                }),
            )
        };

        let task = DelegatedTask::new(
            correlation_id.to_string(),
            label.clone(),
            context.clone(),
            started,
            timer,
        );

        // A stale entry under the same id is dropped here, which cancels its timer
        if self.tasks.insert(correlation_id.to_string(), task).is_some() {
            log::debug!(
                "[DELEGATION] Replaced outstanding task {} on repeated dispatch",
                correlation_id
            );
        }

        self.sink.emit(StatusUpdate::Dispatched {
            correlation_id: correlation_id.to_string(),
            label,
            context,
        });
    }

    /// Intermediate update for a task; unknown ids use the fallback label
    pub fn on_progress(&self, correlation_id: Option<&str>, delta: &Content) {
        let text = delta.normalize();
        if text.is_empty() {
            return;
        }

        let label = self.label_or_fallback(correlation_id);
        self.sink.emit(StatusUpdate::Progress {
            correlation_id: correlation_id.map(str::to_string),
            label,
            text,
        });
    }

    /// Final result for a task.
    ///
    /// A tracked task is reported with its elapsed time, its timer stopped and
    /// its entry removed. Results for unknown or already completed ids only
    /// print their text.
    pub fn on_complete(&self, correlation_id: Option<&str>, result: &Content) {
        let text = result.normalize();

        let removed = correlation_id.and_then(|id| self.tasks.remove(id));
        match removed {
            Some((correlation_id, task)) => {
                let label = task.label.clone();
                let elapsed = task.finish();
                self.sink.emit(StatusUpdate::Returned {
                    correlation_id,
                    label,
                    elapsed,
                    result: text,
                });
            }
            None => {
                log::debug!(
                    "[DELEGATION] Result for untracked task {:?}",
                    correlation_id
                );
                if !text.is_empty() {
                    self.sink.emit(StatusUpdate::Result {
                        correlation_id: correlation_id.map(str::to_string),
                        label: self.config.fallback_label.clone(),
                        text,
                    });
                }
            }
        }
    }

    /// Report run statistics, then release every task still outstanding
    pub fn on_run_complete(&self, duration_ms: u64, total_cost_usd: f64) {
        let abandoned_tasks = self.tasks.len();

        self.sink.emit(StatusUpdate::RunSummary(RunStatistics {
            duration_ms,
            total_cost_usd,
            abandoned_tasks,
        }));

        self.shutdown();
    }

    /// Cancel and drop every outstanding task without reporting results
    pub fn shutdown(&self) {
        let ids: Vec<String> = self.tasks.iter().map(|entry| entry.key().clone()).collect();

        for id in ids {
            if let Some((_, task)) = self.tasks.remove(&id) {
                let label = task.label.clone();
                let elapsed = task.finish();
                log::debug!(
                    "[DELEGATION] Released task {} ({}) without result after {:.1}s",
                    id,
                    label,
                    elapsed.as_secs_f64()
                );
            }
        }
    }

    /// Clear all state so the tracker can be reused for another run
    pub fn reset(&self) {
        self.shutdown();
        *self.run_id.write() = Uuid::new_v4().to_string();
    }

    fn label_or_fallback(&self, correlation_id: Option<&str>) -> String {
        correlation_id
            .and_then(|id| self.label_of(id))
            .unwrap_or_else(|| self.config.fallback_label.clone())
    }
}

impl Drop for DelegationTracker {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!(
                "[DELEGATION] Tracker dropped with {} outstanding task(s)",
                self.tasks.len()
            );
        }
    }
}
