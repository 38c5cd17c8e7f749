use crate::models::StatusUpdate;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Destination for status lines
pub trait StatusSink: Send + Sync {
    fn emit(&self, update: StatusUpdate);
}

/// Prints each status line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&self, update: StatusUpdate) {
        println!("{}", update);
    }
}

/// Writes each status line through the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn emit(&self, update: StatusUpdate) {
        log::info!("[DELEGATION] {}", update);
    }
}

/// Keeps every status line in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().clone()
    }

    /// Rendered lines, in emission order
    pub fn lines(&self) -> Vec<String> {
        self.updates.lock().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.lock().is_empty()
    }

    pub fn clear(&self) {
        self.updates.lock().clear();
    }
}

impl StatusSink for MemorySink {
    fn emit(&self, update: StatusUpdate) {
        self.updates.lock().push(update);
    }
}

/// Forwards status lines to a channel so another task can render them
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StatusUpdate>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StatusUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StatusSink for ChannelSink {
    fn emit(&self, update: StatusUpdate) {
        if self.tx.send(update).is_err() {
            log::debug!("[DELEGATION] Status receiver dropped, discarding update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(text: &str) -> StatusUpdate {
        StatusUpdate::AssistantText {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(assistant("first"));
        sink.emit(assistant("second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["💬 first", "💬 second"]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_channel_sink_forwards() {
        let (sink, mut rx) = ChannelSink::new();
        sink.emit(assistant("hello"));
        assert_eq!(rx.recv().await, Some(assistant("hello")));
    }

    #[test]
    fn test_sinks_usable_as_trait_objects() {
        let sinks: Vec<Box<dyn StatusSink>> = vec![Box::new(LogSink), Box::new(ConsoleSink)];
        for sink in &sinks {
            sink.emit(assistant("fan out"));
        }
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.emit(assistant("nobody listening"));
    }
}
