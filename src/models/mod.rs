mod content;
mod delegated_task;
mod events;
mod status;

pub use content::{Content, ContentItem, TextBlock};
pub use delegated_task::DelegatedTask;
pub use events::{OrchestrationEvent, resolve_label};
pub use status::{RunStatistics, StatusUpdate};
