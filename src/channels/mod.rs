//! Output channels for tracker status lines.

mod sink;
pub mod util;

pub use sink::{ChannelSink, ConsoleSink, LogSink, MemorySink, StatusSink};
