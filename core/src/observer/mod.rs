// stagehand/src/observer/mod.rs

//! The notification sink consumed by the pipeline model, and stock sinks.

pub mod recording;
pub mod sink;

pub use recording::{ListMirror, ModelEvent, RecordingObserver};
pub use sink::{MoveNotice, NullObserver, ObserverGroup, PipelineObserver, TracingObserver};
