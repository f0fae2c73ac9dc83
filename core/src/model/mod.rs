// stagehand/src/model/mod.rs

//! Defines the `PipelineModel`, its query surface, its edits and its run.

pub mod definition;
pub mod editing;
pub mod execution;

// Re-export the main model struct
pub use definition::{PipelineModel, RowData, RowRole};
