pub mod control;
pub mod element;
pub mod params;
pub mod shared;
pub mod stage;

// Re-export key types for easier access from other stagehand modules (and lib.rs)
pub use control::{EditOutcome, Rejection};
pub use element::{downcast_payload, Element, ElementId, Payload, RunFn, StageElement};
pub use params::{ParamValue, Params};
pub use shared::SharedModel;
pub use stage::{Decoration, Stage};
