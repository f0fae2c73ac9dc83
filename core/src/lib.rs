// src/lib.rs

//! Stagehand: an ordered, stage-grouped pipeline model for editor UIs.
//!
//! A pipeline is a sequence of elements, each belonging to one [`Stage`]
//! (extractor, pre-processor, sorter, post-processor). Stagehand keeps that
//! sequence consistent while a user edits it and tells a view exactly what
//! changed:
//!  - Elements stay sorted by stage; new ones go to the end of their group.
//!  - Singleton stages (by default extractor and sorter) take one element.
//!  - Elements move only within their own stage group.
//!  - Every structural change is a matched begin/end notification pair, so a
//!    list view can update incrementally instead of rebuilding.
//!  - Constraint violations are rejected with a user-facing message, never
//!    raised as errors.
//!
//! The processing each element performs is opaque: [`Element::run`].

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod observer;

// --- Re-exports for the Public API ---

pub use crate::core::control::{EditOutcome, Rejection};
pub use crate::core::element::{downcast_payload, Element, ElementId, Payload, StageElement};
pub use crate::core::params::{ParamValue, Params};
pub use crate::core::shared::SharedModel;
pub use crate::core::stage::{Decoration, Stage};

pub use crate::model::{PipelineModel, RowData, RowRole};

pub use crate::observer::{
  ListMirror, ModelEvent, MoveNotice, NullObserver, ObserverGroup, PipelineObserver, RecordingObserver,
  TracingObserver,
};

pub use crate::catalog::ElementCatalog;
pub use crate::config::ModelConfig;
pub use crate::error::{StagehandError, StagehandResult};

/*
    Typical editor wiring:
    1. Build an `ElementCatalog` of templates the user can choose from.
    2. Create the view's observer and a `PipelineModel::new(observer)`.
    3. On "add": `model.add(catalog.find(stage, name)?)`.
    4. On "up"/"down"/"delete": look up the selected row's id with
       `model.id_at(row)` and call `move_up`/`move_down`/`delete`.
    5. On "run": `model.run(Box::new(input))`.
    Wrap the model in a `SharedModel` if more than one thread touches it.
*/
