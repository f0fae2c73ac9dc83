// stagehand/src/core/element.rs

//! Defines the `Element` capability the pipeline model is built from, the
//! per-instance `ElementId`, and `StageElement`, the stock implementation.

use super::params::Params;
use super::stage::Stage;
use crate::error::{StagehandError, StagehandResult};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased data handed from one element to the next during a run.
pub type Payload = Box<dyn Any + Send>;

/// Downcasts a payload to the concrete type an element expects.
pub fn downcast_payload<T: Any + Send>(payload: Payload) -> StagehandResult<T> {
  payload.downcast::<T>().map(|b| *b).map_err(|_| StagehandError::PayloadType {
    expected: std::any::type_name::<T>().to_string(),
  })
}

/// Stable lookup tag of one element instance inside a pipeline.
///
/// Assigned when the instance is inserted and never reused by the same model,
/// so two structurally identical copies are still told apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
  pub fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Debug for ElementId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ElementId({})", self.0)
  }
}

impl fmt::Display for ElementId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// A pipeline element: something with a fixed stage, a name to show, some
/// parameters, and an opaque processing step.
///
/// The model never copies elements implicitly. `add` calls
/// [`Element::clone_element`] so the caller's template and the pipeline's
/// instance evolve independently.
pub trait Element: Send + Sync + 'static {
  /// The stage never changes for the lifetime of the element.
  fn stage(&self) -> Stage;

  fn display_name(&self) -> &str;

  fn params(&self) -> &Params;

  fn params_mut(&mut self) -> &mut Params;

  /// Deep copy of this element. Parameters must not be shared with `self`.
  fn clone_element(&self) -> Box<dyn Element>;

  /// Processes `payload` and returns what the next element receives.
  fn run(&self, payload: Payload) -> anyhow::Result<Payload>;
}

impl<'a> fmt::Debug for dyn Element + 'a {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Element")
      .field("stage", &self.stage())
      .field("name", &self.display_name())
      .field("params", self.params())
      .finish()
  }
}

/// Closure type for the processing step of a [`StageElement`].
pub type RunFn = Arc<dyn Fn(&Params, Payload) -> anyhow::Result<Payload> + Send + Sync + 'static>;

/// The stock element: stage, name, parameters, and a run closure.
///
/// Cloning deep-copies the parameters and shares the closure, which is
/// behaviour rather than state.
#[derive(Clone)]
pub struct StageElement {
  stage: Stage,
  name: String,
  params: Params,
  run_fn: RunFn,
}

impl StageElement {
  /// Creates an element whose run step passes the payload through unchanged.
  pub fn new<S: Into<String>>(stage: Stage, name: S) -> Self {
    Self {
      stage,
      name: name.into(),
      params: Params::new(),
      run_fn: Arc::new(|_params, payload| Ok(payload)),
    }
  }

  pub fn with_params(mut self, params: Params) -> Self {
    self.params = params;
    self
  }

  pub fn with_run<F>(mut self, run_fn: F) -> Self
  where
    F: Fn(&Params, Payload) -> anyhow::Result<Payload> + Send + Sync + 'static,
  {
    self.run_fn = Arc::new(run_fn);
    self
  }
}

impl Element for StageElement {
  fn stage(&self) -> Stage {
    self.stage
  }

  fn display_name(&self) -> &str {
    &self.name
  }

  fn params(&self) -> &Params {
    &self.params
  }

  fn params_mut(&mut self) -> &mut Params {
    &mut self.params
  }

  fn clone_element(&self) -> Box<dyn Element> {
    Box::new(self.clone())
  }

  fn run(&self, payload: Payload) -> anyhow::Result<Payload> {
    (self.run_fn)(&self.params, payload)
  }
}

// RunFn has no Debug; show whatever else we have.
impl fmt::Debug for StageElement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StageElement")
      .field("stage", &self.stage)
      .field("name", &self.name)
      .field("params", &self.params)
      .finish()
  }
}
