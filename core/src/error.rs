// stagehand/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::core::element::ElementId;
use crate::core::stage::Stage;

/// Errors surfaced by the pipeline model.
///
/// Constraint violations a user can correct (a second extractor, a move past
/// the edge of a stage group) are *not* errors; they come back as
/// [`EditOutcome::Rejected`](crate::EditOutcome::Rejected). Everything here
/// signals either caller misuse or a failure while running elements.
#[derive(Debug, Error)]
pub enum StagehandError {
  /// The caller referenced an instance that is not (or no longer) in the
  /// pipeline. Usually a stale id held by a view.
  #[error("Element not found in pipeline: {id}")]
  ElementNotFound { id: ElementId },

  #[error("Pipeline cannot run without a {stage} stage")]
  MissingStage { stage: Stage },

  #[error("Pipeline cannot run: no elements")]
  EmptyPipeline,

  #[error("Element '{element}' at index {index} failed. Source: {source}")]
  ElementFailure {
    index: usize,
    element: String,
    #[source]
    source: AnyhowError,
  },

  /// A payload did not hold the type an element expected. The actual type
  /// of a `Box<dyn Any>` cannot be named, so only the expectation is kept.
  #[error("Payload type mismatch (expected {expected})")]
  PayloadType { expected: String },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Error in element-provided code or external operation. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for StagehandError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap our own errors that were boxed into anyhow by element code.
    match err.downcast::<StagehandError>() {
      Ok(inner) => inner,
      Err(source) => StagehandError::External { source },
    }
  }
}

impl From<toml::de::Error> for StagehandError {
  fn from(err: toml::de::Error) -> Self {
    StagehandError::Config(err.to_string())
  }
}

pub type StagehandResult<T, E = StagehandError> = std::result::Result<T, E>;
