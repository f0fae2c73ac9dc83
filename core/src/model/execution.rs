// stagehand/src/model/execution.rs

//! Contains `PipelineModel::run()`, which threads a payload through every
//! element in pipeline order, and the readiness check it performs first.

use tracing::{event, instrument, span, Level};

use super::definition::PipelineModel;
use crate::core::element::Payload;
use crate::error::{StagehandError, StagehandResult};

impl PipelineModel {
  /// Checks that the pipeline can run: it is not empty and every stage in
  /// [`ModelConfig::required_stages`](crate::ModelConfig::required_stages)
  /// has an element.
  pub fn validate(&self) -> StagehandResult<()> {
    if self.slots.is_empty() {
      return Err(StagehandError::EmptyPipeline);
    }
    // BTreeSet iterates in stage order, so the earliest missing stage is reported.
    if let Some(stage) = self.config.required_stages.iter().find(|s| !self.has_instance(**s)) {
      return Err(StagehandError::MissingStage { stage: *stage });
    }
    Ok(())
  }

  /// Runs every element in sequence order, each receiving the previous
  /// element's output. The first failure stops the run.
  ///
  /// Running reads the model only; it sends no notifications.
  #[instrument(
    name = "PipelineModel::run",
    skip_all,
    fields(num_elements = self.slots.len()),
    err(Display)
  )]
  pub fn run(&self, payload: Payload) -> StagehandResult<Payload> {
    self.validate()?;
    event!(Level::DEBUG, "Pipeline run starting.");

    let mut payload = payload;
    for (index, slot) in self.slots.iter().enumerate() {
      let element = slot.element();
      let element_span = span!(
        Level::INFO,
        "element_run",
        element_index = index,
        element = element.display_name(),
        stage = %element.stage()
      );
      let _element_span_guard = element_span.enter();

      payload = element.run(payload).map_err(|source| {
        event!(Level::ERROR, error = %source, "Element failed.");
        StagehandError::ElementFailure {
          index,
          element: element.display_name().to_string(),
          source,
        }
      })?;
      event!(Level::TRACE, "Element finished.");
    }

    event!(Level::DEBUG, "Pipeline run completed.");
    Ok(payload)
  }
}
