// stagehand/examples/edit_pipeline.rs

use stagehand::{
  downcast_payload, ElementCatalog, ListMirror, ModelConfig, ObserverGroup, Params, Payload, PipelineModel, Stage,
  StageElement, StagehandResult, TracingObserver,
};
use std::sync::Arc;
use tracing::info;

// Stand-in for a recording: a list of samples.
type Samples = Vec<f64>;

// 1. Templates the user can choose from
fn build_catalog() -> ElementCatalog {
  let mut catalog = ElementCatalog::new();
  catalog.register(
    StageElement::new(Stage::Extractor, "SyntheticRecording")
      .with_params(Params::new().with("num_samples", 8))
      .with_run(|params, _payload| {
        let n = params.get("num_samples").and_then(|v| v.as_int()).unwrap_or(0);
        let samples: Samples = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
        Ok(Box::new(samples) as Payload)
      }),
  );
  catalog.register(
    StageElement::new(Stage::PreProcessor, "Gain")
      .with_params(Params::new().with("factor", 2.0))
      .with_run(|params, payload| {
        let factor = params.get("factor").and_then(|v| v.as_float()).unwrap_or(1.0);
        let samples = downcast_payload::<Samples>(payload)?;
        Ok(Box::new(samples.into_iter().map(|s| s * factor).collect::<Samples>()) as Payload)
      }),
  );
  catalog.register(
    StageElement::new(Stage::Sorter, "Threshold")
      .with_params(Params::new().with("threshold", 0.9))
      .with_run(|params, payload| {
        let threshold = params.get("threshold").and_then(|v| v.as_float()).unwrap_or(0.0);
        let samples = downcast_payload::<Samples>(payload)?;
        let spikes: Vec<usize> = samples
          .iter()
          .enumerate()
          .filter(|(_, s)| s.abs() > threshold)
          .map(|(i, _)| i)
          .collect();
        Ok(Box::new(spikes) as Payload)
      }),
  );
  catalog
}

fn main() -> StagehandResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Pipeline Editing Example ---");

  // 2. Wire the model to a "view" (a mirror) and a log sink
  let mirror = Arc::new(ListMirror::new());
  let observers = ObserverGroup::new().with(Arc::new(TracingObserver)).with(mirror.clone());
  let config = ModelConfig::from_toml_str("message_timeout_ms = 2000")?;
  let mut model = PipelineModel::with_config(config, Arc::new(observers));
  let catalog = build_catalog();

  // 3. Edit the way a user would
  for (stage, name) in [
    (Stage::Sorter, "Threshold"),
    (Stage::PreProcessor, "Gain"),
    (Stage::Extractor, "SyntheticRecording"),
    (Stage::PreProcessor, "Gain"),
    (Stage::Extractor, "SyntheticRecording"), // rejected: one extractor only
  ] {
    if let Some(template) = catalog.find(stage, name) {
      let outcome = model.add(template);
      info!(?outcome, "add {}", name);
    }
  }

  // Halve the second gain, then try to push it out of its stage group.
  if let Some(second_gain) = model.id_at(2) {
    if let Some(element) = model.get_mut(second_gain) {
      element.params_mut().set("factor", 0.5);
    }
    let outcome = model.move_down(second_gain)?;
    info!(?outcome, "move second gain down");
    let outcome = model.move_up(second_gain)?;
    info!(?outcome, "move second gain up");
  }

  mirror.resolve(&model);
  info!("Rows: {:?}", model.display_names());
  assert_eq!(mirror.rows().len(), model.count());

  // 4. Run it
  let spikes = downcast_payload::<Vec<usize>>(model.run(Box::new(()))?)?;
  info!("Spike indices: {:?}", spikes);

  Ok(())
}
