// tests/execution_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stagehand::{downcast_payload, ModelConfig, ModelEvent, PipelineModel, Stage, StageElement, StagehandError};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn trail_of(model: &PipelineModel) -> Result<Vec<String>, StagehandError> {
  let out = model.run(Box::new(Vec::<String>::new()))?;
  downcast_payload::<Vec<String>>(out)
}

#[test]
fn test_run_threads_payload_in_pipeline_order() {
  setup_tracing();
  let mut model = PipelineModel::detached();
  model.add(&tracing_element(Stage::Sorter, "sort"));
  model.add(&tracing_element(Stage::PostProcessor, "export"));
  model.add(&tracing_element(Stage::PreProcessor, "bandpass"));
  model.add(&tracing_element(Stage::Extractor, "read"));
  model.add(&tracing_element(Stage::PreProcessor, "whiten"));

  assert_eq!(trail_of(&model).unwrap(), vec!["read", "bandpass", "whiten", "sort", "export"]);

  // Reordering within a stage changes the run order.
  let whiten = id_named(&model, "whiten");
  model.move_up(whiten).unwrap();
  assert_eq!(trail_of(&model).unwrap(), vec!["read", "whiten", "bandpass", "sort", "export"]);
}

#[test]
fn test_run_uses_instance_params() {
  setup_tracing();
  let mut model = PipelineModel::detached();
  let scale = StageElement::new(Stage::PreProcessor, "scale")
    .with_params(stagehand::Params::new().with("factor", 2))
    .with_run(|params, payload| {
      let x = downcast_payload::<i64>(payload)?;
      let factor = params.get("factor").and_then(|v| v.as_int()).unwrap_or(1);
      Ok(Box::new(x * factor) as stagehand::Payload)
    });
  model.add(&extractor("E"));
  model.add(&scale);
  model.add(&scale);
  model.add(&sorter("S"));

  let second = id_named_nth(&model, "scale", 1);
  model.get_mut(second).unwrap().params_mut().set("factor", 5);

  let out = model.run(Box::new(3_i64)).unwrap();
  assert_eq!(downcast_payload::<i64>(out).unwrap(), 30);
}

#[test]
fn test_run_stops_at_first_failure() {
  setup_tracing();
  let mut model = PipelineModel::detached();
  model.add(&tracing_element(Stage::Extractor, "read"));
  model.add(&failing_element(Stage::PreProcessor, "broken", "filter exploded"));
  model.add(&tracing_element(Stage::Sorter, "sort"));

  match trail_of(&model) {
    Err(StagehandError::ElementFailure { index, element, source }) => {
      assert_eq!(index, 1);
      assert_eq!(element, "broken");
      assert_eq!(source.to_string(), "filter exploded");
    }
    other => panic!("Expected ElementFailure, got {:?}", other),
  }
}

#[test]
fn test_run_requires_configured_stages() {
  setup_tracing();
  let mut model = PipelineModel::detached();
  assert!(matches!(model.validate(), Err(StagehandError::EmptyPipeline)));

  model.add(&pre("P"));
  assert!(matches!(
    model.validate(),
    Err(StagehandError::MissingStage { stage: Stage::Extractor })
  ));

  model.add(&extractor("E"));
  match model.run(Box::new(())) {
    Err(StagehandError::MissingStage { stage }) => assert_eq!(stage, Stage::Sorter),
    other => panic!("Expected MissingStage, got {:?}", other.map(|_| ())),
  }

  model.add(&sorter("S"));
  assert!(model.validate().is_ok());
}

#[test]
fn test_required_stages_are_configurable() {
  setup_tracing();
  let config = ModelConfig::default().with_required_stages([]);
  let mut model = PipelineModel::with_config(config, Arc::new(stagehand::NullObserver));
  model.add(&tracing_element(Stage::PostProcessor, "export"));
  assert_eq!(trail_of(&model).unwrap(), vec!["export"]);
}

#[test]
fn test_run_sends_no_notifications() {
  setup_tracing();
  let (mut model, recorder) = recorded_model();
  model.add(&extractor("E"));
  model.add(&sorter("S"));
  recorder.take();

  model.run(Box::new(())).unwrap();
  assert_eq!(recorder.events(), Vec::<ModelEvent>::new());
}

#[test]
#[serial]
fn test_each_element_runs_once_per_run() {
  setup_tracing();
  reset_counters();
  let mut model = PipelineModel::detached();
  model.add(&counting_element(Stage::Extractor, "E"));
  model.add(&counting_element(Stage::PreProcessor, "P"));
  model.add(&counting_element(Stage::PreProcessor, "P"));
  model.add(&counting_element(Stage::Sorter, "S"));

  model.run(Box::new(())).unwrap();
  assert_eq!(ELEMENT_RUN_COUNTER.load(Ordering::SeqCst), 4);
  model.run(Box::new(())).unwrap();
  assert_eq!(ELEMENT_RUN_COUNTER.load(Ordering::SeqCst), 8);
}

#[test]
#[serial]
fn test_validation_failure_runs_nothing() {
  setup_tracing();
  reset_counters();
  let mut model = PipelineModel::detached();
  model.add(&counting_element(Stage::Extractor, "E"));
  model.add(&counting_element(Stage::PreProcessor, "P"));

  assert!(model.run(Box::new(())).is_err());
  assert_eq!(ELEMENT_RUN_COUNTER.load(Ordering::SeqCst), 0);
}

fn id_named_nth(model: &PipelineModel, name: &str, n: usize) -> stagehand::ElementId {
  model
    .iter()
    .filter(|(_, e)| e.display_name() == name)
    .nth(n)
    .map(|(id, _)| id)
    .unwrap_or_else(|| panic!("fewer than {} elements named {name}", n + 1))
}
