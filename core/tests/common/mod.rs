// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use stagehand::{
  downcast_payload, ElementId, ListMirror, ModelEvent, Params, Payload, PipelineModel, RecordingObserver, Stage,
  StageElement,
};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Element Templates ---
pub fn extractor(name: &str) -> StageElement {
  StageElement::new(Stage::Extractor, name).with_params(
    Params::new()
      .with("probe_path", None::<String>)
      .with("channel_map", None::<Vec<i64>>)
      .with("channel_groups", None::<Vec<i64>>),
  )
}

pub fn pre(name: &str) -> StageElement {
  StageElement::new(Stage::PreProcessor, name).with_params(Params::new().with("freq_min", 300).with("freq_max", 6000))
}

pub fn sorter(name: &str) -> StageElement {
  StageElement::new(Stage::Sorter, name).with_params(Params::new().with("detect_threshold", 5.0))
}

pub fn post(name: &str) -> StageElement {
  StageElement::new(Stage::PostProcessor, name)
}

/// Element that appends its name to a `Vec<String>` payload.
pub fn tracing_element(stage: Stage, name: &'static str) -> StageElement {
  StageElement::new(stage, name).with_run(move |_params, payload| {
    let mut trail = downcast_payload::<Vec<String>>(payload)?;
    trail.push(name.to_string());
    Ok(Box::new(trail) as Payload)
  })
}

/// Element that always fails.
pub fn failing_element(stage: Stage, name: &'static str, message: &'static str) -> StageElement {
  StageElement::new(stage, name).with_run(move |_params, _payload| Err(anyhow::anyhow!(message)))
}

// --- Model Helpers ---

/// A model whose notifications are recorded, plus the recorder.
pub fn recorded_model() -> (PipelineModel, Arc<RecordingObserver>) {
  let recorder = Arc::new(RecordingObserver::new());
  (PipelineModel::new(recorder.clone()), recorder)
}

/// A model whose notifications feed a `ListMirror`, plus the mirror.
pub fn mirrored_model() -> (PipelineModel, Arc<ListMirror>) {
  let mirror = Arc::new(ListMirror::new());
  (PipelineModel::new(mirror.clone()), mirror)
}

/// Id of the first element displayed as `name`. Panics if absent.
pub fn id_named(model: &PipelineModel, name: &str) -> ElementId {
  model
    .iter()
    .find(|(_, e)| e.display_name() == name)
    .map(|(id, _)| id)
    .unwrap_or_else(|| panic!("no element named {name} in {:?}", model.display_names()))
}

pub fn structural(events: Vec<ModelEvent>) -> Vec<ModelEvent> {
  events.into_iter().filter(ModelEvent::is_structural).collect()
}

/// Asserts the mirror, once resolved, matches the model row for row.
pub fn assert_mirror_in_sync(model: &PipelineModel, mirror: &ListMirror) {
  mirror.resolve(model);
  assert!(mirror.violations().is_empty(), "violations: {:?}", mirror.violations());
  let expected: Vec<Option<ElementId>> = model.ids().map(Some).collect();
  assert_eq!(mirror.rows(), expected);
}

/// Asserts stages never decrease along the sequence.
pub fn assert_stage_sorted(model: &PipelineModel) {
  let stages: Vec<Stage> = model.stages().collect();
  for pair in stages.windows(2) {
    assert!(pair[0] <= pair[1], "unsorted stages: {:?}", stages);
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for checking element run counts ---
pub static ELEMENT_RUN_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  ELEMENT_RUN_COUNTER.store(0, Ordering::SeqCst);
}

/// Element that bumps `ELEMENT_RUN_COUNTER` and passes the payload through.
pub fn counting_element(stage: Stage, name: &'static str) -> StageElement {
  StageElement::new(stage, name).with_run(|_params, payload| {
    ELEMENT_RUN_COUNTER.fetch_add(1, Ordering::SeqCst);
    Ok(payload)
  })
}
