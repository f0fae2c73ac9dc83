// tests/shared_model_tests.rs
mod common;

use common::*;
use stagehand::{ListMirror, ModelEvent, PipelineModel, PipelineObserver, RecordingObserver, SharedModel, Stage};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_edits_stay_consistent() {
  setup_tracing();
  let mirror = Arc::new(ListMirror::new());
  let shared = SharedModel::new(PipelineModel::new(mirror.clone()));

  let workers: Vec<_> = (0..4)
    .map(|worker| {
      let shared = shared.clone();
      thread::spawn(move || {
        for round in 0..25 {
          let mut model = shared.write();
          // Every worker races for the singleton stages too.
          model.add(&extractor(&format!("E{worker}")));
          model.add(&sorter(&format!("S{worker}")));
          model.add(&pre(&format!("P{worker}-{round}")));
          if round % 3 == 0 {
            if let Some(id) = model.id_at(model.stage_range(Stage::PreProcessor).start) {
              model.move_down(id).unwrap();
            }
          }
          if round % 5 == 4 {
            let last_pre = model.stage_range(Stage::PreProcessor).end - 1;
            let id = model.id_at(last_pre).unwrap();
            model.delete(id).unwrap();
          }
        }
      })
    })
    .collect();
  for w in workers {
    w.join().unwrap();
  }

  let model = shared.read();
  assert_stage_sorted(&model);
  let counts = model.stage_counts();
  assert_eq!(counts.get(&Stage::Extractor), Some(&1));
  assert_eq!(counts.get(&Stage::Sorter), Some(&1));
  // 25 adds minus 5 deletes per worker.
  assert_eq!(counts.get(&Stage::PreProcessor), Some(&80));
  assert_mirror_in_sync(&model, &mirror);
}

/// Checks, from inside a notification, that no other thread can read.
struct LockProbe {
  shared: parking_lot::Mutex<Option<SharedModel>>,
  recorder: RecordingObserver,
}

impl PipelineObserver for LockProbe {
  fn rows_will_insert(&self, index: usize) {
    if let Some(shared) = self.shared.lock().as_ref() {
      let other = shared.clone();
      let readable = thread::spawn(move || other.try_read().is_some()).join().unwrap();
      assert!(!readable, "model readable mid-insert");
    }
    self.recorder.rows_will_insert(index);
  }

  fn rows_did_insert(&self) {
    self.recorder.rows_did_insert();
  }
}

#[test]
fn test_notifications_run_under_the_write_lock() {
  setup_tracing();
  let probe = Arc::new(LockProbe {
    shared: parking_lot::Mutex::new(None),
    recorder: RecordingObserver::new(),
  });
  let shared = SharedModel::new(PipelineModel::new(probe.clone()));
  *probe.shared.lock() = Some(shared.clone());

  shared.write().add(&pre("P"));
  assert_eq!(probe.recorder.events(), vec![ModelEvent::WillInsert(0), ModelEvent::DidInsert]);
  assert_eq!(shared.read().count(), 1);
  assert_eq!(*shared.map_read(|m| &m.config().message_timeout_ms), 3500);
}
