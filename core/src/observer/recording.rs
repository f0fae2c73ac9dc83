// stagehand/src/observer/recording.rs

//! Observers that keep state: `RecordingObserver` keeps the raw notification
//! stream, `ListMirror` rebuilds a row list from it.

use parking_lot::Mutex;
use std::time::Duration;

use super::sink::{MoveNotice, PipelineObserver};
use crate::core::element::ElementId;
use crate::model::PipelineModel;

/// One notification as received by an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
  Reset,
  WillInsert(usize),
  DidInsert,
  WillMove(MoveNotice),
  DidMove,
  WillRemove(usize),
  DidRemove,
  Message { text: String, duration: Duration },
}

impl ModelEvent {
  pub fn is_structural(&self) -> bool {
    !matches!(self, ModelEvent::Message { .. })
  }
}

/// Records every notification in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
  events: Mutex<Vec<ModelEvent>>,
}

impl RecordingObserver {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of all events so far.
  pub fn events(&self) -> Vec<ModelEvent> {
    self.events.lock().clone()
  }

  /// Returns and forgets all events so far.
  pub fn take(&self) -> Vec<ModelEvent> {
    std::mem::take(&mut *self.events.lock())
  }

  /// Texts of the transient messages received so far.
  pub fn messages(&self) -> Vec<String> {
    self
      .events
      .lock()
      .iter()
      .filter_map(|e| match e {
        ModelEvent::Message { text, .. } => Some(text.clone()),
        _ => None,
      })
      .collect()
  }

  fn push(&self, event: ModelEvent) {
    self.events.lock().push(event);
  }
}

impl PipelineObserver for RecordingObserver {
  fn model_reset(&self) {
    self.push(ModelEvent::Reset);
  }

  fn rows_will_insert(&self, index: usize) {
    self.push(ModelEvent::WillInsert(index));
  }

  fn rows_did_insert(&self) {
    self.push(ModelEvent::DidInsert);
  }

  fn rows_will_move(&self, notice: MoveNotice) {
    self.push(ModelEvent::WillMove(notice));
  }

  fn rows_did_move(&self) {
    self.push(ModelEvent::DidMove);
  }

  fn rows_will_remove(&self, index: usize) {
    self.push(ModelEvent::WillRemove(index));
  }

  fn rows_did_remove(&self) {
    self.push(ModelEvent::DidRemove);
  }

  fn show_transient_message(&self, text: &str, duration: Duration) {
    self.push(ModelEvent::Message {
      text: text.to_string(),
      duration,
    });
  }
}

#[derive(Debug, Clone, Copy)]
enum Pending {
  Insert(usize),
  Move(MoveNotice),
  Remove(usize),
}

#[derive(Debug, Default)]
struct MirrorState {
  // `None` marks a row announced by an insert whose id has not been fetched yet.
  rows: Vec<Option<ElementId>>,
  pending: Option<Pending>,
  stale: bool,
  violations: Vec<String>,
}

impl MirrorState {
  fn begin(&mut self, p: Pending) {
    if let Some(open) = self.pending.replace(p) {
      self.violations.push(format!("{:?} started while {:?} was still open", p, open));
    }
  }
}

/// Keeps its own copy of the row list, updated purely from notifications,
/// the way an incremental list view does.
///
/// Moves and removals are applied to the mirrored rows directly. Inserted rows
/// start out unresolved and are filled in by [`ListMirror::resolve`], which
/// mimics a view fetching the new row's data after the insert. After a reset
/// the next `resolve` rebuilds everything. Any break in the begin/end pairing
/// is recorded and reported by [`ListMirror::violations`].
#[derive(Debug, Default)]
pub struct ListMirror {
  state: Mutex<MirrorState>,
}

impl ListMirror {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fetches ids for unresolved rows (or everything after a reset).
  pub fn resolve(&self, model: &PipelineModel) {
    let mut state = self.state.lock();
    if state.stale {
      state.rows = model.ids().map(Some).collect();
      state.stale = false;
      return;
    }
    for (i, slot) in state.rows.iter_mut().enumerate() {
      if slot.is_none() {
        *slot = model.id_at(i);
      }
    }
  }

  /// Mirrored rows; unresolved rows are `None`.
  pub fn rows(&self) -> Vec<Option<ElementId>> {
    self.state.lock().rows.clone()
  }

  pub fn violations(&self) -> Vec<String> {
    self.state.lock().violations.clone()
  }
}

impl PipelineObserver for ListMirror {
  fn model_reset(&self) {
    let mut state = self.state.lock();
    if let Some(open) = state.pending.take() {
      state.violations.push(format!("reset while {:?} was open", open));
    }
    state.rows.clear();
    state.stale = true;
  }

  fn rows_will_insert(&self, index: usize) {
    self.state.lock().begin(Pending::Insert(index));
  }

  fn rows_did_insert(&self) {
    let mut guard = self.state.lock();
    let state = &mut *guard;
    match state.pending.take() {
      Some(Pending::Insert(index)) if index <= state.rows.len() => state.rows.insert(index, None),
      other => state.violations.push(format!("insert finished against {:?}", other)),
    }
  }

  fn rows_will_move(&self, notice: MoveNotice) {
    self.state.lock().begin(Pending::Move(notice));
  }

  fn rows_did_move(&self) {
    let mut guard = self.state.lock();
    let state = &mut *guard;
    match state.pending.take() {
      Some(Pending::Move(notice)) => {
        if !notice.apply(&mut state.rows) {
          state.violations.push(format!("invalid {:?} for {} rows", notice, state.rows.len()));
        }
      }
      other => state.violations.push(format!("move finished against {:?}", other)),
    }
  }

  fn rows_will_remove(&self, index: usize) {
    self.state.lock().begin(Pending::Remove(index));
  }

  fn rows_did_remove(&self) {
    let mut guard = self.state.lock();
    let state = &mut *guard;
    match state.pending.take() {
      Some(Pending::Remove(index)) if index < state.rows.len() => {
        state.rows.remove(index);
      }
      other => state.violations.push(format!("removal finished against {:?}", other)),
    }
  }
}
