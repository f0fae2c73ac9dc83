// stagehand/src/observer/sink.rs

//! Defines the `PipelineObserver` notification sink and the `MoveNotice`
//! describing a row move, plus the stock sinks that need no state.

use std::sync::Arc;
use std::time::Duration;
use tracing::{event, Level};

/// A block of rows moving inside the list.
///
/// Uses the list-view convention: rows `source_first..=source_last` are
/// placed before the row currently at `destination`, with every index taken
/// *before* the move. Moving row `i` one step down is therefore `(i, i, i + 2)`,
/// not `(i, i, i + 1)`; the model sidesteps that asymmetry by announcing a
/// downward swap as the successor moving up, `(i + 1, i + 1, i)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveNotice {
  pub source_first: usize,
  pub source_last: usize,
  pub destination: usize,
}

impl MoveNotice {
  /// Single-row move.
  pub fn single(source: usize, destination: usize) -> Self {
    Self {
      source_first: source,
      source_last: source,
      destination,
    }
  }

  /// Whether the notice describes a real move in a list of `len` rows.
  /// A destination inside or right after the source block is a no-op and
  /// is rejected the same way list views reject it.
  pub fn is_valid_for(&self, len: usize) -> bool {
    self.source_first <= self.source_last
      && self.source_last < len
      && self.destination <= len
      && !(self.source_first..=self.source_last + 1).contains(&self.destination)
  }

  /// Applies the move to `rows` with exactly the semantics above.
  /// Returns `false` and leaves `rows` alone if the notice is not valid.
  pub fn apply<T>(&self, rows: &mut Vec<T>) -> bool {
    if !self.is_valid_for(rows.len()) {
      return false;
    }
    let block: Vec<T> = rows.drain(self.source_first..=self.source_last).collect();
    let insert_at = if self.destination > self.source_last {
      self.destination - block.len()
    } else {
      self.destination
    };
    rows.splice(insert_at..insert_at, block);
    true
  }
}

/// Receives structural change notifications and user-facing messages from a
/// [`PipelineModel`](crate::PipelineModel).
///
/// Every structural change arrives as a matched `will`/`did` pair around the
/// single mutation, except a full reset which is announced once, after the
/// model has been emptied. All methods default to doing nothing.
pub trait PipelineObserver: Send + Sync {
  /// The whole list was invalidated and must be rebuilt from the model.
  fn model_reset(&self) {}

  /// A row is about to be inserted at `index`.
  fn rows_will_insert(&self, _index: usize) {}
  fn rows_did_insert(&self) {}

  fn rows_will_move(&self, _notice: MoveNotice) {}
  fn rows_did_move(&self) {}

  /// The row at `index` is about to be removed.
  fn rows_will_remove(&self, _index: usize) {}
  fn rows_did_remove(&self) {}

  /// Shows `text` to the user for `duration` (a status bar line, a toast).
  fn show_transient_message(&self, _text: &str, _duration: Duration) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
  fn model_reset(&self) {
    event!(Level::DEBUG, "Model reset.");
  }

  fn rows_will_insert(&self, index: usize) {
    event!(Level::DEBUG, index, "Row insert starting.");
  }

  fn rows_did_insert(&self) {
    event!(Level::TRACE, "Row insert finished.");
  }

  fn rows_will_move(&self, notice: MoveNotice) {
    event!(
      Level::DEBUG,
      source_first = notice.source_first,
      source_last = notice.source_last,
      destination = notice.destination,
      "Row move starting."
    );
  }

  fn rows_did_move(&self) {
    event!(Level::TRACE, "Row move finished.");
  }

  fn rows_will_remove(&self, index: usize) {
    event!(Level::DEBUG, index, "Row removal starting.");
  }

  fn rows_did_remove(&self) {
    event!(Level::TRACE, "Row removal finished.");
  }

  fn show_transient_message(&self, text: &str, duration: Duration) {
    event!(Level::INFO, duration_ms = duration.as_millis() as u64, "{}", text);
  }
}

/// Forwards every notification to each member, in order.
#[derive(Default, Clone)]
pub struct ObserverGroup {
  members: Vec<Arc<dyn PipelineObserver>>,
}

impl ObserverGroup {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
    self.members.push(observer);
    self
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

impl PipelineObserver for ObserverGroup {
  fn model_reset(&self) {
    self.members.iter().for_each(|o| o.model_reset());
  }

  fn rows_will_insert(&self, index: usize) {
    self.members.iter().for_each(|o| o.rows_will_insert(index));
  }

  fn rows_did_insert(&self) {
    self.members.iter().for_each(|o| o.rows_did_insert());
  }

  fn rows_will_move(&self, notice: MoveNotice) {
    self.members.iter().for_each(|o| o.rows_will_move(notice));
  }

  fn rows_did_move(&self) {
    self.members.iter().for_each(|o| o.rows_did_move());
  }

  fn rows_will_remove(&self, index: usize) {
    self.members.iter().for_each(|o| o.rows_will_remove(index));
  }

  fn rows_did_remove(&self) {
    self.members.iter().for_each(|o| o.rows_did_remove());
  }

  fn show_transient_message(&self, text: &str, duration: Duration) {
    self.members.iter().for_each(|o| o.show_transient_message(text, duration));
  }
}
