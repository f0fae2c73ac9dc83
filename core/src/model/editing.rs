// stagehand/src/model/editing.rs

//! Contains the four structural edits on a `PipelineModel`: clear, add,
//! move (up/down), and delete. Each applied edit is bracketed by exactly one
//! begin/end notification pair; a rejected edit changes nothing and only
//! sends a transient message.

use tracing::{event, instrument, Level};

use super::definition::{PipelineModel, Slot};
use crate::core::control::{EditOutcome, Rejection};
use crate::core::element::{Element, ElementId};
use crate::core::stage::Stage;
use crate::error::{StagehandError, StagehandResult};
use crate::observer::MoveNotice;

impl PipelineModel {
  /// Removes every element. Always succeeds and always announces a reset.
  #[instrument(name = "PipelineModel::clear", skip_all, fields(count = self.slots.len()))]
  pub fn clear(&mut self) {
    self.slots.clear();
    self.observer.model_reset();
    event!(Level::DEBUG, "Pipeline cleared.");
  }

  /// Inserts a copy of `template` at the end of its stage group.
  ///
  /// The copy's own stage decides where it goes, so an element whose
  /// `clone_element` reports a different stage still lands in sorted order.
  ///
  /// Rejected with [`Rejection::SingletonStageOccupied`] if the copy's
  /// stage is a singleton stage that already has an instance. The caller
  /// keeps `template`; later changes to it do not reach the pipeline.
  #[instrument(
    name = "PipelineModel::add",
    skip_all,
    fields(element = template.display_name(), stage = %template.stage())
  )]
  pub fn add(&mut self, template: &dyn Element) -> EditOutcome {
    // Copy first so a panicking clone never leaves an open insert bracket.
    let element = template.clone_element();

    // Ordering and singleton checks follow the instance actually stored.
    let stage = element.stage();
    if stage != template.stage() {
      event!(
        Level::ERROR,
        template_stage = %template.stage(),
        copy_stage = %stage,
        "clone_element changed the stage; placing the copy by its own stage."
      );
    }
    if self.config.is_singleton(stage) && self.has_instance(stage) {
      return self.reject(Rejection::SingletonStageOccupied(stage));
    }

    let index = self.insertion_index(stage);
    let id = self.allocate_id();

    self.observer.rows_will_insert(index);
    self.slots.insert(index, Slot { id, element });
    self.observer.rows_did_insert();

    event!(Level::DEBUG, %id, index, "Element added.");
    EditOutcome::Applied
  }

  /// Swaps the element with its predecessor, if that predecessor is in the
  /// same stage group. Otherwise rejected with [`Rejection::AtTopOfStage`].
  ///
  /// Announced as `MoveNotice::single(i, i - 1)`.
  ///
  /// # Errors
  /// [`StagehandError::ElementNotFound`] if `id` is not in the pipeline.
  #[instrument(name = "PipelineModel::move_up", skip(self))]
  pub fn move_up(&mut self, id: ElementId) -> StagehandResult<EditOutcome> {
    let i = self.require_index(id)?;
    if i == 0 || self.slots[i - 1].stage() != self.slots[i].stage() {
      return Ok(self.reject(Rejection::AtTopOfStage));
    }

    self.observer.rows_will_move(MoveNotice::single(i, i - 1));
    self.slots.swap(i, i - 1);
    self.observer.rows_did_move();

    event!(Level::DEBUG, from = i, to = i - 1, "Element moved up.");
    Ok(EditOutcome::Applied)
  }

  /// Swaps the element with its successor, if that successor is in the
  /// same stage group. Otherwise rejected with [`Rejection::AtBottomOfStage`].
  ///
  /// Announced as the successor moving up, `MoveNotice::single(i + 1, i)`.
  /// The literal downward form would be `(i, i, i + 2)` in list-view terms;
  /// both produce the same swap, the upward form is the one views agree on.
  ///
  /// # Errors
  /// [`StagehandError::ElementNotFound`] if `id` is not in the pipeline.
  #[instrument(name = "PipelineModel::move_down", skip(self))]
  pub fn move_down(&mut self, id: ElementId) -> StagehandResult<EditOutcome> {
    let i = self.require_index(id)?;
    if i + 1 >= self.slots.len() || self.slots[i + 1].stage() != self.slots[i].stage() {
      return Ok(self.reject(Rejection::AtBottomOfStage));
    }

    self.observer.rows_will_move(MoveNotice::single(i + 1, i));
    self.slots.swap(i, i + 1);
    self.observer.rows_did_move();

    event!(Level::DEBUG, from = i, to = i + 1, "Element moved down.");
    Ok(EditOutcome::Applied)
  }

  /// Removes the instance tagged `id` and hands it back.
  ///
  /// # Errors
  /// [`StagehandError::ElementNotFound`] if `id` is not in the pipeline.
  #[instrument(name = "PipelineModel::delete", skip(self))]
  pub fn delete(&mut self, id: ElementId) -> StagehandResult<Box<dyn Element>> {
    let index = self.require_index(id)?;

    self.observer.rows_will_remove(index);
    let slot = self.slots.remove(index);
    self.observer.rows_did_remove();

    event!(Level::DEBUG, index, "Element deleted.");
    Ok(slot.element)
  }

  // --- Helpers ---

  /// First index whose stage sorts after `stage`.
  fn insertion_index(&self, stage: Stage) -> usize {
    self.slots.partition_point(|s| s.stage() <= stage)
  }

  fn allocate_id(&mut self) -> ElementId {
    let id = ElementId(self.next_id);
    self.next_id += 1;
    id
  }

  fn require_index(&self, id: ElementId) -> StagehandResult<usize> {
    self.index_of(id).ok_or_else(|| {
      // A view holding a stale id is out of sync with the model.
      event!(Level::ERROR, %id, "Element not found in pipeline.");
      StagehandError::ElementNotFound { id }
    })
  }

  fn reject(&self, rejection: Rejection) -> EditOutcome {
    event!(Level::INFO, reason = ?rejection, "Edit rejected.");
    self
      .observer
      .show_transient_message(rejection.message(), self.config.message_timeout());
    EditOutcome::Rejected(rejection)
  }
}
