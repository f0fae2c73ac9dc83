// stagehand/src/core/shared.rs
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::model::PipelineModel;

/// A shared handle to a [`PipelineModel`] using parking_lot::RwLock.
///
/// Every mutation on the model sends its begin/end notifications while the
/// write guard is held, so a reader can never see a half-applied change.
/// Observers are called with the lock held and MUST NOT try to lock the same
/// `SharedModel` again.
#[derive(Debug)]
pub struct SharedModel(Arc<RwLock<PipelineModel>>);

impl SharedModel {
  pub fn new(model: PipelineModel) -> Self {
    SharedModel(Arc::new(RwLock::new(model)))
  }

  /// Acquires a read lock, blocking while a writer holds the model.
  pub fn read(&self) -> RwLockReadGuard<'_, PipelineModel> {
    self.0.read()
  }

  /// Acquires the write lock. All edits go through this guard.
  pub fn write(&self) -> RwLockWriteGuard<'_, PipelineModel> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, PipelineModel>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, PipelineModel>> {
    self.0.try_write()
  }

  // Example: shared.map_read(|m| m.config())
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&PipelineModel) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }
}

impl Clone for SharedModel {
  fn clone(&self) -> Self {
    SharedModel(Arc::clone(&self.0))
  }
}

impl From<PipelineModel> for SharedModel {
  fn from(model: PipelineModel) -> Self {
    Self::new(model)
  }
}
