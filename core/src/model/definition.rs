// stagehand/src/model/definition.rs

//! Contains the `PipelineModel` struct definition, its construction, and the
//! read-only query surface used by views.

use crate::config::ModelConfig;
use crate::core::element::{Element, ElementId};
use crate::core::stage::{Decoration, Stage};
use crate::observer::{NullObserver, PipelineObserver};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// One pipeline-owned element instance and its lookup tag.
pub(crate) struct Slot {
  pub(crate) id: ElementId,
  pub(crate) element: Box<dyn Element>,
}

impl Slot {
  pub(crate) fn element(&self) -> &dyn Element {
    self.element.as_ref()
  }

  pub(crate) fn stage(&self) -> Stage {
    self.element.stage()
  }
}

/// Which facet of a row a view is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
  Display,
  Edit,
  Decoration,
  /// The full element object, separate from its display fields.
  Element,
  Id,
}

/// A facet of a row, as returned by [`PipelineModel::data`].
#[derive(Debug, Clone, Copy)]
pub enum RowData<'a> {
  Name(&'a str),
  Decoration(Decoration),
  Element(&'a dyn Element),
  Id(ElementId),
}

/// The ordered, stage-grouped sequence of element instances behind a
/// pipeline editor.
///
/// Invariants, held after every operation:
/// - elements are sorted by non-decreasing [`Stage`]; within a stage, order
///   is whatever adds and moves produced;
/// - a singleton stage (see [`ModelConfig::singleton_stages`]) has at most one
///   element;
/// - moves never take an element out of its stage group.
///
/// Mutations live in `editing.rs`, running in `execution.rs`.
pub struct PipelineModel {
  /// Sorted by stage, see the type docs.
  pub(crate) slots: Vec<Slot>,
  pub(crate) next_id: u64,
  pub(crate) config: ModelConfig,
  pub(crate) observer: Arc<dyn PipelineObserver>,
}

impl PipelineModel {
  /// Creates an empty model with the default configuration.
  pub fn new(observer: Arc<dyn PipelineObserver>) -> Self {
    Self::with_config(ModelConfig::default(), observer)
  }

  pub fn with_config(config: ModelConfig, observer: Arc<dyn PipelineObserver>) -> Self {
    Self {
      slots: Vec::new(),
      next_id: 0,
      config,
      observer,
    }
  }

  /// An empty model whose notifications go nowhere.
  pub fn detached() -> Self {
    Self::new(Arc::new(NullObserver))
  }

  pub fn config(&self) -> &ModelConfig {
    &self.config
  }

  // --- Query surface ---

  pub fn count(&self) -> usize {
    self.slots.len()
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn at(&self, index: usize) -> Option<&dyn Element> {
    self.slots.get(index).map(Slot::element)
  }

  pub fn id_at(&self, index: usize) -> Option<ElementId> {
    self.slots.get(index).map(|s| s.id)
  }

  pub fn index_of(&self, id: ElementId) -> Option<usize> {
    self.slots.iter().position(|s| s.id == id)
  }

  pub fn contains(&self, id: ElementId) -> bool {
    self.index_of(id).is_some()
  }

  pub fn get(&self, id: ElementId) -> Option<&dyn Element> {
    self.index_of(id).map(|i| self.slots[i].element())
  }

  /// Mutable access for editing an instance's parameters. The stage cannot
  /// change through this, so ordering is unaffected.
  pub fn get_mut(&mut self, id: ElementId) -> Option<&mut (dyn Element + 'static)> {
    let index = self.index_of(id)?;
    Some(self.slots[index].element.as_mut())
  }

  pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
    self.slots.iter().map(|s| s.id)
  }

  pub fn iter(&self) -> impl Iterator<Item = (ElementId, &dyn Element)> + '_ {
    self.slots.iter().map(|s| (s.id, s.element()))
  }

  pub fn display_names(&self) -> Vec<String> {
    self.slots.iter().map(|s| s.element.display_name().to_string()).collect()
  }

  pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
    self.slots.iter().map(Slot::stage)
  }

  pub fn has_instance(&self, stage: Stage) -> bool {
    self.slots.iter().any(|s| s.stage() == stage)
  }

  /// Number of elements per stage; absent stages are left out.
  pub fn stage_counts(&self) -> BTreeMap<Stage, usize> {
    let mut counts = BTreeMap::new();
    for stage in self.stages() {
      *counts.entry(stage).or_insert(0) += 1;
    }
    counts
  }

  /// Index range covered by `stage`'s group. Empty (at the position the
  /// group would occupy) when the stage has no elements.
  pub fn stage_range(&self, stage: Stage) -> Range<usize> {
    let start = self.slots.partition_point(|s| s.stage() < stage);
    let end = self.slots.partition_point(|s| s.stage() <= stage);
    start..end
  }

  /// Retrieves one facet of the row at `index`, or `None` out of range.
  pub fn data(&self, index: usize, role: RowRole) -> Option<RowData<'_>> {
    let slot = self.slots.get(index)?;
    let data = match role {
      RowRole::Display | RowRole::Edit => RowData::Name(slot.element.display_name()),
      RowRole::Decoration => RowData::Decoration(slot.stage().decoration()),
      RowRole::Element => RowData::Element(slot.element()),
      RowRole::Id => RowData::Id(slot.id),
    };
    Some(data)
  }
}

impl Default for PipelineModel {
  fn default() -> Self {
    Self::detached()
  }
}

// The observer has no Debug; show the sequence and config.
impl fmt::Debug for PipelineModel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PipelineModel")
      .field(
        "elements",
        &self
          .slots
          .iter()
          .map(|s| (s.id, s.stage(), s.element.display_name()))
          .collect::<Vec<_>>(),
      )
      .field("config", &self.config)
      .finish()
  }
}
