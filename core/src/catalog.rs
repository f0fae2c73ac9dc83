// stagehand/src/catalog.rs

//! Defines `ElementCatalog`, a stage-keyed registry of element templates a
//! user can pick from when building a pipeline.
//! The catalog owns its templates; adding one to a `PipelineModel` copies it.

use crate::core::element::Element;
use crate::core::stage::Stage;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{event, Level};

/// Templates available for each stage, in registration order.
#[derive(Default)]
pub struct ElementCatalog {
  by_stage: BTreeMap<Stage, Vec<Box<dyn Element>>>,
}

impl ElementCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a template under its own stage.
  ///
  /// A template with the same stage and display name as an existing one
  /// replaces it in place.
  pub fn register<E: Element>(&mut self, template: E) {
    self.register_boxed(Box::new(template));
  }

  pub fn register_boxed(&mut self, template: Box<dyn Element>) {
    let stage = template.stage();
    let entries = self.by_stage.entry(stage).or_default();
    match entries.iter().position(|t| t.display_name() == template.display_name()) {
      Some(idx) => {
        event!(Level::WARN, %stage, name = template.display_name(), "Replacing catalog template.");
        entries[idx] = template;
      }
      None => {
        event!(Level::DEBUG, %stage, name = template.display_name(), "Registering catalog template.");
        entries.push(template);
      }
    }
  }

  /// Templates for `stage`, in registration order.
  pub fn templates(&self, stage: Stage) -> impl Iterator<Item = &dyn Element> + '_ {
    self
      .by_stage
      .get(&stage)
      .into_iter()
      .flat_map(|v| v.iter().map(|t| -> &dyn Element { t.as_ref() }))
  }

  /// Stages that have at least one template, in pipeline order.
  pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
    self.by_stage.iter().filter(|(_, v)| !v.is_empty()).map(|(s, _)| *s)
  }

  pub fn find(&self, stage: Stage, name: &str) -> Option<&dyn Element> {
    self.templates(stage).find(|t| t.display_name() == name)
  }

  /// Total number of templates across all stages.
  pub fn len(&self) -> usize {
    self.by_stage.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl fmt::Debug for ElementCatalog {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for (stage, entries) in &self.by_stage {
      let names: Vec<&str> = entries.iter().map(|t| t.display_name()).collect();
      map.entry(stage, &names);
    }
    map.finish()
  }
}
