// stagehand/src/core/stage.rs

//! Defines the processing stages an element can belong to and their ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a pipeline element.
///
/// Stages are totally ordered: `Extractor < PreProcessor < Sorter < PostProcessor`.
/// The ordering is the sole key used to position an element across stage
/// groups, so it is spelled out in [`Stage::rank`] rather than left to the
/// order of the variants. `Ord` is implemented on top of `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  /// Reads a recording into the pipeline.
  Extractor,
  /// Filters or otherwise conditions the recording.
  PreProcessor,
  /// Sorts spikes.
  Sorter,
  /// Works on sorting output (curation, export).
  PostProcessor,
}

impl Stage {
  /// Position of the stage within a pipeline. Lower ranks run first.
  pub const fn rank(self) -> u8 {
    match self {
      Stage::Extractor => 0,
      Stage::PreProcessor => 1,
      Stage::Sorter => 2,
      Stage::PostProcessor => 3,
    }
  }

  /// All stages in pipeline order.
  pub const fn all() -> [Stage; 4] {
    [Stage::Extractor, Stage::PreProcessor, Stage::Sorter, Stage::PostProcessor]
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Stage::Extractor => "Extractor",
      Stage::PreProcessor => "Pre-Processor",
      Stage::Sorter => "Sorter",
      Stage::PostProcessor => "Post-Processor",
    }
  }

  /// Four-letter code used for compact labels and resource names.
  pub fn short_code(self) -> &'static str {
    match self {
      Stage::Extractor => "EXTR",
      Stage::PreProcessor => "PREP",
      Stage::Sorter => "SORT",
      Stage::PostProcessor => "POST",
    }
  }

  /// Stage-specific decoration for list rows.
  pub fn decoration(self) -> Decoration {
    Decoration(self)
  }
}

impl PartialOrd for Stage {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Stage {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.rank().cmp(&other.rank())
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.display_name())
  }
}

/// Opaque handle to the icon a UI shows next to an element.
///
/// Keyed purely by stage; the UI layer maps [`Decoration::resource_key`] to
/// whatever image type it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoration(Stage);

impl Decoration {
  pub fn stage(self) -> Stage {
    self.0
  }

  pub fn resource_key(self) -> &'static str {
    match self.0 {
      Stage::Extractor => "stage/EXTR.png",
      Stage::PreProcessor => "stage/PREP.png",
      Stage::Sorter => "stage/SORT.png",
      Stage::PostProcessor => "stage/POST.png",
    }
  }
}
