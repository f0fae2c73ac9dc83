// stagehand/src/config.rs

//! Model configuration: which stages are singletons, which are required
//! before a run, and how long transient messages stay on screen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::core::stage::Stage;
use crate::error::StagehandResult;

/// Default display time of transient messages, in milliseconds.
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 3500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
  /// Stages allowing at most one instance in the pipeline.
  pub singleton_stages: BTreeSet<Stage>,

  /// Stages that must be present before the pipeline can run.
  pub required_stages: BTreeSet<Stage>,

  /// How long rejection messages are shown, in milliseconds.
  pub message_timeout_ms: u64,
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      singleton_stages: [Stage::Extractor, Stage::Sorter].into_iter().collect(),
      required_stages: [Stage::Extractor, Stage::Sorter].into_iter().collect(),
      message_timeout_ms: DEFAULT_MESSAGE_TIMEOUT_MS,
    }
  }
}

impl ModelConfig {
  /// Parses a config from TOML. Missing keys take their defaults.
  ///
  /// ```toml
  /// singleton_stages = ["extractor", "sorter"]
  /// required_stages = ["extractor"]
  /// message_timeout_ms = 5000
  /// ```
  pub fn from_toml_str(s: &str) -> StagehandResult<Self> {
    Ok(toml::from_str(s)?)
  }

  pub fn with_singleton_stages<I: IntoIterator<Item = Stage>>(mut self, stages: I) -> Self {
    self.singleton_stages = stages.into_iter().collect();
    self
  }

  pub fn with_required_stages<I: IntoIterator<Item = Stage>>(mut self, stages: I) -> Self {
    self.required_stages = stages.into_iter().collect();
    self
  }

  pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
    self.message_timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
    self
  }

  pub fn is_singleton(&self, stage: Stage) -> bool {
    self.singleton_stages.contains(&stage)
  }

  pub fn message_timeout(&self) -> Duration {
    Duration::from_millis(self.message_timeout_ms)
  }
}
