// stagehand/src/core/control.rs

//! Defines the outcome of an edit on the pipeline model.

use super::stage::Stage;

/// Why an edit was turned down. Each reason is something the user can fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
  /// The element's stage allows a single instance and one is already present.
  SingletonStageOccupied(Stage),
  /// The element is already first within its stage group.
  AtTopOfStage,
  /// The element is already last within its stage group.
  AtBottomOfStage,
}

impl Rejection {
  /// Text shown to the user through the transient message channel.
  pub fn message(&self) -> &'static str {
    match self {
      Rejection::SingletonStageOccupied(_) => "Only one instance of that element type allowed",
      Rejection::AtTopOfStage => "Cannot move element any higher",
      Rejection::AtBottomOfStage => "Cannot move element any lower",
    }
  }
}

/// Result of an edit that may be turned down without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
  /// The sequence changed and the matching notifications were sent.
  Applied,
  /// Nothing changed; the user was told why.
  Rejected(Rejection),
}

impl EditOutcome {
  pub fn is_applied(&self) -> bool {
    matches!(self, EditOutcome::Applied)
  }

  pub fn rejection(&self) -> Option<Rejection> {
    match self {
      EditOutcome::Applied => None,
      EditOutcome::Rejected(r) => Some(*r),
    }
  }
}
