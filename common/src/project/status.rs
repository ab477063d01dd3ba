use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Review state of a project.
///
/// ```text
/// pending ──► under_review ──► approved
///    │                    └──► rejected
///    └──────────────────────► approved | rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Approved | ProjectStatus::Rejected)
    }

    pub fn can_transition_to(self, next: ProjectStatus) -> bool {
        use ProjectStatus::*;
        matches!(
            (self, next),
            (Pending, UnderReview)
                | (Pending, Approved)
                | (Pending, Rejected)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
        )
    }

    /// Returns `next` if the move is allowed.
    pub fn transition(self, next: ProjectStatus) -> Result<ProjectStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(Error::InvalidStateTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::UnderReview => "under_review",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
