//! # Errors
//!
//! A single error enum shared by the engine and the workflow.
//!
//! Every variant maps onto one [`ErrorKind`], so callers can branch on the
//! category (e.g. offer a "try again" action for [`ErrorKind::CollaboratorUnavailable`])
//! without matching on messages.

use std::fmt;

use thiserror::Error;

use crate::project::ProjectStatus;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidStateTransition,
    CollaboratorUnavailable,
    Conflict,
}

/// The workflow step that was running when a collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Load,
    Mint,
    LogEvent,
    Persist,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Load => "load",
            WorkflowStage::Mint => "mint",
            WorkflowStage::LogEvent => "log event",
            WorkflowStage::Persist => "persist",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot move project from '{from}' to '{to}'")]
    InvalidStateTransition {
        from: ProjectStatus,
        to: ProjectStatus,
    },

    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable {
        collaborator: &'static str,
        reason: String,
    },

    #[error("conflicting update on {subject}: expected version {expected}, found {found}")]
    Conflict {
        subject: String,
        expected: u64,
        found: u64,
    },

    #[error("workflow failed during {stage}: {source}")]
    WorkflowFailed {
        stage: WorkflowStage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn unavailable(collaborator: &'static str, reason: impl fmt::Display) -> Self {
        Error::CollaboratorUnavailable {
            collaborator,
            reason: reason.to_string(),
        }
    }

    /// Wraps a collaborator failure with the workflow stage it happened in.
    pub fn in_stage(self, stage: WorkflowStage) -> Self {
        match self {
            // Already attributed to a stage.
            e @ Error::WorkflowFailed { .. } => e,
            e => Error::WorkflowFailed {
                stage,
                source: Box::new(e),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            Error::CollaboratorUnavailable { .. } => ErrorKind::CollaboratorUnavailable,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::WorkflowFailed { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_failure_reports_source_kind() {
        let err = Error::Conflict {
            subject: "project".into(),
            expected: 1,
            found: 2,
        }
        .in_stage(WorkflowStage::Persist);

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().starts_with("workflow failed during persist"));
    }

    #[test]
    fn stage_is_not_wrapped_twice() {
        let err = Error::unavailable("ledger", "timeout")
            .in_stage(WorkflowStage::Mint)
            .in_stage(WorkflowStage::Persist);

        match err {
            Error::WorkflowFailed { stage, .. } => assert_eq!(stage, WorkflowStage::Mint),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
