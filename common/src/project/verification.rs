use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::project::{ProjectId, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> ProjectStatus {
        match self {
            Decision::Approve => ProjectStatus::Approved,
            Decision::Reject => ProjectStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for Decision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approve" | "approved" => Ok(Decision::Approve),
            "reject" | "rejected" => Ok(Decision::Reject),
            _ => Err(Error::invalid_input(format!("unknown decision: {s}"))),
        }
    }
}

/// The stored outcome of a verifier's decision.
///
/// Rejections carry no minting output, so `token_id` and `tx_hash` are only
/// ever set for approvals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub project_id: ProjectId,
    pub verifier_id: String,
    pub decision: Decision,
    pub comments: String,
    pub decided_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Anomaly flags the project carried when the decision was taken.
    #[serde(default)]
    pub anomaly_flags: Vec<String>,
}

/// Who is acting, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectOwner,
    Verifier,
    Admin,
}

impl Actor {
    pub fn can_verify(&self) -> bool {
        matches!(self.role, Role::Verifier | Role::Admin)
    }
}
