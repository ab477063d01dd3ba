//! # Verification Workflow
//!
//! Implements the registry's use cases on top of the calculator, the anomaly
//! detector and the two outbound ports.
//!
//! Collaborator calls happen in a fixed order: mint (approvals only), then
//! ledger events, then persistence. Nothing is retried here; every
//! collaborator failure comes back as [`Error::WorkflowFailed`] naming the
//! stage it happened in, and the stored project is left untouched.
//!
//! The ledger is append-only. If persistence fails after events were logged,
//! the service logs a compensating `verification` event marking each of them
//! void and then returns the persistence error.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use bluecarbon_common::carbon::calculation::{AreaInput, CalculationResult};
use bluecarbon_common::error::WorkflowStage;
use bluecarbon_common::project::event::{EventKind, LedgerReceipt};
use bluecarbon_common::project::verification::{Actor, Decision, VerificationRecord};
use bluecarbon_common::project::{
    CarbonCalculation, Project, ProjectDraft, ProjectFilter, ProjectId, ProjectSnapshot,
    ProjectStatus,
};
use bluecarbon_common::{Error, Result};

use crate::anomaly::{self, AnomalyReport};
use crate::calculator;
use crate::ports::ledger::Ledger;
use crate::ports::storage::ProjectRepository;

#[derive(Debug, Clone)]
pub struct Registration {
    pub project: Project,
    pub calculation: CalculationResult,
    pub receipt: LedgerReceipt,
}

#[derive(Debug, Clone)]
pub struct ProjectAssessment {
    pub project: Project,
    pub report: AnomalyReport,
}

#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub project: Project,
    pub record: VerificationRecord,
    /// Receipt of the `verification` event.
    pub receipt: LedgerReceipt,
}

/// Application service for registering, reviewing and deciding on projects.
pub struct VerificationService {
    repository: Arc<dyn ProjectRepository>,
    ledger: Arc<dyn Ledger>,
}

impl VerificationService {
    pub fn new(repository: Arc<dyn ProjectRepository>, ledger: Arc<dyn Ledger>) -> Self {
        Self { repository, ledger }
    }

    /// Validates a draft, attaches its carbon calculation, logs a
    /// `registration` event and stores the project as `pending`.
    pub async fn register(&self, owner_id: &str, draft: ProjectDraft) -> Result<Registration> {
        let input = AreaInput::new(draft.area_m2, draft.ecosystem)
            .with_horizon(draft.horizon_years)
            .with_buffers(draft.buffers);
        let calculation = calculator::calculate(&input)?;

        let mut project = Project::from_draft(owner_id, draft)?;
        project.carbon_calculation = Some(CarbonCalculation::from(&calculation));

        let payload = json!({
            "name": project.name,
            "owner_id": project.owner_id,
            "area_m2": project.area_m2,
            "ecosystem": project.ecosystem,
            "annual_co2_absorption": calculation.annual_co2_absorption,
        });
        let subject = project.id.to_string();
        let receipt = self
            .ledger
            .log_event(EventKind::Registration, &subject, payload)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::LogEvent))?;
        project.tx_hash = Some(receipt.tx_hash.clone());

        let project = match self.repository.insert(project).await {
            Ok(project) => project,
            Err(e) => {
                self.compensate(&subject, std::slice::from_ref(&receipt), &e).await;
                return Err(e.in_stage(WorkflowStage::Persist));
            }
        };

        info!(project = %project.id, owner = owner_id, "project registered");
        Ok(Registration {
            project,
            calculation,
            receipt,
        })
    }

    /// Moves a `pending` project to `under_review`.
    pub async fn begin_review(&self, project_id: ProjectId, verifier: &Actor) -> Result<Project> {
        ensure_verifier(verifier)?;
        let mut project = self.load(project_id).await?;
        project.status = project.status.transition(ProjectStatus::UnderReview)?;

        let project = self
            .repository
            .update(project)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::Persist))?;

        info!(project = %project_id, verifier = %verifier.id, "review started");
        Ok(project)
    }

    /// Runs the anomaly detector on the stored project, lowers its
    /// credibility score by the resulting penalty and keeps the flags for the
    /// next decision.
    ///
    /// `history` is ordered oldest to newest.
    pub async fn assess(
        &self,
        project_id: ProjectId,
        history: &[ProjectSnapshot],
    ) -> Result<ProjectAssessment> {
        let mut project = self.load(project_id).await?;
        let report = anomaly::detect(&project.snapshot()?, history)?;

        if report.credibility_impact > 0 || project.anomaly_flags != report.flags {
            project.credibility_score = report.apply_to(project.credibility_score);
            project.anomaly_flags = report.flags.clone();
            project = self
                .repository
                .update(project)
                .await
                .map_err(|e| e.in_stage(WorkflowStage::Persist))?;
        }

        info!(
            project = %project_id,
            credibility = project.credibility_score.value(),
            flags = report.flags.len(),
            "project assessed"
        );
        Ok(ProjectAssessment { project, report })
    }

    /// Approves or rejects a `pending` / `under_review` project.
    ///
    /// Approvals mint a credit token first. Both outcomes log a
    /// `verification` event; approvals also log an `nft_mint` event. The new
    /// status and the decision record are persisted together, last.
    pub async fn decide(
        &self,
        project_id: ProjectId,
        verifier: &Actor,
        decision: Decision,
        comments: &str,
    ) -> Result<VerificationOutcome> {
        ensure_verifier(verifier)?;
        let mut project = self.load(project_id).await?;
        let next = project.status.transition(decision.target_status())?;
        let subject = project_id.to_string();

        let mint = match decision {
            Decision::Approve => Some(
                self.ledger
                    .mint(&subject)
                    .await
                    .map_err(|e| e.in_stage(WorkflowStage::Mint))?,
            ),
            Decision::Reject => None,
        };

        let payload = json!({
            "decision": decision,
            "verifier_id": verifier.id,
            "comments": comments,
            "token_id": mint.as_ref().map(|m| &m.token_id),
            "mint_tx_hash": mint.as_ref().map(|m| &m.tx_hash),
            "anomaly_flags": project.anomaly_flags,
        });
        let receipt = match self.ledger.log_event(EventKind::Verification, &subject, payload).await {
            Ok(receipt) => receipt,
            Err(e) => {
                if let Some(mint) = &mint {
                    warn!(token = %mint.token_id, "token minted but verification was not logged");
                }
                return Err(e.in_stage(WorkflowStage::LogEvent));
            }
        };
        let mut logged = vec![receipt.clone()];

        if let Some(mint) = &mint {
            let payload = json!({
                "token_id": mint.token_id,
                "tx_hash": mint.tx_hash,
                "block_number": mint.block_number,
            });
            match self.ledger.log_event(EventKind::NftMint, &subject, payload).await {
                Ok(receipt) => logged.push(receipt),
                Err(e) => {
                    self.compensate(&subject, &logged, &e).await;
                    return Err(e.in_stage(WorkflowStage::LogEvent));
                }
            }
        }

        let record = VerificationRecord {
            project_id,
            verifier_id: verifier.id.clone(),
            decision,
            comments: comments.to_string(),
            decided_at: Utc::now(),
            token_id: mint.as_ref().map(|m| m.token_id.clone()),
            tx_hash: mint.as_ref().map(|m| m.tx_hash.clone()),
            anomaly_flags: project.anomaly_flags.clone(),
        };

        project.status = next;
        if let Some(mint) = &mint {
            project.token_id = Some(mint.token_id.clone());
            project.tx_hash = Some(mint.tx_hash.clone());
        }

        let project = match self.repository.apply_decision(project, record.clone()).await {
            Ok(project) => project,
            Err(e) => {
                self.compensate(&subject, &logged, &e).await;
                return Err(e.in_stage(WorkflowStage::Persist));
            }
        };

        info!(
            project = %project_id,
            verifier = %verifier.id,
            status = %project.status,
            "verification decided"
        );
        Ok(VerificationOutcome {
            project,
            record,
            receipt,
        })
    }

    /// Logs a `calculation` event for a calculator run.
    pub async fn record_calculation(
        &self,
        subject: &str,
        result: &CalculationResult,
    ) -> Result<LedgerReceipt> {
        let payload = serde_json::to_value(result)
            .map_err(|e| Error::invalid_input(format!("unserializable calculation: {e}")))?;
        self.ledger
            .log_event(EventKind::Calculation, subject, payload)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::LogEvent))
    }

    pub async fn history(&self, project_id: ProjectId) -> Result<Vec<VerificationRecord>> {
        self.repository
            .verification_history(project_id)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::Load))
    }

    pub async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        self.repository
            .list(filter)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::Load))
    }

    async fn load(&self, project_id: ProjectId) -> Result<Project> {
        self.repository
            .get(project_id)
            .await
            .map_err(|e| e.in_stage(WorkflowStage::Load))?
            .ok_or_else(|| Error::invalid_input(format!("unknown project {project_id}")))
    }

    /// Marks already-logged events void. Failures here are reported but do
    /// not replace the error that triggered the compensation.
    async fn compensate(&self, subject: &str, logged: &[LedgerReceipt], cause: &Error) {
        for receipt in logged.iter().rev() {
            let payload = json!({
                "voided": true,
                "voided_tx_hash": receipt.tx_hash,
                "reason": cause.to_string(),
            });
            match self.ledger.log_event(EventKind::Verification, subject, payload).await {
                Ok(void) => warn!(
                    subject,
                    voided = %receipt.tx_hash,
                    tx = %void.tx_hash,
                    "ledger event voided"
                ),
                Err(e) => error!(
                    subject,
                    voided = %receipt.tx_hash,
                    "could not void ledger event: {e}"
                ),
            }
        }
    }
}

fn ensure_verifier(actor: &Actor) -> Result<()> {
    if !actor.can_verify() {
        return Err(Error::invalid_input(format!(
            "user {} is not authorized to verify projects",
            actor.id
        )));
    }
    Ok(())
}
