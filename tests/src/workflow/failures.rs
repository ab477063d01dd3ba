use std::sync::Arc;
use std::sync::atomic::Ordering;

use bluecarbon_common::carbon::ecosystem::EcosystemType;
use bluecarbon_common::error::{Error, WorkflowStage};
use bluecarbon_common::project::event::EventKind;
use bluecarbon_common::project::verification::Decision;
use bluecarbon_common::project::{ProjectFilter, ProjectId, ProjectStatus};
use bluecarbon_common::ErrorKind;
use bluecarbon_core::ports::storage::ProjectRepository;
use bluecarbon_core::workflow::VerificationService;

use crate::support::{draft, verifier, FlakyLedger, TroubledStore};

struct Harness {
    service: VerificationService,
    store: Arc<TroubledStore>,
    ledger: Arc<FlakyLedger>,
    project_id: ProjectId,
}

async fn harness() -> Harness {
    let store = TroubledStore::new();
    let ledger = Arc::new(FlakyLedger::new());
    let service = VerificationService::new(store.clone(), ledger.clone());
    let project_id = service
        .register("owner-1", draft(60_000.0, EcosystemType::KelpForest))
        .await
        .unwrap()
        .project
        .id;

    Harness {
        service,
        store,
        ledger,
        project_id,
    }
}

fn stage_of(err: &Error) -> Option<WorkflowStage> {
    match err {
        Error::WorkflowFailed { stage, .. } => Some(*stage),
        _ => None,
    }
}

async fn stored_status(h: &Harness) -> ProjectStatus {
    h.store.inner.get(h.project_id).await.unwrap().unwrap().status
}

#[tokio::test]
async fn mint_failure_leaves_project_pending() {
    let h = harness().await;
    h.ledger.fail_mint.store(true, Ordering::SeqCst);

    let err = h
        .service
        .decide(h.project_id, &verifier("v"), Decision::Approve, "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
    assert_eq!(stage_of(&err), Some(WorkflowStage::Mint));
    assert_eq!(stored_status(&h).await, ProjectStatus::Pending);
    // only the registration made it onto the ledger
    assert_eq!(h.ledger.inner.events().unwrap().len(), 1);
}

#[tokio::test]
async fn event_failure_after_mint_stores_nothing() {
    let h = harness().await;
    h.ledger.fail_events_of(EventKind::Verification);

    let err = h
        .service
        .decide(h.project_id, &verifier("v"), Decision::Approve, "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
    assert_eq!(stage_of(&err), Some(WorkflowStage::LogEvent));
    assert_eq!(stored_status(&h).await, ProjectStatus::Pending);
    assert!(h.service.history(h.project_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn mint_event_failure_voids_verification_event() {
    let h = harness().await;
    h.ledger.fail_events_of(EventKind::NftMint);

    let err = h
        .service
        .decide(h.project_id, &verifier("v"), Decision::Approve, "")
        .await
        .unwrap_err();
    assert_eq!(stage_of(&err), Some(WorkflowStage::LogEvent));

    let events = h.ledger.inner.events().unwrap();
    let last = events.last().unwrap();
    assert_eq!(last.kind, EventKind::Verification);
    assert_eq!(last.payload["voided"], true);
    assert_eq!(last.payload["voided_tx_hash"], events[1].tx_hash.as_str());
    assert_eq!(stored_status(&h).await, ProjectStatus::Pending);
}

#[tokio::test]
async fn persistence_conflict_is_compensated() {
    let h = harness().await;
    h.store.interleave_writer.store(true, Ordering::SeqCst);

    let err = h
        .service
        .decide(h.project_id, &verifier("v"), Decision::Reject, "too small")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(stage_of(&err), Some(WorkflowStage::Persist));
    assert_eq!(stored_status(&h).await, ProjectStatus::Pending);
    assert!(h.service.history(h.project_id).await.unwrap().is_empty());

    // registration, verification, void
    let events = h.ledger.inner.events().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].payload["voided"], true);
    assert_eq!(events[2].payload["voided_tx_hash"], events[1].tx_hash.as_str());
}

#[tokio::test]
async fn storage_outage_fails_before_touching_the_ledger() {
    let h = harness().await;
    h.store.offline.store(true, Ordering::SeqCst);
    let calls_before = h.ledger.calls.load(Ordering::SeqCst);

    let err = h
        .service
        .decide(h.project_id, &verifier("v"), Decision::Approve, "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
    assert_eq!(stage_of(&err), Some(WorkflowStage::Load));
    assert_eq!(h.ledger.calls.load(Ordering::SeqCst), calls_before);
}

#[tokio::test]
async fn failed_insert_voids_registration_event() {
    let store = TroubledStore::new();
    store.reject_inserts.store(true, Ordering::SeqCst);
    let ledger = Arc::new(FlakyLedger::new());
    let service = VerificationService::new(store.clone(), ledger.clone());

    let err = service
        .register("owner-1", draft(60_000.0, EcosystemType::Seagrass))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
    assert_eq!(stage_of(&err), Some(WorkflowStage::Persist));
    assert!(store.inner.list(&ProjectFilter::default()).await.unwrap().is_empty());

    // registration, void
    let events = ledger.inner.events().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Registration);
    assert_eq!(events[1].kind, EventKind::Verification);
    assert_eq!(events[1].payload["voided"], true);
    assert_eq!(events[1].payload["voided_tx_hash"], events[0].tx_hash.as_str());
    assert_eq!(events[1].subject, events[0].subject);
}
