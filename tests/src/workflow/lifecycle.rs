use std::sync::Arc;
use std::time::Duration;

use bluecarbon_common::carbon::ecosystem::EcosystemType;
use bluecarbon_common::project::event::EventKind;
use bluecarbon_common::project::verification::Decision;
use bluecarbon_common::project::{CarbonCalculation, ProjectFilter, ProjectSnapshot, ProjectStatus};
use bluecarbon_common::ErrorKind;
use bluecarbon_core::adapters::memory_store::InMemoryProjectStore;
use bluecarbon_core::adapters::mock_ledger::MockLedger;
use bluecarbon_core::anomaly::AREA_EXPANSION_FLAG;
use bluecarbon_core::workflow::VerificationService;

use crate::support::{draft, verifier};

fn snapshot(area_m2: f64, annual: f64) -> ProjectSnapshot {
    ProjectSnapshot {
        area_m2,
        ecosystem: EcosystemType::Mangrove,
        carbon_calculation: CarbonCalculation {
            annual_co2_absorption: annual,
            cumulative_co2_absorption: annual * 20.0,
            horizon_years: 20,
            calculated_at: chrono::DateTime::UNIX_EPOCH,
        },
    }
}

/// Register, assess against a suspicious history, review and approve.
#[tokio::test]
async fn full_lifecycle_with_flagged_history() {
    let ledger = Arc::new(MockLedger::instant());
    let store = Arc::new(InMemoryProjectStore::new());
    let service = VerificationService::new(store, ledger.clone());

    let registration = service
        .register("owner-7", draft(100_000.0, EcosystemType::Mangrove))
        .await
        .expect("registration failed");
    assert_eq!(registration.calculation.annual_co2_absorption, 71.05);
    assert_eq!(registration.calculation.cumulative_co2_absorption, 1421.0);
    assert_eq!(registration.calculation.equivalences.trees_planted, 22_736);

    let id = registration.project.id;
    let history = [snapshot(1_000.0, 0.71), snapshot(2_500.0, 1.78)];
    let assessment = service.assess(id, &history).await.unwrap();
    assert_eq!(assessment.report.flags, vec![AREA_EXPANSION_FLAG.to_string()]);
    assert_eq!(assessment.project.credibility_score.value(), 75);

    let reviewing = service.begin_review(id, &verifier("v-1")).await.unwrap();
    assert_eq!(reviewing.status, ProjectStatus::UnderReview);

    let outcome = service
        .decide(id, &verifier("v-1"), Decision::Approve, "site visit confirmed")
        .await
        .unwrap();
    assert_eq!(outcome.project.status, ProjectStatus::Approved);
    assert_eq!(outcome.project.credibility_score.value(), 75);

    let approved = service
        .projects(&ProjectFilter {
            status: Some(ProjectStatus::Approved),
            owner_id: None,
        })
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].token_id, outcome.record.token_id);

    let events = ledger.events().unwrap();
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Registration, EventKind::Verification, EventKind::NftMint]
    );
    assert_eq!(events[1].payload["token_id"], outcome.record.token_id.clone().unwrap());
    assert_eq!(events[1].payload["comments"], "site visit confirmed");
}

/// Two verifiers act on the same project at once. The store lets exactly one
/// through; the other sees the conflict.
#[tokio::test]
async fn concurrent_decisions_conflict() {
    let ledger = Arc::new(MockLedger::new((
        Duration::from_millis(20),
        Duration::from_millis(20),
    )));
    let store = Arc::new(InMemoryProjectStore::new());
    let service = VerificationService::new(store, ledger.clone());

    let id = service
        .register("owner-1", draft(80_000.0, EcosystemType::Seagrass))
        .await
        .unwrap()
        .project
        .id;

    let (alice, bob) = (verifier("alice"), verifier("bob"));
    let (first, second) = tokio::join!(
        service.decide(id, &alice, Decision::Approve, "looks good"),
        service.decide(id, &bob, Decision::Reject, "looks bad"),
    );

    let errors: Vec<_> = [&first, &second].into_iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(errors.len(), 1, "exactly one decision should lose");
    assert_eq!(errors[0].kind(), ErrorKind::Conflict);

    let history = service.history(id).await.unwrap();
    assert_eq!(history.len(), 1);

    // The loser's ledger entries were voided.
    let voided = ledger
        .events()
        .unwrap()
        .into_iter()
        .filter(|e| e.payload["voided"] == true)
        .count();
    assert!(voided >= 1);
}

#[tokio::test]
async fn rejected_projects_stay_rejected() {
    let service = VerificationService::new(
        Arc::new(InMemoryProjectStore::new()),
        Arc::new(MockLedger::instant()),
    );
    let id = service
        .register("owner-1", draft(20_000.0, EcosystemType::SaltMarsh))
        .await
        .unwrap()
        .project
        .id;

    service.decide(id, &verifier("v"), Decision::Reject, "").await.unwrap();

    let err = service.begin_review(id, &verifier("v")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
}
