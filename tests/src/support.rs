use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use bluecarbon_common::carbon::buffers::BufferSet;
use bluecarbon_common::carbon::ecosystem::EcosystemType;
use bluecarbon_common::project::event::{EventKind, LedgerReceipt, MintReceipt};
use bluecarbon_common::project::verification::{Actor, Role, VerificationRecord};
use bluecarbon_common::project::{Project, ProjectDraft, ProjectFilter, ProjectId};
use bluecarbon_common::{Error, Result};
use bluecarbon_core::adapters::memory_store::InMemoryProjectStore;
use bluecarbon_core::adapters::mock_ledger::MockLedger;
use bluecarbon_core::ports::ledger::Ledger;
use bluecarbon_core::ports::storage::ProjectRepository;

pub fn draft(area_m2: f64, ecosystem: EcosystemType) -> ProjectDraft {
    ProjectDraft {
        name: "Integration project".into(),
        description: String::new(),
        location: None,
        area_m2,
        ecosystem,
        horizon_years: 20,
        buffers: BufferSet::default(),
    }
}

pub fn verifier(id: &str) -> Actor {
    Actor {
        id: id.into(),
        email: format!("{id}@example.org"),
        role: Role::Verifier,
    }
}

/// Wraps a [`MockLedger`] and fails chosen operations on demand.
pub struct FlakyLedger {
    pub inner: MockLedger,
    pub fail_mint: AtomicBool,
    /// Fail `log_event` calls of this kind once armed.
    pub fail_kind: std::sync::Mutex<Option<EventKind>>,
    pub calls: AtomicUsize,
}

impl FlakyLedger {
    pub fn new() -> Self {
        Self {
            inner: MockLedger::instant(),
            fail_mint: AtomicBool::new(false),
            fail_kind: std::sync::Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_events_of(&self, kind: EventKind) {
        *self.fail_kind.lock().unwrap() = Some(kind);
    }
}

#[async_trait]
impl Ledger for FlakyLedger {
    async fn log_event(
        &self,
        kind: EventKind,
        subject: &str,
        payload: serde_json::Value,
    ) -> Result<LedgerReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_kind.lock().unwrap() == Some(kind) {
            return Err(Error::unavailable("ledger", "node unreachable"));
        }
        self.inner.log_event(kind, subject, payload).await
    }

    async fn mint(&self, subject: &str) -> Result<MintReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mint.load(Ordering::SeqCst) {
            return Err(Error::unavailable("ledger", "mint timed out"));
        }
        self.inner.mint(subject).await
    }
}

/// Store whose behaviour can be degraded per test.
pub struct TroubledStore {
    pub inner: InMemoryProjectStore,
    /// Inserts fail.
    pub reject_inserts: AtomicBool,
    /// Reads fail.
    pub offline: AtomicBool,
    /// Someone else writes the project right before each decision lands.
    pub interleave_writer: AtomicBool,
}

impl TroubledStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryProjectStore::new(),
            reject_inserts: AtomicBool::new(false),
            offline: AtomicBool::new(false),
            interleave_writer: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl ProjectRepository for TroubledStore {
    async fn insert(&self, project: Project) -> Result<Project> {
        if self.reject_inserts.load(Ordering::SeqCst) {
            return Err(Error::unavailable("storage", "disk full"));
        }
        self.inner.insert(project).await
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::unavailable("storage", "connection refused"));
        }
        self.inner.get(id).await
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        self.inner.list(filter).await
    }

    async fn update(&self, project: Project) -> Result<Project> {
        self.inner.update(project).await
    }

    async fn apply_decision(&self, project: Project, record: VerificationRecord) -> Result<Project> {
        if self.interleave_writer.load(Ordering::SeqCst) {
            if let Some(current) = self.inner.get(project.id).await? {
                self.inner.update(current).await?;
            }
        }
        self.inner.apply_decision(project, record).await
    }

    async fn verification_history(&self, id: ProjectId) -> Result<Vec<VerificationRecord>> {
        self.inner.verification_history(id).await
    }
}
