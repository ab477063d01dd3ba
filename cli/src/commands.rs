pub mod assess;
pub mod calculate;
pub mod policy;
pub mod reference;
pub mod verify;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use bluecarbon_common::carbon::buffers::BufferSet;
use bluecarbon_common::carbon::ecosystem::EcosystemType;
use bluecarbon_common::config::Config;
use bluecarbon_common::project::verification::Decision;
use bluecarbon_common::reference as refdata;
use bluecarbon_core::adapters::memory_store::InMemoryProjectStore;
use bluecarbon_core::adapters::mock_ledger::MockLedger;
use bluecarbon_core::workflow::VerificationService;

#[derive(Parser)]
#[command(name = "bluecarbon")]
#[command(about = "Blue carbon project calculator and verification tool.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output (-q hides headers, -qq prints results only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    /// Lower bound of the simulated ledger latency, in milliseconds
    #[arg(long, default_value_t = 2_000, global = true)]
    pub ledger_min_ms: u64,

    /// Upper bound of the simulated ledger latency, in milliseconds
    #[arg(long, default_value_t = 3_000, global = true)]
    pub ledger_max_ms: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate absorption for an area
    #[command(alias = "c")]
    Calculate(CalculateArgs),
    /// Find the area needed to reach a reduction target
    #[command(alias = "p")]
    Policy(PolicyArgs),
    /// Score projects for anomalies from a JSON file
    #[command(alias = "a")]
    Assess { file: PathBuf },
    /// Register a project from a JSON file and decide on it
    #[command(alias = "v")]
    Verify(VerifyArgs),
    /// Show sequestration factors and impact ratios
    #[command(alias = "r")]
    Reference,
}

#[derive(Args)]
pub struct ModelArgs {
    /// mangrove, seagrass, salt_marsh or kelp_forest
    #[arg(short, long)]
    pub ecosystem: EcosystemType,

    /// Projection horizon in years
    #[arg(short, long, default_value_t = refdata::DEFAULT_HORIZON_YEARS)]
    pub years: u32,

    /// Measurement uncertainty buffer, percent
    #[arg(long, default_value_t = refdata::DEFAULT_UNCERTAINTY_BUFFER)]
    pub uncertainty: f64,

    /// Ecosystem mortality buffer, percent
    #[arg(long, default_value_t = refdata::DEFAULT_MORTALITY_BUFFER)]
    pub mortality: f64,

    /// Verification overhead buffer, percent
    #[arg(long, default_value_t = refdata::DEFAULT_VERIFICATION_BUFFER)]
    pub verification: f64,

    /// Also log the result as a `calculation` event on the ledger
    #[arg(long)]
    pub record: bool,
}

impl ModelArgs {
    pub fn buffers(&self) -> BufferSet {
        BufferSet::new(self.uncertainty, self.mortality, self.verification)
    }
}

#[derive(Args)]
pub struct CalculateArgs {
    /// Project area in square meters
    #[arg(short, long)]
    pub area: f64,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct PolicyArgs {
    /// Cumulative CO2 reduction target in tonnes
    #[arg(short, long)]
    pub target: f64,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// JSON file with the project draft and optional history
    pub file: PathBuf,

    /// approve or reject
    #[arg(short, long)]
    pub decision: Decision,

    /// Verifier user id
    #[arg(long, default_value = "cli-verifier")]
    pub verifier: String,

    #[arg(short, long, default_value = "")]
    pub comments: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            // JSON output carries no decoration.
            quiet: if self.json { 2 } else { self.quiet },
            no_banner: self.no_banner,
            json: self.json,
            ledger_latency: (
                Duration::from_millis(self.ledger_min_ms),
                Duration::from_millis(self.ledger_max_ms),
            ),
        }
    }
}

/// A workflow wired to the in-memory store and the mock ledger.
pub fn local_service(cfg: &Config) -> (VerificationService, Arc<MockLedger>) {
    let ledger = Arc::new(MockLedger::new(cfg.ledger_latency));
    let store = Arc::new(InMemoryProjectStore::new());
    (VerificationService::new(store, ledger.clone()), ledger)
}
