//! # Anomaly / Credibility Detector
//!
//! Scores how plausible a project looks against its own history and against
//! what its ecosystem can physically sequester.
//!
//! The model is a fixed, ordered list of [`Rule`]s. Each rule either stays
//! silent or contributes one flag and a penalty; all applicable rules fire.
//! Verifiers can read the flags and know exactly why a project was marked.

use bluecarbon_common::credibility::CredibilityScore;
use bluecarbon_common::project::ProjectSnapshot;
use bluecarbon_common::reference::{
    AREA_EXPANSION_PENALTY, MAX_AREA_GROWTH_RATE, MIN_PROJECT_AREA_M2, SMALL_AREA_PENALTY,
    SQUARE_METERS_PER_HECTARE, THEORETICAL_MAX_PENALTY,
};
use bluecarbon_common::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const AREA_EXPANSION_FLAG: &str = "Unrealistic area expansion detected";
pub const THEORETICAL_MAX_FLAG: &str = "Carbon sequestration estimates exceed theoretical maximum";
pub const SMALL_AREA_FLAG: &str = "Project area unusually small for ecosystem restoration";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub is_suspicious: bool,
    /// In rule evaluation order.
    pub flags: Vec<String>,
    /// Sum of penalties. Not clamped; see [`CredibilityScore::penalize`].
    pub credibility_impact: u32,
}

impl AnomalyReport {
    fn push(&mut self, rule: Rule) {
        self.flags.push(rule.flag().to_string());
        self.credibility_impact += rule.penalty();
        self.is_suspicious = true;
    }

    /// Applies this report's penalty to a running score.
    pub fn apply_to(&self, score: CredibilityScore) -> CredibilityScore {
        score.penalize(self.credibility_impact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Area more than doubled between the two most recent snapshots.
    AreaExpansion,
    /// Recorded absorption above 150% of the nominal ecosystem rate.
    TheoreticalMaximum,
    /// Under 0.1 ha.
    MinimumArea,
}

impl Rule {
    /// Evaluation order.
    pub const ALL: [Rule; 3] = [Rule::AreaExpansion, Rule::TheoreticalMaximum, Rule::MinimumArea];

    pub fn flag(self) -> &'static str {
        match self {
            Rule::AreaExpansion => AREA_EXPANSION_FLAG,
            Rule::TheoreticalMaximum => THEORETICAL_MAX_FLAG,
            Rule::MinimumArea => SMALL_AREA_FLAG,
        }
    }

    pub fn penalty(self) -> u32 {
        match self {
            Rule::AreaExpansion => AREA_EXPANSION_PENALTY,
            Rule::TheoreticalMaximum => THEORETICAL_MAX_PENALTY,
            Rule::MinimumArea => SMALL_AREA_PENALTY,
        }
    }

    fn fires(self, project: &ProjectSnapshot, history: &[ProjectSnapshot]) -> bool {
        match self {
            Rule::AreaExpansion => match history {
                [.., previous, latest] => {
                    // Growth from nothing is undefined.
                    if previous.area_m2 <= 0.0 {
                        return false;
                    }
                    let growth_rate = (latest.area_m2 - previous.area_m2) / previous.area_m2;
                    growth_rate > MAX_AREA_GROWTH_RATE
                }
                _ => false,
            },
            Rule::TheoreticalMaximum => {
                let area_ha = project.area_m2 / SQUARE_METERS_PER_HECTARE;
                let ceiling = project.ecosystem.theoretical_max() * area_ha;
                project.carbon_calculation.annual_co2_absorption > ceiling
            }
            Rule::MinimumArea => project.area_m2 < MIN_PROJECT_AREA_M2,
        }
    }
}

/// Runs every rule against `project`.
///
/// `history` is ordered oldest to newest and may be empty. Deterministic and
/// free of side effects.
pub fn detect(project: &ProjectSnapshot, history: &[ProjectSnapshot]) -> Result<AnomalyReport> {
    validate(project)?;
    for entry in history {
        validate(entry)?;
    }

    let mut report = AnomalyReport::default();
    for rule in Rule::ALL {
        if rule.fires(project, history) {
            report.push(rule);
        }
    }

    if report.is_suspicious {
        warn!(
            ecosystem = %project.ecosystem,
            impact = report.credibility_impact,
            "anomalies: {}",
            report.flags.join("; ")
        );
    } else {
        debug!(ecosystem = %project.ecosystem, "no anomalies");
    }

    Ok(report)
}

/// One project to score in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub project: ProjectSnapshot,
    #[serde(default)]
    pub history: Vec<ProjectSnapshot>,
    /// Score before this assessment. Defaults to full credibility.
    #[serde(default)]
    pub credibility: CredibilityScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub report: AnomalyReport,
    pub credibility: CredibilityScore,
}

/// Scores many projects in parallel. Results keep the input order.
pub fn detect_many(batch: &[Assessment]) -> Vec<Result<AssessmentOutcome>> {
    batch
        .par_iter()
        .map(|item| {
            let report = detect(&item.project, &item.history)?;
            let credibility = report.apply_to(item.credibility);
            Ok(AssessmentOutcome {
                report,
                credibility,
            })
        })
        .collect()
}

fn validate(snapshot: &ProjectSnapshot) -> Result<()> {
    if !snapshot.area_m2.is_finite() || snapshot.area_m2 < 0.0 {
        return Err(Error::invalid_input(format!(
            "snapshot area must be a non-negative number, got {}",
            snapshot.area_m2
        )));
    }
    if !snapshot.carbon_calculation.annual_co2_absorption.is_finite() {
        return Err(Error::invalid_input("snapshot absorption must be a finite number"));
    }
    Ok(())
}
