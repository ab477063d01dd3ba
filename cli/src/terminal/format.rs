use colored::*;

use bluecarbon_common::carbon::calculation::{CalculationMode, CalculationResult};
use bluecarbon_common::credibility::CredibilityScore;
use bluecarbon_common::project::event::LoggedEvent;
use bluecarbon_common::project::verification::{Decision, VerificationRecord};
use bluecarbon_core::anomaly::AnomalyReport;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits: String = value.to_string();
    let mut out: String = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn calculation_to_details(result: &CalculationResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    if let (CalculationMode::Policy, Some(area)) = (result.mode, result.required_area_m2) {
        let hectares: f64 = area as f64 / 10_000.0;
        details.push(detail(
            "Required area",
            format!("{} m² ({hectares:.2} ha)", group_thousands(area)).bold().color(colors::ACCENT),
        ));
    }

    details.push(detail(
        "Annual",
        format!("{:.2} t CO2/yr", result.annual_co2_absorption).color(colors::GOOD),
    ));
    details.push(detail(
        "Cumulative",
        format!(
            "{:.2} t CO2 over {} years",
            result.cumulative_co2_absorption, result.horizon_years
        )
        .color(colors::GOOD),
    ));
    details.push(detail(
        "Buffers",
        format!(
            "{}% uncertainty, {}% mortality, {}% verification",
            result.buffers.uncertainty, result.buffers.mortality, result.buffers.verification
        )
        .normal(),
    ));
    details.push(detail(
        "Cars",
        format!("{} removed per year", group_thousands(result.equivalences.cars_removed)).normal(),
    ));
    details.push(detail(
        "Homes",
        format!("{} powered per year", group_thousands(result.equivalences.homes_powered)).normal(),
    ));
    details.push(detail(
        "Trees",
        format!("{} planted", group_thousands(result.equivalences.trees_planted)).normal(),
    ));

    details
}

pub fn report_to_details(report: &AnomalyReport, credibility: CredibilityScore) -> Vec<Detail> {
    let mut details: Vec<Detail> = report
        .flags
        .iter()
        .map(|flag| detail("Flag", flag.as_str().color(colors::FLAG)))
        .collect();

    let verdict: ColoredString = if report.is_suspicious {
        format!("suspicious (-{})", report.credibility_impact).color(colors::BAD).bold()
    } else {
        "no anomalies".color(colors::GOOD).bold()
    };
    details.push(detail("Verdict", verdict));
    details.push(detail("Credibility", credibility.to_string().normal()));
    details
}

pub fn record_to_details(record: &VerificationRecord) -> Vec<Detail> {
    let decision: ColoredString = match record.decision {
        Decision::Approve => "approved".color(colors::GOOD).bold(),
        Decision::Reject => "rejected".color(colors::BAD).bold(),
    };

    let mut details: Vec<Detail> = vec![
        detail("Decision", decision),
        detail("Verifier", record.verifier_id.as_str().normal()),
        detail("Decided", record.decided_at.to_rfc3339().normal()),
    ];
    if !record.comments.is_empty() {
        details.push(detail("Comments", record.comments.as_str().italic()));
    }
    for flag in &record.anomaly_flags {
        details.push(detail("Flag", flag.as_str().color(colors::FLAG)));
    }
    if let Some(token) = &record.token_id {
        details.push(detail("Token", token.as_str().color(colors::ACCENT)));
    }
    if let Some(tx) = &record.tx_hash {
        details.push(detail("Tx", tx.as_str().color(colors::TX_HASH)));
    }
    details
}

pub fn event_to_details(event: &LoggedEvent) -> Vec<Detail> {
    vec![
        detail("Block", event.block_number.to_string().color(colors::ACCENT)),
        detail("Tx", event.tx_hash.as_str().color(colors::TX_HASH)),
        detail("Payload", event.payload.to_string().dimmed()),
    ]
}
