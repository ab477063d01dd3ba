use std::path::Path;

use anyhow::Context;
use colored::*;
use serde::{Deserialize, Serialize};

use bluecarbon_common::config::Config;
use bluecarbon_core::anomaly::{self, Assessment};

use crate::bprint;
use crate::terminal::{colors, format, print};

/// A file holds either one assessment or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum AssessmentFile {
    Many(Vec<Assessment>),
    One(Assessment),
}

#[derive(Serialize)]
struct JsonOutcome {
    index: usize,
    #[serde(flatten)]
    outcome: Option<anomaly::AssessmentOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn assess(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let raw: String = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let batch: Vec<Assessment> = match serde_json::from_str::<AssessmentFile>(&raw)
        .with_context(|| format!("{} is not a valid assessment file", path.display()))?
    {
        AssessmentFile::Many(batch) => batch,
        AssessmentFile::One(single) => vec![single],
    };

    let outcomes = anomaly::detect_many(&batch);

    if cfg.json {
        let rows: Vec<JsonOutcome> = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| match outcome {
                Ok(outcome) => JsonOutcome {
                    index,
                    outcome: Some(outcome),
                    error: None,
                },
                Err(e) => JsonOutcome {
                    index,
                    outcome: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
        return print::json(&rows);
    }

    let mut suspicious: usize = 0;
    for (idx, (item, outcome)) in batch.iter().zip(&outcomes).enumerate() {
        let title = format!(
            "{} m² of {}",
            format::group_thousands(item.project.area_m2.round() as u64),
            item.project.ecosystem
        );
        print::tree_head(idx, &title);
        match outcome {
            Ok(outcome) => {
                if outcome.report.is_suspicious {
                    suspicious += 1;
                }
                print::as_tree_one_level(format::report_to_details(&outcome.report, outcome.credibility));
            }
            Err(e) => {
                print::as_tree_one_level(vec![("Error".to_string(), e.to_string().color(colors::BAD))]);
            }
        }
        if idx + 1 != batch.len() {
            bprint!();
        }
    }

    if cfg.quiet == 0 {
        print::fat_separator();
        let summary: String = format!(
            "{} of {} projects flagged",
            suspicious.to_string().bold().color(colors::FLAG),
            batch.len()
        );
        print::centerln(&summary);
    }
    Ok(())
}
