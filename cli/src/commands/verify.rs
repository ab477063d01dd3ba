use anyhow::Context;
use colored::*;
use serde::Deserialize;
use serde_json::json;

use bluecarbon_common::config::Config;
use bluecarbon_common::project::verification::{Actor, Role};
use bluecarbon_common::project::{ProjectDraft, ProjectSnapshot};

use crate::bprint;
use crate::commands::{VerifyArgs, local_service};
use crate::terminal::{colors, format, print, spinner};

#[derive(Deserialize)]
struct VerificationRequest {
    #[serde(default = "default_owner")]
    owner_id: String,
    draft: ProjectDraft,
    /// Earlier snapshots of the project, oldest first.
    #[serde(default)]
    history: Vec<ProjectSnapshot>,
}

fn default_owner() -> String {
    String::from("cli-owner")
}

/// Runs the whole lifecycle against the in-memory store and mock ledger:
/// register, assess, review, decide.
pub async fn verify(args: &VerifyArgs, cfg: &Config) -> anyhow::Result<()> {
    let raw: String = std::fs::read_to_string(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;
    let request: VerificationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid verification request", args.file.display()))?;

    let verifier = Actor {
        id: args.verifier.clone(),
        email: format!("{}@verifiers.local", args.verifier),
        role: Role::Verifier,
    };
    let (service, ledger) = local_service(cfg);

    let registration = {
        let _spinner = spinner::start("Registering project", cfg.quiet);
        service.register(&request.owner_id, request.draft).await?
    };
    let project_id = registration.project.id;

    let assessment = service.assess(project_id, &request.history).await?;
    service.begin_review(project_id, &verifier).await?;

    let outcome = {
        let _spinner = spinner::start("Submitting decision", cfg.quiet);
        service
            .decide(project_id, &verifier, args.decision, &args.comments)
            .await?
    };
    let events = ledger.events()?;

    if cfg.json {
        return print::json(&json!({
            "project": outcome.project,
            "calculation": registration.calculation,
            "assessment": assessment.report,
            "record": outcome.record,
            "events": events,
        }));
    }

    print::tree_head(0, &format!("{} ({})", outcome.project.name, project_id));
    print::as_tree_one_level(format::calculation_to_details(&registration.calculation));
    bprint!();

    print::tree_head(1, "Assessment");
    print::as_tree_one_level(format::report_to_details(
        &assessment.report,
        assessment.project.credibility_score,
    ));
    bprint!();

    print::tree_head(2, "Decision");
    print::as_tree_one_level(format::record_to_details(&outcome.record));

    if cfg.quiet == 0 {
        print::header("ledger", cfg.quiet);
        for (idx, event) in events.iter().enumerate() {
            print::tree_head(idx, &event.kind.to_string());
            print::as_tree_one_level(format::event_to_details(event));
        }
    }

    print::fat_separator();
    let status: ColoredString = outcome.project.status.to_string().to_uppercase().bold().color(colors::PRIMARY);
    print::centerln(&format!("Project is now {status}"));
    Ok(())
}
