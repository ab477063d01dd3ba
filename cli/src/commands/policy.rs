use bluecarbon_common::carbon::calculation::TargetInput;
use bluecarbon_common::config::Config;
use bluecarbon_core::calculator;

use crate::commands::PolicyArgs;
use crate::commands::calculate::{record, show_result};

pub async fn policy(args: &PolicyArgs, cfg: &Config) -> anyhow::Result<()> {
    let input = TargetInput::new(args.target, args.model.ecosystem)
        .with_horizon(args.model.years)
        .with_buffers(args.model.buffers());

    let result = calculator::required_area(&input)?;

    let title = format!(
        "{} t CO2 with {} over {} years",
        args.target, input.ecosystem, input.horizon_years
    );
    show_result(&title, &result, cfg)?;

    if args.model.record {
        record(&result, cfg).await?;
    }
    Ok(())
}
