use colored::*;

use bluecarbon_common::carbon::calculation::{AreaInput, CalculationResult};
use bluecarbon_common::config::Config;
use bluecarbon_core::calculator;

use crate::commands::{CalculateArgs, local_service};
use crate::terminal::{colors, format, print, spinner};

pub async fn calculate(args: &CalculateArgs, cfg: &Config) -> anyhow::Result<()> {
    let input = AreaInput::new(args.area, args.model.ecosystem)
        .with_horizon(args.model.years)
        .with_buffers(args.model.buffers());

    let result: CalculationResult = calculator::calculate(&input)?;

    let title = format!("{} m² of {}", format::group_thousands(args.area.round() as u64), input.ecosystem);
    show_result(&title, &result, cfg)?;

    if args.model.record {
        record(&result, cfg).await?;
    }
    Ok(())
}

pub fn show_result(title: &str, result: &CalculationResult, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        return print::json(result);
    }

    print::tree_head(0, title);
    print::as_tree_one_level(format::calculation_to_details(result));
    Ok(())
}

/// Logs the result as a `calculation` event on the mock ledger.
pub async fn record(result: &CalculationResult, cfg: &Config) -> anyhow::Result<()> {
    let (service, _) = local_service(cfg);

    let receipt = {
        let _spinner = spinner::start("Recording calculation on the ledger", cfg.quiet);
        service.record_calculation("calculator", result).await?
    };

    if !cfg.json {
        crate::bprint!();
        print::aligned_line("Recorded in block", receipt.block_number.to_string().color(colors::ACCENT), 17);
        print::aligned_line("Transaction", receipt.tx_hash.color(colors::TX_HASH), 17);
    }
    Ok(())
}
