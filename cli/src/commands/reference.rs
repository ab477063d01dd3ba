use colored::*;
use serde_json::json;

use bluecarbon_common::carbon::ecosystem::EcosystemType;
use bluecarbon_common::config::Config;
use bluecarbon_common::reference;

use crate::terminal::{colors, print};

pub fn reference(cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        let factors: serde_json::Map<String, serde_json::Value> = EcosystemType::ALL
            .iter()
            .map(|eco| (eco.to_string(), json!(eco.sequestration_factor())))
            .collect();
        return print::json(&json!({
            "sequestration_factors": factors,
            "default_buffers": reference::DEFAULT_BUFFERS,
            "impact_ratios": {
                "cars_removed_per_year": reference::CARS_REMOVED_PER_TON,
                "homes_powered_per_year": reference::HOMES_POWERED_PER_TON,
                "trees_planted": reference::TREES_PLANTED_PER_TON,
            },
        }));
    }

    const KEY_WIDTH: usize = 12;
    for eco in EcosystemType::ALL {
        let value = format!(
            "{:>5.2} t/ha/yr (max {:.2})",
            eco.sequestration_factor(),
            eco.theoretical_max()
        );
        print::aligned_line(eco.as_tag(), value.color(colors::ACCENT), KEY_WIDTH);
    }

    crate::bprint!();
    let buffers = reference::DEFAULT_BUFFERS;
    print::aligned_line("uncertainty", format!("{}%", buffers.uncertainty), KEY_WIDTH);
    print::aligned_line("mortality", format!("{}%", buffers.mortality), KEY_WIDTH);
    print::aligned_line("verification", format!("{}%", buffers.verification), KEY_WIDTH);

    crate::bprint!();
    print::aligned_line("cars", format!("{} per t/yr", reference::CARS_REMOVED_PER_TON), KEY_WIDTH);
    print::aligned_line("homes", format!("{} per t/yr", reference::HOMES_POWERED_PER_TON), KEY_WIDTH);
    print::aligned_line("trees", format!("{} per t", reference::TREES_PLANTED_PER_TON), KEY_WIDTH);
    Ok(())
}
