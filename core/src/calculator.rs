//! # Sequestration Calculator
//!
//! Converts restored area into expected CO2 absorption, and back.
//!
//! * [`calculate`]: **Forward mode**. Area, ecosystem and horizon in, tonnes out.
//! * [`required_area`]: **Policy mode**. A reduction target in, the land needed out.
//!
//! Both modes discount the nominal ecosystem rate through the same
//! [`BufferSet::factor`], so the two formulas cannot drift apart. All
//! functions are pure and reject invalid input before computing anything.

use bluecarbon_common::carbon::buffers::BufferSet;
use bluecarbon_common::carbon::calculation::{
    AreaInput, CalculationMode, CalculationResult, ImpactEquivalences, TargetInput,
};
use bluecarbon_common::reference::{
    CARS_REMOVED_PER_TON, HOMES_POWERED_PER_TON, SQUARE_METERS_PER_HECTARE, TREES_PLANTED_PER_TON,
};
use bluecarbon_common::{Error, Result};
use tracing::debug;

/// Estimates net annual and cumulative absorption for a given area.
pub fn calculate(input: &AreaInput) -> Result<CalculationResult> {
    if !input.area_m2.is_finite() || input.area_m2 <= 0.0 {
        return Err(Error::invalid_input(format!(
            "area must be positive, got {} m2",
            input.area_m2
        )));
    }
    ensure_horizon(input.horizon_years)?;
    let buffer_factor: f64 = input.buffers.factor()?;

    let area_ha: f64 = input.area_m2 / SQUARE_METERS_PER_HECTARE;
    let gross_annual: f64 = area_ha * input.ecosystem.sequestration_factor();
    let annual: f64 = round2(gross_annual * buffer_factor);
    let cumulative: f64 = round2(annual * f64::from(input.horizon_years));

    debug!(
        ecosystem = %input.ecosystem,
        area_ha,
        gross_annual,
        buffer_factor,
        annual,
        "forward calculation"
    );

    Ok(CalculationResult {
        mode: CalculationMode::Standard,
        ecosystem: input.ecosystem,
        horizon_years: input.horizon_years,
        buffers: input.buffers,
        annual_co2_absorption: annual,
        cumulative_co2_absorption: cumulative,
        equivalences: equivalences(annual, cumulative),
        required_area_m2: None,
    })
}

/// Solves for the area needed to absorb `target_co2_tons` over the horizon.
///
/// Equivalences describe the target itself, not the computed area: cars and
/// homes use the per-year share of the target, trees the whole target.
///
/// The area is rounded to whole square meters. A positive target always
/// needs land, so results below half a square meter are reported as 1 m².
pub fn required_area(input: &TargetInput) -> Result<CalculationResult> {
    if !input.target_co2_tons.is_finite() || input.target_co2_tons <= 0.0 {
        return Err(Error::invalid_input(format!(
            "reduction target must be positive, got {} t",
            input.target_co2_tons
        )));
    }
    ensure_horizon(input.horizon_years)?;

    let effective_rate: f64 = effective_rate(input.ecosystem.sequestration_factor(), &input.buffers)?;
    let horizon: f64 = f64::from(input.horizon_years);
    let required_ha: f64 = input.target_co2_tons / (effective_rate * horizon);
    let required_m2: f64 = (required_ha * SQUARE_METERS_PER_HECTARE).round().max(1.0);
    if !required_m2.is_finite() || required_m2 >= u64::MAX as f64 {
        return Err(Error::invalid_input(format!(
            "reduction target of {} t needs more land than can be represented",
            input.target_co2_tons
        )));
    }

    let annual_target: f64 = input.target_co2_tons / horizon;

    debug!(
        ecosystem = %input.ecosystem,
        effective_rate,
        required_ha,
        "policy calculation"
    );

    Ok(CalculationResult {
        mode: CalculationMode::Policy,
        ecosystem: input.ecosystem,
        horizon_years: input.horizon_years,
        buffers: input.buffers,
        annual_co2_absorption: round2(annual_target),
        cumulative_co2_absorption: round2(input.target_co2_tons),
        equivalences: equivalences(annual_target, input.target_co2_tons),
        required_area_m2: Some(required_m2 as u64),
    })
}

/// Nominal rate after buffers, in tonnes per hectare per year.
pub fn effective_rate(base_rate: f64, buffers: &BufferSet) -> Result<f64> {
    let rate = base_rate * buffers.factor()?;
    if rate <= 0.0 {
        return Err(Error::invalid_input("effective sequestration rate is zero"));
    }
    Ok(rate)
}

/// Cars and homes scale with the yearly amount, trees with the total.
pub fn equivalences(annual_tons: f64, cumulative_tons: f64) -> ImpactEquivalences {
    ImpactEquivalences {
        cars_removed: to_count(annual_tons * CARS_REMOVED_PER_TON),
        homes_powered: to_count(annual_tons * HOMES_POWERED_PER_TON),
        trees_planted: to_count(cumulative_tons * TREES_PLANTED_PER_TON),
    }
}

fn ensure_horizon(horizon_years: u32) -> Result<()> {
    if horizon_years == 0 {
        return Err(Error::invalid_input("projection horizon must be at least one year"));
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_count(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluecarbon_common::ErrorKind;
    use bluecarbon_common::carbon::ecosystem::EcosystemType;

    #[test]
    fn test_mangrove_ten_hectares() {
        let result = calculate(&AreaInput::new(100_000.0, EcosystemType::Mangrove)).unwrap();

        assert_eq!(result.mode, CalculationMode::Standard);
        assert_eq!(result.annual_co2_absorption, 71.05);
        assert_eq!(result.cumulative_co2_absorption, 1421.0);
        assert_eq!(result.equivalences.cars_removed, 32);
        assert_eq!(result.equivalences.homes_powered, 9);
        assert_eq!(result.equivalences.trees_planted, 22_736);
        assert_eq!(result.required_area_m2, None);
    }

    #[test]
    fn test_seagrass_policy_target() {
        let result = required_area(&TargetInput::new(1_000.0, EcosystemType::Seagrass)).unwrap();

        assert_eq!(result.mode, CalculationMode::Policy);
        assert_eq!(result.required_area_m2, Some(82_102));
        // 50 t/yr of the target, 1000 t overall
        assert_eq!(result.annual_co2_absorption, 50.0);
        assert_eq!(result.cumulative_co2_absorption, 1000.0);
        assert_eq!(result.equivalences.cars_removed, 23);
        assert_eq!(result.equivalences.homes_powered, 6);
        assert_eq!(result.equivalences.trees_planted, 16_000);
    }

    #[test]
    fn test_cumulative_is_annual_times_horizon() {
        let areas = [1.0, 999.0, 12_345.6, 100_000.0, 2_500_000.0];
        let horizons = [1, 5, 20, 37, 100];
        for eco in EcosystemType::ALL {
            for area in areas {
                for years in horizons {
                    let input = AreaInput::new(area, eco).with_horizon(years);
                    let result = calculate(&input).unwrap();
                    let expected = result.annual_co2_absorption * f64::from(years);
                    assert!(
                        (result.cumulative_co2_absorption - expected).abs() <= 0.01,
                        "{eco} {area} m2 over {years} years: {} vs {expected}",
                        result.cumulative_co2_absorption
                    );
                }
            }
        }
    }

    #[test]
    fn test_forward_then_policy_recovers_area() {
        // Even hectare counts keep the 2-decimal annual figure exact.
        for eco in EcosystemType::ALL {
            for hectares in [2.0, 10.0, 42.0, 250.0] {
                let area = hectares * SQUARE_METERS_PER_HECTARE;
                let forward = calculate(&AreaInput::new(area, eco)).unwrap();
                let inverse =
                    required_area(&TargetInput::new(forward.cumulative_co2_absorption, eco)).unwrap();
                let recovered = inverse.required_area_m2.unwrap() as f64;
                assert!(
                    (recovered - area).abs() <= 1.0,
                    "{eco}: {area} m2 came back as {recovered} m2"
                );
            }
        }
    }

    #[test]
    fn test_more_area_never_absorbs_less() {
        for eco in EcosystemType::ALL {
            let mut previous = 0.0;
            for step in 1..200 {
                let area = f64::from(step) * 733.0;
                let annual = calculate(&AreaInput::new(area, eco)).unwrap().annual_co2_absorption;
                assert!(annual >= previous, "{eco}: {area} m2 dropped to {annual}");
                previous = annual;
            }
        }
    }

    #[test]
    fn test_more_buffer_never_absorbs_more() {
        let base = AreaInput::new(250_000.0, EcosystemType::SaltMarsh);
        let mut previous = [f64::INFINITY; 3];
        for pct in 0..60 {
            let pct = f64::from(pct);
            let variants = [
                BufferSet::new(pct, 15.0, 5.0),
                BufferSet::new(10.0, pct, 5.0),
                BufferSet::new(10.0, 15.0, pct),
            ];
            for (slot, buffers) in variants.into_iter().enumerate() {
                let annual = calculate(&base.with_buffers(buffers)).unwrap().annual_co2_absorption;
                assert!(annual <= previous[slot]);
                previous[slot] = annual;
            }
        }
    }

    #[test]
    fn test_invalid_forward_inputs() {
        let cases = [
            AreaInput::new(0.0, EcosystemType::Mangrove),
            AreaInput::new(-5.0, EcosystemType::Mangrove),
            AreaInput::new(f64::NAN, EcosystemType::Mangrove),
            AreaInput::new(1_000.0, EcosystemType::Mangrove).with_horizon(0),
            AreaInput::new(1_000.0, EcosystemType::Mangrove)
                .with_buffers(BufferSet::new(40.0, 40.0, 20.0)),
        ];
        for input in cases {
            let err = calculate(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{input:?}");
        }
    }

    #[test]
    fn test_invalid_policy_inputs() {
        let cases = [
            TargetInput::new(0.0, EcosystemType::KelpForest),
            TargetInput::new(-1.0, EcosystemType::KelpForest),
            TargetInput::new(f64::INFINITY, EcosystemType::KelpForest),
            TargetInput::new(500.0, EcosystemType::KelpForest).with_horizon(0),
            TargetInput::new(500.0, EcosystemType::KelpForest)
                .with_buffers(BufferSet::new(50.0, 50.0, 0.0)),
        ];
        for input in cases {
            let err = required_area(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{input:?}");
        }
    }

    #[test]
    fn test_policy_area_stays_representable() {
        let tiny = required_area(&TargetInput::new(0.001, EcosystemType::Mangrove)).unwrap();
        assert_eq!(tiny.required_area_m2, Some(1));

        let err = required_area(&TargetInput::new(1e300, EcosystemType::Mangrove)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        // 1e15 t is large but still fits
        let large = required_area(&TargetInput::new(1e15, EcosystemType::Mangrove)).unwrap();
        assert!(large.required_area_m2.unwrap() > 1_000_000_000_000_000);
    }

    #[test]
    fn test_equivalences_round_to_nearest() {
        let eq = equivalences(10.0, 200.0);
        assert_eq!(eq.cars_removed, 5); // 4.5 rounds away from zero
        assert_eq!(eq.homes_powered, 1);
        assert_eq!(eq.trees_planted, 3_200);
    }
}
