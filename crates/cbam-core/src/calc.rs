#![forbid(unsafe_code)]

//! The emission calculator.
//!
//! Converts raw measurement inputs into the four regulatory metrics per
//! accounting method: CO2-equivalent fossil/biogenic tonnes and fossil/
//! biogenic energy content in TJ. Outputs are a pure function of the
//! inputs and are recomputed on every call, so they can never be stale
//! relative to a field edit.
//!
//! # Computation guard
//!
//! | Method       | Required non-zero inputs | On violation |
//! |--------------|--------------------------|--------------|
//! | Process      | AD, NCV, EF, OF          | all outputs 0 |
//! | Mass balance | AD, NCV, CC, BC          | all outputs 0 |
//!
//! A missing or zero required input means "not computable", never an
//! error: the form stays live while the operator is still typing.
//!
//! All arithmetic is double-precision; these are illustrative regulatory
//! estimates, not financial values.

use serde::{Deserialize, Serialize};

use crate::numeric::NumericInput;

/// CO2-to-carbon molar mass ratio used by the mass-balance method.
pub const CO2_PER_CARBON_MASS: f64 = 3.664;

/// Inputs for the process-emission accounting method.
///
/// `oxidation_factor_pct` and `biomass_content_pct` are percentages in
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessInputs {
    pub activity_data: NumericInput,
    pub net_calorific_value: NumericInput,
    pub emission_factor: NumericInput,
    pub oxidation_factor_pct: NumericInput,
    pub biomass_content_pct: NumericInput,
}

/// Inputs for the mass-balance accounting method.
///
/// The net calorific value does not enter the tonnage formulas but is
/// still a required non-zero guard and drives the energy-content split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassBalanceInputs {
    pub activity_data: NumericInput,
    pub net_calorific_value: NumericInput,
    pub carbon_content: NumericInput,
    pub biomass_content_pct: NumericInput,
}

/// The four derived metrics. Never user-edited; a transient view of the
/// current inputs with no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionOutputs {
    pub co2e_fossil_t: f64,
    pub co2e_bio_t: f64,
    pub energy_content_fossil_tj: f64,
    pub energy_content_bio_tj: f64,
}

impl EmissionOutputs {
    pub const ZERO: Self = Self {
        co2e_fossil_t: 0.0,
        co2e_bio_t: 0.0,
        energy_content_fossil_tj: 0.0,
        energy_content_bio_tj: 0.0,
    };
}

/// Process-emission method.
///
/// ```text
/// co2e_fossil = (AD * NCV * EF / 1000) * (OF/100) * ((100 - BC)/100)
/// co2e_bio    = (AD * NCV * EF / 1000) * (OF/100) * (BC/100)
/// energy_fossil = (AD * NCV / 1000) * ((100 - BC)/100)
/// energy_bio    = (AD * NCV / 1000) * (BC/100)
/// ```
#[must_use]
pub fn compute_process(inputs: &ProcessInputs) -> EmissionOutputs {
    let required = [
        inputs.activity_data,
        inputs.net_calorific_value,
        inputs.emission_factor,
        inputs.oxidation_factor_pct,
    ];
    if required.iter().any(|field| !field.is_computable()) {
        return EmissionOutputs::ZERO;
    }

    let ad = inputs.activity_data.or_zero();
    let ncv = inputs.net_calorific_value.or_zero();
    let ef = inputs.emission_factor.or_zero();
    let of = inputs.oxidation_factor_pct.or_zero();
    let bc = inputs.biomass_content_pct.or_zero();

    let co2e_total = (ad * ncv * ef / 1000.0) * (of / 100.0);
    let energy_total = ad * ncv / 1000.0;

    EmissionOutputs {
        co2e_fossil_t: co2e_total * ((100.0 - bc) / 100.0),
        co2e_bio_t: co2e_total * (bc / 100.0),
        energy_content_fossil_tj: energy_total * ((100.0 - bc) / 100.0),
        energy_content_bio_tj: energy_total * (bc / 100.0),
    }
}

/// Mass-balance method.
///
/// ```text
/// co2e_fossil = AD * CC * 3.664 * ((100 - BC)/100)
/// co2e_bio    = AD * CC * 3.664 * (BC/100)
/// energy_fossil = (AD * NCV / 1000) * ((100 - BC)/100)
/// energy_bio    = (AD * NCV / 1000) * (BC/100)
/// ```
#[must_use]
pub fn compute_mass_balance(inputs: &MassBalanceInputs) -> EmissionOutputs {
    let required = [
        inputs.activity_data,
        inputs.net_calorific_value,
        inputs.carbon_content,
        inputs.biomass_content_pct,
    ];
    if required.iter().any(|field| !field.is_computable()) {
        return EmissionOutputs::ZERO;
    }

    let ad = inputs.activity_data.or_zero();
    let ncv = inputs.net_calorific_value.or_zero();
    let cc = inputs.carbon_content.or_zero();
    let bc = inputs.biomass_content_pct.or_zero();

    let co2e_total = ad * cc * CO2_PER_CARBON_MASS;
    let energy_total = ad * ncv / 1000.0;

    EmissionOutputs {
        co2e_fossil_t: co2e_total * ((100.0 - bc) / 100.0),
        co2e_bio_t: co2e_total * (bc / 100.0),
        energy_content_fossil_tj: energy_total * ((100.0 - bc) / 100.0),
        energy_content_bio_tj: energy_total * (bc / 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::format_metric;

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn process_reference_case() {
        let inputs = ProcessInputs {
            activity_data: NumericInput::Value(1000.0),
            net_calorific_value: NumericInput::Value(30.0),
            emission_factor: NumericInput::Value(94.6),
            oxidation_factor_pct: NumericInput::Value(99.0),
            biomass_content_pct: NumericInput::Value(0.0),
        };
        let out = compute_process(&inputs);
        close(out.co2e_fossil_t, 1000.0 * 30.0 * 94.6 / 1000.0 * 0.99);
        close(out.co2e_bio_t, 0.0);
        close(out.energy_content_fossil_tj, 30.0);
        close(out.energy_content_bio_tj, 0.0);
        assert_eq!(format_metric(out.co2e_fossil_t), "2809.6200");
        assert_eq!(format_metric(out.energy_content_fossil_tj), "30.0000");
    }

    #[test]
    fn process_guard_zeroes_everything() {
        let base = ProcessInputs {
            activity_data: NumericInput::Value(1000.0),
            net_calorific_value: NumericInput::Value(30.0),
            emission_factor: NumericInput::Value(94.6),
            oxidation_factor_pct: NumericInput::Value(99.0),
            biomass_content_pct: NumericInput::Value(40.0),
        };
        let zeroed = [
            ProcessInputs { activity_data: NumericInput::Value(0.0), ..base },
            ProcessInputs { net_calorific_value: NumericInput::Unset, ..base },
            ProcessInputs { emission_factor: NumericInput::Value(0.0), ..base },
            ProcessInputs { oxidation_factor_pct: NumericInput::Unset, ..base },
        ];
        for inputs in zeroed {
            assert_eq!(compute_process(&inputs), EmissionOutputs::ZERO);
        }
        // Biomass content is not part of the process guard.
        assert_ne!(compute_process(&base), EmissionOutputs::ZERO);
    }

    #[test]
    fn process_biomass_split_is_complementary() {
        let inputs = ProcessInputs {
            activity_data: NumericInput::Value(800.0),
            net_calorific_value: NumericInput::Value(25.0),
            emission_factor: NumericInput::Value(56.1),
            oxidation_factor_pct: NumericInput::Value(98.0),
            biomass_content_pct: NumericInput::Value(35.0),
        };
        let out = compute_process(&inputs);
        let total = 800.0 * 25.0 * 56.1 / 1000.0 * 0.98;
        close(out.co2e_fossil_t + out.co2e_bio_t, total);
        close(out.energy_content_fossil_tj + out.energy_content_bio_tj, 800.0 * 25.0 / 1000.0);
    }

    #[test]
    fn mass_balance_reference_case() {
        let inputs = MassBalanceInputs {
            activity_data: NumericInput::Value(500.0),
            net_calorific_value: NumericInput::Value(28.0),
            carbon_content: NumericInput::Value(0.75),
            biomass_content_pct: NumericInput::Value(10.0),
        };
        let out = compute_mass_balance(&inputs);
        close(out.co2e_fossil_t, 1236.6);
        close(out.co2e_bio_t, 137.4);
        close(out.energy_content_fossil_tj, 500.0 * 28.0 / 1000.0 * 0.9);
    }

    #[test]
    fn mass_balance_guard_includes_biomass_content() {
        let inputs = MassBalanceInputs {
            activity_data: NumericInput::Value(500.0),
            net_calorific_value: NumericInput::Value(28.0),
            carbon_content: NumericInput::Value(0.75),
            biomass_content_pct: NumericInput::Value(0.0),
        };
        assert_eq!(compute_mass_balance(&inputs), EmissionOutputs::ZERO);
    }
}
