#![forbid(unsafe_code)]

//! Source-stream emissions: the calculation step.
//!
//! Three stream blocks mirror the reporting template: specific embedded
//! direct emissions (combustion), process emissions, and mass balance.
//! The process and mass-balance blocks carry the four derived metrics;
//! those are exposed as pure views over the current inputs
//! ([`SourceEmissionsForm::process_outputs`] /
//! [`SourceEmissionsForm::mass_balance_outputs`]) and recomputed on every
//! call, so an observer can never read an output that lags its inputs.
//!
//! Numeric edits go through [`SourceEmissionsForm::set_numeric`] with raw
//! text; the permissive [`NumericInput::parse`] policy applies.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::calc::{
    EmissionOutputs, MassBalanceInputs, ProcessInputs, compute_mass_balance, compute_process,
};
use crate::numeric::{NumericInput, format_metric};
use crate::validate::FormRecord;

/// Which stream block a field edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamBlock {
    /// Specific embedded direct emissions (combustion).
    Combustion,
    /// Process emissions.
    Process,
    /// Mass balance.
    MassBalance,
}

impl StreamBlock {
    /// Wire-name prefix for the block's fields.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Combustion => "c",
            Self::Process => "p",
            Self::MassBalance => "m",
        }
    }
}

/// Numeric fields that retrigger recomputation when edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    ActivityData(StreamBlock),
    NetCalorificValue(StreamBlock),
    /// Process block only.
    EmissionFactor,
    /// Combustion and process blocks.
    OxidationFactor(StreamBlock),
    /// Mass-balance block only.
    CarbonContent,
    BiomassContent(StreamBlock),
}

impl std::fmt::Display for SourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivityData(block) => write!(f, "{}_activity_data", block.prefix()),
            Self::NetCalorificValue(block) => {
                write!(f, "{}_net_calorific_value", block.prefix())
            }
            Self::EmissionFactor => f.write_str("p_emission_factor"),
            Self::OxidationFactor(block) => write!(f, "{}_oxidation_factor", block.prefix()),
            Self::CarbonContent => f.write_str("m_carbon_content"),
            Self::BiomassContent(block) => write!(f, "{}_biomass_content", block.prefix()),
        }
    }
}

/// Descriptive header shared by all three stream blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamHeader {
    pub method: String,
    pub source_stream_name: String,
    pub ad_unit: String,
    /// Derived from the AD unit; editable only for unrecognized units.
    pub ncv_unit: String,
}

impl StreamHeader {
    /// Select the activity-data unit and derive the NCV unit where the
    /// mapping is known; unknown units leave the NCV unit untouched.
    pub fn select_ad_unit(&mut self, unit: impl Into<String>) {
        let unit = unit.into();
        match unit.as_str() {
            "t" => self.ncv_unit = "GJ/t".to_owned(),
            "1000Nm3" => self.ncv_unit = "GJ/1000Nm3".to_owned(),
            _ => {}
        }
        self.ad_unit = unit;
    }
}

/// Combustion block: no emission factor and no derived metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombustionStream {
    pub header: StreamHeader,
    pub activity_data: NumericInput,
    pub net_calorific_value: NumericInput,
    pub oxidation_factor_pct: NumericInput,
    pub biomass_content_pct: NumericInput,
}

/// Process-emissions block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessStream {
    pub header: StreamHeader,
    pub ef_unit: String,
    pub inputs: ProcessInputs,
}

/// Mass-balance block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassBalanceStream {
    pub header: StreamHeader,
    pub inputs: MassBalanceInputs,
}

/// Step 6: source streams and emission sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceEmissionsForm {
    pub combustion: CombustionStream,
    pub process: ProcessStream,
    pub mass_balance: MassBalanceStream,
    pub fuel_balance: NumericInput,
    pub general_info: String,
    pub justification: String,
    pub quality_assurance: String,
}

impl SourceEmissionsForm {
    /// Apply a raw text edit to a numeric field. Parsing is permissive;
    /// outputs are derived on read, so no recompute bookkeeping is needed
    /// here.
    pub fn set_numeric(&mut self, field: SourceField, raw: &str) {
        let value = NumericInput::parse(raw);
        use SourceField as F;
        use StreamBlock as B;
        match field {
            F::ActivityData(B::Combustion) => self.combustion.activity_data = value,
            F::ActivityData(B::Process) => self.process.inputs.activity_data = value,
            F::ActivityData(B::MassBalance) => self.mass_balance.inputs.activity_data = value,
            F::NetCalorificValue(B::Combustion) => self.combustion.net_calorific_value = value,
            F::NetCalorificValue(B::Process) => {
                self.process.inputs.net_calorific_value = value;
            }
            F::NetCalorificValue(B::MassBalance) => {
                self.mass_balance.inputs.net_calorific_value = value;
            }
            F::EmissionFactor => self.process.inputs.emission_factor = value,
            F::OxidationFactor(B::Combustion) => self.combustion.oxidation_factor_pct = value,
            F::OxidationFactor(B::Process) => self.process.inputs.oxidation_factor_pct = value,
            // The mass-balance template has no oxidation factor.
            F::OxidationFactor(B::MassBalance) => {}
            F::CarbonContent => self.mass_balance.inputs.carbon_content = value,
            F::BiomassContent(B::Combustion) => self.combustion.biomass_content_pct = value,
            F::BiomassContent(B::Process) => self.process.inputs.biomass_content_pct = value,
            F::BiomassContent(B::MassBalance) => {
                self.mass_balance.inputs.biomass_content_pct = value;
            }
        }
    }

    /// Derived metrics for the process block, current as of this call.
    #[must_use]
    pub fn process_outputs(&self) -> EmissionOutputs {
        compute_process(&self.process.inputs)
    }

    /// Derived metrics for the mass-balance block, current as of this call.
    #[must_use]
    pub fn mass_balance_outputs(&self) -> EmissionOutputs {
        compute_mass_balance(&self.mass_balance.inputs)
    }

    /// JSON body for `POST /api/cbam/source`. Derived metrics are
    /// rendered at four decimal places, as displayed.
    #[must_use]
    pub fn payload(&self) -> Value {
        let p = self.process_outputs();
        let m = self.mass_balance_outputs();
        json!({
            "c_method": self.combustion.header.method,
            "c_source_stream_name": self.combustion.header.source_stream_name,
            "c_activity_data": self.combustion.activity_data.or_zero(),
            "c_ad_unit": self.combustion.header.ad_unit,
            "c_net_calorific_value": self.combustion.net_calorific_value.or_zero(),
            "c_ncv_unit": self.combustion.header.ncv_unit,
            "c_oxidation_factor": self.combustion.oxidation_factor_pct.or_zero(),
            "c_biomass_content": self.combustion.biomass_content_pct.or_zero(),
            "p_method": self.process.header.method,
            "p_source_stream_name": self.process.header.source_stream_name,
            "p_activity_data": self.process.inputs.activity_data.or_zero(),
            "p_ad_unit": self.process.header.ad_unit,
            "p_net_calorific_value": self.process.inputs.net_calorific_value.or_zero(),
            "p_ncv_unit": self.process.header.ncv_unit,
            "p_emission_factor": self.process.inputs.emission_factor.or_zero(),
            "p_ef_unit": self.process.ef_unit,
            "p_oxidation_factor": self.process.inputs.oxidation_factor_pct.or_zero(),
            "p_biomass_content": self.process.inputs.biomass_content_pct.or_zero(),
            "p_co2e_fossil": format_metric(p.co2e_fossil_t),
            "p_co2e_bio": format_metric(p.co2e_bio_t),
            "p_energy_content_fossil": format_metric(p.energy_content_fossil_tj),
            "p_energy_content_bio": format_metric(p.energy_content_bio_tj),
            "m_method": self.mass_balance.header.method,
            "m_source_stream_name": self.mass_balance.header.source_stream_name,
            "m_activity_data": self.mass_balance.inputs.activity_data.or_zero(),
            "m_ad_unit": self.mass_balance.header.ad_unit,
            "m_net_calorific_value": self.mass_balance.inputs.net_calorific_value.or_zero(),
            "m_ncv_unit": self.mass_balance.header.ncv_unit,
            "m_carbon_content": self.mass_balance.inputs.carbon_content.or_zero(),
            "m_biomass_content": self.mass_balance.inputs.biomass_content_pct.or_zero(),
            "m_co2e_fossil": format_metric(m.co2e_fossil_t),
            "m_co2e_bio": format_metric(m.co2e_bio_t),
            "m_energy_content_fossil": format_metric(m.energy_content_fossil_tj),
            "m_energy_content_bio": format_metric(m.energy_content_bio_tj),
            "fuel_balance": self.fuel_balance.or_zero(),
            "general_info": self.general_info,
            "justification": self.justification,
            "information_quality_assurance": self.quality_assurance,
        })
    }
}

/// Empty-variant placeholder so the step machine can treat all steps
/// uniformly; this step submits without required-field checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEmissionsField {}

impl std::fmt::Display for SourceEmissionsField {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl FormRecord for SourceEmissionsForm {
    type Field = SourceEmissionsField;

    fn field_is_empty(&self, field: SourceEmissionsField) -> bool {
        match field {}
    }

    fn required_fields() -> &'static [SourceEmissionsField] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn numeric_edits_flow_into_the_right_block() {
        let mut form = SourceEmissionsForm::default();
        form.set_numeric(SourceField::ActivityData(StreamBlock::Process), "1000");
        form.set_numeric(SourceField::ActivityData(StreamBlock::MassBalance), "500");
        assert_eq!(
            form.process.inputs.activity_data,
            NumericInput::Value(1000.0)
        );
        assert_eq!(
            form.mass_balance.inputs.activity_data,
            NumericInput::Value(500.0)
        );
        assert_eq!(form.combustion.activity_data, NumericInput::Unset);
    }

    #[test]
    fn outputs_track_every_edit_immediately() {
        let mut form = SourceEmissionsForm::default();
        form.set_numeric(SourceField::ActivityData(StreamBlock::Process), "1000");
        form.set_numeric(SourceField::NetCalorificValue(StreamBlock::Process), "30");
        form.set_numeric(SourceField::EmissionFactor, "94.6");
        assert_eq!(form.process_outputs(), EmissionOutputs::ZERO); // OF still unset
        form.set_numeric(SourceField::OxidationFactor(StreamBlock::Process), "99");
        let out = form.process_outputs();
        assert!((out.co2e_fossil_t - 2809.62).abs() < 1e-9);
        // Editing biomass re-derives the split on the next read.
        form.set_numeric(SourceField::BiomassContent(StreamBlock::Process), "50");
        let split = form.process_outputs();
        assert!((split.co2e_fossil_t - split.co2e_bio_t).abs() < 1e-9);
    }

    #[test]
    fn garbage_text_leaves_the_field_unset() {
        let mut form = SourceEmissionsForm::default();
        form.set_numeric(SourceField::CarbonContent, "0.75");
        form.set_numeric(SourceField::CarbonContent, "not a number");
        assert_eq!(form.mass_balance.inputs.carbon_content, NumericInput::Unset);
    }

    #[test]
    fn ad_unit_selection_derives_the_ncv_unit() {
        let mut header = StreamHeader::default();
        header.select_ad_unit("t");
        assert_eq!(header.ncv_unit, "GJ/t");
        header.select_ad_unit("1000Nm3");
        assert_eq!(header.ncv_unit, "GJ/1000Nm3");
        header.select_ad_unit("bbl");
        assert_eq!(header.ad_unit, "bbl");
        assert_eq!(header.ncv_unit, "GJ/1000Nm3"); // unknown unit keeps the last derivation
    }

    #[test]
    fn payload_renders_derived_metrics_at_four_decimals() {
        let mut form = SourceEmissionsForm::default();
        form.set_numeric(SourceField::ActivityData(StreamBlock::MassBalance), "500");
        form.set_numeric(SourceField::NetCalorificValue(StreamBlock::MassBalance), "28");
        form.set_numeric(SourceField::CarbonContent, "0.75");
        form.set_numeric(SourceField::BiomassContent(StreamBlock::MassBalance), "10");
        let payload = form.payload();
        assert_eq!(payload["m_co2e_fossil"], "1236.6000");
        assert_eq!(payload["m_co2e_bio"], "137.4000");
        assert_eq!(payload["p_co2e_fossil"], "0.0000");
    }

    #[test]
    fn step_has_no_required_fields() {
        assert!(validate(&SourceEmissionsForm::default()).is_valid());
    }
}
