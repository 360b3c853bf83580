#![forbid(unsafe_code)]

//! The active form session.
//!
//! One [`Wizard`] owns the six step forms, the reference store, and the
//! current step. Advancing requires the active step to validate; going
//! back never blocks and never clears entered data. Cascading selections
//! (industry, goods) go through the wizard so the precursors step is
//! reseeded in the same update that invalidates it.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use cbam_core::{
    AmountsForm, FormRecord, GoodsForm, InstallationForm, PrecursorsForm, SourceEmissionsForm,
    VerifierForm, validate,
};

use crate::reference_store::ReferenceStore;
use crate::step::WizardStep;

/// Validation outcome for one step, with wire field names in scroll order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepValidation {
    pub step: WizardStep,
    pub missing: Vec<String>,
}

impl StepValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// The scroll-to target.
    #[must_use]
    pub fn first_missing(&self) -> Option<&str> {
        self.missing.first().map(String::as_str)
    }
}

/// Returned when [`Wizard::try_advance`] is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} has {} required field(s) missing", missing.len())]
pub struct StepBlocked {
    pub step: WizardStep,
    pub missing: Vec<String>,
}

/// The whole wizard session.
#[derive(Debug, Default)]
pub struct Wizard {
    step: WizardStep,
    pub installation: InstallationForm,
    pub verifier: VerifierForm,
    pub goods: GoodsForm,
    pub precursors: PrecursorsForm,
    pub amounts: AmountsForm,
    pub source_emissions: SourceEmissionsForm,
    reference: ReferenceStore,
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceStore {
        &self.reference
    }

    pub fn reference_mut(&mut self) -> &mut ReferenceStore {
        &mut self.reference
    }

    pub(crate) fn restore_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    /// Fill the default country into every form that has no country yet.
    /// Called once the country list has loaded; explicit selections stay.
    pub fn apply_default_country(&mut self) {
        let Some(country) = self.reference.default_country().cloned() else {
            return;
        };
        self.installation.apply_default_country(&country);
        self.verifier.apply_default_country(&country);
        self.precursors.apply_default_country(&country);
    }

    /// Industry selection, cascading: a change clears the goods, route,
    /// and precursor selections and empties the precursors step.
    pub fn select_industry(&mut self, industry_id: Option<i64>) {
        let changed = self.goods.industry_type != industry_id;
        self.goods.select_industry(industry_id);
        if changed {
            self.precursors = PrecursorsForm::default();
        }
    }

    /// Goods selection, cascading: a change clears route selections and
    /// reseeds the precursors step from the reference tree.
    pub fn select_goods(&mut self, goods_id: Option<i64>) {
        let changed = self.goods.goods_category != goods_id;
        self.goods.select_goods(goods_id);
        if !changed {
            return;
        }
        match (self.goods.industry_type, goods_id) {
            (Some(industry_id), Some(goods_id)) => {
                self.precursors.seed_from_reference(
                    self.reference.tree(),
                    industry_id,
                    goods_id,
                    self.reference.default_country(),
                );
            }
            _ => self.precursors = PrecursorsForm::default(),
        }
    }

    /// Validate one step without moving.
    #[must_use]
    pub fn validate_step(&self, step: WizardStep) -> StepValidation {
        let missing = match step {
            WizardStep::Installation => missing_fields(&self.installation),
            WizardStep::Verifier => missing_fields(&self.verifier),
            WizardStep::Goods => missing_fields(&self.goods),
            WizardStep::Precursors => self
                .precursors
                .validate_entries()
                .iter()
                .map(|error| error.field.to_string())
                .collect(),
            WizardStep::Amounts => missing_fields(&self.amounts),
            WizardStep::SourceEmissions => missing_fields(&self.source_emissions),
        };
        StepValidation { step, missing }
    }

    /// Validate the active step.
    #[must_use]
    pub fn validate_active(&self) -> StepValidation {
        self.validate_step(self.step)
    }

    /// Move to the next step if the active step validates. At the final
    /// step a valid session stays put; the host submits and closes.
    pub fn try_advance(&mut self) -> Result<WizardStep, StepBlocked> {
        let report = self.validate_active();
        if !report.is_valid() {
            return Err(StepBlocked {
                step: report.step,
                missing: report.missing,
            });
        }
        if let Some(next) = self.step.next() {
            debug!(from = %self.step, to = %next, "step advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step. Never blocks; entered data stays untouched.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.back() {
            debug!(from = %self.step, to = %previous, "step back");
            self.step = previous;
        }
        self.step
    }

    /// The JSON body the given step submits.
    #[must_use]
    pub fn payload_for(&self, step: WizardStep) -> Value {
        match step {
            WizardStep::Installation => self.installation.payload(),
            WizardStep::Verifier => self.verifier.verifier_payload(),
            WizardStep::Goods => self.goods.payload(),
            WizardStep::Precursors => self.precursors.payload(),
            WizardStep::Amounts => self.amounts.payload(),
            WizardStep::SourceEmissions => self.source_emissions.payload(),
        }
    }

    /// Companion body for the verifier step's second endpoint.
    #[must_use]
    pub fn representative_payload(&self) -> Value {
        self.verifier.representative_payload()
    }
}

fn missing_fields<R: FormRecord>(record: &R) -> Vec<String> {
    validate(record)
        .errors()
        .iter()
        .map(|error| error.field.to_string())
        .collect()
}
