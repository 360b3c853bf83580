#![forbid(unsafe_code)]

//! CBAM Wizard Core
//!
//! Pure domain logic for the carbon-border-adjustment reporting wizard:
//! reference-data resolution, emission calculation, and typed per-form
//! field records with a required-field validation contract.
//!
//! # Key Components
//!
//! - [`ReferenceData`] - Session-owned industry/goods/route/precursor tree
//!   with id-indexed option resolvers
//! - [`NumericInput`] - Permissive numeric parsing with an explicit unset
//!   state distinct from zero
//! - [`compute_process`] / [`compute_mass_balance`] - The emission
//!   calculator: four derived metrics per accounting method
//! - [`FormRecord`] / [`validate`] - Typed field identifiers and the pure
//!   missing-required-field check shared by every wizard step
//!
//! # Role in the workspace
//! `cbam-core` is the leaf crate: no I/O, no clocks, no shared mutable
//! state. `cbam-client` maps wire JSON into these types and `cbam-wizard`
//! drives them through the step machine.

pub mod calc;
pub mod forms;
pub mod numeric;
pub mod reference;
pub mod validate;

pub use calc::{
    CO2_PER_CARBON_MASS, EmissionOutputs, MassBalanceInputs, ProcessInputs, compute_mass_balance,
    compute_process,
};
pub use forms::{
    AmountsField, AmountsForm, CombustionStream, GoodsField, GoodsForm, InstallationField,
    InstallationForm, MAX_PRECURSOR_ENTRIES, MassBalanceStream, PrecursorEntry, PrecursorField,
    PrecursorsForm, ProcessStream, ROUTE_SLOTS, RouteSlot, SourceEmissionsField,
    SourceEmissionsForm, SourceField, StreamBlock, StreamHeader, VerifierField, VerifierForm,
};
pub use numeric::{NumericInput, format_metric};
pub use reference::{
    CountryOption, ElectricitySource, Goods, IndustryGroup, OptionValue, ReferenceData,
    SelectOption, electricity_source_options, emission_factor_for_source, goods_options,
    industry_label, industry_options, precursor_options, resolve_default_country, route_options,
};
pub use validate::{FieldError, FormRecord, MISSING_FIELD_MESSAGE, ValidationReport, validate};
