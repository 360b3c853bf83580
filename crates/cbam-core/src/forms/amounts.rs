#![forbid(unsafe_code)]

//! Production amounts and energy flows for the reporting period: per-route
//! production, internal consumption, heat and waste-gas exchange, and
//! electricity balance.
//!
//! This is the widest step of the wizard; every quantity field keeps the
//! permissive numeric policy via [`NumericInput`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::forms::text_is_empty;
use crate::numeric::NumericInput;
use crate::validate::FormRecord;

/// Number of production-route slots on the form.
pub const ROUTE_SLOTS: usize = 6;

/// One production route with its produced amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSlot {
    pub route: String,
    pub amount: NumericInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountsField {
    ReportId,
    Name,
    Route(u8),
    RouteAmount(u8),
    TotalConsumedWithinInstallation,
    ConsumedInOthersAmount,
    ConsumedNonCbamGoodsAmount,
    HasHeat,
    HasWasteGases,
    DirectEmissions,
    ImportedHeatValue,
    ExportedHeatValue,
    EfImportedHeat,
    EfExportedHeat,
    ElectricityConsumptionValue,
    EfElectricity,
    SourceOfEfElectricity,
    ExportedElectricityValue,
    EfExportedElectricity,
    TotalProductionAmount,
    ProducedForMarketAmount,
    ImportedWasteGasesAmount,
    EfImportedWasteGases,
    ExportedWasteGasesAmount,
    EfExportedWasteGases,
}

impl std::fmt::Display for AmountsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReportId => f.write_str("report_id"),
            Self::Name => f.write_str("name"),
            Self::Route(i) => write!(f, "route_{}", i + 1),
            Self::RouteAmount(i) => write!(f, "route_{}_amounts", i + 1),
            Self::TotalConsumedWithinInstallation => {
                f.write_str("total_consumed_within_installation")
            }
            Self::ConsumedInOthersAmount => f.write_str("consumed_in_others_amount"),
            Self::ConsumedNonCbamGoodsAmount => f.write_str("consumed_non_cbam_goods_amount"),
            Self::HasHeat => f.write_str("has_heat"),
            Self::HasWasteGases => f.write_str("has_waste_gases"),
            Self::DirectEmissions => f.write_str("direct_emissions"),
            Self::ImportedHeatValue => f.write_str("imported_heat_value"),
            Self::ExportedHeatValue => f.write_str("exported_heat_value"),
            Self::EfImportedHeat => f.write_str("ef_imported_heat"),
            Self::EfExportedHeat => f.write_str("ef_exported_heat"),
            Self::ElectricityConsumptionValue => f.write_str("electricity_consumption_value"),
            Self::EfElectricity => f.write_str("ef_electricity"),
            Self::SourceOfEfElectricity => f.write_str("source_of_ef_electricity"),
            Self::ExportedElectricityValue => f.write_str("exported_electricity_value"),
            Self::EfExportedElectricity => f.write_str("ef_exported_electricity"),
            Self::TotalProductionAmount => f.write_str("total_production_amount"),
            Self::ProducedForMarketAmount => f.write_str("produced_for_market_amount"),
            Self::ImportedWasteGasesAmount => f.write_str("imported_wgases_amount"),
            Self::EfImportedWasteGases => f.write_str("ef_imported_wgases"),
            Self::ExportedWasteGasesAmount => f.write_str("exported_wgases_amount"),
            Self::EfExportedWasteGases => f.write_str("ef_exported_wgases"),
        }
    }
}

/// Step 5: production amounts and energy flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountsForm {
    pub report_id: String,
    pub name: String,
    pub routes: [RouteSlot; ROUTE_SLOTS],
    pub total_consumed_within_installation: NumericInput,
    pub consumed_in_others_amount: NumericInput,
    pub consumed_non_cbam_goods_amount: NumericInput,
    /// Tri-state: unanswered until the operator picks yes or no.
    pub has_heat: Option<bool>,
    pub has_waste_gases: Option<bool>,
    pub direct_emissions: NumericInput,
    pub imported_heat_value: NumericInput,
    pub exported_heat_value: NumericInput,
    pub ef_imported_heat: NumericInput,
    pub ef_exported_heat: NumericInput,
    pub electricity_consumption_value: NumericInput,
    pub ef_electricity: NumericInput,
    pub source_of_ef_electricity: String,
    pub exported_electricity_value: NumericInput,
    pub ef_exported_electricity: NumericInput,
    pub total_production_amount: NumericInput,
    pub produced_for_market_amount: NumericInput,
    pub imported_waste_gases_amount: NumericInput,
    pub ef_imported_waste_gases: NumericInput,
    pub exported_waste_gases_amount: NumericInput,
    pub ef_exported_waste_gases: NumericInput,
}

impl AmountsForm {
    fn numeric(&self, field: AmountsField) -> Option<NumericInput> {
        use AmountsField as F;
        let value = match field {
            F::RouteAmount(i) => self.routes.get(usize::from(i))?.amount,
            F::TotalConsumedWithinInstallation => self.total_consumed_within_installation,
            F::ConsumedInOthersAmount => self.consumed_in_others_amount,
            F::ConsumedNonCbamGoodsAmount => self.consumed_non_cbam_goods_amount,
            F::DirectEmissions => self.direct_emissions,
            F::ImportedHeatValue => self.imported_heat_value,
            F::ExportedHeatValue => self.exported_heat_value,
            F::EfImportedHeat => self.ef_imported_heat,
            F::EfExportedHeat => self.ef_exported_heat,
            F::ElectricityConsumptionValue => self.electricity_consumption_value,
            F::EfElectricity => self.ef_electricity,
            F::ExportedElectricityValue => self.exported_electricity_value,
            F::EfExportedElectricity => self.ef_exported_electricity,
            F::TotalProductionAmount => self.total_production_amount,
            F::ProducedForMarketAmount => self.produced_for_market_amount,
            F::ImportedWasteGasesAmount => self.imported_waste_gases_amount,
            F::EfImportedWasteGases => self.ef_imported_waste_gases,
            F::ExportedWasteGasesAmount => self.exported_waste_gases_amount,
            F::EfExportedWasteGases => self.ef_exported_waste_gases,
            _ => return None,
        };
        Some(value)
    }

    /// JSON body for `POST /api/cbam/amounts`.
    #[must_use]
    pub fn payload(&self) -> Value {
        let routes: Vec<Value> = self
            .routes
            .iter()
            .map(|slot| {
                json!({
                    "route": slot.route,
                    "amount": slot.amount.or_zero(),
                })
            })
            .collect();
        json!({
            "report_id": self.report_id,
            "name": self.name,
            "routes": routes,
            "total_consumed_within_installation": self.total_consumed_within_installation.or_zero(),
            "consumed_in_others_amount": self.consumed_in_others_amount.or_zero(),
            "consumed_non_cbam_goods_amount": self.consumed_non_cbam_goods_amount.or_zero(),
            "has_heat": self.has_heat,
            "has_waste_gases": self.has_waste_gases,
            "direct_emissions": self.direct_emissions.or_zero(),
            "imported_heat_value": self.imported_heat_value.or_zero(),
            "exported_heat_value": self.exported_heat_value.or_zero(),
            "ef_imported_heat": self.ef_imported_heat.or_zero(),
            "ef_exported_heat": self.ef_exported_heat.or_zero(),
            "electricity_consumption_value": self.electricity_consumption_value.or_zero(),
            "ef_electricity": self.ef_electricity.or_zero(),
            "source_of_ef_electricity": self.source_of_ef_electricity,
            "exported_electricity_value": self.exported_electricity_value.or_zero(),
            "ef_exported_electricity": self.ef_exported_electricity.or_zero(),
            "total_production_amount": self.total_production_amount.or_zero(),
            "produced_for_market_amount": self.produced_for_market_amount.or_zero(),
            "imported_wgases_amount": self.imported_waste_gases_amount.or_zero(),
            "ef_imported_wgases": self.ef_imported_waste_gases.or_zero(),
            "exported_wgases_amount": self.exported_waste_gases_amount.or_zero(),
            "ef_exported_wgases": self.ef_exported_waste_gases.or_zero(),
        })
    }
}

impl FormRecord for AmountsForm {
    type Field = AmountsField;

    fn field_is_empty(&self, field: AmountsField) -> bool {
        use AmountsField as F;
        match field {
            F::ReportId => text_is_empty(&self.report_id),
            F::Name => text_is_empty(&self.name),
            F::Route(i) => self
                .routes
                .get(usize::from(i))
                .is_none_or(|slot| text_is_empty(&slot.route)),
            F::SourceOfEfElectricity => text_is_empty(&self.source_of_ef_electricity),
            F::HasHeat => self.has_heat.is_none(),
            F::HasWasteGases => self.has_waste_gases.is_none(),
            other => self
                .numeric(other)
                .is_none_or(NumericInput::is_unset),
        }
    }

    fn required_fields() -> &'static [AmountsField] {
        use AmountsField as F;
        &[
            F::ReportId,
            F::Name,
            F::Route(0),
            F::RouteAmount(0),
            F::Route(1),
            F::RouteAmount(1),
            F::Route(2),
            F::RouteAmount(2),
            F::Route(3),
            F::RouteAmount(3),
            F::Route(4),
            F::RouteAmount(4),
            F::Route(5),
            F::RouteAmount(5),
            F::TotalConsumedWithinInstallation,
            F::ConsumedInOthersAmount,
            F::ConsumedNonCbamGoodsAmount,
            F::HasHeat,
            F::HasWasteGases,
            F::DirectEmissions,
            F::ImportedHeatValue,
            F::ExportedHeatValue,
            F::EfImportedHeat,
            F::EfExportedHeat,
            F::ElectricityConsumptionValue,
            F::EfElectricity,
            F::SourceOfEfElectricity,
            F::ExportedElectricityValue,
            F::EfExportedElectricity,
            F::TotalProductionAmount,
            F::ProducedForMarketAmount,
            F::ImportedWasteGasesAmount,
            F::EfImportedWasteGases,
            F::ExportedWasteGasesAmount,
            F::EfExportedWasteGases,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    fn filled_form() -> AmountsForm {
        let mut form = AmountsForm {
            report_id: "R-2026-001".to_owned(),
            name: "Crude steel".to_owned(),
            has_heat: Some(true),
            has_waste_gases: Some(false),
            source_of_ef_electricity: "Grid mix (MEA)".to_owned(),
            ..AmountsForm::default()
        };
        for slot in &mut form.routes {
            slot.route = "Basic oxygen furnace".to_owned();
            slot.amount = NumericInput::Value(100.0);
        }
        for field in AmountsForm::required_fields() {
            if form.numeric(*field).is_some_and(NumericInput::is_unset) {
                form.set_numeric_for_test(*field);
            }
        }
        form
    }

    impl AmountsForm {
        fn set_numeric_for_test(&mut self, field: AmountsField) {
            use AmountsField as F;
            let value = NumericInput::Value(1.0);
            match field {
                F::RouteAmount(i) => self.routes[usize::from(i)].amount = value,
                F::TotalConsumedWithinInstallation => {
                    self.total_consumed_within_installation = value;
                }
                F::ConsumedInOthersAmount => self.consumed_in_others_amount = value,
                F::ConsumedNonCbamGoodsAmount => self.consumed_non_cbam_goods_amount = value,
                F::DirectEmissions => self.direct_emissions = value,
                F::ImportedHeatValue => self.imported_heat_value = value,
                F::ExportedHeatValue => self.exported_heat_value = value,
                F::EfImportedHeat => self.ef_imported_heat = value,
                F::EfExportedHeat => self.ef_exported_heat = value,
                F::ElectricityConsumptionValue => self.electricity_consumption_value = value,
                F::EfElectricity => self.ef_electricity = value,
                F::ExportedElectricityValue => self.exported_electricity_value = value,
                F::EfExportedElectricity => self.ef_exported_electricity = value,
                F::TotalProductionAmount => self.total_production_amount = value,
                F::ProducedForMarketAmount => self.produced_for_market_amount = value,
                F::ImportedWasteGasesAmount => self.imported_waste_gases_amount = value,
                F::EfImportedWasteGases => self.ef_imported_waste_gases = value,
                F::ExportedWasteGasesAmount => self.exported_waste_gases_amount = value,
                F::EfExportedWasteGases => self.ef_exported_waste_gases = value,
                _ => {}
            }
        }
    }

    #[test]
    fn empty_form_scrolls_to_report_id() {
        let report = validate(&AmountsForm::default());
        assert_eq!(
            report.first_error().map(|e| e.field),
            Some(AmountsField::ReportId)
        );
        assert_eq!(
            report.errors().len(),
            AmountsForm::required_fields().len()
        );
    }

    #[test]
    fn unanswered_tri_state_blocks_submission() {
        let mut form = filled_form();
        form.has_waste_gases = None;
        let report = validate(&form);
        assert_eq!(
            report.first_error().map(|e| e.field),
            Some(AmountsField::HasWasteGases)
        );
    }

    #[test]
    fn filled_form_validates_and_serializes() {
        let form = filled_form();
        assert!(validate(&form).is_valid());
        let payload = form.payload();
        assert_eq!(payload["report_id"], "R-2026-001");
        assert_eq!(payload["routes"][2]["amount"], 100.0);
        assert_eq!(payload["has_heat"], true);
    }

    #[test]
    fn route_field_names_are_one_based() {
        assert_eq!(AmountsField::Route(0).to_string(), "route_1");
        assert_eq!(AmountsField::RouteAmount(5).to_string(), "route_6_amounts");
    }
}
