#![forbid(unsafe_code)]

//! Goods categories and production routes — the cascading-selection step.
//!
//! # Invariant
//!
//! Whenever the industry selection changes, every downstream selection
//! (goods category, route, extra routes, precursors) is reset before any
//! new child option can be offered; a goods change likewise resets routes
//! and precursors. No stale child value ever survives a parent change.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::forms::text_is_empty;
use crate::reference::CountryOption;
use crate::validate::FormRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodsField {
    Installation,
    EconomicActivity,
    IndustryType,
    GoodsCategory,
    Route,
}

impl std::fmt::Display for GoodsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Installation => "installation",
            Self::EconomicActivity => "economic_activity",
            Self::IndustryType => "industry_type",
            Self::GoodsCategory => "goods_category",
            Self::Route => "route",
        };
        f.write_str(name)
    }
}

/// Step 3: aggregated goods category and production-route selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsForm {
    pub installation: String,
    pub economic_activity: String,
    pub industry_type: Option<i64>,
    pub goods_category: Option<i64>,
    /// Main production route (a route name from the reference tree).
    pub route: Option<String>,
    /// Additional route slots, at most six.
    pub extra_routes: Vec<String>,
    /// Precursor selections carried into the precursors step.
    pub precursors: Vec<String>,
    pub country_id: Option<i64>,
    pub unlocode: String,
    pub electricity_source: Option<i64>,
}

impl GoodsForm {
    /// Select the industry. Downstream selections are invalidated in the
    /// same update; child options must be re-derived before re-selection.
    pub fn select_industry(&mut self, industry_id: Option<i64>) {
        if self.industry_type == industry_id {
            return;
        }
        self.industry_type = industry_id;
        self.goods_category = None;
        self.route = None;
        self.extra_routes.clear();
        self.precursors.clear();
    }

    /// Select the goods category; resets route and precursor selections.
    pub fn select_goods(&mut self, goods_id: Option<i64>) {
        if self.goods_category == goods_id {
            return;
        }
        self.goods_category = goods_id;
        self.route = None;
        self.extra_routes.clear();
        self.precursors.clear();
    }

    pub fn select_route(&mut self, route: impl Into<String>) {
        self.route = Some(route.into());
    }

    pub fn select_country(&mut self, country: &CountryOption) {
        self.country_id = Some(country.value);
        self.unlocode = country.abbreviation.clone();
    }

    /// JSON body for `POST /api/cbam/goods`.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "installation": self.installation,
            "economic_activity": self.economic_activity,
            "industry_type": self.industry_type,
            "goods_category": self.goods_category,
            "route": self.route,
            "routes": self.extra_routes,
            "precursors": self.precursors,
            "country_id": self.country_id,
            "unlocode": self.unlocode,
            "electricity_source": self.electricity_source,
        })
    }
}

impl FormRecord for GoodsForm {
    type Field = GoodsField;

    fn field_is_empty(&self, field: GoodsField) -> bool {
        match field {
            GoodsField::Installation => text_is_empty(&self.installation),
            GoodsField::EconomicActivity => text_is_empty(&self.economic_activity),
            GoodsField::IndustryType => self.industry_type.is_none(),
            GoodsField::GoodsCategory => self.goods_category.is_none(),
            GoodsField::Route => self
                .route
                .as_deref()
                .is_none_or(text_is_empty),
        }
    }

    fn required_fields() -> &'static [GoodsField] {
        &[
            GoodsField::Installation,
            GoodsField::EconomicActivity,
            GoodsField::IndustryType,
            GoodsField::GoodsCategory,
            GoodsField::Route,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    fn selected_form() -> GoodsForm {
        let mut form = GoodsForm::default();
        form.select_industry(Some(3));
        form.select_goods(Some(31));
        form.select_route("Basic oxygen furnace");
        form.precursors = vec!["Pig iron".to_owned()];
        form.extra_routes = vec!["Electric arc furnace".to_owned()];
        form
    }

    #[test]
    fn industry_change_invalidates_every_downstream_selection() {
        let mut form = selected_form();
        form.select_industry(Some(1));
        assert_eq!(form.industry_type, Some(1));
        assert_eq!(form.goods_category, None);
        assert_eq!(form.route, None);
        assert!(form.extra_routes.is_empty());
        assert!(form.precursors.is_empty());
    }

    #[test]
    fn reselecting_the_same_industry_keeps_children() {
        let mut form = selected_form();
        form.select_industry(Some(3));
        assert_eq!(form.goods_category, Some(31));
        assert_eq!(form.route.as_deref(), Some("Basic oxygen furnace"));
    }

    #[test]
    fn goods_change_resets_routes_and_precursors_only() {
        let mut form = selected_form();
        form.select_goods(Some(32));
        assert_eq!(form.industry_type, Some(3));
        assert_eq!(form.goods_category, Some(32));
        assert_eq!(form.route, None);
        assert!(form.precursors.is_empty());
    }

    #[test]
    fn validation_requires_the_cascade_to_be_complete() {
        let mut form = GoodsForm::default();
        form.installation = "Map Ta Phut works".to_owned();
        form.economic_activity = "Steelmaking".to_owned();
        let report = validate(&form);
        assert_eq!(
            report.first_error().map(|e| e.field),
            Some(GoodsField::IndustryType)
        );
        form.select_industry(Some(3));
        form.select_goods(Some(31));
        form.select_route("Basic oxygen furnace");
        assert!(validate(&form).is_valid());
    }
}
