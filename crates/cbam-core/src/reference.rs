#![forbid(unsafe_code)]

//! Reference dataset model and dependent-option resolution.
//!
//! The backend serves one hierarchical reference tree per session:
//! industry types own goods categories, which own production routes and
//! relevant precursor names. Every dependent dropdown consumes the same
//! uniform [`SelectOption`] pair, so each resolver here is a pure mapping
//! from the tree plus the upstream selection to an option list.
//!
//! # Invariants
//!
//! 1. Resolvers preserve source order; nothing is sorted.
//! 2. A missing parent id yields an empty list, never an error.
//! 3. Resolvers are pure: identical arguments produce identical output.
//! 4. `industry_type_id` is unique within the reference set and `goods_id`
//!    unique within its parent group; lookups take the first match.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One goods category within an industry group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    pub goods_id: i64,
    pub name: String,
    #[serde(default)]
    pub routes: Vec<String>,
    #[serde(default)]
    pub relevant_precursors: Vec<String>,
    /// Back-reference to the owning group.
    pub industry_type_id: i64,
}

/// Top level of the reference tree: an industry type and its goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryGroup {
    pub industry_type_id: i64,
    #[serde(default)]
    pub goods: Vec<Goods>,
}

/// Selection key of a dropdown option: numeric id or self-labeled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Id(i64),
    Text(String),
}

impl From<i64> for OptionValue {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// The uniform label/value pair consumed by every dependent dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

impl SelectOption {
    /// Option keyed by a numeric id.
    #[must_use]
    pub fn id(label: impl Into<String>, id: i64) -> Self {
        Self {
            label: label.into(),
            value: OptionValue::Id(id),
        }
    }

    /// Self-labeled option: label and value are the same text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        let label = value.into();
        Self {
            value: OptionValue::Text(label.clone()),
            label,
        }
    }
}

/// Country reference entry. Loaded once per form session, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryOption {
    /// Display name, e.g. "Thailand".
    pub label: String,
    /// Backend country id.
    pub value: i64,
    /// UN/LOCODE-style code, e.g. "TH"; pre-fills derived unlocode fields.
    pub abbreviation: String,
}

/// Electricity-source reference entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricitySource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub emission_factor: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Fixed display name for an industry type id.
///
/// Unknown ids fall back to `"Industry {id}"` so a new backend id still
/// renders a usable label.
#[must_use]
pub fn industry_label(id: i64) -> String {
    match id {
        1 => "Cement".to_owned(),
        2 => "Aluminium".to_owned(),
        3 => "Iron and Steel".to_owned(),
        _ => format!("Industry {id}"),
    }
}

/// Options for the top-level industry dropdown, in source order.
#[must_use]
pub fn industry_options(data: &[IndustryGroup]) -> Vec<SelectOption> {
    data.iter()
        .map(|group| SelectOption::id(industry_label(group.industry_type_id), group.industry_type_id))
        .collect()
}

/// Goods categories for the selected industry. Empty when no group matches.
#[must_use]
pub fn goods_options(data: &[IndustryGroup], industry_id: i64) -> Vec<SelectOption> {
    data.iter()
        .find(|group| group.industry_type_id == industry_id)
        .map(|group| {
            group
                .goods
                .iter()
                .map(|goods| SelectOption::id(goods.name.clone(), goods.goods_id))
                .collect()
        })
        .unwrap_or_default()
}

fn find_goods(data: &[IndustryGroup], industry_id: i64, goods_id: i64) -> Option<&Goods> {
    data.iter()
        .find(|group| group.industry_type_id == industry_id)?
        .goods
        .iter()
        .find(|goods| goods.goods_id == goods_id)
}

/// Production routes for the selected goods, self-labeled.
///
/// Empty when either the industry or the goods lookup misses.
#[must_use]
pub fn route_options(data: &[IndustryGroup], industry_id: i64, goods_id: i64) -> Vec<SelectOption> {
    find_goods(data, industry_id, goods_id)
        .map(|goods| goods.routes.iter().map(SelectOption::text).collect())
        .unwrap_or_default()
}

/// Relevant precursors for the selected goods, self-labeled.
#[must_use]
pub fn precursor_options(
    data: &[IndustryGroup],
    industry_id: i64,
    goods_id: i64,
) -> Vec<SelectOption> {
    find_goods(data, industry_id, goods_id)
        .map(|goods| {
            goods
                .relevant_precursors
                .iter()
                .map(SelectOption::text)
                .collect()
        })
        .unwrap_or_default()
}

/// Business default: the entry labeled exactly `"Thailand"`, if present.
///
/// The match is exact and case-sensitive; this is a fixed default for the
/// Thai reporting deployment, not a general mechanism.
#[must_use]
pub fn resolve_default_country(countries: &[CountryOption]) -> Option<&CountryOption> {
    countries.iter().find(|country| country.label == "Thailand")
}

/// Options for the electricity-source dropdown.
///
/// The label composes the optional region, emission factor, and year:
/// `"Grid mix (MEA) - 0.42 tCO2/MWh (2023)"`.
#[must_use]
pub fn electricity_source_options(sources: &[ElectricitySource]) -> Vec<SelectOption> {
    sources
        .iter()
        .map(|source| SelectOption::id(electricity_source_label(source), source.id))
        .collect()
}

fn electricity_source_label(source: &ElectricitySource) -> String {
    let mut label = source.name.clone();
    if let Some(region) = &source.region {
        label.push_str(&format!(" ({region})"));
    }
    if let Some(ef) = source.emission_factor {
        label.push_str(&format!(" - {ef} tCO2/MWh"));
    }
    if let Some(year) = source.year {
        label.push_str(&format!(" ({year})"));
    }
    label
}

/// Emission factor of the selected electricity source, if it carries one.
#[must_use]
pub fn emission_factor_for_source(sources: &[ElectricitySource], id: i64) -> Option<f64> {
    sources
        .iter()
        .find(|source| source.id == id)
        .and_then(|source| source.emission_factor)
}

/// Session-owned reference tree with an id index for group lookup.
///
/// Built once after the goods tree loads; read-only thereafter. The index
/// keeps the first group per id, matching the first-match rule of the free
/// resolvers.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    groups: Vec<IndustryGroup>,
    by_industry: AHashMap<i64, usize>,
}

impl ReferenceData {
    #[must_use]
    pub fn new(groups: Vec<IndustryGroup>) -> Self {
        let mut by_industry = AHashMap::with_capacity(groups.len());
        for (position, group) in groups.iter().enumerate() {
            by_industry.entry(group.industry_type_id).or_insert(position);
        }
        tracing::debug!(
            groups = groups.len(),
            indexed = by_industry.len(),
            "reference tree indexed"
        );
        Self { groups, by_industry }
    }

    #[must_use]
    pub fn groups(&self) -> &[IndustryGroup] {
        &self.groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn industry_options(&self) -> Vec<SelectOption> {
        industry_options(&self.groups)
    }

    #[must_use]
    pub fn goods_options(&self, industry_id: i64) -> Vec<SelectOption> {
        match self.group(industry_id) {
            Some(group) => group
                .goods
                .iter()
                .map(|goods| SelectOption::id(goods.name.clone(), goods.goods_id))
                .collect(),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn route_options(&self, industry_id: i64, goods_id: i64) -> Vec<SelectOption> {
        self.goods(industry_id, goods_id)
            .map(|goods| goods.routes.iter().map(SelectOption::text).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn precursor_options(&self, industry_id: i64, goods_id: i64) -> Vec<SelectOption> {
        self.goods(industry_id, goods_id)
            .map(|goods| {
                goods
                    .relevant_precursors
                    .iter()
                    .map(SelectOption::text)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Precursor names for the selection, as plain strings.
    ///
    /// The precursors step seeds one purchase entry per name.
    #[must_use]
    pub fn precursor_names(&self, industry_id: i64, goods_id: i64) -> Vec<String> {
        self.goods(industry_id, goods_id)
            .map(|goods| goods.relevant_precursors.clone())
            .unwrap_or_default()
    }

    fn group(&self, industry_id: i64) -> Option<&IndustryGroup> {
        self.by_industry
            .get(&industry_id)
            .map(|position| &self.groups[*position])
    }

    fn goods(&self, industry_id: i64, goods_id: i64) -> Option<&Goods> {
        self.group(industry_id)?
            .goods
            .iter()
            .find(|goods| goods.goods_id == goods_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_tree() -> Vec<IndustryGroup> {
        vec![
            IndustryGroup {
                industry_type_id: 1,
                goods: vec![Goods {
                    goods_id: 11,
                    name: "Cement clinker".to_owned(),
                    routes: vec!["Dry kiln".to_owned(), "Wet kiln".to_owned()],
                    relevant_precursors: vec!["Calcined clay".to_owned()],
                    industry_type_id: 1,
                }],
            },
            IndustryGroup {
                industry_type_id: 3,
                goods: vec![
                    Goods {
                        goods_id: 31,
                        name: "Crude steel".to_owned(),
                        routes: vec!["Basic oxygen furnace".to_owned()],
                        relevant_precursors: vec!["Pig iron".to_owned(), "Sintered ore".to_owned()],
                        industry_type_id: 3,
                    },
                    Goods {
                        goods_id: 32,
                        name: "Iron ore pellets".to_owned(),
                        routes: vec![],
                        relevant_precursors: vec![],
                        industry_type_id: 3,
                    },
                ],
            },
        ]
    }

    #[test]
    fn industry_options_use_fixed_labels_in_source_order() {
        let options = industry_options(&sample_tree());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SelectOption::id("Cement", 1));
        assert_eq!(options[1], SelectOption::id("Iron and Steel", 3));
    }

    #[test]
    fn industry_label_falls_back_for_unknown_ids() {
        assert_eq!(industry_label(2), "Aluminium");
        assert_eq!(industry_label(99), "Industry 99");
    }

    #[test]
    fn goods_options_empty_when_no_group_matches() {
        assert!(goods_options(&sample_tree(), 42).is_empty());
    }

    #[test]
    fn goods_options_map_name_and_id() {
        let options = goods_options(&sample_tree(), 3);
        assert_eq!(options[0], SelectOption::id("Crude steel", 31));
        assert_eq!(options[1], SelectOption::id("Iron ore pellets", 32));
    }

    #[test]
    fn route_options_are_self_labeled() {
        let options = route_options(&sample_tree(), 1, 11);
        assert_eq!(options.len(), 2);
        for option in &options {
            assert_eq!(OptionValue::Text(option.label.clone()), option.value);
        }
    }

    #[test]
    fn route_options_empty_when_either_lookup_misses() {
        let tree = sample_tree();
        assert!(route_options(&tree, 42, 11).is_empty());
        assert!(route_options(&tree, 1, 42).is_empty());
    }

    #[test]
    fn precursor_options_follow_the_same_two_stage_lookup() {
        let tree = sample_tree();
        let options = precursor_options(&tree, 3, 31);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SelectOption::text("Pig iron"));
        assert!(precursor_options(&tree, 3, 99).is_empty());
    }

    #[test]
    fn resolvers_are_idempotent() {
        let tree = sample_tree();
        assert_eq!(goods_options(&tree, 3), goods_options(&tree, 3));
        assert_eq!(route_options(&tree, 1, 11), route_options(&tree, 1, 11));
    }

    #[test]
    fn reference_data_matches_free_resolvers() {
        let tree = sample_tree();
        let data = ReferenceData::new(tree.clone());
        assert_eq!(data.industry_options(), industry_options(&tree));
        assert_eq!(data.goods_options(3), goods_options(&tree, 3));
        assert_eq!(data.route_options(1, 11), route_options(&tree, 1, 11));
        assert_eq!(data.precursor_options(3, 31), precursor_options(&tree, 3, 31));
    }

    #[test]
    fn default_country_requires_exact_label() {
        let countries = vec![
            CountryOption {
                label: "thailand".to_owned(),
                value: 1,
                abbreviation: "??".to_owned(),
            },
            CountryOption {
                label: "Thailand".to_owned(),
                value: 222,
                abbreviation: "TH".to_owned(),
            },
        ];
        let hit = resolve_default_country(&countries).expect("default country");
        assert_eq!(hit.value, 222);
        assert!(resolve_default_country(&[]).is_none());
        assert!(resolve_default_country(&countries[..1]).is_none());
    }

    #[test]
    fn electricity_labels_compose_optional_parts() {
        let sources = vec![
            ElectricitySource {
                id: 1,
                name: "Grid mix".to_owned(),
                region: Some("MEA".to_owned()),
                emission_factor: Some(0.42),
                year: Some(2023),
                source: None,
            },
            ElectricitySource {
                id: 2,
                name: "On-site solar".to_owned(),
                region: None,
                emission_factor: None,
                year: None,
                source: None,
            },
        ];
        let options = electricity_source_options(&sources);
        assert_eq!(options[0].label, "Grid mix (MEA) - 0.42 tCO2/MWh (2023)");
        assert_eq!(options[1].label, "On-site solar");
        assert_eq!(emission_factor_for_source(&sources, 1), Some(0.42));
        assert_eq!(emission_factor_for_source(&sources, 2), None);
        assert_eq!(emission_factor_for_source(&sources, 9), None);
    }
}
