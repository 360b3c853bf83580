#![forbid(unsafe_code)]

//! Purchased precursors: one entry per relevant precursor of the selected
//! goods, each with an origin country code and a purchased amount.
//!
//! The entry count follows the reference data (capped at
//! [`MAX_PRECURSOR_ENTRIES`]), so this form validates through an inherent
//! method instead of the static [`FormRecord`](crate::validate::FormRecord)
//! required list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::forms::text_is_empty;
use crate::reference::{CountryOption, ReferenceData};
use crate::validate::{FieldError, MISSING_FIELD_MESSAGE};

/// Upper bound on seeded precursor entries, matching the form layout.
pub const MAX_PRECURSOR_ENTRIES: usize = 6;

/// Field identifier for entry `index` (zero-based internally; rendered
/// one-based to match the wire names `purchased_precursors_1`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecursorField {
    Precursor(usize),
    CountryCode(usize),
    Amount(usize),
}

impl std::fmt::Display for PrecursorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Precursor(i) => write!(f, "purchased_precursors_{}", i + 1),
            Self::CountryCode(i) => write!(f, "country_code_{}", i + 1),
            Self::Amount(i) => write!(f, "amount_{}", i + 1),
        }
    }
}

/// One purchased-precursor line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecursorEntry {
    pub precursor: String,
    /// UN/LOCODE-style origin country code.
    pub country_code: String,
    /// Raw amount text; permissive numeric policy applies downstream.
    pub amount: String,
}

/// Step 4: purchased precursors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecursorsForm {
    pub entries: Vec<PrecursorEntry>,
    /// Carried over from the goods step for payload context.
    pub industry_type: Option<i64>,
    pub goods_category: Option<i64>,
}

impl PrecursorsForm {
    /// Rebuild the entry list from the reference tree for the current
    /// goods selection. Amounts are cleared; country codes take the
    /// session default when one is known.
    ///
    /// Called whenever the upstream industry/goods selection changes, so
    /// entries can never refer to precursors of a previous parent.
    pub fn seed_from_reference(
        &mut self,
        reference: &ReferenceData,
        industry_id: i64,
        goods_id: i64,
        default_country: Option<&CountryOption>,
    ) {
        let names = reference.precursor_names(industry_id, goods_id);
        self.industry_type = Some(industry_id);
        self.goods_category = Some(goods_id);
        self.entries = names
            .into_iter()
            .take(MAX_PRECURSOR_ENTRIES)
            .map(|precursor| PrecursorEntry {
                precursor,
                country_code: default_country
                    .map(|country| country.abbreviation.clone())
                    .unwrap_or_default(),
                amount: String::new(),
            })
            .collect();
    }

    /// Fill empty country codes with the default; filled codes stay.
    pub fn apply_default_country(&mut self, country: &CountryOption) {
        for entry in &mut self.entries {
            if text_is_empty(&entry.country_code) {
                entry.country_code = country.abbreviation.clone();
            }
        }
    }

    /// Every seeded entry requires all three fields. Errors come out in
    /// entry order, fields within an entry in layout order.
    #[must_use]
    pub fn validate_entries(&self) -> Vec<FieldError<PrecursorField>> {
        let mut errors = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if text_is_empty(&entry.precursor) {
                errors.push(FieldError {
                    field: PrecursorField::Precursor(index),
                    message: MISSING_FIELD_MESSAGE,
                });
            }
            if text_is_empty(&entry.country_code) {
                errors.push(FieldError {
                    field: PrecursorField::CountryCode(index),
                    message: MISSING_FIELD_MESSAGE,
                });
            }
            if text_is_empty(&entry.amount) {
                errors.push(FieldError {
                    field: PrecursorField::Amount(index),
                    message: MISSING_FIELD_MESSAGE,
                });
            }
        }
        errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate_entries().is_empty()
    }

    /// JSON body for `POST /api/cbam/precursors`.
    #[must_use]
    pub fn payload(&self) -> Value {
        let routes: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.precursor.as_str())
            .collect();
        let mut amounts = Map::new();
        for (index, entry) in self.entries.iter().enumerate() {
            amounts.insert(index.to_string(), Value::from(entry.amount.clone()));
        }
        let country_codes: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.country_code.as_str())
            .collect();
        json!({
            "routes": routes,
            "amounts": amounts,
            "country_codes": country_codes,
            "industry_type": self.industry_type,
            "goods_category": self.goods_category,
        })
    }
}
