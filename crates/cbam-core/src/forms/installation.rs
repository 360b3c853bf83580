#![forbid(unsafe_code)]

//! Installation details: operator identity, address, and geolocation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::forms::text_is_empty;
use crate::reference::CountryOption;
use crate::validate::FormRecord;

/// Field identifiers for [`InstallationForm`], in wire-name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationField {
    Name,
    EcoActivity,
    Address,
    PostCode,
    City,
    CountryId,
    Unlocode,
    Latitude,
    Longitude,
    AuthorRepresentId,
    Email,
    Tel,
    PoBox,
}

impl std::fmt::Display for InstallationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::EcoActivity => "eco_activity",
            Self::Address => "address",
            Self::PostCode => "post_code",
            Self::City => "city",
            Self::CountryId => "country_id",
            Self::Unlocode => "unlocode",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::AuthorRepresentId => "author_represent_id",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::PoBox => "po_box",
        };
        f.write_str(name)
    }
}

/// Step 1: the installation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationForm {
    pub name: String,
    /// Free-text qualifier of the installation name; optional.
    pub name_specific: String,
    pub eco_activity: String,
    pub address: String,
    pub city: String,
    pub country_id: Option<i64>,
    pub post_code: String,
    pub po_box: String,
    pub latitude: String,
    pub longitude: String,
    pub author_represent_id: String,
    pub email: String,
    pub tel: String,
    /// Derived from the selected country's abbreviation; editable after.
    pub unlocode: String,
}

impl InstallationForm {
    /// Select a country: stores the id and derives the UN/LOCODE field
    /// from the country's abbreviation in the same update.
    pub fn select_country(&mut self, country: &CountryOption) {
        self.country_id = Some(country.value);
        self.unlocode = country.abbreviation.clone();
    }

    /// Apply the session default country, but never overwrite a choice
    /// the operator already made.
    pub fn apply_default_country(&mut self, country: &CountryOption) {
        if self.country_id.is_none() {
            self.country_id = Some(country.value);
        }
        if text_is_empty(&self.unlocode) {
            self.unlocode = country.abbreviation.clone();
        }
    }

    /// JSON body for `POST /api/cbam/installation`.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "name_specific": self.name_specific,
            "eco_activity": self.eco_activity,
            "address": self.address,
            "city": self.city,
            "country_id": self.country_id,
            "post_code": self.post_code,
            "po_box": self.po_box,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "author_represent_id": self.author_represent_id.trim().parse::<i64>().ok(),
            "unlocode": self.unlocode,
        })
    }
}

impl FormRecord for InstallationForm {
    type Field = InstallationField;

    fn field_is_empty(&self, field: InstallationField) -> bool {
        match field {
            InstallationField::Name => text_is_empty(&self.name),
            InstallationField::EcoActivity => text_is_empty(&self.eco_activity),
            InstallationField::Address => text_is_empty(&self.address),
            InstallationField::PostCode => text_is_empty(&self.post_code),
            InstallationField::City => text_is_empty(&self.city),
            InstallationField::CountryId => self.country_id.is_none(),
            InstallationField::Unlocode => text_is_empty(&self.unlocode),
            InstallationField::Latitude => text_is_empty(&self.latitude),
            InstallationField::Longitude => text_is_empty(&self.longitude),
            InstallationField::AuthorRepresentId => text_is_empty(&self.author_represent_id),
            InstallationField::Email => text_is_empty(&self.email),
            InstallationField::Tel => text_is_empty(&self.tel),
            InstallationField::PoBox => text_is_empty(&self.po_box),
        }
    }

    fn required_fields() -> &'static [InstallationField] {
        &[
            InstallationField::Name,
            InstallationField::EcoActivity,
            InstallationField::Address,
            InstallationField::PostCode,
            InstallationField::City,
            InstallationField::CountryId,
            InstallationField::Unlocode,
            InstallationField::Latitude,
            InstallationField::Longitude,
            InstallationField::AuthorRepresentId,
            InstallationField::Email,
            InstallationField::Tel,
            InstallationField::PoBox,
        ]
    }
}
