#![forbid(unsafe_code)]

//! Verifier accreditation details.
//!
//! The backend takes this step as two bodies: the verifier record itself
//! and the authorized-representative contact record. Both are built from
//! the one form.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::forms::text_is_empty;
use crate::reference::CountryOption;
use crate::validate::FormRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierField {
    InstallationName,
    Address,
    PostCode,
    CountryId,
    AuthorizedRepId,
    AccreditationState,
    AccreditationNationalBody,
    RegistrationNo,
    Name,
    Email,
    Phone,
    Fax,
}

impl std::fmt::Display for VerifierField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InstallationName => "installation_name",
            Self::Address => "address",
            Self::PostCode => "post_code",
            Self::CountryId => "country_id",
            Self::AuthorizedRepId => "authorized_rep_id",
            Self::AccreditationState => "accreditation_state",
            Self::AccreditationNationalBody => "accreditation_national_body",
            Self::RegistrationNo => "registration_no",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Fax => "fax",
        };
        f.write_str(name)
    }
}

/// Step 2: verifier accreditation and contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifierForm {
    pub installation_name: String,
    pub address: String,
    pub city: String,
    pub country_id: Option<i64>,
    pub post_code: String,
    pub authorized_rep_id: String,
    pub accreditation_state: String,
    pub accreditation_national_body: String,
    pub registration_no: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub fax: String,
    pub unlocode: String,
}

impl VerifierForm {
    pub fn select_country(&mut self, country: &CountryOption) {
        self.country_id = Some(country.value);
        self.unlocode = country.abbreviation.clone();
    }

    pub fn apply_default_country(&mut self, country: &CountryOption) {
        if self.country_id.is_none() {
            self.country_id = Some(country.value);
        }
    }

    /// JSON body for `POST /api/cbam/verifier`.
    #[must_use]
    pub fn verifier_payload(&self) -> Value {
        json!({
            "installation_name": self.installation_name,
            "address": self.address,
            "city": self.city,
            "country_id": self.country_id,
            "post_code": self.post_code,
            "authorized_rep_id": self.authorized_rep_id,
            "accreditation_state": self.accreditation_state,
            "accreditation_national_body": self.accreditation_national_body,
            "registration_no": self.registration_no,
        })
    }

    /// JSON body for `POST /api/cbam/authorized_representatives`.
    #[must_use]
    pub fn representative_payload(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "fax": self.fax,
        })
    }
}

impl FormRecord for VerifierForm {
    type Field = VerifierField;

    fn field_is_empty(&self, field: VerifierField) -> bool {
        match field {
            VerifierField::InstallationName => text_is_empty(&self.installation_name),
            VerifierField::Address => text_is_empty(&self.address),
            VerifierField::PostCode => text_is_empty(&self.post_code),
            VerifierField::CountryId => self.country_id.is_none(),
            VerifierField::AuthorizedRepId => text_is_empty(&self.authorized_rep_id),
            VerifierField::AccreditationState => text_is_empty(&self.accreditation_state),
            VerifierField::AccreditationNationalBody => {
                text_is_empty(&self.accreditation_national_body)
            }
            VerifierField::RegistrationNo => text_is_empty(&self.registration_no),
            VerifierField::Name => text_is_empty(&self.name),
            VerifierField::Email => text_is_empty(&self.email),
            VerifierField::Phone => text_is_empty(&self.phone),
            VerifierField::Fax => text_is_empty(&self.fax),
        }
    }

    fn required_fields() -> &'static [VerifierField] {
        &[
            VerifierField::InstallationName,
            VerifierField::Address,
            VerifierField::PostCode,
            VerifierField::CountryId,
            VerifierField::AuthorizedRepId,
            VerifierField::AccreditationState,
            VerifierField::AccreditationNationalBody,
            VerifierField::RegistrationNo,
            VerifierField::Name,
            VerifierField::Email,
            VerifierField::Phone,
            VerifierField::Fax,
        ]
    }
}
