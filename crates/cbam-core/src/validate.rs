#![forbid(unsafe_code)]

//! Required-field validation shared by every wizard step.
//!
//! Each form declares an enumerated field-identifier type and a static
//! required-field list; validation is a pure scan over that list. The
//! report preserves declaration order so the host can scroll to the first
//! offending field deterministically.

use std::fmt;

/// Inline message attached to every missing required field.
pub const MISSING_FIELD_MESSAGE: &str = "This field is required";

/// A typed form record with enumerated field identifiers.
///
/// Implementations replace the stringly-keyed `values[name]` lookup of
/// the legacy forms: a field either exists in the enum or the code does
/// not compile.
pub trait FormRecord {
    type Field: Copy + Eq + fmt::Debug + fmt::Display + 'static;

    /// Whether the given field currently holds no usable value.
    fn field_is_empty(&self, field: Self::Field) -> bool;

    /// The fields that must be filled before this form may submit,
    /// in scroll order.
    fn required_fields() -> &'static [Self::Field];
}

/// One missing-field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError<F> {
    pub field: F,
    pub message: &'static str,
}

/// Ordered validation result. Empty means the form may submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport<F> {
    errors: Vec<FieldError<F>>,
}

impl<F: Copy> ValidationReport<F> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The scroll-to target: first missing field in declaration order.
    #[must_use]
    pub fn first_error(&self) -> Option<&FieldError<F>> {
        self.errors.first()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError<F>] {
        &self.errors
    }
}

/// Check every required field of `record`, in declaration order.
pub fn validate<R: FormRecord>(record: &R) -> ValidationReport<R::Field> {
    let errors = R::required_fields()
        .iter()
        .copied()
        .filter(|field| record.field_is_empty(*field))
        .map(|field| FieldError {
            field,
            message: MISSING_FIELD_MESSAGE,
        })
        .collect();
    ValidationReport { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Probe {
        name: String,
        city: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ProbeField {
        Name,
        City,
    }

    impl fmt::Display for ProbeField {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Name => f.write_str("name"),
                Self::City => f.write_str("city"),
            }
        }
    }

    impl FormRecord for Probe {
        type Field = ProbeField;

        fn field_is_empty(&self, field: ProbeField) -> bool {
            match field {
                ProbeField::Name => self.name.trim().is_empty(),
                ProbeField::City => self.city.trim().is_empty(),
            }
        }

        fn required_fields() -> &'static [ProbeField] {
            &[ProbeField::Name, ProbeField::City]
        }
    }

    #[test]
    fn empty_record_reports_all_required_fields_in_order() {
        let report = validate(&Probe::default());
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.first_error().map(|e| e.field), Some(ProbeField::Name));
        assert_eq!(report.errors()[0].message, MISSING_FIELD_MESSAGE);
    }

    #[test]
    fn filled_record_is_valid() {
        let record = Probe {
            name: "Rayong smelter".to_owned(),
            city: "Rayong".to_owned(),
        };
        assert!(validate(&record).is_valid());
        assert!(validate(&record).first_error().is_none());
    }
}
