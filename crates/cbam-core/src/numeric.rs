#![forbid(unsafe_code)]

//! Permissive numeric parsing with an explicit unset state.
//!
//! Regulatory-form inputs arrive as free text and must never block typing:
//! an unparseable string is treated as "not yet entered", not an error.
//! [`NumericInput`] keeps that permissive policy while making "unset"
//! distinct from a literal zero, so the calculator's computation guard can
//! be reasoned about without the zero-vs-unset ambiguity of the raw text
//! model.
//!
//! # Invariants
//!
//! 1. `parse` never fails and never panics.
//! 2. Only finite values are stored; NaN and infinities parse to `Unset`.
//! 3. `Unset.or_zero() == 0.0`, so downstream arithmetic sees the same
//!    numbers the permissive text model would have produced.

use serde::{Deserialize, Serialize};

/// A numeric form field: either untouched or holding a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum NumericInput {
    /// Nothing usable entered yet.
    #[default]
    Unset,
    /// A finite parsed value. May legitimately be zero.
    Value(f64),
}

impl NumericInput {
    /// Parse free-form text. Whitespace is trimmed; empty, unparseable,
    /// or non-finite input yields [`NumericInput::Unset`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Value(value),
            _ => Self::Unset,
        }
    }

    /// The stored value, or `0.0` when unset.
    #[inline]
    #[must_use]
    pub fn or_zero(self) -> f64 {
        match self {
            Self::Unset => 0.0,
            Self::Value(value) => value,
        }
    }

    /// Whether this field can drive a computation: set and non-zero.
    ///
    /// A zero here is deliberately equivalent to unset; the calculator
    /// treats both as "not computable" rather than raising.
    #[inline]
    #[must_use]
    pub fn is_computable(self) -> bool {
        matches!(self, Self::Value(value) if value != 0.0)
    }

    #[inline]
    #[must_use]
    pub fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Unset
        }
    }
}

/// Render a derived metric for display: fixed four decimal places.
#[must_use]
pub fn format_metric(value: f64) -> String {
    format!("{value:.4}")
}
