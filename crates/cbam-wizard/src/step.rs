#![forbid(unsafe_code)]

//! The fixed step sequence.
//!
//! Steps advance one at a time and only through [`Wizard`](crate::Wizard)
//! gating; going back never blocks and never discards entered data.

use serde::{Deserialize, Serialize};

/// The six wizard steps, in submission order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WizardStep {
    #[default]
    Installation,
    Verifier,
    Goods,
    Precursors,
    Amounts,
    SourceEmissions,
}

impl WizardStep {
    /// All steps in order; drives progress indicators.
    pub const ALL: [WizardStep; 6] = [
        Self::Installation,
        Self::Verifier,
        Self::Goods,
        Self::Precursors,
        Self::Amounts,
        Self::SourceEmissions,
    ];

    /// Zero-based position in the sequence.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Installation => 0,
            Self::Verifier => 1,
            Self::Goods => 2,
            Self::Precursors => 3,
            Self::Amounts => 4,
            Self::SourceEmissions => 5,
        }
    }

    /// The step after this one, or `None` at the end of the sequence.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Installation => Some(Self::Verifier),
            Self::Verifier => Some(Self::Goods),
            Self::Goods => Some(Self::Precursors),
            Self::Precursors => Some(Self::Amounts),
            Self::Amounts => Some(Self::SourceEmissions),
            Self::SourceEmissions => None,
        }
    }

    /// The step before this one, or `None` at the start.
    #[must_use]
    pub fn back(self) -> Option<Self> {
        match self {
            Self::Installation => None,
            Self::Verifier => Some(Self::Installation),
            Self::Goods => Some(Self::Verifier),
            Self::Precursors => Some(Self::Goods),
            Self::Amounts => Some(Self::Precursors),
            Self::SourceEmissions => Some(Self::Amounts),
        }
    }

    /// Heading shown for the step.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Installation => "Installation",
            Self::Verifier => "Verifier",
            Self::Goods => "Goods & Routes",
            Self::Precursors => "Purchased Precursors",
            Self::Amounts => "Production Amounts",
            Self::SourceEmissions => "Source Emissions",
        }
    }

    /// Endpoint path this step submits to.
    #[must_use]
    pub fn submission_path(self) -> &'static str {
        match self {
            Self::Installation => "/api/cbam/installation",
            Self::Verifier => "/api/cbam/verifier",
            Self::Goods => "/api/cbam/goods",
            Self::Precursors => "/api/cbam/precursors",
            Self::Amounts => "/api/cbam/amounts",
            Self::SourceEmissions => "/api/cbam/source",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
