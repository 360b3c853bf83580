#![forbid(unsafe_code)]

//! Typed field records for the six wizard steps.
//!
//! Each step owns one record struct with an enumerated field-identifier
//! type. Field identifiers render as the backend wire names (snake_case),
//! so the scroll-to-first-error target and the payload keys come from the
//! same enum and cannot drift apart.
//!
//! Updates are plain setters on owned state; derived values (unlocode
//! from country, NCV unit from AD unit, emission outputs) are either set
//! at the same moment as their source or computed on read, so no derived
//! field can be observed stale.

pub mod amounts;
pub mod goods;
pub mod installation;
pub mod precursors;
pub mod source_emissions;
pub mod verifier;

pub use amounts::{AmountsField, AmountsForm, ROUTE_SLOTS, RouteSlot};
pub use goods::{GoodsField, GoodsForm};
pub use installation::{InstallationField, InstallationForm};
pub use precursors::{MAX_PRECURSOR_ENTRIES, PrecursorEntry, PrecursorField, PrecursorsForm};
pub use source_emissions::{
    CombustionStream, MassBalanceStream, ProcessStream, SourceEmissionsField,
    SourceEmissionsForm, SourceField, StreamBlock, StreamHeader,
};
pub use verifier::{VerifierField, VerifierForm};

/// Emptiness rule shared by every text field: blank after trimming.
#[inline]
#[must_use]
pub(crate) fn text_is_empty(value: &str) -> bool {
    value.trim().is_empty()
}
