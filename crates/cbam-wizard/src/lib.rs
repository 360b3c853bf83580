#![forbid(unsafe_code)]

//! CBAM Reporting Wizard
//!
//! Drives the six-step compliance workflow over the `cbam-core` form
//! records:
//!
//! - [`WizardStep`] - Fixed step order with next/back transitions
//! - [`Wizard`] - The single active form session: step gating on
//!   validation, cascading-selection reseeding, and default-country
//!   application
//! - [`ReferenceStore`] - Session-owned reference data with a
//!   generation-tagged stale-response guard for late-arriving loads
//! - [`WizardSnapshot`] - Versioned in-progress snapshots over a
//!   pluggable [`StorageBackend`]
//!
//! All mutable state is owned by the one active [`Wizard`]; there is no
//! cross-session shared state and no locking.

pub mod reference_store;
pub mod snapshot;
pub mod step;
pub mod wizard;

pub use reference_store::{LoadTicket, ReferenceStore};
pub use snapshot::{
    FileStorage, MemoryStorage, SNAPSHOT_VERSION, SnapshotError, StorageBackend, WizardSnapshot,
    load_snapshot, save_snapshot,
};
pub use step::WizardStep;
pub use wizard::{StepBlocked, StepValidation, Wizard};
