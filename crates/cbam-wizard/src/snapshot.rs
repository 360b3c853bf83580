#![forbid(unsafe_code)]

//! Versioned in-progress snapshots.
//!
//! A snapshot captures the six form records and the current step so an
//! operator can close the session and resume later. The blob carries an
//! explicit schema version: a snapshot written by a different schema is
//! rejected with [`SnapshotError::VersionMismatch`] rather than restored
//! field-by-field into the wrong shape.
//!
//! Reference data is deliberately not part of the snapshot; a restored
//! session refetches it, and the restore path invalidates any load round
//! that was in flight before the restore.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cbam_core::{
    AmountsForm, GoodsForm, InstallationForm, PrecursorsForm, SourceEmissionsForm, VerifierForm,
};

use crate::step::WizardStep;
use crate::wizard::Wizard;

/// Schema version written into every snapshot blob.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("snapshot version {found} does not match supported version {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// One saved wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub version: u32,
    pub step: WizardStep,
    pub saved_at: DateTime<Utc>,
    pub installation: InstallationForm,
    pub verifier: VerifierForm,
    pub goods: GoodsForm,
    pub precursors: PrecursorsForm,
    pub amounts: AmountsForm,
    pub source_emissions: SourceEmissionsForm,
}

impl WizardSnapshot {
    /// Capture the session as of now.
    #[must_use]
    pub fn capture(wizard: &Wizard) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            step: wizard.step(),
            saved_at: Utc::now(),
            installation: wizard.installation.clone(),
            verifier: wizard.verifier.clone(),
            goods: wizard.goods.clone(),
            precursors: wizard.precursors.clone(),
            amounts: wizard.amounts.clone(),
            source_emissions: wizard.source_emissions.clone(),
        }
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::VersionMismatch {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            })
        }
    }

    /// Rebuild a session from this snapshot. The reference store starts
    /// empty and must be reloaded by the host.
    pub fn restore(self) -> Result<Wizard, SnapshotError> {
        self.check_version()?;
        let mut wizard = Wizard::new();
        wizard.restore_step(self.step);
        wizard.installation = self.installation;
        wizard.verifier = self.verifier;
        wizard.goods = self.goods;
        wizard.precursors = self.precursors;
        wizard.amounts = self.amounts;
        wizard.source_emissions = self.source_emissions;
        wizard.reference_mut().invalidate();
        Ok(wizard)
    }
}

/// Where snapshot blobs live. Keys are caller-chosen session names.
pub trait StorageBackend {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), SnapshotError>;

    /// `Ok(None)` when no blob exists under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    fn remove(&mut self, key: &str) -> Result<(), SnapshotError>;
}

/// In-memory backend, used in tests and for hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), SnapshotError> {
        self.blobs.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), SnapshotError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a caller-chosen directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), blob)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), SnapshotError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Capture the session and write it under `key`.
pub fn save_snapshot(
    wizard: &Wizard,
    backend: &mut dyn StorageBackend,
    key: &str,
) -> Result<(), SnapshotError> {
    let snapshot = WizardSnapshot::capture(wizard);
    let blob = serde_json::to_string(&snapshot)?;
    backend.save(key, &blob)?;
    debug!(key, step = %snapshot.step, "session snapshot saved");
    Ok(())
}

/// Read and decode the snapshot under `key`, if any. The version check
/// runs here so a stale blob is rejected before anyone restores it.
pub fn load_snapshot(
    backend: &dyn StorageBackend,
    key: &str,
) -> Result<Option<WizardSnapshot>, SnapshotError> {
    let Some(blob) = backend.load(key)? else {
        return Ok(None);
    };
    let snapshot: WizardSnapshot = serde_json::from_str(&blob)?;
    snapshot.check_version()?;
    Ok(Some(snapshot))
}
