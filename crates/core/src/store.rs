//! Patient store backends.
//!
//! A store hands out the whole id → record mapping and takes the whole mapping back. There is
//! no partial update and no caching: callers load on every request and save the full new
//! contents after each mutation.
//!
//! ## On-disk format
//!
//! [`JsonFileStore`] keeps one JSON object whose keys are patient ids:
//!
//! ```text
//! {
//!   "P001": { "name": "John Doe", "age": 30, "gender": "male", "city": "NY", "weight": 70.5, "height": 1.75 }
//! }
//! ```
//!
//! Key order in the file is preserved and is the order patients are listed in.

use crate::patient::PatientRecord;
use crate::{PatientError, PatientResult};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The full store contents, in insertion order.
pub type PatientMap = IndexMap<String, PatientRecord>;

/// Whole-document load/save over the patient mapping.
pub trait PatientStore: Send + Sync {
    /// Loads the complete mapping.
    fn load(&self) -> PatientResult<PatientMap>;

    /// Replaces the complete mapping.
    fn save(&self, patients: &PatientMap) -> PatientResult<()>;
}

/// Store backed by a single JSON file.
///
/// The file is not created on demand: loading a missing file is an error.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> PatientResult<PatientMap> {
        let contents = fs::read_to_string(&self.path).map_err(PatientError::FileRead)?;
        let patients: PatientMap =
            serde_json::from_str(&contents).map_err(PatientError::Deserialization)?;
        tracing::debug!(
            "loaded {} patients from {}",
            patients.len(),
            self.path.display()
        );
        Ok(patients)
    }

    fn save(&self, patients: &PatientMap) -> PatientResult<()> {
        let mut json = serde_json::to_string_pretty(patients).map_err(PatientError::Serialization)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(PatientError::FileWrite)
    }
}

/// Store held in memory, for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Mutex<PatientMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, PatientMap> {
        self.patients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PatientStore for MemoryStore {
    fn load(&self) -> PatientResult<PatientMap> {
        Ok(self.guard().clone())
    }

    fn save(&self, patients: &PatientMap) -> PatientResult<()> {
        *self.guard() = patients.clone();
        Ok(())
    }
}
