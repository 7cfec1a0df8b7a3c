//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services, so request
//! handling never reads process-wide environment variables.

use crate::constants::DEFAULT_PATIENTS_FILE;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patients_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `patients_file` is empty.
    pub fn new(patients_file: PathBuf) -> PatientResult<Self> {
        if patients_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patients file path cannot be empty".into(),
            ));
        }

        Ok(Self { patients_file })
    }

    pub fn patients_file(&self) -> &Path {
        &self.patients_file
    }
}

/// Resolve the store file path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PATIENTS_FILE`].
pub fn patients_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENTS_FILE))
}
