//! Patient record management.
//!
//! This module provides the CRUD operations over the patient store, plus the sorted listing.
//! Every operation reloads the full mapping from the injected [`PatientStore`]; mutations then
//! write the full new mapping back.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. HTTP status codes, JSON bodies and route
//! wiring belong in `api-rest`.

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::patient::{NewPatient, PatientDraft, PatientUpdate, PatientView};
use crate::sort::{sort_views, SortField, SortOrder};
use crate::store::{JsonFileStore, PatientMap, PatientStore};
use crate::validation::{validate_draft, validate_new_patient};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex};

/// Service for patient store operations.
///
/// Cloning is cheap and clones share the same store and the same write lock.
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    write_lock: Arc<Mutex<()>>,
}

impl PatientService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a service over the JSON file named by `cfg`.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(JsonFileStore::new(cfg.patients_file())))
    }

    /// Lists every patient, keyed by id, in store order.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if the store cannot be loaded.
    pub fn list_patients(&self) -> PatientResult<IndexMap<String, PatientView>> {
        let patients = self.store.load()?;
        Ok(patients
            .iter()
            .map(|(id, record)| (id.clone(), PatientView::from_record(id.as_str(), record)))
            .collect())
    }

    /// Fetches one patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id.
    pub fn get_patient(&self, id: &str) -> PatientResult<PatientView> {
        let patients = self.store.load()?;
        patients
            .get(id)
            .map(|record| PatientView::from_record(id, record))
            .ok_or_else(|| PatientError::NotFound(id.to_owned()))
    }

    /// Lists every patient ordered by `field`.
    ///
    /// Patients with equal keys keep their store order, whichever direction is requested.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if the store cannot be loaded.
    pub fn sort_patients(
        &self,
        field: SortField,
        order: SortOrder,
    ) -> PatientResult<Vec<PatientView>> {
        let mut views: Vec<PatientView> = self.list_patients()?.into_values().collect();
        sort_views(&mut views, field, order);
        Ok(views)
    }

    /// Creates a new patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - a patient with the same id already exists (`AlreadyExists`)
    /// - the id or any field fails validation (`Validation`)
    /// - the store cannot be loaded or saved
    pub fn create_patient(&self, new_patient: NewPatient) -> PatientResult<PatientView> {
        let (id, draft) = new_patient.into_parts();

        self.mutate(|patients| {
            if patients.contains_key(&id) {
                return Err(PatientError::AlreadyExists(id.clone()));
            }

            let record = validate_new_patient(&id, draft)?;
            let view = PatientView::from_record(id.as_str(), &record);
            patients.insert(id.clone(), record);
            Ok(view)
        })
        .inspect(|_| tracing::info!("created patient {}", id))
    }

    /// Applies a partial update to an existing patient.
    ///
    /// Fields absent from `update` keep their stored values. The merged record is validated as a
    /// whole before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient has this id (`NotFound`)
    /// - the merged record fails validation (`Validation`)
    /// - the store cannot be loaded or saved
    pub fn update_patient(&self, id: &str, update: PatientUpdate) -> PatientResult<PatientView> {
        self.mutate(|patients| {
            let existing = patients
                .get_mut(id)
                .ok_or_else(|| PatientError::NotFound(id.to_owned()))?;

            let mut draft = PatientDraft::from(&*existing);
            draft.apply(update);
            let merged = validate_draft(draft).map_err(PatientError::Validation)?;

            *existing = merged;
            Ok(PatientView::from_record(id, existing))
        })
        .inspect(|_| tracing::info!("updated patient {}", id))
    }

    /// Removes a patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id, or a store error.
    pub fn delete_patient(&self, id: &str) -> PatientResult<()> {
        self.mutate(|patients| {
            patients
                .shift_remove(id)
                .map(|_| ())
                .ok_or_else(|| PatientError::NotFound(id.to_owned()))
        })
        .inspect(|_| tracing::info!("deleted patient {}", id))
    }

    /// Runs one load → mutate → save cycle under the write lock.
    ///
    /// Nothing is saved when `apply` fails.
    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut PatientMap) -> PatientResult<T>,
    ) -> PatientResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut patients = self.store.load()?;
        let result = apply(&mut patients)?;
        self.store.save(&patients)?;
        Ok(result)
    }
}
