//! # Patients Core
//!
//! Core business logic for the patient store.
//!
//! This crate contains pure data operations over a single id → record mapping:
//! - Record model, full-record validation and partial-update merging
//! - Derived BMI and verdict, computed on read and never persisted
//! - Sorting by weight, height or BMI
//! - A [`PatientStore`] trait with a JSON file backend and an in-memory backend
//!
//! **No API concerns**: HTTP routing, status codes and OpenAPI documents belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod patient;
pub mod repositories;
pub mod sort;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENTS_FILE;
pub use error::{PatientError, PatientResult};
pub use metrics::Verdict;
pub use patient::{Gender, NewPatient, PatientRecord, PatientUpdate, PatientView};
pub use repositories::patients::PatientService;
pub use sort::{SortField, SortOrder};
pub use store::{JsonFileStore, MemoryStore, PatientMap, PatientStore};
pub use validation::FieldViolation;

pub use patients_types::NonEmptyText;
