//! Constants used throughout the patient store core crate.

/// Default store file when no explicit path is configured.
pub const DEFAULT_PATIENTS_FILE: &str = "patients.json";

/// Inclusive lower bound for a patient's age in years.
pub const MIN_AGE: i64 = 1;

/// Inclusive upper bound for a patient's age in years.
pub const MAX_AGE: i64 = 120;

/// BMI below which the verdict is underweight.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// Exclusive upper bound of the normal weight band.
pub const NORMAL_WEIGHT_BELOW: f64 = 24.9;

/// Inclusive lower bound of the overweight band.
pub const OVERWEIGHT_FROM: f64 = 25.0;

/// Exclusive upper bound of the overweight band.
pub const OVERWEIGHT_BELOW: f64 = 29.9;
