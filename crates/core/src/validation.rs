//! Input validation utilities.
//!
//! Every rule is checked on every call and all violations are reported together, so a caller
//! sending several bad fields learns about all of them in one response.

use crate::constants::{MAX_AGE, MIN_AGE};
use crate::patient::{Gender, PatientDraft, PatientRecord};
use crate::{PatientError, PatientResult};
use patients_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One failed field constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "age")]
    pub field: String,
    #[schema(example = "must be between 1 and 120")]
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Validates a patient id used as a store key.
pub fn validate_patient_id(id: &str) -> Option<FieldViolation> {
    if id.trim().is_empty() {
        return Some(FieldViolation::new("id", "must not be empty"));
    }
    None
}

/// Validates a complete draft and converts it into a storable record.
///
/// # Errors
///
/// Returns every violated constraint, in field order.
pub fn validate_draft(draft: PatientDraft) -> Result<PatientRecord, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = match NonEmptyText::new(&draft.name) {
        Ok(name) => Some(name),
        Err(e) => {
            violations.push(FieldViolation::new("name", e.to_string()));
            None
        }
    };

    let age = if (MIN_AGE..=MAX_AGE).contains(&draft.age) {
        u8::try_from(draft.age).ok()
    } else {
        violations.push(FieldViolation::new(
            "age",
            format!("must be between {MIN_AGE} and {MAX_AGE}"),
        ));
        None
    };

    let gender = match draft.gender.parse::<Gender>() {
        Ok(gender) => Some(gender),
        Err(_) => {
            violations.push(FieldViolation::new(
                "gender",
                format!("must be one of: {}", Gender::ALLOWED.join(", ")),
            ));
            None
        }
    };

    let weight_ok = is_positive(draft.weight);
    if !weight_ok {
        violations.push(FieldViolation::new("weight", "must be greater than 0"));
    }
    let height_ok = is_positive(draft.height);
    if !height_ok {
        violations.push(FieldViolation::new("height", "must be greater than 0"));
    }
    if weight_ok && height_ok && !(draft.weight / (draft.height * draft.height)).is_finite() {
        violations.push(FieldViolation::new(
            "height",
            "is too small to derive a BMI from",
        ));
    }

    match (name, age, gender) {
        (Some(name), Some(age), Some(gender)) if violations.is_empty() => Ok(PatientRecord {
            name,
            age,
            gender,
            city: draft.city,
            weight: draft.weight,
            height: draft.height,
        }),
        _ => Err(violations),
    }
}

/// Validates a create payload's id and fields together.
///
/// # Errors
///
/// Returns `PatientError::Validation` listing every violation, the id first.
pub fn validate_new_patient(id: &str, draft: PatientDraft) -> PatientResult<PatientRecord> {
    let id_violation = validate_patient_id(id);
    match (id_violation, validate_draft(draft)) {
        (None, Ok(record)) => Ok(record),
        (Some(violation), Ok(_)) => Err(PatientError::Validation(vec![violation])),
        (id_violation, Err(mut violations)) => {
            if let Some(violation) = id_violation {
                violations.insert(0, violation);
            }
            Err(PatientError::Validation(violations))
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
