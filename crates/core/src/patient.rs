//! Patient record types.
//!
//! There are four shapes of the same record:
//!
//! - [`PatientRecord`]: the validated value persisted in the store, keyed by id
//! - [`NewPatient`]: an unvalidated create payload, including the id
//! - [`PatientUpdate`]: an unvalidated partial payload where every field is optional
//! - [`PatientView`]: a record enriched with its id, BMI and verdict, as returned to callers
//!
//! Unvalidated payloads are turned into a [`PatientDraft`] and validated as a whole by
//! [`validate_draft`](crate::validation::validate_draft).

use crate::metrics::{self, Verdict};
use patients_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Administrative gender of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALLOWED: [&'static str; 3] = ["male", "female", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated patient record as persisted in the store.
///
/// The id is the store key and is deliberately absent here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: NonEmptyText,
    pub age: u8,
    pub gender: Gender,
    pub city: String,
    pub weight: f64,
    pub height: f64,
}

impl PatientRecord {
    pub fn bmi(&self) -> f64 {
        metrics::bmi(self.weight, self.height)
    }
}

/// Create payload: a full record including its id.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct NewPatient {
    /// Unique patient id, e.g. `P001`.
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    /// Age in years, 1 to 120 inclusive.
    #[schema(example = 30)]
    pub age: i64,
    /// One of `male`, `female`, `other`.
    #[schema(example = "male")]
    pub gender: String,
    #[schema(example = "NY")]
    pub city: String,
    /// Weight in kilograms.
    #[schema(example = 70.5)]
    pub weight: f64,
    /// Height in metres.
    #[schema(example = 1.75)]
    pub height: f64,
}

impl NewPatient {
    /// Splits the payload into its id and an unvalidated draft of the record.
    pub fn into_parts(self) -> (String, PatientDraft) {
        let draft = PatientDraft {
            name: self.name,
            age: self.age,
            gender: self.gender,
            city: self.city,
            weight: self.weight,
            height: self.height,
        };
        (self.id, draft)
    }
}

/// Partial update payload. Absent and `null` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Field values of a record before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientDraft {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub city: String,
    pub weight: f64,
    pub height: f64,
}

impl PatientDraft {
    /// Overwrites only the fields present in `update`.
    pub fn apply(&mut self, update: PatientUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
    }
}

impl From<&PatientRecord> for PatientDraft {
    fn from(record: &PatientRecord) -> Self {
        Self {
            name: record.name.as_str().to_owned(),
            age: i64::from(record.age),
            gender: record.gender.as_str().to_owned(),
            city: record.city.clone(),
            weight: record.weight,
            height: record.height,
        }
    }
}

/// A record as returned to callers, with its id and derived metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientView {
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = 30)]
    pub age: u8,
    pub gender: Gender,
    #[schema(example = "NY")]
    pub city: String,
    #[schema(example = 70.5)]
    pub weight: f64,
    #[schema(example = 1.75)]
    pub height: f64,
    #[schema(example = 23.02)]
    pub bmi: f64,
    pub verdict: Verdict,
}

impl PatientView {
    pub fn from_record(id: impl Into<String>, record: &PatientRecord) -> Self {
        let bmi = record.bmi();
        Self {
            id: id.into(),
            name: record.name.as_str().to_owned(),
            age: record.age,
            gender: record.gender,
            city: record.city.clone(),
            weight: record.weight,
            height: record.height,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        }
    }
}
