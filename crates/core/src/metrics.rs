//! Derived health metrics.
//!
//! BMI and its verdict are never persisted. They are computed from the stored weight and height
//! every time a record is turned into a [`PatientView`](crate::PatientView).

use crate::constants::{NORMAL_WEIGHT_BELOW, OVERWEIGHT_BELOW, OVERWEIGHT_FROM, UNDERWEIGHT_BELOW};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Qualitative classification of a BMI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Verdict {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl Verdict {
    /// Classifies a BMI value.
    ///
    /// Values in the `[24.9, 25)` band and anything from `29.9` upwards fall through to
    /// [`Verdict::Obesity`].
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Verdict::Underweight
        } else if bmi < NORMAL_WEIGHT_BELOW {
            Verdict::NormalWeight
        } else if (OVERWEIGHT_FROM..OVERWEIGHT_BELOW).contains(&bmi) {
            Verdict::Overweight
        } else {
            Verdict::Obesity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::NormalWeight => "Normal weight",
            Verdict::Overweight => "Overweight",
            Verdict::Obesity => "Obesity",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body mass index for a weight in kilograms and a height in metres, rounded to 2 decimals.
pub fn bmi(weight: f64, height: f64) -> f64 {
    round_to_hundredths(weight / (height * height))
}

/// Rounds on the exact decimal expansion of `value`, ties to even.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
