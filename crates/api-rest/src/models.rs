//! Request and response bodies specific to the REST surface.

use patients_core::FieldViolation;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Plain message body used by the static routes and successful mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    #[schema(example = "Patient created successfully")]
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body. `errors` is only present for validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    #[schema(example = "Patient not found")]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl ErrorRes {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// One of `weight`, `height`, `bmi`.
    pub sort_by: String,
    /// `asc` (default) or `desc`.
    pub order: Option<String>,
}
