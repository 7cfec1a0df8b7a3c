//! Mapping from core errors and extractor rejections to HTTP responses.

use crate::models::ErrorRes;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use patients_core::PatientError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Patient(#[from] PatientError),
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Patient(PatientError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorRes {
                    detail: "Invalid patient record".into(),
                    errors,
                },
            ),
            ApiError::Patient(PatientError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, ErrorRes::new("Patient not found"))
            }
            ApiError::Patient(PatientError::AlreadyExists(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorRes::new("Patient already exists"),
            ),
            ApiError::Patient(
                PatientError::InvalidArgument(detail) | PatientError::InvalidInput(detail),
            ) => (StatusCode::BAD_REQUEST, ErrorRes::new(detail)),
            ApiError::Patient(e) => {
                tracing::error!("Patient store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorRes::new("Internal error"),
                )
            }
            ApiError::Rejected { status, detail } => (status, ErrorRes::new(detail)),
        };

        (status, Json(body)).into_response()
    }
}
