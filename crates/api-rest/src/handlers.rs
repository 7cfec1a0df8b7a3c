//! Route handlers.
//!
//! Handlers only translate between HTTP and [`PatientService`](patients_core::PatientService).
//! Store access is synchronous file I/O on a small document and runs inline.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use indexmap::IndexMap;
use patients_core::{NewPatient, PatientUpdate, PatientView, SortField, SortOrder};

use crate::error::ApiError;
use crate::models::{ErrorRes, MessageRes, SortParams};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness message", body = MessageRes)
    )
)]
/// Liveness endpoint.
#[axum::debug_handler]
pub async fn hello() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "About message", body = MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes::new("A fully functional API to manage your patient records"))
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All patients keyed by id", body = IndexMap<String, PatientView>),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every patient, keyed by id, in store order.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be loaded.
#[axum::debug_handler]
pub async fn view_patients(
    State(state): State<AppState>,
) -> Result<Json<IndexMap<String, PatientView>>, ApiError> {
    let patients = state.patient_service.list_patients()?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(
        ("id" = String, Path, description = "Patient id", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient record", body = PatientView),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one patient with derived BMI and verdict.
///
/// # Errors
/// Returns `404 Not Found` if no patient has this id.
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    let patient = state.patient_service.get_patient(&id)?;
    Ok(Json(patient))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Patients ordered by the requested field", body = [PatientView]),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every patient ordered by weight, height or BMI.
///
/// Arguments are checked before the store is read.
///
/// # Errors
/// Returns `400 Bad Request` if `sort_by` is missing or not one of `weight`, `height`, `bmi`,
/// or if `order` is neither `asc` nor `desc`.
#[axum::debug_handler]
pub async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let Query(params) = params?;
    let field: SortField = params.sort_by.parse()?;
    let order = SortOrder::parse_or_default(params.order.as_deref())?;

    let patients = state.patient_service.sort_patients(field, order)?;
    Ok(Json(patients))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient record", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record.
///
/// # Errors
/// Returns `400 Bad Request` if the id is taken and `422 Unprocessable Entity` if any field is
/// invalid.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let Json(new_patient) = payload?;
    state.patient_service.create_patient(new_patient)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("Patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(
        ("id" = String, Path, description = "Patient id", example = "P001")
    ),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Patient updated", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Merged record is invalid", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Apply a partial update to a patient.
///
/// Only the fields present in the body change. The merged record is validated as a whole.
///
/// # Errors
/// Returns `404 Not Found` if no patient has this id and `422 Unprocessable Entity` if the
/// merged record is invalid.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PatientUpdate>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    let Json(update) = payload?;
    state.patient_service.update_patient(&id, update)?;
    Ok(Json(MessageRes::new("Patient updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(
        ("id" = String, Path, description = "Patient id", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state.patient_service.delete_patient(&id)?;
    Ok(Json(MessageRes::new("Patient deleted successfully")))
}
