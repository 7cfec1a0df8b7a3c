//! # API REST
//!
//! REST API implementation for the patient store.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation (`/docs`, `/openapi.json`)
//! - REST-specific concerns (status codes, JSON error bodies, CORS)
//!
//! Uses `patients-core` for every data operation.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod models;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use patients_core::{
    FieldViolation, Gender, NewPatient, PatientService, PatientUpdate, PatientView, Verdict,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

impl AppState {
    pub fn new(patient_service: PatientService) -> Self {
        Self { patient_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::hello,
        handlers::about,
        handlers::view_patients,
        handlers::get_patient,
        handlers::sort_patients,
        handlers::create_patient,
        handlers::update_patient,
        handlers::delete_patient,
    ),
    components(schemas(
        models::MessageRes,
        models::ErrorRes,
        FieldViolation,
        Gender,
        NewPatient,
        PatientUpdate,
        PatientView,
        Verdict,
    )),
    info(title = "Patient Management System API")
)]
pub struct ApiDoc;

/// Builds the application router with every route, the Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/about", get(handlers::about))
        .route("/view", get(handlers::view_patients))
        .route("/patient/:id", get(handlers::get_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create", post(handlers::create_patient))
        .route("/edit/:id", put(handlers::update_patient))
        .route("/delete/:id", delete(handlers::delete_patient))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
