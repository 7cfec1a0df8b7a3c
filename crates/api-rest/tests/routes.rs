use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use patients_core::{
    JsonFileStore, MemoryStore, PatientMap, PatientResult, PatientService, PatientStore,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

/// Memory store that counts how often it is loaded.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    loads: AtomicUsize,
}

impl PatientStore for CountingStore {
    fn load(&self) -> PatientResult<PatientMap> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load()
    }

    fn save(&self, patients: &PatientMap) -> PatientResult<()> {
        self.inner.save(patients)
    }
}

fn app_with_store(store: Arc<dyn PatientStore>) -> Router {
    router(AppState::new(PatientService::new(store)))
}

fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn john() -> Value {
    json!({
        "id": "P001",
        "name": "John Doe",
        "age": 30,
        "gender": "male",
        "city": "NY",
        "weight": 70.5,
        "height": 1.75
    })
}

fn patient(id: &str, weight: f64, height: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Patient {id}"),
        "age": 45,
        "gender": "other",
        "city": "Leeds",
        "weight": weight,
        "height": height
    })
}

async fn seed(app: &Router, patients: &[Value]) {
    for body in patients {
        let (status, _) = send(app, "POST", "/create", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_static_routes() {
    let app = app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient Management System API");

    let (status, body) = send(&app, "GET", "/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("patient records"));
}

#[tokio::test]
async fn test_create_then_get_returns_derived_fields() {
    let app = app();

    let (status, body) = send(&app, "POST", "/create", Some(john())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Patient created successfully");

    let (status, body) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "P001",
            "name": "John Doe",
            "age": 30,
            "gender": "male",
            "city": "NY",
            "weight": 70.5,
            "height": 1.75,
            "bmi": 23.02,
            "verdict": "Normal weight"
        })
    );
}

#[tokio::test]
async fn test_create_duplicate_id_is_bad_request() {
    let app = app();
    seed(&app, &[john()]).await;

    let mut second = patient("P001", 45.0, 1.60);
    second["name"] = json!("Someone Else");
    let (status, body) = send(&app, "POST", "/create", Some(second)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Patient already exists");

    let (_, body) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(body["name"], "John Doe");
}

#[tokio::test]
async fn test_create_invalid_fields_is_unprocessable() {
    let app = app();
    let mut body = john();
    body["age"] = json!(150);
    body["weight"] = json!(0);

    let (status, body) = send(&app, "POST", "/create", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Invalid patient record");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["age", "weight"]);

    let (status, body) = send(&app, "GET", "/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_create_missing_field_is_unprocessable() {
    let app = app();
    let mut body = john();
    body.as_object_mut().unwrap().remove("height");

    let (status, body) = send(&app, "POST", "/create", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"id\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_patient_is_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/patient/P404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient not found");
}

#[tokio::test]
async fn test_view_lists_patients_in_store_order() {
    let app = app();
    seed(
        &app,
        &[patient("P002", 60.0, 1.6), john(), patient("P003", 80.0, 1.8)],
    )
    .await;

    let (status, body) = send(&app, "GET", "/view", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["P002", "P001", "P003"]);
    assert_eq!(body["P001"]["verdict"], "Normal weight");
    assert_eq!(body["P001"]["bmi"], 23.02);
}

#[tokio::test]
async fn test_sort_by_weight_in_both_directions() {
    let app = app();
    seed(
        &app,
        &[
            patient("P001", 80.0, 1.8),
            patient("P002", 45.0, 1.6),
            patient("P003", 80.0, 1.7),
            patient("P004", 62.0, 1.9),
        ],
    )
    .await;

    let (status, body) = send(&app, "GET", "/sort?sort_by=weight", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["P002", "P004", "P001", "P003"]);

    let (status, body) = send(&app, "GET", "/sort?sort_by=weight&order=desc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["P001", "P003", "P004", "P002"]);
}

#[tokio::test]
async fn test_sort_by_bmi_ascending() {
    let app = app();
    seed(&app, &[john(), patient("P002", 45.0, 1.60)]).await;

    let (status, body) = send(&app, "GET", "/sort?sort_by=bmi&order=asc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["P002", "P001"]);
    assert_eq!(body[0]["bmi"], 17.58);
    assert_eq!(body[0]["verdict"], "Underweight");
}

#[tokio::test]
async fn test_sort_invalid_arguments_do_not_touch_store() {
    let store = Arc::new(CountingStore::default());
    let app = app_with_store(store.clone());

    let (status, body) = send(&app, "GET", "/sort?sort_by=age", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("weight, height, bmi"));

    let (status, _) = send(&app, "GET", "/sort?sort_by=height&order=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/sort", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_edit_changes_only_given_fields() {
    let app = app();
    seed(&app, &[john()]).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/edit/P001",
        Some(json!({"city": "Boston", "weight": 45.0, "height": 1.60})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient updated successfully");

    let (_, body) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(body["city"], "Boston");
    assert_eq!(body["weight"], 45.0);
    assert_eq!(body["height"], 1.6);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["age"], 30);
    assert_eq!(body["gender"], "male");
    assert_eq!(body["bmi"], 17.58);
    assert_eq!(body["verdict"], "Underweight");
}

#[tokio::test]
async fn test_edit_invalid_merge_is_unprocessable_and_unchanged() {
    let app = app();
    seed(&app, &[john()]).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/edit/P001",
        Some(json!({"city": "Boston", "gender": "unknown"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "gender");

    let (_, body) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(body["city"], "NY");
    assert_eq!(body["gender"], "male");
}

#[tokio::test]
async fn test_edit_unknown_patient_is_not_found() {
    let app = app();
    let (status, _) = send(&app, "PUT", "/edit/P404", Some(json!({"age": 40}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    seed(&app, &[john()]).await;

    let (status, body) = send(&app, "DELETE", "/delete/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted successfully");

    let (status, _) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/delete/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_store_file_is_internal_error() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(temp_dir.path().join("patients.json"));
    let app = app_with_store(Arc::new(store));

    let (status, body) = send(&app, "GET", "/view", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal error");
    assert!(!temp_dir.path().join("patients.json").exists());
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = app();
    let (status, body) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let paths = body["paths"].as_object().expect("paths should be an object");
    for path in [
        "/",
        "/about",
        "/view",
        "/patient/{id}",
        "/sort",
        "/create",
        "/edit/{id}",
        "/delete/{id}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
