use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use patients_core::{CoreConfig, PatientService, config::patients_file_from_env_value};

/// Main entry point for the patient store server
///
/// Serves the REST API (with Swagger UI at `/docs`) over the JSON store file.
///
/// # Environment Variables
/// - `PATIENTS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENTS_FILE`: Path to the JSON store file (default: "patients.json")
/// - `RUST_LOG`: Log filter (default directives log the workspace crates at `info`)
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be parsed or bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patients_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("patients_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("PATIENTS_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let patients_file = patients_file_from_env_value(std::env::var("PATIENTS_FILE").ok());
    let cfg = CoreConfig::new(patients_file)?;
    if !cfg.patients_file().is_file() {
        tracing::warn!(
            "Patient store file does not exist yet: {}",
            cfg.patients_file().display()
        );
    }

    tracing::info!("++ Starting patient store REST API on {}", rest_addr);
    tracing::info!("++ Using patient store {}", cfg.patients_file().display());

    let app = api_rest::router(AppState::new(PatientService::from_config(&cfg)));

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
