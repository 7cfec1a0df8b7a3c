use clap::{Parser, Subcommand};
use patients_core::{
    config::patients_file_from_env_value, CoreConfig, NewPatient, PatientError, PatientResult,
    PatientService, PatientUpdate, SortField, SortOrder,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIRECTIVES: &str = "patients_core=info";

#[derive(Parser)]
#[command(name = "patients")]
#[command(about = "Patient store CLI")]
struct Cli {
    /// Patient store file (defaults to $PATIENTS_FILE, then patients.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Get {
        /// Patient id
        id: String,
    },
    /// List patients sorted by weight, height or bmi
    Sort {
        /// Field to sort by: weight, height or bmi
        sort_by: String,
        /// asc (default) or desc
        #[arg(long)]
        order: Option<String>,
    },
    /// Create a patient
    Create {
        id: String,
        name: String,
        /// Age in years (1-120)
        age: i64,
        /// male, female or other
        gender: String,
        city: String,
        /// Weight in kilograms
        weight: f64,
        /// Height in metres
        height: f64,
    },
    /// Update selected fields of a patient
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Delete a patient
    Delete {
        /// Patient id
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok())?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        println!("Use 'patients --help' for commands");
        return Ok(());
    };

    let patients_file = cli
        .file
        .unwrap_or_else(|| patients_file_from_env_value(std::env::var("PATIENTS_FILE").ok()));
    let cfg = CoreConfig::new(patients_file)?;
    let service = PatientService::from_config(&cfg);

    if let Err(e) = run(&service, command) {
        eprintln!("Error: {}", e);
        for violation in e.violations() {
            eprintln!("  {}", violation);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the log filter from `RUST_LOG`, falling back to core mutation logs at `info`.
///
/// Logs go to stderr so command output on stdout stays plain JSON.
fn log_filter(value: Option<String>) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    let directives = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVES.to_string());
    EnvFilter::try_new(directives)
}

fn run(service: &PatientService, command: Commands) -> PatientResult<()> {
    match command {
        Commands::List => print_json(&service.list_patients()?),
        Commands::Get { id } => print_json(&service.get_patient(&id)?),
        Commands::Sort { sort_by, order } => {
            let field: SortField = sort_by.parse()?;
            let order = SortOrder::parse_or_default(order.as_deref())?;
            print_json(&service.sort_patients(field, order)?)
        }
        Commands::Create {
            id,
            name,
            age,
            gender,
            city,
            weight,
            height,
        } => {
            let created = service.create_patient(NewPatient {
                id,
                name,
                age,
                gender,
                city,
                weight,
                height,
            })?;
            print_json(&created)
        }
        Commands::Edit {
            id,
            name,
            age,
            gender,
            city,
            weight,
            height,
        } => {
            let update = PatientUpdate {
                name,
                age,
                gender,
                city,
                weight,
                height,
            };
            print_json(&service.update_patient(&id, update)?)
        }
        Commands::Delete { id } => {
            service.delete_patient(&id)?;
            println!("Deleted patient {}", id);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> PatientResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(PatientError::Serialization)?;
    println!("{}", json);
    Ok(())
}
