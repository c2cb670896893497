use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use importer::schedule::{
    models::ScheduleFormat,
    transformer::{ScheduleTransformer, next_monday},
    validator::ScheduleValidator,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::path::PathBuf;
use storage::{
    models::AdminType,
    repository::{account::AccountRepository, maintenance::MaintenanceRepository},
    services::credentials::hash_password,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "league-import")]
#[command(about = "College league schedule importer and maintenance tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load divisions, teams and fixtures from a schedule JSON file
    Schedule {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,

        /// Date of the first listed week; defaults to the coming Monday
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Delete every fixture and result and zero all team points
    ClearFixtures,
    CreateSuperAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        full_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "league_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Schedule {
            file,
            validate_only,
            start_date,
        } => {
            handle_schedule_import(file, validate_only, start_date, &cli.database_url).await?;
        }
        Commands::ClearFixtures => {
            handle_clear_fixtures(&cli.database_url).await?;
        }
        Commands::CreateSuperAdmin {
            email,
            password,
            full_name,
        } => {
            handle_create_super_admin(&email, &password, full_name.as_deref(), &cli.database_url)
                .await?;
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

async fn handle_schedule_import(
    file: PathBuf,
    validate_only: bool,
    start_date: Option<NaiveDate>,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading schedule JSON from: {}", file.display());

    let json_content = tokio::fs::read_to_string(&file).await?;
    let schedule: ScheduleFormat = serde_json::from_str(&json_content)?;

    tracing::info!(
        "Loaded schedule: {} divisions, {} teams, {} weeks (v{})",
        schedule.divisions.len(),
        schedule.teams.len(),
        schedule.weeks.len(),
        schedule.format_version
    );

    tracing::info!("Validating schedule...");
    let validation_report = ScheduleValidator::validate(&schedule)?;
    validation_report.log_warnings();
    tracing::info!("✓ Validation successful!");

    if validate_only {
        return Ok(());
    }

    let start_date = start_date.unwrap_or_else(|| next_monday(Local::now().date_naive()));
    tracing::info!("First week plays on {}", start_date);

    let pool = connect(database_url).await?;
    let summary = ScheduleTransformer::new(&pool)
        .import_to_database(&schedule, start_date)
        .await?;

    tracing::info!(
        "✓ Import completed: {} divisions, {} teams, {} fixtures",
        summary.divisions,
        summary.teams,
        summary.fixtures
    );

    Ok(())
}

async fn handle_clear_fixtures(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(database_url).await?;
    let summary = MaintenanceRepository::new(&pool).clear_fixtures().await?;

    tracing::info!(
        "✓ Deleted {} fixtures and reset points for {} teams",
        summary.fixtures_deleted,
        summary.teams_updated
    );

    Ok(())
}

async fn handle_create_super_admin(
    email: &str,
    password: &str,
    full_name: Option<&str>,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let password_hash = hash_password(password)?;
    let pool = connect(database_url).await?;
    let admin = AccountRepository::new(&pool)
        .create_admin(email.trim(), &password_hash, full_name, AdminType::Super)
        .await?;

    tracing::info!("✓ Created super admin {} ({})", admin.email, admin.admin_id);

    Ok(())
}
