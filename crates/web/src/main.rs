use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::{auth::AuthState, session::SessionKey};

#[derive(OpenApi)]
#[openapi(
    paths(
        features::fixtures::handlers::list_fixtures,
        features::fixtures::handlers::get_fixture,
        features::fixtures::handlers::submit_result,
        features::fixtures::handlers::clear_result,
        features::league_tables::handlers::list_league_tables,
        features::pool_nominations::handlers::list_nominations,
        features::pool_nominations::handlers::nominate_player,
        features::auth::handlers::login,
        features::auth::handlers::logout,
        features::auth::handlers::me,
        features::admin::handlers::reset_points,
        features::admin::handlers::list_admins,
        features::admin::handlers::create_admin,
        features::admin::handlers::delete_admin,
        features::admin::handlers::list_captains,
        features::admin::handlers::create_captain,
        features::admin::handlers::delete_captain,
    ),
    components(
        schemas(
            storage::dto::fixture::FixtureFilter,
            storage::dto::fixture::FixtureResponse,
            storage::dto::fixture::DivisionInfo,
            storage::dto::fixture::TeamInfo,
            storage::dto::fixture::ResultInfo,
            storage::dto::league_table::LeagueTableResponse,
            storage::dto::league_table::StandingEntry,
            storage::dto::result::SubmitResultRequest,
            storage::dto::result::SubmitResultResponse,
            storage::dto::result::ClearResultResponse,
            storage::dto::pool_nomination::NominatePlayerRequest,
            storage::models::PoolNomination,
            storage::dto::account::LoginRequest,
            storage::dto::account::SessionResponse,
            storage::dto::account::CreateAdminRequest,
            storage::dto::account::CreateCaptainRequest,
            storage::dto::account::ResetPointsResponse,
            storage::services::points_ledger::Allocation,
            storage::services::points_ledger::PointsDelta,
            storage::services::permissions::Actor,
            storage::models::MatchResult,
            storage::models::Sport,
            storage::models::Admin,
            storage::models::AdminType,
            storage::models::Captain,
            storage::models::CaptainRole,
        )
    ),
    tags(
        (name = "fixtures", description = "Fixtures and result submission"),
        (name = "league-tables", description = "Division standings"),
        (name = "pool-nominations", description = "Women's+ Pool player nominations"),
        (name = "auth", description = "Session login and logout"),
        (name = "admin", description = "Super admin maintenance and accounts"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(
                            middleware::session::SESSION_COOKIE,
                        ),
                    ),
                ),
            )
        }
    }
}

fn app(db: Database, auth: AuthState) -> Router {
    Router::new()
        .nest(
            "/api/fixtures",
            features::fixtures::routes(auth.clone())
                .merge(features::pool_nominations::routes(auth.clone())),
        )
        .nest("/api/league-tables", features::league_tables::routes())
        .nest("/api/auth", features::auth::routes(auth.clone()))
        .nest("/api/admin", features::admin::routes(auth))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting college league API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let sessions = SessionKey::new(
        config.session_secret.as_bytes(),
        config.session_ttl_seconds,
        config.secure_cookies,
    )
    .context("Failed to build session key")?;
    let auth = AuthState {
        db: db.clone(),
        sessions,
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db, auth))
        .await
        .context("axum server error")?;

    Ok(())
}
