//! API composition root
//!
//! Wires the account and ledger routers onto one storage backend and adds
//! the cross-cutting layers (request tracing, CORS). `main.rs` only loads
//! configuration and serves what [`build_app`] returns.

pub mod config;

use account::{
    InMemoryUserRepository, PgUserRepository, UserRepository,
    account_router_generic,
};
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use ledger::{
    InMemoryLedgerRepository, PgLedgerRepository, ReportRepository, RewardRepository,
    ledger_router_generic,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Storage backend selected at startup
pub enum Backend {
    /// Volatile process-local storage
    Memory,
    /// PostgreSQL pool with migrations already applied
    Postgres(PgPool),
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// GET /api/health
async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
///
/// Seeds the reward catalog before returning; seeding is idempotent so a
/// restart against the same database is safe.
pub async fn build_app(backend: Backend, config: &ApiConfig) -> anyhow::Result<Router> {
    let api = match backend {
        Backend::Memory => {
            tracing::info!("Using in-memory storage");
            api_routes(
                InMemoryLedgerRepository::new(),
                InMemoryUserRepository::new(),
                config,
            )
            .await?
        }
        Backend::Postgres(pool) => {
            tracing::info!("Using PostgreSQL storage");
            api_routes(
                PgLedgerRepository::new(pool.clone()),
                PgUserRepository::new(pool),
                config,
            )
            .await?
        }
    };

    Ok(Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.frontend_origins)),
    ))
}

async fn api_routes<R, U>(ledger_repo: R, users: U, config: &ApiConfig) -> anyhow::Result<Router>
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let inserted = ledger_repo.seed(&config.ledger.rewards).await?;
    tracing::info!(
        inserted,
        catalog = config.ledger.rewards.len(),
        "Reward catalog seeded"
    );

    Ok(Router::new()
        .route("/health", get(health))
        .merge(account_router_generic(users.clone(), config.account.clone()))
        .merge(ledger_router_generic(ledger_repo, users)))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
}
