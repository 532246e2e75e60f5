//! Ledger Router

use account::{PgUserRepository, UserRepository};
use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::domain::repository::{ReportRepository, RewardRepository};
use crate::infra::postgres::PgLedgerRepository;
use crate::presentation::handlers::{self, LedgerAppState};

/// Create the Ledger router with PostgreSQL repositories
pub fn ledger_router(repo: PgLedgerRepository, users: PgUserRepository) -> Router {
    ledger_router_generic(repo, users)
}

/// Create a generic Ledger router for any repository implementation
///
/// Paths are relative; the caller nests the router under `/api`.
pub fn ledger_router_generic<R, U>(repo: R, users: U) -> Router
where
    R: ReportRepository + RewardRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = LedgerAppState {
        repo: Arc::new(repo),
        users: Arc::new(users),
    };

    Router::new()
        .route(
            "/reports",
            get(handlers::list_all_reports::<R, U>).post(handlers::submit_report::<R, U>),
        )
        .route(
            "/reports/user/{user_id}",
            get(handlers::list_user_reports::<R, U>),
        )
        .route(
            "/reports/zone/{zone}",
            get(handlers::list_zone_reports::<R, U>),
        )
        .route(
            "/reports/{id}/verify",
            patch(handlers::verify_report::<R, U>),
        )
        .route("/rewards", get(handlers::list_rewards::<R, U>))
        .route("/rewards/redeem", post(handlers::redeem_reward::<R, U>))
        .with_state(state)
}
