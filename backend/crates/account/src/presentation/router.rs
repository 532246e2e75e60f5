//! Account Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the Account router with PostgreSQL repository
pub fn account_router(repo: PgUserRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic Account router for any repository implementation
///
/// Paths are relative; the caller nests the router under `/api`.
pub fn account_router_generic<U>(repo: U, config: AccountConfig) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/register", post(handlers::register::<U>))
        .route("/auth/login", post(handlers::login::<U>))
        .route("/users/{id}", get(handlers::get_user::<U>))
        .with_state(state)
}
