//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    GetUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AccountConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<U>(
    State(state): State<AccountAppState<U>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AccountResult<Json<AuthResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        name: req.name,
        role: req.role,
        address: req.address,
        zone: req.zone,
    };

    let user = use_case.execute(input).await?;

    Ok(Json(AuthResponse { user: user.into() }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<U>(
    State(state): State<AccountAppState<U>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AccountResult<Json<AuthResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse { user: user.into() }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users/{id}
pub async fn get_user<U>(
    State(state): State<AccountAppState<U>>,
    Path(id): Path<String>,
) -> AccountResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let user = GetUserUseCase::new(state.repo.clone()).execute(&id).await?;
    Ok(Json(user.into()))
}
