//! Handlers for the `/auth` resource (register, login, logout,
//! check-username).

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use extranet_core::avatar::DEFAULT_AVATAR_PATH;
use extranet_core::error::CoreError;
use extranet_core::types::DbId;
use extranet_core::username::validate_username;
use extranet_db::models::user::CreateUser;
use extranet_db::repositories::UserRepo;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LEN,
};
use crate::auth::jwt::generate_token;
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::bearer_token;
use crate::response::Ack;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: DbId,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Query parameters for `GET /auth/check-username`.
#[derive(Debug, Deserialize)]
pub struct CheckUsernameParams {
    pub username: Option<String>,
}

/// Response body for the availability check.
#[derive(Debug, Serialize)]
pub struct CheckUsernameResponse {
    pub username: String,
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account. The username must match the canonical rule; the
/// password is hashed before it goes anywhere near storage.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    // 1. Validate username and password up front.
    validate_username(&input.username)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LEN)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Hash the password. A hashing failure is an internal error, never a
    //    credentials problem.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Insert with the default avatar reference. The unique constraint is
    //    authoritative for username collisions, including races past the
    //    availability check.
    let create = CreateUser {
        username: input.username,
        password_hash,
        name: input.name,
        surname: input.surname,
        email: input.email,
        avatar: Some(DEFAULT_AVATAR_PATH.to_string()),
    };
    let user = match UserRepo::create(&state.pool, &create).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e, "uq_users_username") => {
            return Err(AppError::Core(CoreError::Conflict(
                "This username is already taken".into(),
            )));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id: user.id }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns a session token. An
/// unknown username and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials.".into())))?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials.".into(),
        )));
    }

    // 3. Issue a session token.
    let token = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse { token }))
}

/// POST /api/v1/auth/logout
///
/// Add the presented token to the revocation registry. Idempotent: logging
/// out an already-revoked, invalid, or absent token still reports success.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Ack> {
    if let Some(token) = bearer_token(&headers) {
        state.revoked_tokens.revoke(token).await;
    }
    Json(Ack::ok())
}

/// GET /api/v1/auth/check-username?username=X
///
/// Live availability check for signup forms. Advisory only: the register
/// operation re-checks via the unique constraint.
pub async fn check_username(
    State(state): State<AppState>,
    Query(params): Query<CheckUsernameParams>,
) -> AppResult<Json<CheckUsernameResponse>> {
    let username = params
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing username".into()))?;

    let taken = UserRepo::username_exists(&state.pool, &username).await?;

    Ok(Json(CheckUsernameResponse {
        username,
        available: !taken,
    }))
}
