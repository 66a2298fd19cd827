//! Handlers for the `/auth` resource (login, refresh, logout, me, invitation acceptance).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use footlights_core::error::CoreError;
use footlights_db::models::invitation::AcceptInvitationRequest;
use footlights_db::models::session::NewSession;
use footlights_db::models::user::{CreateUser, LockoutPolicy, User, UserResponse};
use footlights_db::repositories::{InvitationRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Five wrong passwords in a row lock the account for fifteen minutes.
const LOCKOUT: LockoutPolicy = LockoutPolicy {
    max_attempts: 5,
    lock_minutes: 15,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const INVALID_INVITATION: &str = "Invitation is invalid or has expired";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub revoked_sessions: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    // 2. Check if the account is active.
    if !user.is_active {
        tracing::warn!(user_id = user.id, "Login attempt on deactivated account");
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            tracing::warn!(user_id = user.id, "Login attempt on locked account");
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: count it; the repository locks at the threshold.
        let failure = UserRepo::record_failed_login(&state.pool, user.id, LOCKOUT).await?;
        if failure.locked_until.is_some() {
            tracing::warn!(
                user_id = user.id,
                failed = failure.failed_login_count,
                "Account locked",
            );
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    UserRepo::record_login(&state.pool, user.id).await?;

    // 7. Open a session and issue tokens.
    let (refresh_token, session) = new_session(&state, &headers);
    SessionRepo::open(&state.pool, user.id, &session).await?;
    let response = auth_response(&state, user, refresh_token)?;

    tracing::info!(user_id = response.user.id, "User logged in");

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for new access + refresh tokens. Each refresh
/// token works once: a replay, even a concurrent one, is rejected.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let (refresh_token, next) = new_session(&state, &headers);

    let session = SessionRepo::rotate(&state.pool, &hash_token(&input.refresh_token), &next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active);
    let Some(user) = user else {
        SessionRepo::revoke_all_for_user(&state.pool, session.user_id).await?;
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    };

    let response = auth_response(&state, user, refresh_token)?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user.
pub async fn logout(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(Json(DataResponse {
        data: LogoutResponse {
            revoked_sessions: revoked,
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(AppError::unauthenticated)?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// POST /api/v1/auth/invitations/accept
///
/// Redeem an invitation token: creates the account with the invited email
/// and role. Unknown, expired, revoked and already-used tokens are rejected
/// with the same message.
pub async fn accept_invitation(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<AcceptInvitationRequest>,
) -> AppResult<impl IntoResponse> {
    let invitation = InvitationRepo::find_by_token_hash(&state.pool, &hash_token(&input.token))
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_INVITATION.into())))?;
    invitation.state_at(Utc::now()).ensure_acceptable()?;

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: invitation.email.clone(),
        password_hash,
        role: invitation.role.clone(),
    };

    // Consumes the invitation and inserts the user atomically; `None` means
    // it was used, revoked or expired after the check above.
    let user = InvitationRepo::accept(&state.pool, invitation.id, &create_dto)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_INVITATION.into())))?;

    tracing::info!(
        user_id = user.id,
        invitation_id = invitation.id,
        role = %user.role,
        "Invitation accepted",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A fresh refresh token and the session row it will key.
fn new_session(state: &AppState, headers: &HeaderMap) -> (String, NewSession) {
    let (refresh_token, refresh_hash) = generate_opaque_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());
    (refresh_token, NewSession::new(refresh_hash, expires_at, user_agent))
}

/// Sign an access token for `user` and pair it with the session's refresh token.
fn auth_response(state: &AppState, user: User, refresh_token: String) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}
