//! Handlers for `/admin/settings`, the key/value store behind the company page.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::settings::validate_setting;
use footlights_db::models::setting::PutSetting;
use footlights_db::repositories::SettingRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::revalidate::tags;
use crate::state::AppState;

/// GET /api/v1/admin/settings
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/admin/settings/{key}
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(key): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let setting = SettingRepo::get(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{key}' not found")))?;
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/settings/{key}
///
/// Body: `{ "value": { ... } }`. Only known keys are accepted and each value
/// must be a JSON object.
pub async fn put(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(key): AppPath<String>,
    AppJson(input): AppJson<PutSetting>,
) -> AppResult<impl IntoResponse> {
    validate_setting(&key, &input.value)?;

    let setting = SettingRepo::upsert(&state.pool, &key, &input.value, Some(admin.user_id)).await?;

    tracing::info!(key = %key, user_id = admin.user_id, "Setting saved");
    revalidate(&state, [tags::COMPANY]).await;

    Ok(Json(DataResponse { data: setting }))
}
