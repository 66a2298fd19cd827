//! Handlers for the `/admin/venues` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::types::DbId;
use footlights_db::models::venue::{CreateVenue, UpdateVenue};
use footlights_db::repositories::VenueRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "Venue";

/// GET /api/v1/admin/venues
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/admin/venues/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: venue }))
}

/// POST /api/v1/admin/venues
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::create(&state.pool, &input).await?;
    tracing::info!(venue_id = venue.id, user_id = editor.user_id, "Venue created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// PUT /api/v1/admin/venues/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(venue_id = id, user_id = editor.user_id, "Venue updated");
    revalidate(&state, [tags::AGENDA]).await;

    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/admin/venues/{id}
///
/// Venues that still host events are refused with 400.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !VenueRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    tracing::info!(venue_id = id, user_id = editor.user_id, "Venue deleted");
    Ok(Json(Deleted::new(id)))
}
