//! Handlers for the `/admin/events` resource (single performances of a show).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::schedule::validate_event_window;
use footlights_core::types::DbId;
use footlights_db::models::event::{CreateEvent, EventListParams, UpdateEvent};
use footlights_db::repositories::{EventRepo, ShowRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "Event";

/// GET /api/v1/admin/events
///
/// Filterable by `?show_id=`, `?venue_id=`, `?status=`, `?from=`, `?to=`.
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppQuery(params): AppQuery<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/admin/events/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/admin/events
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_event_window(input.starts_at, input.ends_at)?;

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(
        event_id = event.id,
        show_id = event.show_id,
        user_id = editor.user_id,
        "Event created",
    );
    revalidate_show_pages(&state, event.show_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/admin/events/{id}
///
/// Completed events cannot change status; a cancelled event may only go
/// back to scheduled.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    validate_event_window(
        input.starts_at.unwrap_or(existing.starts_at),
        input.ends_at.or(existing.ends_at),
    )?;

    if let Some(next) = input.status {
        if !existing.status.can_transition_to(next) {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Event {id} cannot change from {} to {}",
                existing.status.as_str(),
                next.as_str()
            ))));
        }
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(event_id = id, user_id = editor.user_id, "Event updated");
    revalidate_show_pages(&state, event.show_id).await?;

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/admin/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    if !EventRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(event_id = id, user_id = editor.user_id, "Event deleted");
    revalidate_show_pages(&state, existing.show_id).await?;

    Ok(Json(Deleted::new(id)))
}

/// The agenda and the owning show's page list this event.
async fn revalidate_show_pages(state: &AppState, show_id: DbId) -> AppResult<()> {
    let mut changed = vec![tags::AGENDA.to_string()];
    if let Some(show) = ShowRepo::find_by_id(&state.pool, show_id).await? {
        changed.push(tags::show(&show.slug));
    }
    revalidate(state, changed).await;
    Ok(())
}
