//! Handlers for the `/admin/shows` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::schedule::validate_run_dates;
use footlights_core::slug::resolve_slug;
use footlights_core::types::DbId;
use footlights_db::models::show::{CreateShow, ShowListParams, UpdateShow};
use footlights_db::repositories::ShowRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "Show";

/// GET /api/v1/admin/shows
///
/// All shows in any status, filterable by `?status=` and `?search=`.
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppQuery(params): AppQuery<ShowListParams>,
) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /api/v1/admin/shows/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: show }))
}

/// POST /api/v1/admin/shows
///
/// The slug is taken from the body or derived from the title. A taken slug
/// yields 409.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateShow>,
) -> AppResult<impl IntoResponse> {
    validate_run_dates(input.premiere_date, input.closing_date)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let show = ShowRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(show_id = show.id, slug = %show.slug, user_id = editor.user_id, "Show created");

    revalidate(&state, [tags::SHOWS.to_string(), tags::show(&show.slug)]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: show })))
}

/// PUT /api/v1/admin/shows/{id}
///
/// Run dates are checked against the stored values for fields the patch
/// leaves out.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateShow>,
) -> AppResult<impl IntoResponse> {
    let existing = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    validate_run_dates(
        input.premiere_date.or(existing.premiere_date),
        input.closing_date.or(existing.closing_date),
    )?;

    let show = ShowRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(show_id = id, user_id = editor.user_id, "Show updated");

    let mut changed = vec![
        tags::SHOWS.to_string(),
        tags::AGENDA.to_string(),
        tags::show(&existing.slug),
    ];
    if show.slug != existing.slug {
        changed.push(tags::show(&show.slug));
    }
    revalidate(&state, changed).await;

    Ok(Json(DataResponse { data: show }))
}

/// DELETE /api/v1/admin/shows/{id}
///
/// Removes the show with its events and gallery.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    if !ShowRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(show_id = id, user_id = editor.user_id, "Show deleted");

    revalidate(
        &state,
        [
            tags::SHOWS.to_string(),
            tags::AGENDA.to_string(),
            tags::show(&existing.slug),
        ],
    )
    .await;

    Ok(Json(Deleted::new(id)))
}
