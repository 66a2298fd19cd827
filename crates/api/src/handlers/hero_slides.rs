//! Handlers for the `/admin/hero-slides` resource (home page carousel).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::ordering::ReorderRequest;
use footlights_core::types::DbId;
use footlights_db::models::hero_slide::{CreateHeroSlide, UpdateHeroSlide};
use footlights_db::repositories::HeroSlideRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const ENTITY: &str = "HeroSlide";

/// GET /api/v1/admin/hero-slides
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let slides = HeroSlideRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// GET /api/v1/admin/hero-slides/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let slide = HeroSlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: slide }))
}

/// POST /api/v1/admin/hero-slides
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreateHeroSlide>,
) -> AppResult<impl IntoResponse> {
    let slide = HeroSlideRepo::create(&state.pool, &input).await?;

    tracing::info!(
        hero_slide_id = slide.id,
        display_order = slide.display_order,
        user_id = editor.user_id,
        "Hero slide created",
    );
    revalidate(&state, [tags::HERO_SLIDES]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// PUT /api/v1/admin/hero-slides/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateHeroSlide>,
) -> AppResult<impl IntoResponse> {
    let slide = HeroSlideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(hero_slide_id = id, user_id = editor.user_id, "Hero slide updated");
    revalidate(&state, [tags::HERO_SLIDES]).await;

    Ok(Json(DataResponse { data: slide }))
}

/// PUT /api/v1/admin/hero-slides/reorder
pub async fn reorder(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let positions = HeroSlideRepo::reorder(&state.pool, &input.ids).await?;

    tracing::info!(count = positions.len(), user_id = editor.user_id, "Hero slides reordered");
    revalidate(&state, [tags::HERO_SLIDES]).await;

    Ok(Json(DataResponse { data: positions }))
}

/// DELETE /api/v1/admin/hero-slides/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !HeroSlideRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(hero_slide_id = id, user_id = editor.user_id, "Hero slide deleted");
    revalidate(&state, [tags::HERO_SLIDES]).await;

    Ok(Json(Deleted::new(id)))
}
