//! Handlers for `/admin/press-releases` and `/admin/press-articles`.
//!
//! Releases are written by the company and addressed by slug on the public
//! site; articles link to outside coverage.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use footlights_core::error::CoreError;
use footlights_core::slug::resolve_slug;
use footlights_core::types::DbId;
use footlights_db::models::press::{
    CreatePressArticle, CreatePressRelease, UpdatePressArticle, UpdatePressRelease,
};
use footlights_db::repositories::{PressArticleRepo, PressReleaseRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidJson};
use crate::handlers::revalidate;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Deleted};
use crate::revalidate::tags;
use crate::state::AppState;

const RELEASE: &str = "PressRelease";
const ARTICLE: &str = "PressArticle";

// ---------------------------------------------------------------------------
// Press releases
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/press-releases
pub async fn list_releases(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let releases = PressReleaseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: releases }))
}

/// GET /api/v1/admin/press-releases/{id}
pub async fn get_release(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let release = PressReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: RELEASE, id }))?;
    Ok(Json(DataResponse { data: release }))
}

/// POST /api/v1/admin/press-releases
pub async fn create_release(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreatePressRelease>,
) -> AppResult<impl IntoResponse> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let release = PressReleaseRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(press_release_id = release.id, slug = %release.slug, user_id = editor.user_id, "Press release created");
    revalidate(&state, [tags::PRESS.to_string(), tags::press_release(&release.slug)]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: release })))
}

/// PUT /api/v1/admin/press-releases/{id}
pub async fn update_release(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdatePressRelease>,
) -> AppResult<impl IntoResponse> {
    let existing = PressReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: RELEASE, id }))?;

    let release = PressReleaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: RELEASE, id }))?;

    tracing::info!(press_release_id = id, user_id = editor.user_id, "Press release updated");

    let mut changed = vec![tags::PRESS.to_string(), tags::press_release(&existing.slug)];
    if release.slug != existing.slug {
        changed.push(tags::press_release(&release.slug));
    }
    revalidate(&state, changed).await;

    Ok(Json(DataResponse { data: release }))
}

/// DELETE /api/v1/admin/press-releases/{id}
pub async fn delete_release(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = PressReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: RELEASE, id }))?;

    if !PressReleaseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: RELEASE, id }));
    }

    tracing::info!(press_release_id = id, user_id = editor.user_id, "Press release deleted");
    revalidate(&state, [tags::PRESS.to_string(), tags::press_release(&existing.slug)]).await;

    Ok(Json(Deleted::new(id)))
}

// ---------------------------------------------------------------------------
// Press articles
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/press-articles
pub async fn list_articles(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<impl IntoResponse> {
    let articles = PressArticleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/admin/press-articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = PressArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ARTICLE, id }))?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/press-articles
pub async fn create_article(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    ValidJson(input): ValidJson<CreatePressArticle>,
) -> AppResult<impl IntoResponse> {
    let article = PressArticleRepo::create(&state.pool, &input).await?;

    tracing::info!(press_article_id = article.id, user_id = editor.user_id, "Press article created");
    revalidate(&state, [tags::PRESS]).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/press-articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdatePressArticle>,
) -> AppResult<impl IntoResponse> {
    let article = PressArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ARTICLE, id }))?;

    tracing::info!(press_article_id = id, user_id = editor.user_id, "Press article updated");
    revalidate(&state, [tags::PRESS]).await;

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/press-articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PressArticleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ARTICLE, id }));
    }

    tracing::info!(press_article_id = id, user_id = editor.user_id, "Press article deleted");
    revalidate(&state, [tags::PRESS]).await;

    Ok(Json(Deleted::new(id)))
}
