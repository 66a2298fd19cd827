//! Handlers for the unauthenticated `/public` resource backing the marketing site.
//!
//! Responses use the `Public*` row shapes, which leave out admin-only fields
//! such as activation flags and internal notes.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use footlights_core::types::{id_string, DbId, Timestamp};
use footlights_db::clamp_limit;
use footlights_db::models::contact_message::CreateContactMessage;
use footlights_db::models::event::AgendaEntry;
use footlights_db::models::gallery_photo::PublicGalleryPhoto;
use footlights_db::models::press::{PressArticle, PublicPressRelease};
use footlights_db::models::show::PublicShow;
use footlights_db::repositories::{
    ContactMessageRepo, EventRepo, GalleryPhotoRepo, HeroSlideRepo, PartnerRepo,
    PressArticleRepo, PressReleaseRepo, SettingRepo, ShowRepo, TeamMemberRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::query::AgendaParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_AGENDA_LIMIT: i64 = 50;
const MAX_AGENDA_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A published show with its gallery and upcoming performances.
#[derive(Debug, Serialize)]
pub struct ShowDetail {
    #[serde(flatten)]
    pub show: PublicShow,
    pub gallery: Vec<PublicGalleryPhoto>,
    pub upcoming_events: Vec<AgendaEntry>,
}

/// Press page content.
#[derive(Debug, Serialize)]
pub struct PressOverview {
    pub releases: Vec<PublicPressRelease>,
    pub articles: Vec<PressArticle>,
}

/// Acknowledgement of a contact form submission.
#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub received_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/public/shows
///
/// Published shows, newest premiere first. Drafts and archived shows never
/// appear here.
pub async fn list_shows(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /api/v1/public/shows/{slug}
pub async fn get_show(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Show '{slug}' not found")))?;

    let gallery = GalleryPhotoRepo::list_public_for_show(&state.pool, show.id).await?;
    let upcoming_events =
        EventRepo::list_upcoming_for_show(&state.pool, show.id, Utc::now()).await?;

    Ok(Json(DataResponse {
        data: ShowDetail {
            show,
            gallery,
            upcoming_events,
        },
    }))
}

/// GET /api/v1/public/agenda
///
/// Scheduled performances of published shows from `?from` (default: now),
/// soonest first.
pub async fn agenda(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AgendaParams>,
) -> AppResult<impl IntoResponse> {
    let from = params.from.unwrap_or_else(Utc::now);
    let limit = clamp_limit(params.limit, DEFAULT_AGENDA_LIMIT, MAX_AGENDA_LIMIT);
    let entries = EventRepo::list_agenda(&state.pool, from, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/public/press
pub async fn press(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let releases = PressReleaseRepo::list_published(&state.pool).await?;
    let articles = PressArticleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: PressOverview { releases, articles },
    }))
}

/// GET /api/v1/public/press/{slug}
pub async fn get_press_release(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let release = PressReleaseRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Press release '{slug}' not found")))?;
    Ok(Json(DataResponse { data: release }))
}

/// GET /api/v1/public/team
pub async fn team(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let members = TeamMemberRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/public/partners
pub async fn partners(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let partners = PartnerRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse { data: partners }))
}

/// GET /api/v1/public/hero-slides
pub async fn hero_slides(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let slides = HeroSlideRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// GET /api/v1/public/company
///
/// Site settings as a `{ key: value }` object.
pub async fn company(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings: BTreeMap<String, serde_json::Value> = SettingRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect();
    Ok(Json(DataResponse { data: settings }))
}

/// POST /api/v1/public/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateContactMessage>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::create(&state.pool, &input).await?;

    tracing::info!(message_id = message.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContactReceipt {
                id: message.id,
                received_at: message.created_at,
            },
        }),
    ))
}
