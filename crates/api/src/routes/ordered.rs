//! Route definitions for the manually ordered collections: team members,
//! partners and hero slides.
//!
//! The static `/reorder` path is registered next to `/{id}`; the router
//! prefers the static segment.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{hero_slides, partners, team_members};
use crate::state::AppState;

/// Routes mounted at `/admin/team-members`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// PUT    /reorder           -> reorder
/// GET    /{id}              -> get
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete (admin only, member must be inactive)
/// POST   /{id}/activate     -> activate
/// POST   /{id}/deactivate   -> deactivate
/// ```
pub fn team_members_router() -> Router<AppState> {
    Router::new()
        .route("/", get(team_members::list).post(team_members::create))
        .route("/reorder", put(team_members::reorder))
        .route(
            "/{id}",
            get(team_members::get)
                .put(team_members::update)
                .delete(team_members::delete),
        )
        .route("/{id}/activate", post(team_members::activate))
        .route("/{id}/deactivate", post(team_members::deactivate))
}

/// Routes mounted at `/admin/partners`.
///
/// ```text
/// GET    /           -> list
/// POST   /           -> create
/// PUT    /reorder    -> reorder
/// GET    /{id}       -> get
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// ```
pub fn partners_router() -> Router<AppState> {
    Router::new()
        .route("/", get(partners::list).post(partners::create))
        .route("/reorder", put(partners::reorder))
        .route(
            "/{id}",
            get(partners::get)
                .put(partners::update)
                .delete(partners::delete),
        )
}

/// Routes mounted at `/admin/hero-slides`.
///
/// ```text
/// GET    /           -> list
/// POST   /           -> create
/// PUT    /reorder    -> reorder
/// GET    /{id}       -> get
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// ```
pub fn hero_slides_router() -> Router<AppState> {
    Router::new()
        .route("/", get(hero_slides::list).post(hero_slides::create))
        .route("/reorder", put(hero_slides::reorder))
        .route(
            "/{id}",
            get(hero_slides::get)
                .put(hero_slides::update)
                .delete(hero_slides::delete),
        )
}
