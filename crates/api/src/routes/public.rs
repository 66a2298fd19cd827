//! Route definitions for the unauthenticated `/public` site API.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET  /shows          -> list_shows
/// GET  /shows/{slug}   -> get_show
/// GET  /agenda         -> agenda (?from, ?limit)
/// GET  /press          -> press
/// GET  /press/{slug}   -> get_press_release
/// GET  /team           -> team
/// GET  /partners       -> partners
/// GET  /hero-slides    -> hero_slides
/// GET  /company        -> company
/// POST /contact        -> submit_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shows", get(public::list_shows))
        .route("/shows/{slug}", get(public::get_show))
        .route("/agenda", get(public::agenda))
        .route("/press", get(public::press))
        .route("/press/{slug}", get(public::get_press_release))
        .route("/team", get(public::team))
        .route("/partners", get(public::partners))
        .route("/hero-slides", get(public::hero_slides))
        .route("/company", get(public::company))
        .route("/contact", post(public::submit_contact))
}
