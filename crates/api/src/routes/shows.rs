//! Route definitions for `/admin/shows` and the nested photo gallery.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{gallery, shows};
use crate::state::AppState;

/// Routes mounted at `/admin/shows`.
///
/// ```text
/// GET    /                               -> shows::list (?status, ?search)
/// POST   /                               -> shows::create
/// GET    /{id}                           -> shows::get
/// PUT    /{id}                           -> shows::update
/// DELETE /{id}                           -> shows::delete
///
/// GET    /{id}/gallery                   -> gallery::list
/// POST   /{id}/gallery                   -> gallery::create
/// PUT    /{id}/gallery/reorder           -> gallery::reorder
/// PUT    /{id}/gallery/{photo_id}        -> gallery::update
/// DELETE /{id}/gallery/{photo_id}        -> gallery::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shows::list).post(shows::create))
        .route(
            "/{id}",
            get(shows::get).put(shows::update).delete(shows::delete),
        )
        .route("/{id}/gallery", get(gallery::list).post(gallery::create))
        .route("/{id}/gallery/reorder", put(gallery::reorder))
        .route(
            "/{id}/gallery/{photo_id}",
            put(gallery::update).delete(gallery::delete),
        )
}
