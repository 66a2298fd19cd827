//! Route definitions for the media library.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{media, media_folders};
use crate::state::AppState;

/// Routes mounted at `/admin/media`.
///
/// ```text
/// GET    /        -> list (?folder_id, ?tag, ?mime)
/// POST   /        -> upload (multipart)
/// GET    /{id}    -> get
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn media_router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list).post(media::upload))
        .route(
            "/{id}",
            get(media::get).put(media::update).delete(media::delete),
        )
}

/// Routes mounted at `/admin/media-folders`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> rename
/// DELETE /{id}    -> delete
/// ```
pub fn folders_router() -> Router<AppState> {
    Router::new()
        .route("/", get(media_folders::list).post(media_folders::create))
        .route(
            "/{id}",
            put(media_folders::rename).delete(media_folders::delete),
        )
}
