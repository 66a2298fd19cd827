//! Route definitions for `/admin/events` and `/admin/venues`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{events, venues};
use crate::state::AppState;

/// Routes mounted at `/admin/events`.
///
/// ```text
/// GET    /        -> list (?show_id, ?venue_id, ?status, ?from, ?to)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list).post(events::create))
        .route(
            "/{id}",
            get(events::get).put(events::update).delete(events::delete),
        )
}

/// Routes mounted at `/admin/venues`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete (400 while events reference it)
/// ```
pub fn venues_router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list).post(venues::create))
        .route(
            "/{id}",
            get(venues::get).put(venues::update).delete(venues::delete),
        )
}
