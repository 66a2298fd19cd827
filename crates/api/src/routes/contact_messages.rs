//! Route definitions for the `/admin/contact-messages` inbox.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contact_messages;
use crate::state::AppState;

/// Routes mounted at `/admin/contact-messages`.
///
/// ```text
/// GET    /               -> list (?unread_only, ?limit, ?offset)
/// GET    /unread-count   -> unread_count
/// GET    /{id}           -> get
/// DELETE /{id}           -> delete
/// POST   /{id}/read      -> mark_read
/// POST   /{id}/unread    -> mark_unread
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact_messages::list))
        .route("/unread-count", get(contact_messages::unread_count))
        .route(
            "/{id}",
            get(contact_messages::get).delete(contact_messages::delete),
        )
        .route("/{id}/read", post(contact_messages::mark_read))
        .route("/{id}/unread", post(contact_messages::mark_unread))
}
