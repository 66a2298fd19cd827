//! Route definitions for account administration under `/admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{invitations, settings, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /users                       -> users::list
/// GET    /users/{id}                  -> users::get
/// PUT    /users/{id}                  -> users::update
/// DELETE /users/{id}                  -> users::deactivate
/// POST   /users/{id}/reset-password   -> users::reset_password
///
/// GET    /invitations                 -> invitations::list
/// POST   /invitations                 -> invitations::create
/// DELETE /invitations/{id}            -> invitations::revoke
///
/// GET    /settings                    -> settings::list
/// GET    /settings/{key}              -> settings::get
/// PUT    /settings/{key}              -> settings::put
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route(
            "/users/{id}",
            get(users::get).put(users::update).delete(users::deactivate),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route(
            "/invitations",
            get(invitations::list).post(invitations::create),
        )
        .route(
            "/invitations/{id}",
            axum::routing::delete(invitations::revoke),
        )
        .route("/settings", get(settings::list))
        .route("/settings/{key}", get(settings::get).put(settings::put))
}
