//! Route definitions for press releases and press articles.

use axum::routing::get;
use axum::Router;

use crate::handlers::press;
use crate::state::AppState;

/// Routes mounted at `/admin/press-releases`.
///
/// ```text
/// GET    /        -> list_releases
/// POST   /        -> create_release
/// GET    /{id}    -> get_release
/// PUT    /{id}    -> update_release
/// DELETE /{id}    -> delete_release
/// ```
pub fn releases_router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_releases).post(press::create_release))
        .route(
            "/{id}",
            get(press::get_release)
                .put(press::update_release)
                .delete(press::delete_release),
        )
}

/// Routes mounted at `/admin/press-articles`.
///
/// ```text
/// GET    /        -> list_articles
/// POST   /        -> create_article
/// GET    /{id}    -> get_article
/// PUT    /{id}    -> update_article
/// DELETE /{id}    -> delete_article
/// ```
pub fn articles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_articles).post(press::create_article))
        .route(
            "/{id}",
            get(press::get_article)
                .put(press::update_article)
                .delete(press::delete_article),
        )
}
