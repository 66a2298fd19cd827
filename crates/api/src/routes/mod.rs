pub mod admin;
pub mod auth;
pub mod contact_messages;
pub mod health;
pub mod media;
pub mod ordered;
pub mod press;
pub mod public;
pub mod schedule;
pub mod shows;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/shows                                   published shows (no auth)
/// /public/shows/{slug}                            show detail with gallery and dates
/// /public/agenda                                  upcoming performances
/// /public/press                                   press releases and articles
/// /public/press/{slug}                            press release detail
/// /public/team                                    active team members
/// /public/partners                                active partners
/// /public/hero-slides                             active home page slides
/// /public/company                                 company settings
/// /public/contact                                 contact form (POST)
///
/// /auth/login                                     login
/// /auth/refresh                                   refresh
/// /auth/logout                                    logout (requires auth)
/// /auth/me                                        current user (requires auth)
/// /auth/invitations/accept                        redeem an invitation
///
/// /admin/shows                                    list, create (editor)
/// /admin/shows/{id}                               get, update, delete
/// /admin/shows/{id}/gallery                       list, add photo
/// /admin/shows/{id}/gallery/reorder               reorder (PUT)
/// /admin/shows/{id}/gallery/{photo_id}            update, delete
/// /admin/events                                   list, create
/// /admin/events/{id}                              get, update, delete
/// /admin/venues                                   list, create
/// /admin/venues/{id}                              get, update, delete
/// /admin/team-members                             list, create
/// /admin/team-members/reorder                     reorder (PUT)
/// /admin/team-members/{id}                        get, update, delete (admin)
/// /admin/team-members/{id}/activate               activate (POST)
/// /admin/team-members/{id}/deactivate             deactivate (POST)
/// /admin/partners                                 list, create
/// /admin/partners/reorder                         reorder (PUT)
/// /admin/partners/{id}                            get, update, delete
/// /admin/hero-slides                              list, create
/// /admin/hero-slides/reorder                      reorder (PUT)
/// /admin/hero-slides/{id}                         get, update, delete
/// /admin/media                                    list, upload (multipart)
/// /admin/media/{id}                               get, update, delete
/// /admin/media-folders                            list, create
/// /admin/media-folders/{id}                       rename, delete
/// /admin/press-releases                           list, create
/// /admin/press-releases/{id}                      get, update, delete
/// /admin/press-articles                           list, create
/// /admin/press-articles/{id}                      get, update, delete
/// /admin/contact-messages                         list
/// /admin/contact-messages/unread-count            unread badge
/// /admin/contact-messages/{id}                    get, delete
/// /admin/contact-messages/{id}/read               mark read (POST)
/// /admin/contact-messages/{id}/unread             mark unread (POST)
///
/// /admin/users                                    list (admin only)
/// /admin/users/{id}                               get, update, deactivate
/// /admin/users/{id}/reset-password                reset password
/// /admin/invitations                              list, invite
/// /admin/invitations/{id}                         revoke
/// /admin/settings                                 list
/// /admin/settings/{key}                           get, put
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public site content, no authentication.
        .nest("/public", public::router())
        // Authentication and invitation acceptance.
        .nest("/auth", auth::router())
        // Content management (editor or admin).
        .nest("/admin/shows", shows::router())
        .nest("/admin/events", schedule::events_router())
        .nest("/admin/venues", schedule::venues_router())
        .nest("/admin/team-members", ordered::team_members_router())
        .nest("/admin/partners", ordered::partners_router())
        .nest("/admin/hero-slides", ordered::hero_slides_router())
        .nest("/admin/media", media::media_router())
        .nest("/admin/media-folders", media::folders_router())
        .nest("/admin/press-releases", press::releases_router())
        .nest("/admin/press-articles", press::articles_router())
        .nest("/admin/contact-messages", contact_messages::router())
        // Accounts, invitations and settings (admin only).
        .nest("/admin", admin::router())
}
