//! HTTP handlers, one module per resource.
//!
//! Admin handlers take a role extractor ([`crate::middleware::rbac`]) before
//! any path, query or body extractor, so the role check always runs first.

pub mod auth;
pub mod contact_messages;
pub mod events;
pub mod gallery;
pub mod hero_slides;
pub mod invitations;
pub mod media;
pub mod media_folders;
pub mod partners;
pub mod press;
pub mod public;
pub mod settings;
pub mod shows;
pub mod team_members;
pub mod users;
pub mod venues;

use crate::state::AppState;

/// Tell the public front-end which listings changed.
///
/// Awaited inline; the invalidator logs its own failures and never errors.
pub(crate) async fn revalidate<I, T>(state: &AppState, tags: I)
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    state.invalidator.invalidate(tags).await;
}
