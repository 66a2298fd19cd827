//! Footlights API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes, media storage, mail and cache invalidation) so integration tests
//! and the binary entrypoint share them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mailer;
pub mod media_store;
pub mod middleware;
pub mod query;
pub mod response;
pub mod revalidate;
pub mod router;
pub mod routes;
pub mod state;
