//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! Ids are serialized as strings (see `footlights_core::types::id_string`).

pub mod contact_message;
pub mod event;
pub mod gallery_photo;
pub mod hero_slide;
pub mod invitation;
pub mod media;
pub mod partner;
pub mod press;
pub mod session;
pub mod setting;
pub mod show;
pub mod status;
pub mod team_member;
pub mod user;
pub mod venue;
