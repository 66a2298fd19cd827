//! Domain logic for the Footlights theater site: error taxonomy, id types,
//! roles, ordering, slugs and per-entity rules. No I/O lives here.

pub mod error;
pub mod invitation;
pub mod media;
pub mod ordering;
pub mod roles;
pub mod schedule;
pub mod settings;
pub mod slug;
pub mod team;
pub mod types;
pub mod validation;
