//! Roster of expedition members backed by a JSON file.

mod store;
mod types;

pub use store::{Store, DEFAULT_DATA_FILE};
pub use types::{Member, RoleSet, DEFAULT_ROLES};
