//! Profile-scoped record storage.

pub mod profile_store;

pub use profile_store::{InMemoryProfileStore, ProfileStore};
