//! `cookgenie-infra` — storage adapters.
//!
//! Only an in-memory, profile-scoped store lives here. Durable persistence is
//! owned by whichever backend the service is deployed against.

pub mod read_model;

pub use read_model::{InMemoryProfileStore, ProfileStore};
