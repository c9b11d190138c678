//! `cookgenie-core` — shared domain building blocks.
//!
//! Pure primitives only: identifiers, the domain error model, and the clock
//! used to resolve "today". No HTTP, no storage.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod patch;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, ProfileId};
