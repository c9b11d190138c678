//! Identity for records the stores key by.

/// A record with a stable identifier (inventory items, profiles).
///
/// Stores use `id()` as the map key, so the identifier must never change after
/// the record is created.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Owning profile, used to scope reads and writes.
    fn profile_id(&self) -> crate::ProfileId;
}
