use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use cookgenie_core::{Entity, ProfileId};

/// Profile-isolated record store.
///
/// Every read and write is scoped by the owning profile: a record stored under
/// one profile is invisible to every other profile.
pub trait ProfileStore<V: Entity>: Send + Sync {
    fn get(&self, profile_id: ProfileId, id: &V::Id) -> Option<V>;

    /// Look a record up by id alone, whatever profile owns it.
    fn find(&self, id: &V::Id) -> Option<V>;

    fn upsert(&self, value: V);

    /// Remove a record. Returns the removed value, if any.
    fn remove(&self, profile_id: ProfileId, id: &V::Id) -> Option<V>;

    /// All records of a profile, oldest id first.
    fn list(&self, profile_id: ProfileId) -> Vec<V>;

    /// Every record across all profiles, oldest id first.
    fn all(&self) -> Vec<V>;
}

impl<V, S> ProfileStore<V> for Arc<S>
where
    V: Entity,
    S: ProfileStore<V> + ?Sized,
{
    fn get(&self, profile_id: ProfileId, id: &V::Id) -> Option<V> {
        (**self).get(profile_id, id)
    }

    fn find(&self, id: &V::Id) -> Option<V> {
        (**self).find(id)
    }

    fn upsert(&self, value: V) {
        (**self).upsert(value)
    }

    fn remove(&self, profile_id: ProfileId, id: &V::Id) -> Option<V> {
        (**self).remove(profile_id, id)
    }

    fn list(&self, profile_id: ProfileId) -> Vec<V> {
        (**self).list(profile_id)
    }

    fn all(&self) -> Vec<V> {
        (**self).all()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryProfileStore<V: Entity> {
    inner: RwLock<HashMap<V::Id, V>>,
}

impl<V: Entity> InMemoryProfileStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Entity> Default for InMemoryProfileStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ProfileStore<V> for InMemoryProfileStore<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Ord,
{
    fn get(&self, profile_id: ProfileId, id: &V::Id) -> Option<V> {
        self.find(id).filter(|v| v.profile_id() == profile_id)
    }

    fn find(&self, id: &V::Id) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn upsert(&self, value: V) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(*value.id(), value);
            }
            Err(_) => tracing::error!(id = ?value.id(), "profile store lock poisoned; write dropped"),
        }
    }

    fn remove(&self, profile_id: ProfileId, id: &V::Id) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        if map.get(id)?.profile_id() != profile_id {
            return None;
        }
        map.remove(id)
    }

    fn list(&self, profile_id: ProfileId) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut values: Vec<V> = map
            .values()
            .filter(|v| v.profile_id() == profile_id)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.id().cmp(b.id()));
        values
    }

    fn all(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut values: Vec<V> = map.values().cloned().collect();
        values.sort_by(|a, b| a.id().cmp(b.id()));
        values
    }
}
