//! Load-or-create helper
//!
//! Stats rows (`UserFavStats`, `UserDashStats`, `UserAchievements`,
//! `GlobalStats`) have no creation event of their own. The first event that
//! references a user or the platform creates them. [`Loaded`] tells the caller
//! which case happened, so side effects that must run exactly once (the global
//! user count) can key off [`Loaded::Created`].

use tally_core::{EntityStore, Record, Result};

/// Result of a load-or-create lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    /// The entity already existed
    Found(T),
    /// The entity was absent; this is a fresh zero-valued instance
    Created(T),
}

impl<T> Loaded<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Loaded::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Loaded::Found(inner) | Loaded::Created(inner) => inner,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Loaded::Found(inner) | Loaded::Created(inner) => inner,
        }
    }
}

/// Load `key` from `store`, or build a blank entity if it is absent
///
/// Never fails for a missing entity; only store errors propagate. Nothing is
/// written: callers persist the entity themselves.
pub fn load_or_create<T, S>(store: &S, key: &str) -> Result<Loaded<T>>
where
    T: Record,
    S: EntityStore + ?Sized,
{
    match store.load(T::KIND, key)? {
        Some(entity) => Ok(Loaded::Found(T::from_entity(entity)?)),
        None => Ok(Loaded::Created(T::blank(key))),
    }
}
