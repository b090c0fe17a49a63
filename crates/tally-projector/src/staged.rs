//! Staged writes for one event
//!
//! `StagedWrites` collects every entity an event handler touches and hands
//! them back as one batch for [`EntityStore::commit`]. Reads go through the
//! staged entities first, then the store, so a handler that touches the same
//! row twice (e.g. `GlobalStats` on a first join) sees its own earlier write.
//!
//! If the handler fails the staged writes are simply dropped; the store never
//! sees a partially applied event.

use crate::loaded::{self, Loaded};
use std::collections::{HashMap, HashSet};
use tally_core::{observe, Entity, EntityKind, EntityStore, Record, Result, TallyError};

type Slot = (EntityKind, String);

/// Read-through overlay over an [`EntityStore`]
pub struct StagedWrites<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    staged: HashMap<Slot, Entity>,
    /// Slots in first-write order
    order: Vec<Slot>,
    created: HashSet<Slot>,
}

impl<'a, S: EntityStore + ?Sized> StagedWrites<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            staged: HashMap::new(),
            order: Vec::new(),
            created: HashSet::new(),
        }
    }

    fn lookup<T: Record>(&self, key: &str) -> Result<Option<T>> {
        match self.staged.get(&(T::KIND, key.to_string())) {
            Some(entity) => T::from_entity(entity.clone()).map(Some),
            None => self.store.load(T::KIND, key)?.map(T::from_entity).transpose(),
        }
    }

    fn note_created(&mut self, kind: EntityKind, key: &str) {
        tracing::info!("New {} entity created: {}", kind, key);
        observe::record_entity_created(kind.as_str());
        self.created.insert((kind, key.to_string()));
    }

    /// Load an entity, or a blank one if neither staged nor stored
    pub fn load_or_create<T: Record>(&mut self, key: &str) -> Result<Loaded<T>> {
        if let Some(entity) = self.staged.get(&(T::KIND, key.to_string())) {
            return Ok(Loaded::Found(T::from_entity(entity.clone())?));
        }

        let loaded = loaded::load_or_create::<T, S>(self.store, key)?;
        if loaded.was_created() {
            self.note_created(T::KIND, key);
        }
        Ok(loaded)
    }

    /// Load an entity that an earlier event must have created
    pub fn require<T: Record>(&self, key: &str) -> Result<T> {
        self.lookup::<T>(key)?
            .ok_or_else(|| TallyError::missing(T::KIND, key))
    }

    /// Stage a new entity, replacing any previous row with the same key
    ///
    /// Only counts as a creation when no row with that key exists yet.
    pub fn create<T: Record>(&mut self, record: T) -> Result<()> {
        if self.lookup::<T>(record.key())?.is_none() {
            self.note_created(T::KIND, record.key());
        }
        self.put(record);
        Ok(())
    }

    /// Stage an entity for commit
    pub fn put<T: Record>(&mut self, record: T) {
        let slot = (T::KIND, record.key().to_string());
        if !self.staged.contains_key(&slot) {
            self.order.push(slot.clone());
        }
        self.staged.insert(slot, record.into_entity());
    }

    /// Mutate an existing entity and stage it; fails if it does not exist
    pub fn modify<T, F>(&mut self, key: &str, mutate: F) -> Result<()>
    where
        T: Record,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let mut record = self.require::<T>(key)?;
        mutate(&mut record)?;
        self.put(record);
        Ok(())
    }

    /// Mutate an entity, creating it first if needed, and stage it
    ///
    /// Returns `true` when the entity was created by this call.
    pub fn upsert<T, F>(&mut self, key: &str, mutate: F) -> Result<bool>
    where
        T: Record,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let loaded = self.load_or_create::<T>(key)?;
        let created = loaded.was_created();
        let mut record = loaded.into_inner();
        mutate(&mut record)?;
        self.put(record);
        Ok(created)
    }

    /// Number of distinct entities staged so far
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of entities created (rather than updated) by this event
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    /// Consume the overlay, yielding staged entities in first-write order
    pub fn into_writes(mut self) -> Vec<Entity> {
        self.order
            .iter()
            .filter_map(|slot| self.staged.remove(slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{bump, Bet, GlobalStats, MemoryStore, GLOBAL_STATS_KEY};

    #[test]
    fn test_reads_see_staged_writes() {
        let store = MemoryStore::new();
        let mut staged = StagedWrites::new(&store);

        let created = staged
            .upsert::<GlobalStats, _>(GLOBAL_STATS_KEY, |g| bump(&mut g.users))
            .unwrap();
        assert!(created);

        let created_again = staged
            .upsert::<GlobalStats, _>(GLOBAL_STATS_KEY, |g| bump(&mut g.users))
            .unwrap();
        assert!(!created_again);

        assert_eq!(staged.len(), 1);
        assert_eq!(staged.created_count(), 1);

        let writes = staged.into_writes();
        let stats = GlobalStats::from_entity(writes[0].clone()).unwrap();
        assert_eq!(stats.users, 2);
        // nothing reached the store
        assert!(store.is_empty());
    }

    #[test]
    fn test_modify_missing_fails() {
        let store = MemoryStore::new();
        let mut staged = StagedWrites::new(&store);

        let err = staged
            .modify::<Bet, _>("0x9", |bet| {
                bet.no_more_bets = true;
                Ok(())
            })
            .unwrap_err();

        assert!(err.is_missing_entity());
        assert!(staged.is_empty());
    }

    #[test]
    fn test_write_order_is_first_touch_order() {
        let store = MemoryStore::new();
        let mut staged = StagedWrites::new(&store);

        staged.create(Bet::blank("0x2")).unwrap();
        staged.create(Bet::blank("0x1")).unwrap();
        staged
            .modify::<Bet, _>("0x2", |bet| {
                bet.finished = true;
                Ok(())
            })
            .unwrap();

        let keys: Vec<_> = staged
            .into_writes()
            .iter()
            .map(|e| e.key().to_string())
            .collect();
        assert_eq!(keys, vec!["0x2", "0x1"]);
    }

    #[test]
    fn test_create_over_existing_row_is_an_update() {
        let store = MemoryStore::new();
        store.save(Bet::blank("0x1").into()).unwrap();

        let mut staged = StagedWrites::new(&store);
        staged
            .create(Bet {
                description: "replaced".into(),
                ..Bet::blank("0x1")
            })
            .unwrap();
        staged.create(Bet::blank("0x2")).unwrap();
        // second create of a staged row is not a new creation either
        staged.create(Bet::blank("0x2")).unwrap();

        assert_eq!(staged.len(), 2);
        assert_eq!(staged.created_count(), 1);
    }
}
