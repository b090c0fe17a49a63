//! In-memory entity store
//!
//! Useful for tests and for embedders that rebuild the read model from the
//! event history on every start.

use crate::error::Result;
use crate::traits::EntityStore;
use crate::types::{Entity, EntityKind, EventId};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
struct Inner {
    entities: BTreeMap<(EntityKind, String), Entity>,
    cursor: Option<EventId>,
}

/// `BTreeMap`-backed [`EntityStore`]
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored entities across all kinds
    pub fn len(&self) -> usize {
        self.inner.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entity in `(kind, key)` order
    pub fn snapshot(&self) -> Vec<Entity> {
        self.inner.read().entities.values().cloned().collect()
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Entity>> {
        Ok(self
            .inner
            .read()
            .entities
            .get(&(kind, key.to_string()))
            .cloned())
    }

    fn commit(&self, entities: Vec<Entity>, cursor: Option<EventId>) -> Result<()> {
        let mut inner = self.inner.write();
        for entity in entities {
            inner
                .entities
                .insert((entity.kind(), entity.key().to_string()), entity);
        }
        if let Some(cursor) = cursor {
            inner.cursor = Some(cursor);
        }
        Ok(())
    }

    fn cursor(&self) -> Result<Option<EventId>> {
        Ok(self.inner.read().cursor)
    }

    fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        Ok(self
            .inner
            .read()
            .entities
            .range((kind, String::new())..)
            .take_while(|((k, _), _)| *k == kind)
            .map(|(_, entity)| entity.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bet, GlobalStats, Record, UserBet, GLOBAL_STATS_KEY};

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(EntityKind::Bet, "0x1").unwrap().is_none());
        assert!(store.get::<Bet>("0x1").unwrap().is_none());
        assert!(store.require::<Bet>("0x1").unwrap_err().is_missing_entity());
    }

    #[test]
    fn test_commit_and_cursor() {
        let store = MemoryStore::new();
        assert_eq!(store.cursor().unwrap(), None);

        store
            .commit(
                vec![
                    Bet::blank("0x1").into_entity(),
                    GlobalStats::blank(GLOBAL_STATS_KEY).into_entity(),
                ],
                Some(4),
            )
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.cursor().unwrap(), Some(4));

        // save() leaves the cursor alone
        store.save(Bet::blank("0x2").into_entity()).unwrap();
        assert_eq!(store.cursor().unwrap(), Some(4));
    }

    #[test]
    fn test_list_is_scoped_to_kind() {
        let store = MemoryStore::new();
        store
            .commit(
                vec![
                    Bet::blank("0x2").into_entity(),
                    Bet::blank("0x1").into_entity(),
                    UserBet::blank("0xaa-0x1").into_entity(),
                ],
                None,
            )
            .unwrap();

        let bets: Vec<Bet> = store.list_as().unwrap();
        let keys: Vec<_> = bets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(keys, vec!["0x1", "0x2"]);
        assert_eq!(store.list(EntityKind::UserBet).unwrap().len(), 1);
        assert!(store.list(EntityKind::Task).unwrap().is_empty());
    }
}
