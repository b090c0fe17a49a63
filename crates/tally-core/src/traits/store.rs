use crate::error::{Result, TallyError};
use crate::types::{Entity, EntityKind, EventId, Record};

/// Entity store: keyed storage for the read model
///
/// Provides:
/// - Keyed load of one entity by `(kind, key)`
/// - Atomic commit of every entity one event touched, plus the cursor
/// - Cursor tracking (last applied event ID) so a driver can resume
///
/// There is no delete: the read model is append/update-only.
///
/// Implementations assume a single writer. The cursor is bookkeeping for the
/// event source; the store does not reject re-delivered events.
pub trait EntityStore: Send + Sync {
    /// Load an entity, `None` if it was never saved
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Entity>>;

    /// Persist all `entities` atomically and, if given, advance the cursor
    ///
    /// Either every entity and the cursor are written or none are.
    fn commit(&self, entities: Vec<Entity>, cursor: Option<EventId>) -> Result<()>;

    /// Persist a single entity without touching the cursor
    fn save(&self, entity: Entity) -> Result<()> {
        self.commit(vec![entity], None)
    }

    /// Last applied event ID, `None` if nothing has been applied
    fn cursor(&self) -> Result<Option<EventId>>;

    /// All entities of one kind, ordered by key
    fn list(&self, kind: EntityKind) -> Result<Vec<Entity>>;

    /// Typed load
    fn get<T: Record>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        self.load(T::KIND, key)?.map(T::from_entity).transpose()
    }

    /// Typed load that fails when the entity is absent
    fn require<T: Record>(&self, key: &str) -> Result<T>
    where
        Self: Sized,
    {
        self.get(key)?
            .ok_or_else(|| TallyError::missing(T::KIND, key))
    }

    /// Typed list
    fn list_as<T: Record>(&self) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        self.list(T::KIND)?
            .into_iter()
            .map(T::from_entity)
            .collect()
    }
}

impl<S: EntityStore + ?Sized> EntityStore for std::sync::Arc<S> {
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Entity>> {
        (**self).load(kind, key)
    }

    fn commit(&self, entities: Vec<Entity>, cursor: Option<EventId>) -> Result<()> {
        (**self).commit(entities, cursor)
    }

    fn cursor(&self) -> Result<Option<EventId>> {
        (**self).cursor()
    }

    fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        (**self).list(kind)
    }
}
