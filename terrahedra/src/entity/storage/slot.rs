use slotmap::{DefaultKey, SlotMap};

use crate::entity::storage::{AsStorage, GraphId, OpaqueKey};
use crate::entity::{Entity, EntityError};

/// Arena of entities owned by a single graph.
///
/// Lookups reject keys issued by other storage as well as keys of removed
/// entities.
pub struct SlotStorage<E>
where
    E: Entity,
{
    owner: GraphId,
    inner: SlotMap<DefaultKey, E>,
}

impl<E> SlotStorage<E>
where
    E: Entity,
{
    pub fn new(owner: GraphId) -> Self {
        SlotStorage {
            owner,
            inner: SlotMap::with_key(),
        }
    }

    pub fn owner(&self) -> GraphId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.try_get(key).ok()
    }

    pub fn get_mut(&mut self, key: &E::Key) -> Option<&mut E> {
        if key.owner() == self.owner {
            self.inner.get_mut(key.into_inner())
        }
        else {
            None
        }
    }

    pub fn try_get(&self, key: &E::Key) -> Result<&E, EntityError> {
        if key.owner() == self.owner {
            self.inner
                .get(key.into_inner())
                .ok_or(EntityError::EntityNotFound)
        }
        else {
            Err(EntityError::ForeignKey)
        }
    }

    pub fn insert(&mut self, entity: E) -> E::Key {
        E::Key::from_inner(self.owner, self.inner.insert(entity))
    }

    pub fn remove(&mut self, key: &E::Key) -> Option<E> {
        if key.owner() == self.owner {
            self.inner.remove(key.into_inner())
        }
        else {
            None
        }
    }

    pub fn iter(&self) -> impl Clone + Iterator<Item = (E::Key, &E)> {
        let owner = self.owner;
        self.inner
            .iter()
            .map(move |(key, entity)| (E::Key::from_inner(owner, key), entity))
    }

    pub fn keys(&self) -> impl Clone + Iterator<Item = E::Key> + '_ {
        self.iter().map(|(key, _)| key)
    }
}

impl<E> AsStorage<E> for SlotStorage<E>
where
    E: Entity,
{
    fn as_storage(&self) -> &SlotStorage<E> {
        self
    }
}
