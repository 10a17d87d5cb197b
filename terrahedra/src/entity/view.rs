use std::ops::Deref;

use crate::entity::storage::{AsStorage, OpaqueKey};
use crate::entity::Entity;

pub trait ClosedView {
    type Key: OpaqueKey;
    type Entity: Entity<Key = Self::Key>;

    fn key(&self) -> Self::Key;
}

pub trait Bind<'a, M>: ClosedView + Sized
where
    M: 'a,
{
    fn bind(storage: &'a M, key: Self::Key) -> Option<Self>;
}

impl<'a, M, T> Bind<'a, M> for T
where
    M: 'a + AsStorage<T::Entity>,
    T: ClosedView + From<View<'a, M, <T as ClosedView>::Entity>>,
{
    fn bind(storage: &'a M, key: Self::Key) -> Option<Self> {
        View::bind(storage, key).map(T::from)
    }
}

/// Immutable binding of storage and a key.
///
/// A view can only be constructed for a key that is present in storage, so
/// the entity is resolved once when the view is bound.
pub struct View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
    storage: &'a M,
    key: E::Key,
    entity: &'a E,
}

impl<'a, M, E> View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
    pub fn bind(storage: &'a M, key: E::Key) -> Option<Self> {
        storage
            .as_storage()
            .get(&key)
            .map(|entity| View {
                storage,
                key,
                entity,
            })
    }

    pub fn key(&self) -> E::Key {
        self.key
    }

    pub fn storage(&self) -> &'a M {
        self.storage
    }

    pub fn entity(&self) -> &'a E {
        self.entity
    }
}

impl<'a, M, E> Clone for View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M, E> ClosedView for View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
    type Key = E::Key;
    type Entity = E;

    fn key(&self) -> Self::Key {
        self.key
    }
}

impl<'a, M, E> Copy for View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
}

impl<'a, M, E> Deref for View<'a, M, E>
where
    M: AsStorage<E>,
    E: Entity,
{
    type Target = E;

    fn deref(&self) -> &Self::Target {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::storage::tests::Node;
    use crate::entity::storage::{GraphId, SlotStorage};
    use crate::entity::view::View;

    #[test]
    fn bind_present_keys_only() {
        let mut storage = SlotStorage::<Node>::new(GraphId::unique());
        let key = storage.insert(Node(7));
        let view = View::bind(&storage, key).unwrap();

        assert_eq!(7, view.0);
        assert_eq!(key, view.key());

        let mut storage = storage;
        storage.remove(&key);
        assert!(View::bind(&storage, key).is_none());
    }
}
