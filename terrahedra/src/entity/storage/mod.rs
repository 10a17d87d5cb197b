mod slot;

use slotmap::DefaultKey;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::entity::Entity;

pub use crate::entity::storage::slot::SlotStorage;

/// Identity of a graph.
///
/// Every graph is assigned a distinct identity when it is created. Keys carry
/// the identity of the graph that issued them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        GraphId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub trait OpaqueKey: Copy + Eq + Hash + Sized {
    fn from_inner(owner: GraphId, key: DefaultKey) -> Self;

    fn into_inner(self) -> DefaultKey;

    /// Gets the identity of the graph that issued the key.
    fn owner(&self) -> GraphId;
}

pub trait AsStorage<E>
where
    E: Entity,
{
    fn as_storage(&self) -> &SlotStorage<E>;
}

impl<'a, E, T> AsStorage<E> for &'a T
where
    E: Entity,
    T: AsStorage<E> + ?Sized,
{
    fn as_storage(&self) -> &SlotStorage<E> {
        <T as AsStorage<E>>::as_storage(self)
    }
}
