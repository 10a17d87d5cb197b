use fnv::FnvHashSet;
use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::entity::storage::AsStorage;
use crate::entity::view::{Bind, ClosedView};

pub enum Breadth {}
pub enum Depth {}

pub trait Order<T>
where
    T: Adjacency,
{
    type Buffer: Buffer<T::Key>;
}

impl<T> Order<T> for Breadth
where
    T: Adjacency,
{
    type Buffer = VecDeque<T::Key>;
}

impl<T> Order<T> for Depth
where
    T: Adjacency,
{
    type Buffer = Vec<T::Key>;
}

pub trait Adjacency: ClosedView {
    type Output: IntoIterator<Item = Self::Key>;

    fn adjacency(&self) -> Self::Output;
}

pub trait Buffer<T>: Default + Extend<T> {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
}

impl<T> Buffer<T> for Vec<T> {
    fn push(&mut self, item: T) {
        Vec::<T>::push(self, item)
    }

    fn pop(&mut self) -> Option<T> {
        Vec::<T>::pop(self)
    }
}

impl<T> Buffer<T> for VecDeque<T> {
    fn push(&mut self, item: T) {
        VecDeque::<T>::push_back(self, item)
    }

    fn pop(&mut self) -> Option<T> {
        VecDeque::<T>::pop_front(self)
    }
}

/// Traversal over the entities reachable from an initial entity.
///
/// Each reachable entity is visited exactly once. Breadcrumbs are owned by
/// the traversal, so traversals are independent and can be restarted.
pub struct Traversal<'a, M, T, R = Depth>
where
    M: AsStorage<T::Entity>,
    T: Adjacency,
    R: Order<T>,
{
    storage: &'a M,
    breadcrumbs: FnvHashSet<T::Key>,
    buffer: R::Buffer,
    phantom: PhantomData<fn() -> T>,
}

impl<'a, M, T, R> Traversal<'a, M, T, R>
where
    M: AsStorage<T::Entity>,
    T: Adjacency,
    R: Order<T>,
{
    pub fn new(storage: &'a M, key: T::Key) -> Self {
        let capacity = storage.as_storage().len();
        let mut buffer = R::Buffer::default();
        buffer.push(key);
        Traversal {
            storage,
            breadcrumbs: FnvHashSet::with_capacity_and_hasher(capacity, Default::default()),
            buffer,
            phantom: PhantomData,
        }
    }
}

impl<'a, M, T, R> Clone for Traversal<'a, M, T, R>
where
    M: AsStorage<T::Entity>,
    T: Adjacency,
    R: Order<T>,
    R::Buffer: Clone,
{
    fn clone(&self) -> Self {
        Traversal {
            storage: self.storage,
            breadcrumbs: self.breadcrumbs.clone(),
            buffer: self.buffer.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'a, M, T, R> Iterator for Traversal<'a, M, T, R>
where
    M: 'a + AsStorage<T::Entity>,
    T: Adjacency + Bind<'a, M>,
    R: Order<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.buffer.pop() {
            if let Some(view) = T::bind(self.storage, key) {
                if self.breadcrumbs.insert(view.key()) {
                    self.buffer.extend(view.adjacency());
                    return Some(view);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            0,
            Some(AsStorage::<T::Entity>::as_storage(&self.storage).len()),
        )
    }
}
