//! Entities, their keys, and the storage that owns them.
//!
//! Entities are stored in arenas keyed by opaque, generational keys. Keys are
//! tagged with the [`GraphId`] of the storage that issued them, so a key is
//! only ever accepted by the graph that created its entity. Removing an entity
//! invalidates its key: later lookups fail as if the key belonged to another
//! graph.
//!
//! [`GraphId`]: crate::entity::storage::GraphId

pub mod storage;
pub mod traverse;
pub mod view;

use thiserror::Error;

use crate::entity::storage::OpaqueKey;

#[derive(Debug, Error, PartialEq)]
pub enum EntityError {
    #[error("required entity not found")]
    EntityNotFound,
    #[error("key issued by another graph")]
    ForeignKey,
}

pub trait Entity: Sized + 'static {
    type Key: OpaqueKey;
}
