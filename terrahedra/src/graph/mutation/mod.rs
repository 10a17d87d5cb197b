//! Insertion and removal of entities.
//!
//! These functions are the only code that mutates a [`Core`]. Each one leaves
//! the arenas, the geometric caches, and the adjacency lists of all incident
//! entities in agreement with one another.
//!
//! Insertions are idempotent with respect to geometry: inserting an entity
//! whose geometric key is already cached yields the cached key and does not
//! modify the graph. Removals cascade from vertices to edges to faces.
//!
//! [`Core`]: crate::graph::core::Core

pub mod edge;
pub mod face;
pub mod vertex;
