//! **Terrahedra** is a library for triangle mesh topology.
//!
//! A [`MeshGraph`] ingests triangle soup, deduplicates its geometry into a
//! connected graph of vertices, edges, and faces, maintains adjacency as the
//! graph is mutated, and regenerates flat renderable buffers from it. Derived
//! graphs, such as inverted (inside-out) copies and face-adjacency (dual)
//! graphs, can be built from any graph.
//!
//! Please note that versions in the `0.0.*` series are experimental and
//! unstable! Use exact version constraints when specifying a dependency to
//! avoid spurious breakage.
//!
//! # Examples
//!
//! Building a graph from raw buffers and regenerating a faceted mesh:
//!
//! ```rust
//! use terrahedra::buffer::{BuildParams, MeshBuffer};
//! use terrahedra::graph::MeshGraph;
//! use terrahedra::prelude::*;
//!
//! let graph = MeshGraph::from_raw_buffers(
//!     vec![0u32, 1, 2],
//!     vec![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//! )
//! .unwrap();
//! let buffer: MeshBuffer<u32> = graph
//!     .mesh_builder()
//!     .with_params(BuildParams::faceted())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(&[0, 1, 2], buffer.as_index_slice());
//! ```
//!
//! [`MeshGraph`]: crate::graph::MeshGraph
#![allow(unknown_lints)] // Allow clippy lints.

pub mod buffer;
pub mod entity;
pub mod geometry;
pub mod graph;
pub mod primitive;

pub mod prelude {
    //! Re-exports commonly used types and traits.
    //!
    //! Importing the contents of this module is recommended when building
    //! graphs from raw buffers and when working with iterator expressions.

    pub use crate::buffer::FromRawBuffers as _;
    pub use crate::IteratorExt as _;
}

/// Extension methods for types implementing `Iterator`.
pub trait IteratorExt: Iterator + Sized {
    /// Provides an iterator over a window of duplets that includes the first
    /// value in the sequence at the beginning and end of the iteration.
    ///
    /// Given a collection of ordered elements $\\{a, b, c\\}$, this iterator
    /// yeilds the ordered items $\\{(a, b), (b, c), (c, a)\\}$.
    fn perimeter(self) -> Perimeter<Self>
    where
        Self::Item: Clone;
}

impl<I> IteratorExt for I
where
    I: Iterator,
{
    fn perimeter(self) -> Perimeter<I>
    where
        I::Item: Clone,
    {
        Perimeter::new(self)
    }
}

/// Iterator that produces a window of duplets over its input.
///
/// The duplets produced include the first value in the input sequence at both
/// the beginning and end of the iteration, forming a perimeter. Given a
/// collection of ordered elements $\\{a, b, c\\}$, this iterator yields the
/// ordered items $\\{(a, b), (b, c), (c, a)\\}$.
#[derive(Clone)]
pub struct Perimeter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    input: I,
    first: Option<I::Item>,
    previous: Option<I::Item>,
}

impl<I> Perimeter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn new(mut input: I) -> Self {
        let first = input.next();
        let previous = first.clone();
        Perimeter {
            input,
            first,
            previous,
        }
    }
}

impl<I> Iterator for Perimeter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.input.next();
        match (self.previous.clone(), next.or_else(|| self.first.take())) {
            (Some(a), Some(b)) => {
                self.previous = Some(b.clone());
                Some((a, b))
            }
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.input.size_hint();
        let extra = usize::from(self.first.is_some());
        (lower + extra, upper.map(|upper| upper + extra))
    }
}
