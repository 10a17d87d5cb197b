//! Graph representation of triangle meshes.
//!
//! This module provides [`MeshGraph`], which represents a triangle mesh as a
//! graph of deduplicated _vertices_, _edges_, and _faces_. Entities are
//! identified by geometry:
//!
//! | Entity | Identified by                                      |
//! |--------|----------------------------------------------------|
//! | Vertex | exact position                                     |
//! | Edge   | unordered pair of positions ([`Segment`])          |
//! | Face   | positions up to cyclic rotation ([`Triangle`])     |
//!
//! Inserting an entity whose geometry is already present in a graph yields the
//! existing entity. In particular, a face $(A, B, C)$ is the same face as
//! $(B, C, A)$ and $(C, A, B)$, but the reversed face $(A, C, B)$ is a distinct
//! face with the opposite normal.
//!
//! Inserting a face also inserts its three edges and registers the face with
//! its vertices and edges. Removals cascade: removing a vertex removes all
//! incident edges and faces and removing an edge removes all incident faces.
//!
//! # Keys and Ownership
//!
//! Entities are referred to by opaque keys. Keys are only accepted by the
//! graph that issued them: operations that take keys of another graph or keys
//! of removed entities fail with [`GraphError::OwnershipViolation`] or, for
//! removals, return `false`.
//!
//! # Views
//!
//! Queries return _views_, which bind a graph with the key of an entity.
//! Views expose derived geometry (normals, centers, areas, lengths) and
//! neighbor walks. Neighbor walks are iterators that yield each neighbor once
//! and can be restarted by calling the function again.
//!
//! # Examples
//!
//! ```rust
//! use terrahedra::geometry::Position;
//! use terrahedra::graph::MeshGraph;
//!
//! let mut graph = MeshGraph::new();
//! let a = graph.add_vertex(Position::new(0.0, 0.0, 0.0));
//! let b = graph.add_vertex(Position::new(1.0, 0.0, 0.0));
//! let c = graph.add_vertex(Position::new(0.0, 1.0, 0.0));
//!
//! let abc = graph.add_face(a, b, c).unwrap();
//! assert_eq!(abc, graph.add_face(b, c, a).unwrap());
//! assert_ne!(abc, graph.add_face(a, c, b).unwrap());
//! assert_eq!(3, graph.edge_count());
//! ```
//!
//! [`GraphError::OwnershipViolation`]: crate::graph::GraphError::OwnershipViolation
//! [`MeshGraph`]: crate::graph::MeshGraph
//! [`Segment`]: crate::primitive::Segment
//! [`Triangle`]: crate::primitive::Triangle

mod core;
mod derive;
pub mod edge;
pub mod face;
mod mutation;
pub mod vertex;

use itertools::Itertools;
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

use crate::buffer::{self, BufferError, FromRawBuffers, Index, MeshBuffer, MeshBuilder};
use crate::entity::storage::{AsStorage, SlotStorage};
use crate::entity::view::Bind;
use crate::entity::EntityError;
use crate::geometry::{Position, PositionKey};
use crate::graph::core::Core;
use crate::graph::edge::{Edge, EdgeKey, EdgeView};
use crate::graph::face::{Face, FaceKey, FaceView};
use crate::graph::vertex::{Vertex, VertexKey, VertexView};
use crate::primitive::{Segment, Triangle};

pub use crate::graph::derive::DualKeys;

/// Errors concerning [`MeshGraph`]s.
///
/// [`MeshGraph`]: crate::graph::MeshGraph
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// A key refers to an entity that is not present in the graph, either
    /// because it was issued by another graph or because the entity has been
    /// removed.
    #[error("entity not owned by graph")]
    OwnershipViolation,
    /// An index in a raw index buffer refers to a missing position.
    #[error("index {index} into vertex data out of bounds; length is {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A raw index buffer does not describe whole triangles.
    #[error("conflicting arity; expected {expected}, but got {actual}")]
    ArityConflict {
        /// The expected arity.
        expected: usize,
        /// The incompatible arity that was encountered.
        actual: usize,
    },
    #[error("buffer operation failed: {0}")]
    Buffer(BufferError),
}

impl From<BufferError> for GraphError {
    fn from(error: BufferError) -> Self {
        match error {
            BufferError::IndexOutOfBounds { index, len } => {
                GraphError::IndexOutOfBounds { index, len }
            }
            BufferError::IndexUnaligned { len } => GraphError::ArityConflict {
                expected: 3,
                actual: len % 3,
            },
            _ => GraphError::Buffer(error),
        }
    }
}

impl From<EntityError> for GraphError {
    fn from(error: EntityError) -> Self {
        match error {
            EntityError::EntityNotFound | EntityError::ForeignKey => {
                GraphError::OwnershipViolation
            }
        }
    }
}

trait OptionExt<T> {
    fn expect_consistent(self) -> T;
}

impl<T> OptionExt<T> for Option<T> {
    fn expect_consistent(self) -> T {
        self.expect("internal error: graph consistency violated")
    }
}

trait ResultExt<T, E> {
    fn expect_consistent(self) -> T
    where
        E: Debug;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn expect_consistent(self) -> T
    where
        E: Debug,
    {
        self.expect("internal error: graph consistency violated")
    }
}

/// Triangle mesh represented as a graph of deduplicated vertices, edges, and
/// faces.
///
/// See the [module][`graph`] documentation for more information.
///
/// [`graph`]: crate::graph
#[derive(Debug, Default)]
pub struct MeshGraph {
    core: Core,
}

impl MeshGraph {
    /// Creates an empty `MeshGraph`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use terrahedra::graph::MeshGraph;
    ///
    /// let graph = MeshGraph::new();
    /// assert_eq!(0, graph.face_count());
    /// ```
    pub fn new() -> Self {
        MeshGraph::default()
    }

    /// Creates a `MeshGraph` from any number of mesh buffers.
    ///
    /// Geometry shared between buffers is deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if any buffer cannot be ingested. See
    /// [`MeshGraph::add_mesh`].
    ///
    /// [`MeshGraph::add_mesh`]: crate::graph::MeshGraph::add_mesh
    pub fn from_meshes<'m, N, I>(buffers: I) -> Result<Self, GraphError>
    where
        N: 'm + Index,
        I: IntoIterator<Item = &'m MeshBuffer<N>>,
    {
        let mut graph = MeshGraph::new();
        graph.add_meshes(buffers)?;
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.core.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.core.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.core.faces.len()
    }

    /// Gets an immutable view of the vertex with the given key.
    pub fn vertex(&self, key: VertexKey) -> Option<VertexView<'_>> {
        VertexView::bind(self, key)
    }

    /// Gets an immutable view of the edge with the given key.
    pub fn edge(&self, key: EdgeKey) -> Option<EdgeView<'_>> {
        EdgeView::bind(self, key)
    }

    /// Gets an immutable view of the face with the given key.
    pub fn face(&self, key: FaceKey) -> Option<FaceView<'_>> {
        FaceView::bind(self, key)
    }

    /// Gets an iterator of immutable views over the vertices in the graph.
    pub fn vertices(&self) -> impl Clone + Iterator<Item = VertexView<'_>> {
        self.core
            .vertices
            .keys()
            .map(move |key| self.vertex(key).expect_consistent())
    }

    /// Gets an iterator of immutable views over the edges in the graph.
    pub fn edges(&self) -> impl Clone + Iterator<Item = EdgeView<'_>> {
        self.core
            .edges
            .keys()
            .map(move |key| self.edge(key).expect_consistent())
    }

    /// Gets an iterator of immutable views over the faces in the graph.
    ///
    /// The order of iteration only depends on the sequence of insertions and
    /// removals applied to the graph.
    pub fn faces(&self) -> impl Clone + Iterator<Item = FaceView<'_>> {
        self.core
            .faces
            .keys()
            .map(move |key| self.face(key).expect_consistent())
    }

    /// Gets the vertex at exactly the given position.
    pub fn vertex_at(&self, position: &Position) -> Option<VertexView<'_>> {
        self.core
            .vertex_cache
            .get(&PositionKey(*position))
            .and_then(|key| self.vertex(*key))
    }

    /// Gets the edge between the positions of a segment in either order.
    pub fn edge_at(&self, segment: &Segment) -> Option<EdgeView<'_>> {
        self.core
            .edge_cache
            .get(segment)
            .and_then(|key| self.edge(*key))
    }

    /// Gets the face formed by the positions of a triangle or any rotation of
    /// those positions.
    pub fn face_at(&self, triangle: &Triangle) -> Option<FaceView<'_>> {
        self.core
            .face_cache
            .get(triangle)
            .and_then(|key| self.face(*key))
    }

    /// Gets the edge between two vertices.
    pub fn edge_between(&self, a: VertexKey, b: VertexKey) -> Option<EdgeView<'_>> {
        let segment = Segment::new(*self.vertex(a)?.position(), *self.vertex(b)?.position());
        self.edge_at(&segment)
    }

    /// Gets the face formed by three vertices in winding order.
    pub fn face_between(&self, a: VertexKey, b: VertexKey, c: VertexKey) -> Option<FaceView<'_>> {
        let triangle = Triangle::new(
            *self.vertex(a)?.position(),
            *self.vertex(b)?.position(),
            *self.vertex(c)?.position(),
        );
        self.face_at(&triangle)
    }

    /// Gets the vertex at a position, inserting a new vertex if there is no
    /// vertex at exactly that position.
    pub fn add_vertex(&mut self, position: Position) -> VertexKey {
        mutation::vertex::insert(&mut self.core, position)
    }

    /// Gets the edge between two vertices, inserting a new edge if there is no
    /// such edge.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is not owned by the graph.
    pub fn add_edge(&mut self, a: VertexKey, b: VertexKey) -> Result<EdgeKey, GraphError> {
        mutation::edge::insert(&mut self.core, a, b)
    }

    /// Gets the face formed by three vertices in winding order, inserting a
    /// new face if there is no such face.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the vertices is not owned by the graph. The
    /// graph is not modified in that case.
    pub fn add_face(
        &mut self,
        a: VertexKey,
        b: VertexKey,
        c: VertexKey,
    ) -> Result<FaceKey, GraphError> {
        mutation::face::insert(&mut self.core, [a, b, c])
    }

    /// Inserts the vertices at two positions and the edge between them.
    pub fn add_edge_at(&mut self, a: Position, b: Position) -> EdgeKey {
        let a = self.add_vertex(a);
        let b = self.add_vertex(b);
        self.add_edge(a, b).expect_consistent()
    }

    /// Inserts the vertices at three positions and the face they form in
    /// winding order.
    pub fn add_face_at(&mut self, a: Position, b: Position, c: Position) -> FaceKey {
        let a = self.add_vertex(a);
        let b = self.add_vertex(b);
        let c = self.add_vertex(c);
        self.add_face(a, b, c).expect_consistent()
    }

    pub fn add_edge_from_segment(&mut self, segment: &Segment) -> EdgeKey {
        self.add_edge_at(segment.a, segment.b)
    }

    pub fn add_face_from_triangle(&mut self, triangle: &Triangle) -> FaceKey {
        self.add_face_at(triangle.a, triangle.b, triangle.c)
    }

    /// Ingests raw index and position buffers.
    ///
    /// All positions are inserted as vertices, even those that are not
    /// referenced by any index. Each consecutive triplet of indices is then
    /// inserted as a face with the winding given by the order of the indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the length of the index buffer is not a multiple of
    /// three or if any index is out of bounds. The buffers are validated
    /// before any insertion, so the graph is not modified in that case.
    pub fn add_raw_buffers<N, P, I, J>(
        &mut self,
        indices: I,
        positions: J,
    ) -> Result<(), GraphError>
    where
        N: Index,
        P: Into<Position>,
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = P>,
    {
        let indices = indices.into_iter().collect::<Vec<_>>();
        let positions = positions.into_iter().map(Into::into).collect::<Vec<_>>();
        let indices = buffer::validate(&indices, positions.len())?;
        let (vertex_count, face_count) = (self.vertex_count(), self.face_count());
        let vertices = positions
            .into_iter()
            .map(|position| mutation::vertex::insert(&mut self.core, position))
            .collect::<Vec<_>>();
        for (a, b, c) in indices.into_iter().tuples() {
            mutation::face::insert(&mut self.core, [vertices[a], vertices[b], vertices[c]])?;
        }
        debug!(
            vertices = self.vertex_count() - vertex_count,
            faces = self.face_count() - face_count,
            "Ingested raw mesh"
        );
        Ok(())
    }

    /// Ingests a mesh buffer.
    ///
    /// Vertices are inserted for all positions of the buffer and faces are
    /// inserted for all of its triangles. Any normals and texture coordinates
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be ingested. See
    /// [`MeshGraph::add_raw_buffers`].
    ///
    /// [`MeshGraph::add_raw_buffers`]: crate::graph::MeshGraph::add_raw_buffers
    pub fn add_mesh<N>(&mut self, buffer: &MeshBuffer<N>) -> Result<(), GraphError>
    where
        N: Index,
    {
        self.add_raw_buffers(
            buffer.as_index_slice().iter().copied(),
            buffer.as_position_slice().iter().copied(),
        )
    }

    /// Ingests any number of mesh buffers in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any buffer cannot be ingested. Buffers that precede
    /// the failed buffer remain ingested.
    pub fn add_meshes<'m, N, I>(&mut self, buffers: I) -> Result<(), GraphError>
    where
        N: 'm + Index,
        I: IntoIterator<Item = &'m MeshBuffer<N>>,
    {
        for buffer in buffers {
            self.add_mesh(buffer)?;
        }
        Ok(())
    }

    /// Removes a vertex and all edges and faces incident to it.
    ///
    /// Returns `false` if the vertex is not owned by the graph.
    pub fn remove_vertex(&mut self, key: VertexKey) -> bool {
        mutation::vertex::remove(&mut self.core, key).is_ok()
    }

    /// Removes an edge and all faces incident to it.
    ///
    /// Returns `false` if the edge is not owned by the graph.
    pub fn remove_edge(&mut self, key: EdgeKey) -> bool {
        mutation::edge::remove(&mut self.core, key).is_ok()
    }

    /// Removes a face. Its vertices and edges remain in the graph.
    ///
    /// Returns `false` if the face is not owned by the graph.
    pub fn remove_face(&mut self, key: FaceKey) -> bool {
        mutation::face::remove(&mut self.core, key).is_ok()
    }

    /// Gets a builder that emits flattened mesh buffers from the graph.
    ///
    /// See [`MeshBuilder`].
    ///
    /// [`MeshBuilder`]: crate::buffer::MeshBuilder
    pub fn mesh_builder(&self) -> MeshBuilder<'_> {
        MeshBuilder::new(self)
    }
}

impl AsStorage<Vertex> for MeshGraph {
    fn as_storage(&self) -> &SlotStorage<Vertex> {
        &self.core.vertices
    }
}

impl AsStorage<Edge> for MeshGraph {
    fn as_storage(&self) -> &SlotStorage<Edge> {
        &self.core.edges
    }
}

impl AsStorage<Face> for MeshGraph {
    fn as_storage(&self) -> &SlotStorage<Face> {
        &self.core.faces
    }
}

impl<N, P> FromRawBuffers<N, P> for MeshGraph
where
    N: Index,
    P: Into<Position>,
{
    type Error = GraphError;

    fn from_raw_buffers<I, J>(indices: I, positions: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = P>,
    {
        let mut graph = MeshGraph::new();
        graph.add_raw_buffers(indices, positions)?;
        Ok(graph)
    }
}

impl<'m, N> TryFrom<&'m MeshBuffer<N>> for MeshGraph
where
    N: Index,
{
    type Error = GraphError;

    fn try_from(buffer: &'m MeshBuffer<N>) -> Result<Self, Self::Error> {
        let mut graph = MeshGraph::new();
        graph.add_mesh(buffer)?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{BuildParams, MeshBuffer};
    use crate::geometry::{Normal, Position};
    use crate::graph::{GraphError, MeshGraph};
    use crate::prelude::*;
    use crate::primitive::{Segment, Triangle};

    fn positions() -> [Position; 4] {
        [
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
            Position::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn vertex_deduplication() {
        let mut graph = MeshGraph::new();
        let a = graph.add_vertex(Position::new(1.0, 2.0, 3.0));
        let b = graph.add_vertex(Position::new(1.0, 2.0, 3.0));
        let c = graph.add_vertex(Position::new(1.0, 2.0, 3.0 + 1e-6));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(2, graph.vertex_count());
    }

    #[test]
    fn face_rotation_invariance() {
        let mut graph = MeshGraph::new();
        let [p, q, r, _] = positions();
        let a = graph.add_vertex(p);
        let b = graph.add_vertex(q);
        let c = graph.add_vertex(r);

        let abc = graph.add_face(a, b, c).unwrap();
        assert_eq!(abc, graph.add_face(b, c, a).unwrap());
        assert_eq!(abc, graph.add_face(c, a, b).unwrap());
        assert_eq!(1, graph.face_count());

        let acb = graph.add_face(a, c, b).unwrap();
        assert_ne!(abc, acb);
        assert_eq!(2, graph.face_count());
        assert_eq!(3, graph.edge_count());
        assert_eq!(Some(acb), graph.face_between(c, b, a).map(|face| face.key()));
    }

    #[test]
    fn edge_symmetry() {
        let mut graph = MeshGraph::new();
        let [p, q, ..] = positions();
        let a = graph.add_vertex(p);
        let b = graph.add_vertex(q);

        let ab = graph.add_edge(a, b).unwrap();
        assert_eq!(ab, graph.add_edge(b, a).unwrap());
        assert_eq!(1, graph.edge_count());
        assert_eq!(Some(ab), graph.edge_between(b, a).map(|edge| edge.key()));
        assert_eq!(
            Some(ab),
            graph.edge_at(&Segment::new(q, p)).map(|edge| edge.key())
        );
    }

    #[test]
    fn duplicate_triangle() {
        let mut graph = MeshGraph::new();
        let [p, q, r, _] = positions();
        let abc = graph.add_face_at(p, q, r);

        assert_eq!(abc, graph.add_face_at(p, q, r));
        assert_eq!(abc, graph.add_face_from_triangle(&Triangle::new(r, p, q)));
        assert_eq!(1, graph.face_count());
    }

    #[test]
    fn reject_foreign_vertices() {
        let mut graph = MeshGraph::new();
        let mut other = MeshGraph::new();
        let [p, q, r, _] = positions();
        let a = graph.add_vertex(p);
        let b = graph.add_vertex(q);
        let c = other.add_vertex(r);

        assert_eq!(Err(GraphError::OwnershipViolation), graph.add_face(a, b, c));
        assert_eq!(Err(GraphError::OwnershipViolation), graph.add_edge(a, c));
        assert_eq!(0, graph.face_count());
        assert_eq!(0, graph.edge_count());
        assert!(graph.vertex(c).is_none());
        assert!(!graph.remove_vertex(c));
        assert_eq!(1, other.vertex_count());
    }

    #[test]
    fn reject_foreign_edges_and_faces() {
        let mut graph = MeshGraph::new();
        let mut other = MeshGraph::new();
        let [p, q, r, _] = positions();
        graph.add_face_at(p, q, r);
        let abc = other.add_face_at(p, q, r);
        let ab = other.edges().next().unwrap().key();

        assert!(!graph.remove_edge(ab));
        assert!(!graph.remove_face(abc));
        assert_eq!(3, graph.edge_count());
        assert_eq!(1, graph.face_count());
        assert_eq!(3, other.edge_count());
        assert_eq!(1, other.face_count());
    }

    #[test]
    fn reject_removed_vertices() {
        let mut graph = MeshGraph::new();
        let [p, q, r, _] = positions();
        let a = graph.add_vertex(p);
        let b = graph.add_vertex(q);
        let c = graph.add_vertex(r);

        assert!(graph.remove_vertex(c));
        assert!(!graph.remove_vertex(c));
        assert_eq!(Err(GraphError::OwnershipViolation), graph.add_face(a, b, c));
        // The position is free again and is inserted as a new vertex.
        let d = graph.add_vertex(r);
        assert_ne!(c, d);
        assert!(graph.add_face(a, b, d).is_ok());
    }

    #[test]
    fn remove_vertex_cascades() {
        let [p, q, r, s] = positions();
        let mut graph = MeshGraph::new();
        graph.add_face_at(p, q, r);
        graph.add_face_at(q, s, r);
        let vertex = graph.vertex_at(&q).unwrap();
        let n = vertex.faces().count();
        let key = vertex.key();

        assert_eq!(2, n);
        assert!(graph.remove_vertex(key));
        assert_eq!(0, graph.face_count());
        assert_eq!(3, graph.vertex_count());
        // Only the edges between the remaining vertices remain.
        assert_eq!(2, graph.edge_count());
        assert!(graph.vertex_at(&q).is_none());
        assert!(graph.vertices().all(|vertex| vertex.edges().all(|edge| {
            edge.vertices().all(|vertex| vertex.key() != key)
        })));
    }

    #[test]
    fn remove_edge_cascades() {
        let [p, q, r, s] = positions();
        let mut graph = MeshGraph::new();
        graph.add_face_at(p, q, r);
        graph.add_face_at(q, s, r);
        let shared = graph.edge_at(&Segment::new(q, r)).unwrap().key();

        assert!(graph.remove_edge(shared));
        assert!(!graph.remove_edge(shared));
        assert_eq!(0, graph.face_count());
        assert_eq!(4, graph.edge_count());
        assert_eq!(4, graph.vertex_count());
        assert!(graph.edge_at(&Segment::new(q, r)).is_none());
        assert!(graph
            .vertices()
            .all(|vertex| vertex.edges().all(|edge| edge.key() != shared)));
    }

    #[test]
    fn remove_face_keeps_vertices_and_edges() {
        let [p, q, r, _] = positions();
        let mut graph = MeshGraph::new();
        let abc = graph.add_face_at(p, q, r);

        assert!(graph.remove_face(abc));
        assert!(!graph.remove_face(abc));
        assert_eq!(0, graph.face_count());
        assert_eq!(3, graph.edge_count());
        assert_eq!(3, graph.vertex_count());
        assert!(graph.face_at(&Triangle::new(p, q, r)).is_none());
        assert!(graph.vertices().all(|vertex| vertex.faces().count() == 0));
    }

    #[test]
    fn single_triangle() {
        let graph = MeshGraph::from_raw_buffers(
            vec![0u32, 1, 2],
            vec![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        )
        .unwrap();

        assert_eq!(3, graph.vertex_count());
        assert_eq!(3, graph.edge_count());
        assert_eq!(1, graph.face_count());

        let buffer: MeshBuffer<u32> = graph
            .mesh_builder()
            .with_params(BuildParams::faceted())
            .build()
            .unwrap();
        assert_eq!(&[0, 1, 2], buffer.as_index_slice());
        assert!(buffer
            .as_normal_slice()
            .iter()
            .all(|normal| *normal == Normal::z()));
    }

    #[test]
    fn round_trip() {
        let source = MeshBuffer::<u32>::from_raw_buffers(
            vec![0, 1, 2, 2, 1, 3],
            positions().to_vec(),
        )
        .unwrap();
        let graph = MeshGraph::try_from(&source).unwrap();
        let buffer: MeshBuffer<u32> = graph.mesh_builder().build().unwrap();

        assert_eq!(2 * 3, buffer.vertex_count());
        assert_eq!(
            source.triangles().collect::<Vec<_>>(),
            buffer.triangles().collect::<Vec<_>>()
        );
    }

    #[test]
    fn ingest_many_meshes() {
        let [p, q, r, s] = positions();
        let a = MeshBuffer::<u16>::from_raw_buffers(vec![0, 1, 2], vec![p, q, r]).unwrap();
        let b = MeshBuffer::<u16>::from_raw_buffers(vec![0, 1, 2], vec![q, s, r]).unwrap();
        let graph = MeshGraph::from_meshes(&[a, b]).unwrap();

        assert_eq!(4, graph.vertex_count());
        assert_eq!(5, graph.edge_count());
        assert_eq!(2, graph.face_count());
    }

    #[test]
    fn reject_malformed_raw_buffers() {
        let positions = positions().to_vec();
        let mut graph = MeshGraph::new();

        assert_eq!(
            Err(GraphError::ArityConflict {
                expected: 3,
                actual: 1,
            }),
            graph.add_raw_buffers(vec![0u32, 1, 2, 3], positions.clone())
        );
        assert_eq!(
            Err(GraphError::IndexOutOfBounds { index: 7, len: 4 }),
            graph.add_raw_buffers(vec![0u32, 1, 7], positions)
        );
        assert_eq!(0, graph.vertex_count());
    }
}
