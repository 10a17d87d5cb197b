use derivative::Derivative;
use itertools::Itertools;
use slotmap::DefaultKey;
use smallvec::SmallVec;

use crate::entity::storage::{GraphId, OpaqueKey};
use crate::entity::view::{ClosedView, View};
use crate::entity::Entity;
use crate::geometry::{mean_normal, Normal, Position, Scalar};
use crate::graph::face::{FaceKey, FaceView};
use crate::graph::vertex::{VertexKey, VertexView};
use crate::graph::{MeshGraph, OptionExt as _};
use crate::primitive::Segment;

/// Graph edge.
///
/// Edges are undirected: the edge between $A$ and $B$ is the same entity as
/// the edge between $B$ and $A$. The order of `vertices` is the order given
/// when the edge was first inserted.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Edge {
    pub(in crate::graph) vertices: [VertexKey; 2],
    /// Incident faces. Registered by faces when they are inserted.
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) faces: SmallVec<[FaceKey; 2]>,
}

impl Edge {
    pub(in crate::graph) fn new(a: VertexKey, b: VertexKey) -> Self {
        Edge {
            vertices: [a, b],
            faces: SmallVec::new(),
        }
    }

    pub(in crate::graph) fn connect_face(&mut self, face: FaceKey) {
        if !self.faces.contains(&face) {
            self.faces.push(face);
        }
    }

    pub(in crate::graph) fn disconnect_face(&mut self, face: FaceKey) -> bool {
        let n = self.faces.len();
        self.faces.retain(|key| *key != face);
        n != self.faces.len()
    }
}

impl Entity for Edge {
    type Key = EdgeKey;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeKey(GraphId, DefaultKey);

impl OpaqueKey for EdgeKey {
    fn from_inner(owner: GraphId, key: DefaultKey) -> Self {
        EdgeKey(owner, key)
    }

    fn into_inner(self) -> DefaultKey {
        self.1
    }

    fn owner(&self) -> GraphId {
        self.0
    }
}

/// View of an edge in a graph.
#[derive(Clone, Copy)]
pub struct EdgeView<'a> {
    inner: View<'a, MeshGraph, Edge>,
}

impl<'a> EdgeView<'a> {
    pub fn key(&self) -> EdgeKey {
        self.inner.key()
    }

    /// Gets the keys of the vertices joined by the edge.
    pub fn vertex_keys(&self) -> [VertexKey; 2] {
        self.inner.entity().vertices
    }

    pub(in crate::graph) fn endpoints(&self) -> [VertexView<'a>; 2] {
        let [a, b] = self.vertex_keys();
        let graph = self.inner.storage();
        [
            graph.vertex(a).expect_consistent(),
            graph.vertex(b).expect_consistent(),
        ]
    }

    /// Gets an iterator over the two vertices joined by the edge.
    pub fn vertices(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        self.endpoints().into_iter()
    }

    /// Gets an iterator over the faces incident to the edge.
    pub fn faces(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        let graph = self.inner.storage();
        self.inner
            .entity()
            .faces
            .iter()
            .filter_map(move |key| graph.face(*key))
    }

    /// Returns `true` if the edge is incident to exactly one face.
    pub fn is_boundary(&self) -> bool {
        self.inner.entity().faces.len() == 1
    }

    /// Gets the segment between the positions of the edge's vertices.
    pub fn segment(&self) -> Segment {
        let [a, b] = self.endpoints();
        Segment::new(*a.position(), *b.position())
    }

    pub fn center(&self) -> Position {
        self.segment().center()
    }

    pub fn length(&self) -> Scalar {
        self.segment().length()
    }

    pub fn squared_length(&self) -> Scalar {
        self.segment().squared_length()
    }

    /// Gets the normal of the edge.
    ///
    /// This is the normalized sum of the normals of all incident faces and has
    /// `NaN` components if the edge has no incident faces.
    pub fn normal(&self) -> Normal {
        mean_normal(self.faces().map(|face| face.normal()))
    }

    /// Gets an iterator over the edges that share a vertex with the edge.
    ///
    /// Each neighbor is yielded once and the edge itself is excluded.
    pub fn neighbors_by_vertices(&self) -> impl Clone + Iterator<Item = EdgeView<'a>> {
        let key = self.key();
        self.vertices()
            .flat_map(|vertex| vertex.edges())
            .filter(move |edge| edge.key() != key)
            .unique_by(|edge| edge.key())
    }

    /// Gets an iterator over the edges that share a face with the edge.
    ///
    /// Each neighbor is yielded once and the edge itself is excluded.
    pub fn neighbors_by_faces(&self) -> impl Clone + Iterator<Item = EdgeView<'a>> {
        let key = self.key();
        self.faces()
            .flat_map(|face| face.sides())
            .filter(move |edge| edge.key() != key)
            .unique_by(|edge| edge.key())
    }
}

impl<'a> ClosedView for EdgeView<'a> {
    type Key = EdgeKey;
    type Entity = Edge;

    fn key(&self) -> Self::Key {
        self.inner.key()
    }
}

impl<'a> From<View<'a, MeshGraph, Edge>> for EdgeView<'a> {
    fn from(view: View<'a, MeshGraph, Edge>) -> Self {
        EdgeView { inner: view }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::geometry::{Normal, Position};
    use crate::graph::MeshGraph;
    use crate::primitive::Segment;

    // A fan of two triangles around the Z-axis sharing the edge from the
    // origin to (0, 1, 0), folded so that the faces are perpendicular.
    fn fold() -> MeshGraph {
        let mut graph = MeshGraph::new();
        graph.add_face_at(
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
        );
        graph.add_face_at(
            Position::new(0.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
            Position::new(0.0, 0.0, 1.0),
        );
        graph
    }

    fn hinge() -> Segment {
        Segment::new(Position::new(0.0, 1.0, 0.0), Position::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn derived_geometry() {
        let graph = fold();
        let edge = graph.edge_at(&hinge()).unwrap();

        assert_relative_eq!(1.0, edge.length());
        assert_relative_eq!(Position::new(0.0, 0.5, 0.0), edge.center());
        assert_eq!(hinge(), edge.segment());
        assert_relative_eq!(
            Normal::new(1.0, 0.0, 1.0).normalize(),
            edge.normal(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn incident_faces() {
        let graph = fold();
        let edge = graph.edge_at(&hinge()).unwrap();

        assert_eq!(2, edge.faces().count());
        assert!(!edge.is_boundary());
        assert_eq!(
            4,
            graph.edges().filter(|edge| edge.is_boundary()).count()
        );
    }

    #[test]
    fn neighbors_are_unique() {
        let graph = fold();
        let edge = graph.edge_at(&hinge()).unwrap();

        // Every other edge shares both a vertex and a face with the hinge.
        assert_eq!(4, edge.neighbors_by_vertices().count());
        assert_eq!(4, edge.neighbors_by_faces().count());
        assert!(edge
            .neighbors_by_faces()
            .all(|neighbor| neighbor.key() != edge.key()));
    }

    #[test]
    fn orphaned_edge() {
        let mut graph = MeshGraph::new();
        let key = graph.add_edge_at(Position::new(0.0, 0.0, 0.0), Position::new(2.0, 0.0, 0.0));
        let edge = graph.edge(key).unwrap();

        assert_eq!(0, edge.faces().count());
        assert!(edge.normal().x.is_nan());
        assert_relative_eq!(4.0, edge.squared_length());
    }
}
