use derivative::Derivative;
use itertools::Itertools;
use slotmap::DefaultKey;
use smallvec::SmallVec;

use crate::entity::storage::{GraphId, OpaqueKey};
use crate::entity::traverse::{Adjacency, Breadth, Depth, Traversal};
use crate::entity::view::{ClosedView, View};
use crate::entity::Entity;
use crate::geometry::{mean_normal, Normal, Position};
use crate::graph::edge::{EdgeKey, EdgeView};
use crate::graph::face::{FaceKey, FaceView};
use crate::graph::MeshGraph;

/// Graph vertex.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Vertex {
    pub(in crate::graph) position: Position,
    /// Incident faces. Registered by faces when they are inserted.
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) faces: SmallVec<[FaceKey; 8]>,
    /// Incident edges. Registered by edges when they are inserted.
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) edges: SmallVec<[EdgeKey; 8]>,
}

impl Vertex {
    pub(in crate::graph) fn new(position: Position) -> Self {
        Vertex {
            position,
            faces: SmallVec::new(),
            edges: SmallVec::new(),
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

    pub(in crate::graph) fn connect_edge(&mut self, edge: EdgeKey) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub(in crate::graph) fn disconnect_edge(&mut self, edge: EdgeKey) -> bool {
        let n = self.edges.len();
        self.edges.retain(|key| *key != edge);
        n != self.edges.len()
    }
}

impl Entity for Vertex {
    type Key = VertexKey;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexKey(GraphId, DefaultKey);

impl OpaqueKey for VertexKey {
    fn from_inner(owner: GraphId, key: DefaultKey) -> Self {
        VertexKey(owner, key)
    }

    fn into_inner(self) -> DefaultKey {
        self.1
    }

    fn owner(&self) -> GraphId {
        self.0
    }
}

/// View of a vertex in a graph.
///
/// Provides queries and traversals related to vertices. Normals are derived
/// from incident faces each time they are queried and are never stored.
#[derive(Clone, Copy)]
pub struct VertexView<'a> {
    inner: View<'a, MeshGraph, Vertex>,
}

impl<'a> VertexView<'a> {
    pub fn key(&self) -> VertexKey {
        self.inner.key()
    }

    pub fn position(&self) -> &'a Position {
        &self.inner.entity().position
    }

    /// Gets the normal of the vertex.
    ///
    /// This is the normalized sum of the normals of all incident faces. If
    /// the vertex has no incident faces, then the normal has `NaN`
    /// components.
    pub fn normal(&self) -> Normal {
        mean_normal(self.faces().map(|face| face.normal()))
    }

    /// Gets an iterator over the faces incident to the vertex.
    pub fn faces(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        let graph = self.inner.storage();
        self.inner
            .entity()
            .faces
            .iter()
            .filter_map(move |key| graph.face(*key))
    }

    /// Gets an iterator over the edges incident to the vertex.
    pub fn edges(&self) -> impl Clone + Iterator<Item = EdgeView<'a>> {
        let graph = self.inner.storage();
        self.inner
            .entity()
            .edges
            .iter()
            .filter_map(move |key| graph.edge(*key))
    }

    /// Gets an iterator over the vertices that share a face with the vertex.
    ///
    /// Each neighbor is yielded once and the vertex itself is excluded.
    pub fn neighbors_by_faces(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        let key = self.key();
        self.faces()
            .flat_map(|face| face.corners())
            .filter(move |vertex| vertex.key() != key)
            .unique_by(|vertex| vertex.key())
    }

    /// Gets an iterator over the vertices connected to the vertex by an edge.
    ///
    /// Each neighbor is yielded once and the vertex itself is excluded.
    pub fn neighbors_by_edges(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        let key = self.key();
        self.edges()
            .flat_map(|edge| edge.endpoints())
            .filter(move |vertex| vertex.key() != key)
            .unique_by(|vertex| vertex.key())
    }

    /// Gets an iterator that traverses vertices connected by edges in
    /// breadth-first order, starting with this vertex.
    pub fn traverse_by_breadth(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        Traversal::<_, Self, Breadth>::new(self.inner.storage(), self.key())
    }

    /// Gets an iterator that traverses vertices connected by edges in
    /// depth-first order, starting with this vertex.
    pub fn traverse_by_depth(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        Traversal::<_, Self, Depth>::new(self.inner.storage(), self.key())
    }
}

impl<'a> Adjacency for VertexView<'a> {
    type Output = SmallVec<[VertexKey; 8]>;

    fn adjacency(&self) -> Self::Output {
        self.neighbors_by_edges().map(|vertex| vertex.key()).collect()
    }
}

impl<'a> ClosedView for VertexView<'a> {
    type Key = VertexKey;
    type Entity = Vertex;

    fn key(&self) -> Self::Key {
        self.inner.key()
    }
}

impl<'a> From<View<'a, MeshGraph, Vertex>> for VertexView<'a> {
    fn from(view: View<'a, MeshGraph, Vertex>) -> Self {
        VertexView { inner: view }
    }
}
