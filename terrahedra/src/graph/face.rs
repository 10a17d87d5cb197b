use itertools::Itertools;
use slotmap::DefaultKey;
use smallvec::SmallVec;

use crate::entity::storage::{GraphId, OpaqueKey};
use crate::entity::traverse::{Adjacency, Breadth, Depth, Traversal};
use crate::entity::view::{ClosedView, View};
use crate::entity::Entity;
use crate::geometry::{Normal, Position, Scalar};
use crate::graph::edge::{EdgeKey, EdgeView};
use crate::graph::vertex::{VertexKey, VertexView};
use crate::graph::{MeshGraph, OptionExt as _};
use crate::primitive::Triangle;

/// Graph face.
///
/// A face is a triangle with a fixed winding. Its edges are always
/// $\overline{ab}$, $\overline{bc}$, and $\overline{ca}$ in that order.
#[derive(Clone, Debug)]
pub struct Face {
    pub(in crate::graph) vertices: [VertexKey; 3],
    pub(in crate::graph) edges: [EdgeKey; 3],
}

impl Face {
    pub(in crate::graph) fn new(vertices: [VertexKey; 3], edges: [EdgeKey; 3]) -> Self {
        Face { vertices, edges }
    }
}

impl Entity for Face {
    type Key = FaceKey;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FaceKey(GraphId, DefaultKey);

impl OpaqueKey for FaceKey {
    fn from_inner(owner: GraphId, key: DefaultKey) -> Self {
        FaceKey(owner, key)
    }

    fn into_inner(self) -> DefaultKey {
        self.1
    }

    fn owner(&self) -> GraphId {
        self.0
    }
}

/// View of a face in a graph.
///
/// Provides queries and traversals related to faces. All geometry is derived
/// from the positions of the face's vertices in winding order.
///
/// # Examples
///
/// Growing a region of faces connected by edges:
///
/// ```rust
/// use terrahedra::geometry::Position;
/// use terrahedra::graph::MeshGraph;
///
/// let mut graph = MeshGraph::new();
/// let key = graph.add_face_at(
///     Position::new(0.0, 0.0, 0.0),
///     Position::new(1.0, 0.0, 0.0),
///     Position::new(0.0, 1.0, 0.0),
/// );
/// graph.add_face_at(
///     Position::new(1.0, 0.0, 0.0),
///     Position::new(1.0, 1.0, 0.0),
///     Position::new(0.0, 1.0, 0.0),
/// );
///
/// let region = graph
///     .face(key)
///     .unwrap()
///     .traverse_by_breadth()
///     .map(|face| face.key())
///     .collect::<Vec<_>>();
/// assert_eq!(2, region.len());
/// ```
#[derive(Clone, Copy)]
pub struct FaceView<'a> {
    inner: View<'a, MeshGraph, Face>,
}

impl<'a> FaceView<'a> {
    pub fn key(&self) -> FaceKey {
        self.inner.key()
    }

    /// Gets the keys of the vertices of the face in winding order.
    pub fn vertex_keys(&self) -> [VertexKey; 3] {
        self.inner.entity().vertices
    }

    /// Gets the keys of the edges $\overline{ab}$, $\overline{bc}$, and
    /// $\overline{ca}$ of the face.
    pub fn edge_keys(&self) -> [EdgeKey; 3] {
        self.inner.entity().edges
    }

    pub(in crate::graph) fn corners(&self) -> [VertexView<'a>; 3] {
        let graph = self.inner.storage();
        let [a, b, c] = self.vertex_keys();
        [
            graph.vertex(a).expect_consistent(),
            graph.vertex(b).expect_consistent(),
            graph.vertex(c).expect_consistent(),
        ]
    }

    pub(in crate::graph) fn sides(&self) -> [EdgeView<'a>; 3] {
        let graph = self.inner.storage();
        let [ab, bc, ca] = self.edge_keys();
        [
            graph.edge(ab).expect_consistent(),
            graph.edge(bc).expect_consistent(),
            graph.edge(ca).expect_consistent(),
        ]
    }

    /// Gets an iterator over the vertices of the face in winding order.
    pub fn vertices(&self) -> impl Clone + Iterator<Item = VertexView<'a>> {
        self.corners().into_iter()
    }

    /// Gets an iterator over the edges of the face.
    pub fn edges(&self) -> impl Clone + Iterator<Item = EdgeView<'a>> {
        self.sides().into_iter()
    }

    /// Gets the triangle formed by the positions of the face's vertices.
    ///
    /// The triangle can be used to find this face again with
    /// [`MeshGraph::face_at`].
    ///
    /// [`MeshGraph::face_at`]: crate::graph::MeshGraph::face_at
    pub fn triangle(&self) -> Triangle {
        let [a, b, c] = self.corners();
        Triangle::new(*a.position(), *b.position(), *c.position())
    }

    pub fn center(&self) -> Position {
        self.triangle().center()
    }

    /// Gets the unit normal of the face.
    ///
    /// The sign depends on winding. Degenerate faces have `NaN` normals.
    pub fn normal(&self) -> Normal {
        self.triangle().normal()
    }

    pub fn area(&self) -> Scalar {
        self.triangle().area()
    }

    /// Gets an iterator over the faces that share at least one vertex with
    /// the face.
    ///
    /// Each neighbor is yielded once and the face itself is excluded.
    pub fn neighbors_by_vertices(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        let key = self.key();
        self.vertices()
            .flat_map(|vertex| vertex.faces())
            .filter(move |face| face.key() != key)
            .unique_by(|face| face.key())
    }

    /// Gets an iterator over the faces that share an edge with the face.
    ///
    /// Each neighbor is yielded once and the face itself is excluded.
    pub fn neighbors_by_edges(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        let key = self.key();
        self.edges()
            .flat_map(|edge| edge.faces())
            .filter(move |face| face.key() != key)
            .unique_by(|face| face.key())
    }

    /// Gets an iterator that traverses faces connected by edges in
    /// breadth-first order, starting with this face.
    pub fn traverse_by_breadth(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        Traversal::<_, Self, Breadth>::new(self.inner.storage(), self.key())
    }

    /// Gets an iterator that traverses faces connected by edges in
    /// depth-first order, starting with this face.
    pub fn traverse_by_depth(&self) -> impl Clone + Iterator<Item = FaceView<'a>> {
        Traversal::<_, Self, Depth>::new(self.inner.storage(), self.key())
    }
}

impl<'a> Adjacency for FaceView<'a> {
    type Output = SmallVec<[FaceKey; 3]>;

    fn adjacency(&self) -> Self::Output {
        self.neighbors_by_edges().map(|face| face.key()).collect()
    }
}

impl<'a> ClosedView for FaceView<'a> {
    type Key = FaceKey;
    type Entity = Face;

    fn key(&self) -> Self::Key {
        self.inner.key()
    }
}

impl<'a> From<View<'a, MeshGraph, Face>> for FaceView<'a> {
    fn from(view: View<'a, MeshGraph, Face>) -> Self {
        FaceView { inner: view }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::geometry::{Normal, Position};
    use crate::graph::MeshGraph;
    use crate::primitive::{Segment, Triangle};

    // A strip of three triangles along the X-axis. Each triangle shares an
    // edge with the next and the first and last share only a vertex.
    //
    //   (0,1)---(1,1)---(2,1)
    //     |  \    |    /
    //     |   \   |   /
    //   (0,0)---(1,0)
    fn strip() -> MeshGraph {
        let p = |x, y| Position::new(x, y, 0.0);
        let mut graph = MeshGraph::new();
        graph.add_face_at(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        graph.add_face_at(p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0));
        graph.add_face_at(p(1.0, 0.0), p(2.0, 1.0), p(1.0, 1.0));
        graph
    }

    fn first() -> Triangle {
        Triangle::new(
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn derived_geometry() {
        let graph = strip();
        let face = graph.face_at(&first()).unwrap();

        assert_eq!(first(), face.triangle());
        assert_relative_eq!(Normal::z(), face.normal());
        assert_relative_eq!(0.5, face.area());
        assert_relative_eq!(Position::new(1.0 / 3.0, 1.0 / 3.0, 0.0), face.center());
    }

    #[test]
    fn edges_follow_winding() {
        let graph = strip();
        let face = graph.face_at(&first()).unwrap();
        let corners = face.vertices().map(|vertex| *vertex.position()).collect::<Vec<_>>();

        for (index, edge) in face.edges().enumerate() {
            let segment = edge.segment();
            assert_eq!(
                Segment::new(corners[index], corners[(index + 1) % 3]),
                segment
            );
        }
    }

    #[test]
    fn neighbors_are_unique() {
        let graph = strip();
        let face = graph.face_at(&first()).unwrap();

        assert_eq!(1, face.neighbors_by_edges().count());
        assert_eq!(2, face.neighbors_by_vertices().count());
        assert!(face
            .neighbors_by_vertices()
            .all(|neighbor| neighbor.key() != face.key()));
    }

    #[test]
    fn traverse_by_edges() {
        let graph = strip();
        let face = graph.face_at(&first()).unwrap();

        let breadth = face.traverse_by_breadth().map(|face| face.key()).collect::<Vec<_>>();
        let depth = face.traverse_by_depth().map(|face| face.key()).collect::<Vec<_>>();

        assert_eq!(3, breadth.len());
        assert_eq!(3, depth.len());
        assert_eq!(face.key(), breadth[0]);
        assert_eq!(face.key(), depth[0]);
        // Traversals are restartable.
        assert_eq!(3, face.traverse_by_breadth().count());
    }
}
