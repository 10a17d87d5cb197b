//! Graphs derived from other graphs.
//!
//! Derived graphs are independent of their source: they share no keys nor
//! storage and only positions are copied.

use fnv::FnvHashMap;
use itertools::Itertools;
use tracing::debug;

use crate::graph::face::{FaceKey, FaceView};
use crate::graph::vertex::VertexKey;
use crate::graph::{MeshGraph, ResultExt as _};

/// Map from the faces of a graph to the vertices of its face graph.
///
/// Faces with exactly the same center map to the same vertex.
pub type DualKeys = FnvHashMap<FaceKey, VertexKey>;

impl MeshGraph {
    /// Creates a copy of the graph with the winding of every face reversed.
    ///
    /// The copy has the same vertices and edges. Each face $(A, B, C)$ is
    /// replaced by $(B, A, C)$, which flips its normal. This turns closed
    /// meshes inside out.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use approx::assert_relative_eq;
    /// use terrahedra::geometry::Position;
    /// use terrahedra::graph::MeshGraph;
    ///
    /// let mut graph = MeshGraph::new();
    /// graph.add_face_at(
    ///     Position::new(0.0, 0.0, 0.0),
    ///     Position::new(1.0, 0.0, 0.0),
    ///     Position::new(0.0, 1.0, 0.0),
    /// );
    /// let inverted = graph.to_inverted_graph();
    ///
    /// let face = inverted.faces().next().unwrap();
    /// assert_relative_eq!(-graph.faces().next().unwrap().normal(), face.normal());
    /// ```
    pub fn to_inverted_graph(&self) -> MeshGraph {
        let mut graph = MeshGraph::new();
        for vertex in self.vertices() {
            graph.add_vertex(*vertex.position());
        }
        for edge in self.edges() {
            graph.add_edge_from_segment(&edge.segment());
        }
        for face in self.faces() {
            graph.add_face_from_triangle(&face.triangle().reversed());
        }
        debug!(
            vertices = graph.vertex_count(),
            faces = graph.face_count(),
            "Built inverted graph"
        );
        graph
    }

    /// Creates the face graph (dual) in which faces that share an edge are
    /// connected.
    ///
    /// Each face is represented by a vertex at its center.
    pub fn to_face_graph_by_edges(&self) -> MeshGraph {
        self.to_face_graph_by_edges_with_keys().0
    }

    /// Creates the face graph (dual) in which faces that share a vertex are
    /// connected.
    ///
    /// Each face is represented by a vertex at its center. This adjacency is
    /// looser than [`to_face_graph_by_edges`].
    ///
    /// [`to_face_graph_by_edges`]: crate::graph::MeshGraph::to_face_graph_by_edges
    pub fn to_face_graph_by_vertices(&self) -> MeshGraph {
        self.to_face_graph_by_vertices_with_keys().0
    }

    /// Creates the face graph in which faces that share an edge are
    /// connected along with the map from faces to their vertices in that
    /// graph.
    pub fn to_face_graph_by_edges_with_keys(&self) -> (MeshGraph, DualKeys) {
        self.to_face_graph_with(self.edges().map(|edge| edge.faces()))
    }

    /// Creates the face graph in which faces that share a vertex are
    /// connected along with the map from faces to their vertices in that
    /// graph.
    pub fn to_face_graph_by_vertices_with_keys(&self) -> (MeshGraph, DualKeys) {
        self.to_face_graph_with(self.vertices().map(|vertex| vertex.faces()))
    }

    // Every pair of faces within a group is connected.
    fn to_face_graph_with<'a, I, J>(&'a self, groups: I) -> (MeshGraph, DualKeys)
    where
        I: IntoIterator<Item = J>,
        J: Clone + Iterator<Item = FaceView<'a>>,
    {
        let mut graph = MeshGraph::new();
        let keys = self
            .faces()
            .map(|face| (face.key(), graph.add_vertex(face.center())))
            .collect::<DualKeys>();
        for group in groups {
            for (f, g) in group.tuple_combinations() {
                let (a, b) = (keys[&f.key()], keys[&g.key()]);
                if a != b {
                    graph.add_edge(a, b).expect_consistent();
                }
            }
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Built face graph"
        );
        (graph, keys)
    }
}
