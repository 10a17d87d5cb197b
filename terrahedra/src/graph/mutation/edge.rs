use tracing::trace;

use crate::graph::core::Core;
use crate::graph::edge::{Edge, EdgeKey};
use crate::graph::mutation::face;
use crate::graph::vertex::VertexKey;
use crate::graph::{GraphError, OptionExt as _};
use crate::primitive::Segment;

/// Gets the edge between two vertices, inserting it if there is no such edge.
///
/// # Errors
///
/// Returns an error if either vertex is not present in the graph.
pub fn insert(core: &mut Core, a: VertexKey, b: VertexKey) -> Result<EdgeKey, GraphError> {
    let segment = Segment::new(
        core.vertices.try_get(&a)?.position,
        core.vertices.try_get(&b)?.position,
    );
    if let Some(ab) = core.edge_cache.get(&segment) {
        return Ok(*ab);
    }
    let ab = core.edges.insert(Edge::new(a, b));
    core.edge_cache.insert(segment, ab);
    for key in [a, b] {
        core.vertices.get_mut(&key).expect_consistent().connect_edge(ab);
    }
    Ok(ab)
}

/// Removes an edge and all faces incident to it.
///
/// The vertices of the edge remain in the graph.
pub fn remove(core: &mut Core, ab: EdgeKey) -> Result<Edge, GraphError> {
    let faces = core.edges.try_get(&ab)?.faces.clone();
    for abc in faces.iter().copied() {
        face::remove(core, abc)?;
    }
    let edge = core.edges.remove(&ab).expect_consistent();
    let [a, b] = edge.vertices;
    let segment = Segment::new(
        core.vertices.get(&a).expect_consistent().position,
        core.vertices.get(&b).expect_consistent().position,
    );
    core.edge_cache.remove(&segment);
    for key in [a, b] {
        core.vertices
            .get_mut(&key)
            .expect_consistent()
            .disconnect_edge(ab);
    }
    trace!(edge = ?ab, faces = faces.len(), "Removed edge");
    Ok(edge)
}
