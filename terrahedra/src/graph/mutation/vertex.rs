use tracing::trace;

use crate::geometry::{Position, PositionKey};
use crate::graph::core::Core;
use crate::graph::mutation::{edge, face};
use crate::graph::vertex::{Vertex, VertexKey};
use crate::graph::{GraphError, OptionExt as _};

/// Gets the vertex at a position, inserting it if there is no such vertex.
pub fn insert(core: &mut Core, position: Position) -> VertexKey {
    let key = PositionKey(position);
    if let Some(a) = core.vertex_cache.get(&key) {
        return *a;
    }
    let a = core.vertices.insert(Vertex::new(position));
    core.vertex_cache.insert(key, a);
    a
}

/// Removes a vertex and all faces and edges incident to it.
pub fn remove(core: &mut Core, a: VertexKey) -> Result<Vertex, GraphError> {
    let (faces, edges) = {
        let vertex = core.vertices.try_get(&a)?;
        (vertex.faces.clone(), vertex.edges.clone())
    };
    for abc in faces.iter().copied() {
        face::remove(core, abc)?;
    }
    for ab in edges.iter().copied() {
        edge::remove(core, ab)?;
    }
    let vertex = core.vertices.remove(&a).expect_consistent();
    core.vertex_cache.remove(&PositionKey(vertex.position));
    trace!(
        vertex = ?a,
        faces = faces.len(),
        edges = edges.len(),
        "Removed vertex"
    );
    Ok(vertex)
}
