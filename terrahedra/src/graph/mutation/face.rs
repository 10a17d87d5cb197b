use tracing::trace;

use crate::graph::core::Core;
use crate::graph::face::{Face, FaceKey};
use crate::graph::mutation::edge;
use crate::graph::vertex::VertexKey;
use crate::graph::{GraphError, OptionExt as _};
use crate::primitive::Triangle;

/// Gets the face formed by three vertices in winding order, inserting it if
/// there is no such face.
///
/// Any of the three edges of the face that are missing are inserted as well.
///
/// # Errors
///
/// Returns an error if any of the vertices is not present in the graph. The
/// graph is not modified in that case.
pub fn insert(core: &mut Core, perimeter: [VertexKey; 3]) -> Result<FaceKey, GraphError> {
    let [a, b, c] = perimeter;
    let triangle = Triangle::new(
        core.vertices.try_get(&a)?.position,
        core.vertices.try_get(&b)?.position,
        core.vertices.try_get(&c)?.position,
    );
    if let Some(abc) = core.face_cache.get(&triangle) {
        return Ok(*abc);
    }
    let sides = [
        edge::insert(core, a, b)?,
        edge::insert(core, b, c)?,
        edge::insert(core, c, a)?,
    ];
    let abc = core.faces.insert(Face::new(perimeter, sides));
    core.face_cache.insert(triangle, abc);
    for key in perimeter {
        core.vertices.get_mut(&key).expect_consistent().connect_face(abc);
    }
    for key in sides {
        core.edges.get_mut(&key).expect_consistent().connect_face(abc);
    }
    Ok(abc)
}

/// Removes a face.
///
/// The vertices and edges of the face remain in the graph.
pub fn remove(core: &mut Core, abc: FaceKey) -> Result<Face, GraphError> {
    core.faces.try_get(&abc)?;
    let face = core.faces.remove(&abc).expect_consistent();
    let position = |key: &VertexKey| core.vertices.get(key).expect_consistent().position;
    let [a, b, c] = face.vertices;
    let triangle = Triangle::new(position(&a), position(&b), position(&c));
    core.face_cache.remove(&triangle);
    for key in face.vertices {
        core.vertices
            .get_mut(&key)
            .expect_consistent()
            .disconnect_face(abc);
    }
    for key in face.edges {
        core.edges.get_mut(&key).expect_consistent().disconnect_face(abc);
    }
    trace!(face = ?abc, "Removed face");
    Ok(face)
}

#[cfg(test)]
mod tests {
    use crate::geometry::Position;
    use crate::graph::core::Core;
    use crate::graph::mutation::{face, vertex};

    #[test]
    fn insert_connects_incident_entities() {
        let mut core = Core::empty();
        let a = vertex::insert(&mut core, Position::new(0.0, 0.0, 0.0));
        let b = vertex::insert(&mut core, Position::new(1.0, 0.0, 0.0));
        let c = vertex::insert(&mut core, Position::new(0.0, 1.0, 0.0));

        let abc = face::insert(&mut core, [a, b, c]).unwrap();

        assert_eq!(3, core.edges.len());
        for key in [a, b, c] {
            let vertex = core.vertices.get(&key).unwrap();
            assert_eq!(&[abc], vertex.faces.as_slice());
            assert_eq!(2, vertex.edges.len());
        }
        for (_, edge) in core.edges.iter() {
            assert_eq!(&[abc], edge.faces.as_slice());
        }
    }

    #[test]
    fn insert_is_invariant_to_rotation_only() {
        let mut core = Core::empty();
        let a = vertex::insert(&mut core, Position::new(0.0, 0.0, 0.0));
        let b = vertex::insert(&mut core, Position::new(1.0, 0.0, 0.0));
        let c = vertex::insert(&mut core, Position::new(0.0, 1.0, 0.0));

        let abc = face::insert(&mut core, [a, b, c]).unwrap();
        assert_eq!(abc, face::insert(&mut core, [b, c, a]).unwrap());
        assert_eq!(abc, face::insert(&mut core, [c, a, b]).unwrap());

        let acb = face::insert(&mut core, [a, c, b]).unwrap();
        assert_ne!(abc, acb);
        assert_eq!(2, core.faces.len());
        // Both windings share the same three edges.
        assert_eq!(3, core.edges.len());
    }

    #[test]
    fn remove_keeps_vertices_and_edges() {
        let mut core = Core::empty();
        let a = vertex::insert(&mut core, Position::new(0.0, 0.0, 0.0));
        let b = vertex::insert(&mut core, Position::new(1.0, 0.0, 0.0));
        let c = vertex::insert(&mut core, Position::new(0.0, 1.0, 0.0));
        let abc = face::insert(&mut core, [a, b, c]).unwrap();

        face::remove(&mut core, abc).unwrap();

        assert_eq!(0, core.faces.len());
        assert!(core.face_cache.is_empty());
        assert_eq!(3, core.vertices.len());
        assert_eq!(3, core.edges.len());
        assert!(core.edges.iter().all(|(_, edge)| edge.faces.is_empty()));
        assert!(face::remove(&mut core, abc).is_err());
    }
}
