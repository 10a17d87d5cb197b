use derivative::Derivative;
use fnv::FnvHashMap;

use crate::entity::storage::{GraphId, SlotStorage};
use crate::geometry::PositionKey;
use crate::graph::edge::{Edge, EdgeKey};
use crate::graph::face::{Face, FaceKey};
use crate::graph::vertex::{Vertex, VertexKey};
use crate::primitive::{Segment, Triangle};

/// Storage and geometric caches of a graph.
///
/// Each kind of entity is stored twice: once in an arena, which owns the
/// entity and provides iteration, and once in a cache, which maps the
/// geometric key of the entity to its arena key for deduplication and lookup.
/// Both representations always contain exactly the same entities. `Core` does
/// not enforce this on its own; all mutations go through the `mutation`
/// module.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Core {
    id: GraphId,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) vertices: SlotStorage<Vertex>,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) edges: SlotStorage<Edge>,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) faces: SlotStorage<Face>,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) vertex_cache: FnvHashMap<PositionKey, VertexKey>,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) edge_cache: FnvHashMap<Segment, EdgeKey>,
    #[derivative(Debug = "ignore")]
    pub(in crate::graph) face_cache: FnvHashMap<Triangle, FaceKey>,
}

impl Core {
    pub fn empty() -> Self {
        let id = GraphId::unique();
        Core {
            id,
            vertices: SlotStorage::new(id),
            edges: SlotStorage::new(id),
            faces: SlotStorage::new(id),
            vertex_cache: Default::default(),
            edge_cache: Default::default(),
            face_cache: Default::default(),
        }
    }
}

impl Default for Core {
    fn default() -> Self {
        Core::empty()
    }
}
