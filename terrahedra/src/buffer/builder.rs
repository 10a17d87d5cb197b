use derivative::Derivative;
use tracing::debug;

use crate::buffer::{BufferError, Index, MeshBuffer};
use crate::geometry::{Normal, Position, Uv};
use crate::graph::face::FaceView;
use crate::graph::vertex::VertexView;
use crate::graph::MeshGraph;

type VertexTransform<'a> = Box<dyn 'a + Fn(VertexView<'_>) -> Position>;
type UvTransform<'a> = Box<dyn 'a + Fn(FaceView<'_>) -> [Uv; 3]>;
type NormalTransform<'a> = Box<dyn 'a + Fn(FaceView<'_>) -> [Normal; 3]>;

/// Parameters for building a [`MeshBuffer`] from a graph.
///
/// # Examples
///
/// ```
/// use terrahedra::buffer::BuildParams;
///
/// // Smooth normals by default.
/// let params = BuildParams::default();
/// assert!(params.smooth_normals);
///
/// // Or flat normals for a faceted look.
/// let params = BuildParams::faceted();
/// assert!(!params.smooth_normals);
/// ```
///
/// [`MeshBuffer`]: crate::buffer::MeshBuffer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildParams {
    /// Whether emitted normals are the averaged normals of graph vertices.
    ///
    /// If `false`, all three normals of a face are the normal of that face.
    /// This has no effect if a normal transform is given.
    /// Default: `true`
    pub smooth_normals: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            smooth_normals: true,
        }
    }
}

impl BuildParams {
    /// Create params with normals that are continuous across faces.
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            smooth_normals: true,
        }
    }

    /// Create params with normals that are constant over each face.
    #[must_use]
    pub fn faceted() -> Self {
        Self {
            smooth_normals: false,
        }
    }
}

/// Builds flattened [`MeshBuffer`]s from a [`MeshGraph`].
///
/// Each face is emitted as three vertices in winding order, so vertices of
/// the graph are emitted once per incident face. Faces are emitted in the
/// iteration order of the graph and the index buffer is the sequence
/// $0, 1, \ldots, 3f - 1$ for $f$ faces.
///
/// Transforms are optional. Without a vertex transform, positions are copied
/// from the graph. Without a texture coordinate transform, all texture
/// coordinates are zero. Without a normal transform, normals are computed
/// according to [`BuildParams`].
///
/// Transforms are called synchronously while building and only have
/// immutable access to the graph.
///
/// # Examples
///
/// Displacing vertices along their normals:
///
/// ```rust
/// use terrahedra::buffer::MeshBuffer;
/// use terrahedra::geometry::Position;
/// use terrahedra::graph::MeshGraph;
///
/// let mut graph = MeshGraph::new();
/// graph.add_face_at(
///     Position::new(0.0, 0.0, 0.0),
///     Position::new(1.0, 0.0, 0.0),
///     Position::new(0.0, 1.0, 0.0),
/// );
///
/// let buffer: MeshBuffer = graph
///     .mesh_builder()
///     .with_vertex_transform(|vertex| *vertex.position() + vertex.normal() * 0.5)
///     .build()
///     .unwrap();
/// assert!(buffer.as_position_slice().iter().all(|position| position.z == 0.5));
/// ```
///
/// [`BuildParams`]: crate::buffer::BuildParams
/// [`MeshBuffer`]: crate::buffer::MeshBuffer
/// [`MeshGraph`]: crate::graph::MeshGraph
#[derive(Derivative)]
#[derivative(Debug)]
pub struct MeshBuilder<'a> {
    #[derivative(Debug = "ignore")]
    graph: &'a MeshGraph,
    params: BuildParams,
    #[derivative(Debug = "ignore")]
    vertex_transform: Option<VertexTransform<'a>>,
    #[derivative(Debug = "ignore")]
    uv_transform: Option<UvTransform<'a>>,
    #[derivative(Debug = "ignore")]
    normal_transform: Option<NormalTransform<'a>>,
}

impl<'a> MeshBuilder<'a> {
    pub(crate) fn new(graph: &'a MeshGraph) -> Self {
        MeshBuilder {
            graph,
            params: Default::default(),
            vertex_transform: None,
            uv_transform: None,
            normal_transform: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: BuildParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn smooth_normals(mut self, smooth: bool) -> Self {
        self.params.smooth_normals = smooth;
        self
    }

    /// Sets the function that computes the position of each emitted vertex.
    ///
    /// The function is called once per face for each vertex of that face.
    #[must_use]
    pub fn with_vertex_transform<F>(mut self, f: F) -> Self
    where
        F: 'a + Fn(VertexView<'_>) -> Position,
    {
        self.vertex_transform = Some(Box::new(f));
        self
    }

    /// Sets the function that computes the texture coordinates of each face.
    #[must_use]
    pub fn with_uv_transform<F>(mut self, f: F) -> Self
    where
        F: 'a + Fn(FaceView<'_>) -> [Uv; 3],
    {
        self.uv_transform = Some(Box::new(f));
        self
    }

    /// Sets the function that computes the normals of each face.
    ///
    /// This overrides `BuildParams::smooth_normals`.
    #[must_use]
    pub fn with_normal_transform<F>(mut self, f: F) -> Self
    where
        F: 'a + Fn(FaceView<'_>) -> [Normal; 3],
    {
        self.normal_transform = Some(Box::new(f));
        self
    }

    /// Builds a new `MeshBuffer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of emitted vertices cannot be indexed
    /// by `N`.
    pub fn build<N>(&self) -> Result<MeshBuffer<N>, BufferError>
    where
        N: Index,
    {
        let mut buffer = MeshBuffer::with_capacity(self.graph.face_count());
        self.build_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Builds into an existing `MeshBuffer`, replacing its contents.
    ///
    /// The allocations of the buffer are reused. On error, the buffer is left
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of emitted vertices cannot be indexed
    /// by `N`.
    pub fn build_into<N>(&self, buffer: &mut MeshBuffer<N>) -> Result<(), BufferError>
    where
        N: Index,
    {
        buffer.clear();
        let count = self.graph.face_count();
        if count > 0 {
            <N as num::NumCast>::from(count * 3 - 1).ok_or(BufferError::IndexOverflow)?;
        }
        buffer.reserve(count);
        for face in self.graph.faces() {
            let normals = if let Some(f) = self.normal_transform.as_ref() {
                f(face)
            }
            else if self.params.smooth_normals {
                let mut normals = [Normal::zeros(); 3];
                for (normal, vertex) in normals.iter_mut().zip(face.vertices()) {
                    *normal = vertex.normal();
                }
                normals
            }
            else {
                [face.normal(); 3]
            };
            let uvs = self
                .uv_transform
                .as_ref()
                .map_or([Uv::zeros(); 3], |f| f(face));
            for ((vertex, normal), uv) in face.vertices().zip(normals).zip(uvs) {
                let position = self
                    .vertex_transform
                    .as_ref()
                    .map_or(*vertex.position(), |f| f(vertex));
                let index = <N as num::NumCast>::from(buffer.positions.len())
                    .ok_or(BufferError::IndexOverflow)?;
                buffer.indices.push(index);
                buffer.positions.push(position);
                buffer.normals.push(normal);
                buffer.uvs.push(uv);
            }
        }
        debug!(
            faces = count,
            vertices = buffer.vertex_count(),
            smooth_normals = self.params.smooth_normals,
            "Built mesh buffer"
        );
        Ok(())
    }
}
