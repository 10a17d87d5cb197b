//! Linear representation of triangle meshes.
//!
//! This module provides a `MeshBuffer` that represents a mesh as lock-step
//! attribute buffers (positions, normals, and texture coordinates) and a flat
//! index buffer in which each consecutive triplet of indices forms a triangle.
//! This layout is well-suited for graphics pipelines and is the shape of raw
//! mesh data both consumed and produced by a [`MeshGraph`].
//!
//! # Ingestion and Output
//!
//! Buffers that are ingested by a graph only require positions and indices.
//! Any normals and texture coordinates are ignored, because a graph derives
//! normals from its geometry.
//!
//! Buffers that are built from a graph are _flattened_: every face is emitted
//! as three independent vertices and the index buffer is the trivial sequence
//! $0, 1, \ldots, n - 1$. See [`MeshBuilder`].
//!
//! # Examples
//!
//! Constructing a buffer from raw data:
//!
//! ```rust
//! use terrahedra::buffer::MeshBuffer;
//! use terrahedra::prelude::*;
//!
//! let buffer = MeshBuffer::<u16>::from_raw_buffers(
//!     vec![0, 1, 2, 2, 1, 3],
//!     vec![
//!         [0.0f32, 0.0, 0.0],
//!         [1.0, 0.0, 0.0],
//!         [0.0, 1.0, 0.0],
//!         [1.0, 1.0, 0.0],
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(2, buffer.triangle_count());
//! ```
//!
//! [`MeshBuilder`]: crate::buffer::MeshBuilder
//! [`MeshGraph`]: crate::graph::MeshGraph

// Output indices are sequential and bounded by the length of the position
// buffer, so the only conversion that can fail is from `usize` into a narrow
// index type `N`.

mod builder;

use num::{Integer, NumCast, Unsigned};
use std::fmt::Debug;
use thiserror::Error;

use crate::geometry::{Normal, Position, Uv};
use crate::primitive::Triangle;

pub use crate::buffer::builder::{BuildParams, MeshBuilder};

#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    #[error("index {index} into vertex data out of bounds; length is {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("index overflow")]
    IndexOverflow,
    #[error("index buffer of length {len} is not aligned to triangles")]
    IndexUnaligned { len: usize },
}

/// Index type of a [`MeshBuffer`].
///
/// [`MeshBuffer`]: crate::buffer::MeshBuffer
pub trait Index: Copy + Debug + Integer + NumCast + Unsigned {}

impl<N> Index for N where N: Copy + Debug + Integer + NumCast + Unsigned {}

/// Constructs a mesh from an index buffer and a position buffer.
///
/// Each consecutive triplet of indices forms a triangle whose winding follows
/// the order of the indices.
pub trait FromRawBuffers<N, P>: Sized {
    type Error: Debug;

    fn from_raw_buffers<I, J>(indices: I, positions: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = P>;
}

/// Triangle mesh buffer.
///
/// Normals and texture coordinates are either empty or in lock-step with
/// positions. The index buffer is always aligned to triangles and never
/// indexes out of bounds.
#[derive(Clone, Debug)]
pub struct MeshBuffer<N = u32>
where
    N: Index,
{
    indices: Vec<N>,
    positions: Vec<Position>,
    normals: Vec<Normal>,
    uvs: Vec<Uv>,
}

impl<N> MeshBuffer<N>
where
    N: Index,
{
    pub fn new() -> Self {
        MeshBuffer {
            indices: Vec::new(),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
        }
    }

    pub fn with_capacity(triangles: usize) -> Self {
        let n = triangles * 3;
        MeshBuffer {
            indices: Vec::with_capacity(n),
            positions: Vec::with_capacity(n),
            normals: Vec::with_capacity(n),
            uvs: Vec::with_capacity(n),
        }
    }

    /// Converts a `MeshBuffer` into its index and position buffers.
    pub fn into_raw_buffers(self) -> (Vec<N>, Vec<Position>) {
        let MeshBuffer {
            indices, positions, ..
        } = self;
        (indices, positions)
    }

    pub fn as_index_slice(&self) -> &[N] {
        self.indices.as_slice()
    }

    pub fn as_position_slice(&self) -> &[Position] {
        self.positions.as_slice()
    }

    pub fn as_normal_slice(&self) -> &[Normal] {
        self.normals.as_slice()
    }

    pub fn as_uv_slice(&self) -> &[Uv] {
        self.uvs.as_slice()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Gets an iterator over the triangles of the buffer in index order.
    pub fn triangles(&self) -> impl '_ + Clone + Iterator<Item = Triangle> {
        self.indices.chunks(3).map(move |triangle| {
            let position = |index: &N| self.positions[to_usize(*index)];
            Triangle::new(
                position(&triangle[0]),
                position(&triangle[1]),
                position(&triangle[2]),
            )
        })
    }

    fn clear(&mut self) {
        self.indices.clear();
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
    }

    fn reserve(&mut self, triangles: usize) {
        let n = triangles * 3;
        self.indices.reserve(n);
        self.positions.reserve(n);
        self.normals.reserve(n);
        self.uvs.reserve(n);
    }
}

impl<N> Default for MeshBuffer<N>
where
    N: Index,
{
    fn default() -> Self {
        MeshBuffer::new()
    }
}

impl<N, P> FromRawBuffers<N, P> for MeshBuffer<N>
where
    N: Index,
    P: Into<Position>,
{
    type Error = BufferError;

    /// Creates a `MeshBuffer` from raw index and position buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the length of the index buffer is not a multiple of
    /// three or if any index is out of bounds.
    fn from_raw_buffers<I, J>(indices: I, positions: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = P>,
    {
        let indices = indices.into_iter().collect::<Vec<_>>();
        let positions = positions.into_iter().map(Into::into).collect::<Vec<_>>();
        validate(&indices, positions.len())?;
        Ok(MeshBuffer {
            indices,
            positions,
            normals: Vec::new(),
            uvs: Vec::new(),
        })
    }
}

/// Checks that an index buffer is aligned to triangles and indexes into a
/// position buffer of the given length.
///
/// Returns the indices as `usize`s.
pub(crate) fn validate<N>(indices: &[N], len: usize) -> Result<Vec<usize>, BufferError>
where
    N: Index,
{
    if indices.len() % 3 != 0 {
        return Err(BufferError::IndexUnaligned { len: indices.len() });
    }
    indices
        .iter()
        .map(|index| {
            let index = <usize as NumCast>::from(*index).ok_or(BufferError::IndexOverflow)?;
            if index < len {
                Ok(index)
            }
            else {
                Err(BufferError::IndexOutOfBounds { index, len })
            }
        })
        .collect()
}

// Only used for indices of a consistent `MeshBuffer`, which always fit into
// `usize` because they index into a `Vec`.
fn to_usize<N>(index: N) -> usize
where
    N: Index,
{
    <usize as NumCast>::from(index).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use crate::buffer::{BufferError, MeshBuffer};
    use crate::geometry::Position;
    use crate::prelude::*;
    use crate::primitive::Triangle;

    fn quad() -> Vec<[f32; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn from_raw_buffers() {
        let buffer = MeshBuffer::<u32>::from_raw_buffers(vec![0, 1, 2, 2, 1, 3], quad()).unwrap();

        assert_eq!(4, buffer.vertex_count());
        assert_eq!(2, buffer.triangle_count());
        assert!(buffer.as_normal_slice().is_empty());
        assert_eq!(
            Triangle::new(
                Position::new(0.0, 1.0, 0.0),
                Position::new(1.0, 0.0, 0.0),
                Position::new(1.0, 1.0, 0.0),
            ),
            buffer.triangles().nth(1).unwrap()
        );
    }

    #[test]
    fn reject_unaligned_indices() {
        assert_eq!(
            Some(BufferError::IndexUnaligned { len: 4 }),
            MeshBuffer::<u32>::from_raw_buffers(vec![0, 1, 2, 3], quad()).err()
        );
    }

    #[test]
    fn reject_out_of_bounds_indices() {
        assert_eq!(
            Some(BufferError::IndexOutOfBounds { index: 4, len: 4 }),
            MeshBuffer::<u8>::from_raw_buffers(vec![0, 1, 4], quad()).err()
        );
    }

    #[test]
    fn into_raw_buffers() {
        let (indices, positions) = MeshBuffer::<u16>::from_raw_buffers(vec![3, 2, 1], quad())
            .unwrap()
            .into_raw_buffers();

        assert_eq!(vec![3, 2, 1], indices);
        assert_eq!(4, positions.len());
    }
}
