//! Triangles and segments as orientation-insensitive value keys.
//!
//! [`Triangle`] and [`Segment`] describe geometry by position alone. They are
//! not owned by any graph and are constructed on demand, either to query a
//! [`MeshGraph`] or to insert into one.
//!
//! Equality of these types is invariant under the symmetries that preserve the
//! identity of the entity they describe:
//!
//! | Type       | Equal under                     | Not equal under         |
//! |------------|---------------------------------|-------------------------|
//! | `Triangle` | cyclic rotation of $(a, b, c)$  | reversal (winding flip) |
//! | `Segment`  | swapping $a$ and $b$            |                         |
//!
//! Hashing follows equality: the positions of a key are hashed independently
//! and combined with a commutative operation.
//!
//! # Examples
//!
//! ```rust
//! use terrahedra::geometry::Position;
//! use terrahedra::primitive::Triangle;
//!
//! let a = Position::new(0.0, 0.0, 0.0);
//! let b = Position::new(1.0, 0.0, 0.0);
//! let c = Position::new(0.0, 1.0, 0.0);
//!
//! assert_eq!(Triangle::new(a, b, c), Triangle::new(b, c, a));
//! assert_ne!(Triangle::new(a, b, c), Triangle::new(a, c, b));
//! ```
//!
//! [`MeshGraph`]: crate::graph::MeshGraph

use std::hash::{Hash, Hasher};

use crate::geometry::{position_digest, position_eq, Normal, Position, Scalar};
use crate::IteratorExt as _;

/// Triangle described by three positions in winding order.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub a: Position,
    pub b: Position,
    pub c: Position,
}

impl Triangle {
    pub fn new(a: Position, b: Position, c: Position) -> Self {
        Triangle { a, b, c }
    }

    /// Gets the positions of the triangle in winding order.
    pub fn positions(&self) -> [Position; 3] {
        [self.a, self.b, self.c]
    }

    /// Gets the segments $\overline{ab}$, $\overline{bc}$, and
    /// $\overline{ca}$ of the triangle.
    pub fn segments(&self) -> impl Clone + Iterator<Item = Segment> {
        let positions = self.positions();
        positions
            .into_iter()
            .perimeter()
            .map(|(a, b)| Segment::new(a, b))
    }

    /// Rotates the positions of the triangle cyclically.
    ///
    /// A single rotation maps $(a, b, c)$ to $(c, a, b)$. Negative rotations
    /// turn the other way. The result is always equal to `self`.
    pub fn rotate(&self, rotations: isize) -> Self {
        match rotations.rem_euclid(3) {
            0 => *self,
            1 => Triangle::new(self.c, self.a, self.b),
            _ => Triangle::new(self.b, self.c, self.a),
        }
    }

    /// Gets the triangle with reversed winding.
    ///
    /// The positions $a$ and $b$ are swapped, which flips the normal. The
    /// result is never equal to `self` unless the triangle is degenerate.
    pub fn reversed(&self) -> Self {
        Triangle::new(self.b, self.a, self.c)
    }

    pub fn center(&self) -> Position {
        Position::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Gets the unit normal of the triangle.
    ///
    /// The sign of the normal depends on the winding of the triangle. If the
    /// triangle is degenerate, then the normal has `NaN` components.
    pub fn normal(&self) -> Normal {
        self.cross().normalize()
    }

    /// Gets the geometric area of the triangle (half the magnitude of the
    /// cross product of its sides).
    pub fn area(&self) -> Scalar {
        self.cross().norm() / 2.0
    }

    fn cross(&self) -> Normal {
        (self.b - self.a).cross(&(self.c - self.a))
    }
}

impl Eq for Triangle {}

impl From<[Position; 3]> for Triangle {
    fn from(positions: [Position; 3]) -> Self {
        let [a, b, c] = positions;
        Triangle::new(a, b, c)
    }
}

impl Hash for Triangle {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u64(
            position_digest(&self.a)
                .wrapping_add(position_digest(&self.b))
                .wrapping_add(position_digest(&self.c)),
        );
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        let eq = |a: &Triangle, b: &Triangle| {
            position_eq(&a.a, &b.a) && position_eq(&a.b, &b.b) && position_eq(&a.c, &b.c)
        };
        eq(self, other) || eq(self, &other.rotate(1)) || eq(self, &other.rotate(2))
    }
}

/// Line segment between two positions.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub a: Position,
    pub b: Position,
}

impl Segment {
    pub fn new(a: Position, b: Position) -> Self {
        Segment { a, b }
    }

    pub fn positions(&self) -> [Position; 2] {
        [self.a, self.b]
    }

    pub fn reversed(&self) -> Self {
        Segment::new(self.b, self.a)
    }

    pub fn center(&self) -> Position {
        Position::from((self.a.coords + self.b.coords) / 2.0)
    }

    pub fn length(&self) -> Scalar {
        (self.a - self.b).norm()
    }

    pub fn squared_length(&self) -> Scalar {
        (self.a - self.b).norm_squared()
    }
}

impl Eq for Segment {}

impl From<[Position; 2]> for Segment {
    fn from(positions: [Position; 2]) -> Self {
        let [a, b] = positions;
        Segment::new(a, b)
    }
}

impl Hash for Segment {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u64(position_digest(&self.a).wrapping_add(position_digest(&self.b)));
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (position_eq(&self.a, &other.a) && position_eq(&self.b, &other.b))
            || (position_eq(&self.a, &other.b) && position_eq(&self.b, &other.a))
    }
}
