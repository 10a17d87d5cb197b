//! Geometric types and exact comparison of positional data.
//!
//! Terrahedra represents geometry with [`nalgebra`] types. Positions are
//! [`Point3`]s and normals are [`Vector3`]s, both over `f32`.
//!
//! Vertex coincidence is decided by _exact_ equality of coordinates. There is
//! no epsilon: two positions that differ in the last bit of any coordinate are
//! distinct. Comparison and hashing are delegated to [`decorum`], which treats
//! `0.0` and `-0.0` as equal and considers `NaN` equal to itself so that
//! positions can be used as keys in hash maps.
//!
//! [`decorum`]: https://crates.io/crates/decorum
//! [`nalgebra`]: https://crates.io/crates/nalgebra

use decorum::cmp::FloatEq;
use decorum::hash::FloatHash;
use fnv::FnvHasher;
use nalgebra::{Point3, Vector2, Vector3};
use std::hash::{Hash, Hasher};

/// Scalar type of all positional data.
pub type Scalar = f32;

/// Position of a vertex.
pub type Position = Point3<Scalar>;

/// Normal of a vertex, edge, or face.
///
/// Normals are unit vectors when well-defined. Degenerate geometry yields
/// `NaN` components.
pub type Normal = Vector3<Scalar>;

/// Texture coordinate.
pub type Uv = Vector2<Scalar>;

/// Exact equality of two positions.
pub fn position_eq(a: &Position, b: &Position) -> bool {
    a.coords
        .iter()
        .zip(b.coords.iter())
        .all(|(a, b)| a.float_eq(b))
}

/// Feeds a position into a hasher consistently with [`position_eq`].
pub fn hash_position<H>(position: &Position, state: &mut H)
where
    H: Hasher,
{
    for x in position.coords.iter() {
        x.float_hash(state);
    }
}

/// Hashes a position in isolation.
///
/// Used to combine the hashes of several positions with commutative
/// operations, which is how orientation-insensitive keys hash.
pub(crate) fn position_digest(position: &Position) -> u64 {
    let mut state = FnvHasher::default();
    hash_position(position, &mut state);
    state.finish()
}

/// Hash map key of a single position.
///
/// Two keys are equal if and only if their positions are exactly equal.
#[derive(Clone, Copy, Debug)]
pub struct PositionKey(pub Position);

impl PositionKey {
    pub fn into_inner(self) -> Position {
        self.0
    }
}

impl From<Position> for PositionKey {
    fn from(position: Position) -> Self {
        PositionKey(position)
    }
}

impl Eq for PositionKey {}

impl Hash for PositionKey {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        hash_position(&self.0, state);
    }
}

impl PartialEq for PositionKey {
    fn eq(&self, other: &Self) -> bool {
        position_eq(&self.0, &other.0)
    }
}

/// Normalizes the sum of a collection of normals.
///
/// An empty collection produces `NaN` components, because the zero vector
/// cannot be normalized.
pub(crate) fn mean_normal<I>(normals: I) -> Normal
where
    I: IntoIterator<Item = Normal>,
{
    normals
        .into_iter()
        .fold(Normal::zeros(), |sum, normal| sum + normal)
        .normalize()
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashSet;

    use crate::geometry::{mean_normal, position_eq, Normal, Position, PositionKey};

    #[test]
    fn exact_equality() {
        let a = Position::new(1.0, 2.0, 3.0);
        let b = Position::new(1.0, 2.0, 3.0 + f32::EPSILON * 4.0);

        assert!(position_eq(&a, &a));
        assert!(!position_eq(&a, &b));
        assert!(position_eq(
            &Position::new(0.0, 0.0, 0.0),
            &Position::new(-0.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn key_deduplication() {
        let mut keys = FnvHashSet::default();
        keys.insert(PositionKey(Position::new(1.0, 0.0, 0.0)));
        keys.insert(PositionKey(Position::new(1.0, 0.0, 0.0)));
        keys.insert(PositionKey(Position::new(0.0, 1.0, 0.0)));

        assert_eq!(2, keys.len());
    }

    #[test]
    fn mean_of_no_normals_is_nan() {
        let normal = mean_normal(Vec::<Normal>::new());

        assert!(normal.x.is_nan());
    }
}
