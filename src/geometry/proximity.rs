//! Nearby point pairs, the output of a geometry distance query.
//!
//! The geometry the query was called on plays the role of 'local', the
//! argument plays 'other'. A negative distance means the two points form a
//! colliding pair; a positive distance means they are the nearest points of
//! a separated-but-close pair.
//!
//! "No interaction" is represented by a plain empty `Vec<ProximityPair>`
//! value. There is no shared empty-collection singleton to protect from
//! mutation; callers get a value they own.

use glam::Vec3;

/// Identifies which element of a geometry contributed a contact point.
///
/// Scoped to the owning geometry's element arrays, so a consumer can reach
/// back to the exact sphere (or, for future shape variants, vertex/voxel)
/// that produced the contact without untyped aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactHint {
    /// Index into a sphere geometry's center/radius arrays.
    Sphere(usize),
}

/// A pair of nearby or colliding points between two geometries.
///
/// Pairs are produced by a distance query, consumed within the same
/// timestep, and discarded; [`ProximityPair::swap`] is the only permitted
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityPair {
    /// Position of the 'local' point [micrometers].
    pub local_pos: Vec3,
    /// Position of the 'other' point [micrometers].
    pub other_pos: Vec3,
    /// Signed distance between the two geometries at this pair
    /// [micrometers]. Negative values mean the pair is colliding.
    ///
    /// Note this follows the producing geometry's convention — for spheres
    /// it is center distance minus the radius sum, not the Euclidean
    /// distance between `local_pos` and `other_pos`.
    pub distance: f32,
    /// Element that produced the local point, if the producer recorded one.
    pub local_hint: Option<ContactHint>,
    /// Element that produced the other point, if the producer recorded one.
    pub other_hint: Option<ContactHint>,
}

impl ProximityPair {
    /// Pair of two points with no hinting data.
    pub fn new(local_pos: Vec3, other_pos: Vec3, distance: f32) -> Self {
        Self {
            local_pos,
            other_pos,
            distance,
            local_hint: None,
            other_hint: None,
        }
    }

    /// Pair of two points with per-side element hints.
    pub fn with_hints(
        local_pos: Vec3,
        other_pos: Vec3,
        distance: f32,
        local_hint: ContactHint,
        other_hint: ContactHint,
    ) -> Self {
        Self {
            local_pos,
            other_pos,
            distance,
            local_hint: Some(local_hint),
            other_hint: Some(other_hint),
        }
    }

    /// Exchange the notion of 'local' and 'other' in place.
    ///
    /// Used when the same pair has to be read from the counterpart
    /// geometry's viewpoint, so each side's update logic can treat itself
    /// as local.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.local_pos, &mut self.other_pos);
        std::mem::swap(&mut self.local_hint, &mut self.other_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_constructor_leaves_hints_unset() {
        let pair = ProximityPair::new(Vec3::ZERO, Vec3::X, -1.0);
        assert_eq!(pair.local_hint, None);
        assert_eq!(pair.other_hint, None);
        assert_eq!(pair.distance, -1.0);
    }

    #[test]
    fn swap_exchanges_positions_and_hints() {
        let mut pair = ProximityPair::with_hints(
            Vec3::ZERO,
            Vec3::X,
            -2.0,
            ContactHint::Sphere(0),
            ContactHint::Sphere(3),
        );
        pair.swap();

        assert_eq!(pair.local_pos, Vec3::X);
        assert_eq!(pair.other_pos, Vec3::ZERO);
        assert_eq!(pair.local_hint, Some(ContactHint::Sphere(3)));
        assert_eq!(pair.other_hint, Some(ContactHint::Sphere(0)));
        // Distance is viewpoint-independent.
        assert_eq!(pair.distance, -2.0);
    }

    #[test]
    fn double_swap_is_identity() {
        let original = ProximityPair::with_hints(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            0.5,
            ContactHint::Sphere(1),
            ContactHint::Sphere(2),
        );
        let mut pair = original;
        pair.swap();
        pair.swap();
        assert_eq!(pair, original);
    }
}
