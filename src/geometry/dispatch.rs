//! Shape-polymorphic distance dispatch.
//!
//! Collision algorithms are inherently pairwise, so instead of
//! single-receiver polymorphism the crate keeps a closed set of shape tags
//! and a dispatch table keyed by the ordered pair of tags. Each table entry
//! implements one shape-pair's algorithm; a pair with no entry is a query
//! error, never a panic.

use super::aabb::AxisAlignedBoundingBox;
use super::proximity::ProximityPair;
use super::spheres::Spheres;
use super::GeometryError;

/// The closed set of shape representations an agent can take.
///
/// `Mesh` and `MaskImg` are reserved tags: their payloads and algorithms
/// live outside this crate's scope, but keeping the tags here means the
/// dispatch table already has well-defined (erroring) slots for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeForm {
    /// Fixed-size sphere cluster ([`Spheres`]).
    Spheres,
    /// Surface mesh (reserved).
    Mesh,
    /// Voxel mask image (reserved).
    MaskImg,
}

/// A concrete agent geometry, tagged by its shape form.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Sphere-cluster representation.
    Spheres(Spheres),
}

impl Geometry {
    /// The shape-form tag, fixed at construction.
    pub fn form(&self) -> ShapeForm {
        match self {
            Geometry::Spheres(_) => ShapeForm::Spheres,
        }
    }

    /// The geometry's own bounding box (refreshed by [`Geometry::set_aabb`]).
    pub fn aabb(&self) -> &AxisAlignedBoundingBox {
        match self {
            Geometry::Spheres(s) => s.aabb(),
        }
    }

    /// Recompute this geometry's own bounding box from current shape state.
    pub fn set_aabb(&mut self) {
        match self {
            Geometry::Spheres(s) => s.set_aabb(),
        }
    }

    /// Recompute `target` from current shape state.
    pub fn write_aabb(&self, target: &mut AxisAlignedBoundingBox) {
        match self {
            Geometry::Spheres(s) => s.write_aabb(target),
        }
    }

    /// Borrow the sphere payload, if this is a sphere geometry.
    pub fn as_spheres(&self) -> Option<&Spheres> {
        match self {
            Geometry::Spheres(s) => Some(s),
        }
    }

    /// Mutably borrow the sphere payload, if this is a sphere geometry.
    pub fn as_spheres_mut(&mut self) -> Option<&mut Spheres> {
        match self {
            Geometry::Spheres(s) => Some(s),
        }
    }

    /// Promote another buffer of the same shape form onto this one.
    pub fn promote_from(&mut self, future: &Geometry) -> Result<(), GeometryError> {
        match (self, future) {
            (Geometry::Spheres(exposed), Geometry::Spheres(future)) => {
                exposed.promote_from(future)
            }
        }
    }
}

/// One entry of the pairwise dispatch table.
type DistanceFn = fn(&Geometry, &Geometry, f32) -> Vec<ProximityPair>;

/// Look up the distance algorithm for an ordered pair of shape tags.
fn lookup(local: ShapeForm, other: ShapeForm) -> Option<DistanceFn> {
    match (local, other) {
        (ShapeForm::Spheres, ShapeForm::Spheres) => Some(spheres_vs_spheres),
        _ => None,
    }
}

/// Compute proximity pairs between two geometries of possibly different
/// shape forms.
///
/// This is a pure function of the two geometries' current state. `local`
/// plays the 'local' role in the reported pairs. Pairs are reported only
/// below `threshold` (see [`Spheres::distances_to`]); no qualifying pair
/// yields an empty vector, which is a valid result, not an error.
///
/// # Errors
/// [`GeometryError::UnsupportedShapePair`] when the dispatch table has no
/// entry for the ordered tag pair.
pub fn get_distance(
    local: &Geometry,
    other: &Geometry,
    threshold: f32,
) -> Result<Vec<ProximityPair>, GeometryError> {
    let entry = lookup(local.form(), other.form()).ok_or(GeometryError::UnsupportedShapePair {
        local: local.form(),
        other: other.form(),
    })?;
    Ok(entry(local, other, threshold))
}

fn spheres_vs_spheres(local: &Geometry, other: &Geometry, threshold: f32) -> Vec<ProximityPair> {
    match (local, other) {
        (Geometry::Spheres(a), Geometry::Spheres(b)) => a.distances_to(b, threshold),
    }
}
